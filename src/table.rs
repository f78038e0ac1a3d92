use crate::error::Error;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// FNV-1a, 32-bit.
fn fnv1a(key: &str) -> u32 {
    key.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

#[derive(Clone, Debug)]
enum Slot<V> {
    Empty,
    Occupied { hash: u32, key: String, value: V },
}

/// Fixed-capacity string-keyed store: open addressing with linear probing.
/// Capacity is always a power of two, so probe indices reduce with a mask.
/// There is no deletion, which keeps probe sequences correct without
/// tombstones: the first Empty slot on a probe path proves absence.
#[derive(Clone, Debug)]
pub struct Table<V> {
    slots: Vec<Slot<V>>,
    count: usize,
}

impl<V> Table<V> {
    /// Rounds `hint` up to the next power of two. The table never grows, so
    /// callers size it with headroom over the keys they intend to insert.
    pub fn with_capacity(hint: usize) -> Result<Self, Error> {
        if hint == 0 {
            return Err(Error::InvalidCapacity);
        }
        let mut slots = Vec::new();
        slots.resize_with(hint.next_power_of_two(), || Slot::Empty);
        Ok(Self { slots, count: 0 })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts, or updates in place if the key is already present (the count
    /// only moves on a fresh insert). `TableFull` after a whole cycle of
    /// probes finds neither the key nor an Empty slot; callers are expected
    /// to have pre-sized the table so this never happens.
    pub fn put(&mut self, key: &str, value: V) -> Result<(), Error> {
        let hash = fnv1a(key);
        let mask = self.slots.len() - 1;
        let mut idx = hash as usize & mask;
        for _ in 0..self.slots.len() {
            match &mut self.slots[idx] {
                Slot::Occupied { hash: h, key: k, value: v } if *h == hash && k.as_str() == key => {
                    *v = value;
                    return Ok(());
                }
                Slot::Occupied { .. } => idx = (idx + 1) & mask,
                slot @ Slot::Empty => {
                    *slot = Slot::Occupied { hash, key: key.to_owned(), value };
                    self.count += 1;
                    return Ok(());
                }
            }
        }
        Err(Error::TableFull)
    }

    /// Absence is a normal outcome, not an error.
    pub fn get(&self, key: &str) -> Option<&V> {
        let hash = fnv1a(key);
        let mask = self.slots.len() - 1;
        let mut idx = hash as usize & mask;
        for _ in 0..self.slots.len() {
            match &self.slots[idx] {
                Slot::Occupied { hash: h, key: k, value } if *h == hash && k.as_str() == key => {
                    return Some(value);
                }
                Slot::Occupied { .. } => idx = (idx + 1) & mask,
                Slot::Empty => return None,
            }
        }
        None
    }

    /// Occupied values in storage order. Deterministic for a fixed key set
    /// and insertion sequence, unrelated to insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty => None,
        })
    }

    pub fn entries(&self) -> Entries<'_, V> {
        Entries { slots: &self.slots, index: 0 }
    }
}

/// Restartable cursor over occupied slots in storage order.
pub struct Entries<'a, V> {
    slots: &'a [Slot<V>],
    index: usize,
}

impl<V> Entries<'_, V> {
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.slots.len() {
            let i = self.index;
            self.index += 1;
            if let Slot::Occupied { key, value, .. } = &self.slots[i] {
                return Some((key, value));
            }
        }
        None
    }
}
