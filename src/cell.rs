pub(crate) const MAX_NEIGHBOURS: usize = 8;

/// Index handle into a grid's cell arena. Cells are never moved or removed,
/// so a handle stays valid for the life of its grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRef(pub(crate) usize);

#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) alive: bool,
    pub(crate) next_alive: bool,
    pub(crate) neighbours: Vec<CellRef>,
}

impl Cell {
    pub(crate) fn new(x: u32, y: u32, alive: bool) -> Self {
        Self {
            x,
            y,
            alive,
            next_alive: alive,
            neighbours: Vec::with_capacity(MAX_NEIGHBOURS),
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    /// How many cached neighbours are alive right now. At most 8.
    pub fn alive_neighbours(&self, cells: &[Cell]) -> usize {
        self.neighbours
            .iter()
            .filter(|&&CellRef(i)| cells[i].alive)
            .count()
    }

    pub fn to_char(&self) -> char {
        if self.alive {
            'o'
        } else {
            ' '
        }
    }
}
