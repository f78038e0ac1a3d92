use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    cell::{Cell, CellRef},
    error::Error,
    table::Table,
};

const LIVE_PROBABILITY: f32 = 0.2;

/// The 8 compass offsets around a cell, in a fixed scan order.
fn directions() -> impl Iterator<Item = (i64, i64)> {
    (-1..=1)
        .cartesian_product(-1..=1)
        .filter(|&d| d != (0, 0))
}

fn key_of(x: u32, y: u32) -> String {
    format!("{x}-{y}")
}

fn parse_key(key: &str) -> Option<(u32, u32)> {
    let (x, y) = key.split_once('-')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

/// The complete simulation surface: an arena of cells plus a table mapping
/// the `"x-y"` key of each coordinate to its arena handle. All cells are
/// created up front; ticking only mutates them in place.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    ticks: u32,
    pub(crate) cells: Vec<Cell>,
    table: Table<CellRef>,
}

impl Grid {
    /// Random population: each coordinate draws once from the seeded rng and
    /// starts alive with probability 0.2.
    pub fn new(width: u32, height: u32, seed: u64) -> Result<Self, Error> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(width, height, |_, _| {
            rng.random::<f32>() <= LIVE_PROBABILITY
        })
    }

    /// Deterministic population from an explicit set of live coordinates.
    pub fn from_alive(width: u32, height: u32, alive: &[(u32, u32)]) -> Result<Self, Error> {
        Self::build(width, height, |x, y| alive.contains(&(x, y)))
    }

    fn build(
        width: u32,
        height: u32,
        mut is_alive: impl FnMut(u32, u32) -> bool,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let cell_count = width as usize * height as usize;
        let mut grid = Self {
            width,
            height,
            ticks: 0,
            cells: Vec::with_capacity(cell_count),
            // 2x headroom keeps probe sequences short and rules out TableFull.
            table: Table::with_capacity(cell_count * 2)?,
        };
        for y in 0..height {
            for x in 0..width {
                grid.add_cell(x, y, is_alive(x, y))?;
            }
        }
        debug!("populated {} cells ({width}x{height})", grid.cells.len());
        grid.prepopulate_neighbours();
        debug!("neighbour cache built");
        Ok(grid)
    }

    /// A hit here means two coordinates encoded to the same key, which is a
    /// bug in the key encoding, not a runtime condition. Construction aborts
    /// rather than overwriting.
    pub(crate) fn add_cell(&mut self, x: u32, y: u32, alive: bool) -> Result<(), Error> {
        if self.cell_at(x, y).is_some() {
            return Err(Error::LocationOccupied { x, y });
        }
        let cell = CellRef(self.cells.len());
        self.cells.push(Cell::new(x, y, alive));
        self.table.put(&key_of(x, y), cell)
    }

    pub(crate) fn cell_at(&self, x: u32, y: u32) -> Option<CellRef> {
        self.table.get(&key_of(x, y)).copied()
    }

    /// Runs exactly once; neighbour lists are immutable afterwards. Offsets
    /// landing outside the grid simply miss in the table.
    fn prepopulate_neighbours(&mut self) {
        for i in 0..self.cells.len() {
            let (x, y) = (i64::from(self.cells[i].x), i64::from(self.cells[i].y));
            for (dx, dy) in directions() {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || nx >= i64::from(self.width) || ny < 0 || ny >= i64::from(self.height) {
                    continue;
                }
                if let Some(neighbour) = self.cell_at(nx as u32, ny as u32) {
                    self.cells[i].neighbours.push(neighbour);
                }
            }
        }
    }

    /// One generation. Two phases: every next state is decided against the
    /// pre-tick generation, then all cells commit at once. Folding the phases
    /// together would let early updates leak into later neighbour counts.
    pub fn tick(&mut self) {
        for i in 0..self.cells.len() {
            let alive_neighbours = self.cells[i].alive_neighbours(&self.cells);
            let cell = &mut self.cells[i];
            cell.next_alive = matches!(
                (cell.alive, alive_neighbours),
                (true, 2 | 3) | (false, 3)
            );
        }
        for cell in &mut self.cells {
            cell.alive = cell.next_alive;
        }
        self.ticks += 1;
    }

    /// One text frame: `height` rows of `width` cells, a newline after each
    /// row. The buffer is sized up front and never reallocates.
    pub fn render(&self) -> String {
        let size = (self.width as usize + 1) * self.height as usize;
        let mut rendering = String::with_capacity(size);
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cell_at(x, y).map(|CellRef(i)| &self.cells[i]);
                rendering.push(cell.map_or(' ', Cell::to_char));
            }
            rendering.push('\n');
        }
        rendering
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Live-cell count, scanning the table in storage order.
    pub fn population(&self) -> usize {
        self.table
            .values()
            .filter(|&&CellRef(i)| self.cells[i].alive)
            .count()
    }

    /// Every cell as `(x, y, alive)`, decoded back from the table's keys.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, bool)> + '_ {
        self.table.entries().filter_map(|(key, &CellRef(i))| {
            let (x, y) = parse_key(key)?;
            Some((x, y, self.cells[i].alive))
        })
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses a block of `'o'` and `' '` characters: height is the line
    /// count, width the longest line, short lines pad with dead cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut alive = Vec::new();
        let (mut width, mut height) = (0, 0);
        for (y, line) in s.lines().enumerate() {
            height = y as u32 + 1;
            for (x, c) in line.chars().enumerate() {
                width = width.max(x as u32 + 1);
                match c {
                    ' ' => (),
                    'o' => alive.push((x as u32, y as u32)),
                    _ => return Err(Error::UnexpectedCharacter(c)),
                }
            }
        }
        Self::from_alive(width, height, &alive)
    }
}
