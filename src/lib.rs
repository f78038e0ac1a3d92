mod cell;
mod error;
mod grid;
mod table;

#[cfg(test)]
mod tests;

pub use cell::{Cell, CellRef};
pub use error::Error;
pub use grid::Grid;
pub use table::{Entries, Table};
