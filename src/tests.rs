use std::str::FromStr;

use itertools::Itertools;

use crate::{CellRef, Error, Grid, Table};

mod table {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut table = Table::with_capacity(16).unwrap();
        table.put("3-4", 7).unwrap();
        assert_eq!(table.get("3-4"), Some(&7));
        assert_eq!(table.get("4-3"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_update_in_place() {
        let mut table = Table::with_capacity(8).unwrap();
        table.put("2-2", 1).unwrap();
        table.put("2-2", 2).unwrap();
        assert_eq!(table.get("2-2"), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_capacity_rounds_up() {
        let table = Table::<u32>::with_capacity(5).unwrap();
        assert_eq!(table.capacity(), 8);
        assert!(table.is_empty());
        assert_eq!(
            Table::<u32>::with_capacity(0).unwrap_err(),
            Error::InvalidCapacity
        );
    }

    #[test]
    fn test_collisions_probe_forward() {
        // Capacity 4 forces most inserts onto someone else's home slot.
        let mut table = Table::with_capacity(4).unwrap();
        for (i, key) in ["0-0", "1-0", "2-0", "3-0"].into_iter().enumerate() {
            table.put(key, i).unwrap();
        }
        for (i, key) in ["0-0", "1-0", "2-0", "3-0"].into_iter().enumerate() {
            assert_eq!(table.get(key), Some(&i));
        }
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_full_table() {
        let mut table = Table::with_capacity(4).unwrap();
        for key in ["a", "b", "c", "d"] {
            table.put(key, ()).unwrap();
        }
        assert_eq!(table.put("e", ()), Err(Error::TableFull));
        // Keys already present still update in place.
        assert_eq!(table.put("a", ()), Ok(()));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_missing_key_is_absent() {
        let table = Table::<u32>::with_capacity(4).unwrap();
        assert_eq!(table.get("anything"), None);
    }

    #[test]
    fn test_values_storage_order_is_deterministic() {
        let build = || {
            let mut table = Table::with_capacity(8).unwrap();
            for (i, key) in ["0-0", "1-1", "2-2", "3-3", "4-4"].into_iter().enumerate() {
                table.put(key, i).unwrap();
            }
            table
        };
        let (a, b) = (build(), build());
        assert_eq!(a.values().collect_vec(), b.values().collect_vec());
        assert_eq!(a.values().count(), 5);
    }

    #[test]
    fn test_entries_reset() {
        let mut table = Table::with_capacity(8).unwrap();
        for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
            table.put(key, i).unwrap();
        }
        let mut entries = table.entries();
        let first = entries.by_ref().collect_vec();
        assert_eq!(first.len(), 3);
        assert_eq!(entries.next(), None);
        entries.reset();
        assert_eq!(entries.collect_vec(), first);
    }
}

mod grid {
    use super::*;

    const BOAT: &str = "oo  \no o \n o  \n    ";
    const PLUS: &str = " o \nooo\n o ";
    const RING: &str = "ooo\no o\nooo\n";
    const BLINKER: &str = "     \n     \n ooo \n     \n     ";

    #[test]
    fn test_full_population() {
        let grid = Grid::new(10, 6, 42).unwrap();
        assert_eq!(grid.len(), 60);
        assert_eq!(grid.cells.len(), 60);
        for (x, y) in (0..10).cartesian_product(0..6) {
            assert!(grid.cell_at(x, y).is_some());
        }
        assert!(grid.cell_at(10, 0).is_none());
        assert!(grid.cell_at(0, 6).is_none());
    }

    #[test]
    fn test_seeded_population_is_deterministic() {
        let a = Grid::new(20, 20, 7).unwrap();
        let b = Grid::new(20, 20, 7).unwrap();
        assert_eq!(a.render(), b.render());
        assert!(a.population() > 0);
        assert!(a.population() < a.len());
    }

    #[test]
    fn test_neighbour_counts() {
        // Corners see 3 of the 8 offsets in bounds, edges 5, the centre 8.
        let grid = Grid::from_alive(3, 3, &[]).unwrap();
        let expected = [
            (0, 0, 3), (2, 0, 3), (0, 2, 3), (2, 2, 3),
            (1, 0, 5), (0, 1, 5), (2, 1, 5), (1, 2, 5),
            (1, 1, 8),
        ];
        for (x, y, count) in expected {
            let CellRef(i) = grid.cell_at(x, y).unwrap();
            assert_eq!(grid.cells[i].neighbours.len(), count, "at {x}-{y}");
        }
    }

    #[test]
    fn test_neighbours_are_unique() {
        let grid = Grid::new(4, 4, 3).unwrap();
        for cell in &grid.cells {
            assert!(cell.neighbours.iter().all_unique());
        }
    }

    #[test]
    fn test_alive_neighbours() {
        let grid = Grid::from_str("oo\noo").unwrap();
        let CellRef(i) = grid.cell_at(0, 0).unwrap();
        assert_eq!(grid.cells[i].alive_neighbours(&grid.cells), 3);
    }

    #[test]
    fn test_plus_becomes_ring() {
        // The centre dies of overcrowding, every dead corner is born, and the
        // four arms survive, whatever order the cells are visited in.
        let mut grid = Grid::from_str(PLUS).unwrap();
        grid.tick();
        assert_eq!(grid.render(), RING);
        assert_eq!(grid.ticks(), 1);
    }

    #[test]
    fn test_boat_still_life() {
        let mut grid = Grid::from_str(BOAT).unwrap();
        let before = grid.render();
        grid.tick();
        assert_eq!(grid.render(), before);
    }

    #[test]
    fn test_blinker_period_two() {
        let mut grid = Grid::from_str(BLINKER).unwrap();
        let horizontal = grid.render();
        grid.tick();
        assert_ne!(grid.render(), horizontal);
        assert_eq!(grid.population(), 3);
        grid.tick();
        assert_eq!(grid.render(), horizontal);
        assert_eq!(grid.ticks(), 2);
    }

    #[test]
    fn test_render_layout() {
        let grid = Grid::from_alive(3, 2, &[(1, 0)]).unwrap();
        assert_eq!(grid.render(), " o \n   \n");
        assert_eq!(grid.to_string(), grid.render());
    }

    #[test]
    fn test_cells_decode_back_to_coordinates() {
        let grid = Grid::from_alive(2, 2, &[(1, 1)]).unwrap();
        let cells = grid.cells().sorted().collect_vec();
        assert_eq!(
            cells,
            vec![(0, 0, false), (0, 1, false), (1, 0, false), (1, 1, true)]
        );
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_occupied_location_is_fatal() {
        let mut grid = Grid::from_alive(2, 2, &[]).unwrap();
        assert_eq!(
            grid.add_cell(1, 1, true),
            Err(Error::LocationOccupied { x: 1, y: 1 })
        );
    }

    #[test]
    fn test_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 5, 0).unwrap_err(),
            Error::InvalidDimensions { width: 0, height: 5 }
        );
        assert_eq!(
            Grid::from_str("").unwrap_err(),
            Error::InvalidDimensions { width: 0, height: 0 }
        );
        assert_eq!(
            Grid::from_str("ox").unwrap_err(),
            Error::UnexpectedCharacter('x')
        );
    }
}
