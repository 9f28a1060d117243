//! Tests for grid sizes, slots and pixel partitioning

#[cfg(test)]
mod tests {
    use playcorner::PlayError;
    use playcorner::puzzle::geometry::{GridSize, PieceBounds, Partition, Slot};

    fn grid(size: u8) -> GridSize {
        GridSize::new(size).unwrap_or_else(|e| panic!("grid {size}: {e}"))
    }

    // Tests only edges 3 through 5 are accepted
    // Verified by widening the range to include 2
    #[test]
    fn test_grid_size_bounds() {
        for size in 3..=5 {
            assert!(GridSize::new(size).is_ok());
        }
        for size in [0, 1, 2, 6, 10, u8::MAX] {
            assert!(matches!(
                GridSize::new(size),
                Err(PlayError::InvalidParameter {
                    parameter: "grid_size",
                    ..
                })
            ));
        }
        assert!(GridSize::try_from(4u8).is_ok());
        assert_eq!(u8::from(grid(4)), 4);
    }

    // Tests slot enumeration is row-major and complete
    // Verified by iterating columns first
    #[test]
    fn test_slots_row_major() {
        let slots: Vec<Slot> = grid(3).slots().collect();
        assert_eq!(slots.len(), 9);
        assert_eq!(slots.first(), Some(&Slot::new(0, 0)));
        assert_eq!(slots.get(1), Some(&Slot::new(0, 1)));
        assert_eq!(slots.get(3), Some(&Slot::new(1, 0)));
        assert_eq!(slots.last(), Some(&Slot::new(2, 2)));

        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(grid(3).linear(*slot), i);
        }
    }

    // Tests containment at the grid edges
    // Verified by using <= in the bounds check
    #[test]
    fn test_contains() {
        let g = grid(4);
        assert_eq!(g.piece_count(), 16);
        assert!(g.contains(Slot::new(3, 3)));
        assert!(!g.contains(Slot::new(4, 0)));
        assert!(!g.contains(Slot::new(0, 4)));
    }

    // Tests display formats used by the CLI
    // Verified by printing the raw edge
    #[test]
    fn test_display() {
        assert_eq!(grid(5).to_string(), "5x5");
        assert_eq!(Slot::from((1, 2)).to_string(), "(1, 2)");
    }

    // Tests even dimensions split into equal pieces from the origin
    // Verified by rounding piece size up
    #[test]
    fn test_partition_even() {
        let partition = Partition::new(300, 150, grid(3))
            .unwrap_or_else(|e| panic!("partition: {e}"));
        assert_eq!(partition.grid(), grid(3));
        assert_eq!(partition.piece_size(), (100, 50));
        assert_eq!(
            partition.bounds(Slot::new(2, 1)),
            Some(PieceBounds {
                x: 100,
                y: 100,
                width: 100,
                height: 50
            })
        );
        assert_eq!(partition.bounds(Slot::new(3, 0)), None);
        assert_eq!(partition.all_bounds().len(), 9);
    }

    // Tests remainders are trimmed evenly from both edges
    // Verified by giving the remainder to the last column
    #[test]
    fn test_partition_remainder_centered() {
        let partition = Partition::new(103, 100, grid(4))
            .unwrap_or_else(|e| panic!("partition: {e}"));
        assert_eq!(partition.piece_size(), (25, 25));

        let first = partition.bounds(Slot::new(0, 0));
        assert_eq!(first.map(|b| (b.x, b.y)), Some((1, 0)));

        for (_, b) in partition.all_bounds() {
            assert!(b.x + b.width <= 103);
            assert!(b.y + b.height <= 100);
        }
    }

    // Tests images smaller than the grid are rejected
    // Verified by allowing zero-sized pieces
    #[test]
    fn test_partition_too_small() {
        assert!(Partition::new(2, 100, grid(3)).is_err());
        assert!(Partition::new(100, 4, grid(5)).is_err());
        assert!(Partition::new(5, 5, grid(5)).is_ok());
    }
}
