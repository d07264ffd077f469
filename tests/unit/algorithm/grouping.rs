//! Tests for 4-connected grouping of solid tiles

#[cfg(test)]
mod tests {
    use tileloops::algorithm::grouping::{group_all, group_from_seeds};
    use tileloops::spatial::{ActiveRegion, BoundingBox, Cell, SolidFilter, TileStore};

    // Tests that a gap column separates two blocks
    // Verified by treating empty cells as solid
    #[test]
    fn test_separated_blocks_form_two_groups() {
        let store = TileStore::from_rows(&["##.##", "##.##"]).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);

        let groups = group_all(&solid, store.bounds());
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|group| group.len() == 4));
        assert!(groups[0].contains(&Cell::new(0, 0)));
        assert!(groups[1].contains(&Cell::new(4, 1)));
    }

    // Tests that diagonal contact does not connect tiles
    // Verified by adding diagonal neighbors to the flood
    #[test]
    fn test_diagonal_tiles_not_connected() {
        let store = TileStore::from_rows(&["#.", ".#"]).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);

        assert_eq!(group_all(&solid, store.bounds()).len(), 2);
    }

    // Tests that dead tiles split a group
    // Verified by testing existence instead of solidity
    #[test]
    fn test_dead_tile_splits_group() {
        let mut store = TileStore::from_rows(&["###"]).unwrap();
        store.set_alive(Cell::new(1, 0), false);
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);

        let groups = group_all(&solid, store.bounds());
        assert_eq!(groups, vec![vec![Cell::new(0, 0)], vec![Cell::new(2, 0)]]);
    }

    // Tests that a large contiguous block is grouped without recursion
    // Verified by replacing the explicit stack with recursion
    #[test]
    fn test_large_block_single_group() {
        let row = "#".repeat(300);
        let rows: Vec<&str> = (0..300).map(|_| row.as_str()).collect();
        let store = TileStore::from_rows(&rows).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);

        let groups = group_all(&solid, store.bounds());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 90_000);
    }

    // Tests that seeds in one component yield one group and dead seeds none
    // Verified by resetting the visited set per seed
    #[test]
    fn test_group_from_seeds_deduplicates() {
        let mut store = TileStore::from_rows(&["####", "....", "##.."]).unwrap();
        store.set_alive(Cell::new(1, 2), false);
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);

        let seeds = [Cell::new(0, 0), Cell::new(3, 0), Cell::new(1, 2), Cell::new(0, 1)];
        let groups = group_from_seeds(&solid, &seeds, store.bounds());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 4);

        let isolated = group_from_seeds(&solid, &[Cell::new(0, 2)], store.bounds());
        assert_eq!(isolated, vec![vec![Cell::new(0, 2)]]);
    }

    // Tests that expansion stops at the bounds even across solid tiles
    // Verified by flooding past the bounds
    #[test]
    fn test_grouping_respects_bounds() {
        let store = TileStore::from_rows(&["#####"]).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);
        let bounds = BoundingBox::from_origin(Cell::new(1, 0), 2, 1);

        let groups = group_all(&solid, bounds);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert!(!groups[0].contains(&Cell::new(0, 0)));
        assert!(!groups[0].contains(&Cell::new(3, 0)));
    }

    // Tests that tiles outside the active region are not solid
    // Verified by dropping the region condition from SolidFilter
    #[test]
    fn test_region_limits_grouping() {
        let store = TileStore::from_rows(&["#####"]).unwrap();
        let region = ActiveRegion::new(BoundingBox::from_origin(Cell::new(0, 0), 2, 1));
        let solid = SolidFilter::new(&store, &region);

        let groups = group_all(&solid, store.bounds());
        assert_eq!(groups, vec![vec![Cell::new(0, 0), Cell::new(1, 0)]]);
    }

    // Tests that a seeded pass over a vast region only pays for the tiles it reaches
    // Verified by allocating a dense bitset over the bounds for seeded passes
    #[test]
    fn test_seeded_grouping_in_vast_region() {
        let store = TileStore::from_rows(&["###", "#.#", "###"]).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);
        let vast = BoundingBox::from_origin(Cell::new(-(1 << 20), -(1 << 20)), 1 << 21, 1 << 21);

        let groups = group_from_seeds(&solid, &[Cell::new(0, 0), Cell::new(2, 2)], vast);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 8);
        assert!(!groups[0].contains(&Cell::new(1, 1)));
    }
}
