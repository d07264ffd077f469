//! Tests for the bounded visited set used by flood fill

#[cfg(test)]
mod tests {
    use tileloops::algorithm::cellset::{CellSet, SparseCellSet, Visited};
    use tileloops::spatial::{BoundingBox, Cell};

    // Tests that inserting reports first membership only
    // Verified by returning true from insert for existing members
    #[test]
    fn test_insert_reports_new_members() {
        let mut set = CellSet::new(BoundingBox::from_origin(Cell::new(-2, -2), 4, 4));
        assert!(set.is_empty());

        assert!(set.insert(Cell::new(-2, -2)));
        assert!(!set.insert(Cell::new(-2, -2)));
        assert!(set.insert(Cell::new(1, 1)));

        assert!(set.contains(Cell::new(1, 1)));
        assert!(!set.contains(Cell::new(0, 0)));
        assert_eq!(set.count(), 2);
    }

    // Tests that cells outside the box can never become members
    // Verified by dropping the bounds check in offset
    #[test]
    fn test_outside_cells_rejected() {
        let mut set = CellSet::new(BoundingBox::from_origin(Cell::new(0, 0), 2, 2));
        assert!(!set.insert(Cell::new(2, 0)));
        assert!(!set.insert(Cell::new(0, -1)));
        assert!(!set.contains(Cell::new(2, 0)));
        assert!(set.is_empty());
    }

    // Tests that neighboring rows map to distinct bits
    // Verified by using height instead of width as the row stride
    #[test]
    fn test_rows_do_not_alias() {
        let mut set = CellSet::new(BoundingBox::from_origin(Cell::new(0, 0), 3, 3));
        assert!(set.insert(Cell::new(2, 0)));
        assert!(!set.contains(Cell::new(0, 1)));
        assert!(set.insert(Cell::new(0, 1)));
        assert_eq!(set.count(), 2);
    }

    // Tests that the hashed set honours the box while staying sized to its members
    // Verified by dropping the bounds check in SparseCellSet::insert
    #[test]
    fn test_sparse_set_over_huge_box() {
        let huge = BoundingBox::from_origin(Cell::new(0, 0), 1 << 30, 1 << 30);
        let mut set = SparseCellSet::new(huge);
        assert!(set.is_empty());

        assert!(set.insert(Cell::new(1 << 29, 7)));
        assert!(!set.insert(Cell::new(1 << 29, 7)));
        assert!(!set.insert(Cell::new(-1, 0)));
        assert!(set.contains(Cell::new(1 << 29, 7)));
        assert!(!set.contains(Cell::new(-1, 0)));
        assert_eq!(set.count(), 1);
    }
}
