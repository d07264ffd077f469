//! Tests for tile cells, lattice vertices and directions

#[cfg(test)]
mod tests {
    use tileloops::spatial::{Cell, Direction, Footprint, Vertex};

    // Tests that four clockwise quarter turns return to the starting heading
    // Verified by mapping Left to Down in clockwise
    #[test]
    fn test_clockwise_cycle() {
        for direction in Direction::ALL {
            let mut heading = direction;
            for _ in 0..4 {
                heading = heading.clockwise();
            }
            assert_eq!(heading, direction);
            assert_eq!(direction.clockwise().counter_clockwise(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::Right.clockwise(), Direction::Down);
        assert_eq!(Direction::Right.counter_clockwise(), Direction::Up);
    }

    // Tests that each direction owns a distinct incidence bit
    // Verified by sharing a bit between Up and Down
    #[test]
    fn test_direction_bits_distinct() {
        let combined = Direction::ALL
            .iter()
            .fold(0u8, |mask, direction| mask | direction.bit());
        assert_eq!(combined, 0b1111);
    }

    // Tests corner order and the shared corners of neighboring tiles
    // Verified by offsetting corners by the cell size twice
    #[test]
    fn test_cell_corners() {
        let corners = Cell::new(2, 3).corners();
        assert_eq!(
            corners,
            [
                Vertex::new(2, 3),
                Vertex::new(3, 3),
                Vertex::new(3, 4),
                Vertex::new(2, 4),
            ]
        );

        let right = Cell::new(2, 3).offset(Direction::Right).corners();
        assert_eq!(right[0], corners[1]);
        assert_eq!(right[3], corners[2]);
    }

    // Tests neighbor ordering right, down, left, up
    // Verified by listing neighbors in counter-clockwise order
    #[test]
    fn test_cell_neighbors() {
        assert_eq!(
            Cell::new(0, 0).neighbors(),
            [
                Cell::new(1, 0),
                Cell::new(0, 1),
                Cell::new(-1, 0),
                Cell::new(0, -1),
            ]
        );
    }

    // Tests that vertex ordering compares rows before columns
    // Verified by deriving Ord with x before y
    #[test]
    fn test_vertex_row_major_order() {
        assert!(Vertex::new(5, 0) < Vertex::new(0, 1));
        assert!(Vertex::new(0, 1) < Vertex::new(1, 1));

        let mut vertices = vec![Vertex::new(3, 3), Vertex::new(0, 3), Vertex::new(3, 0)];
        vertices.sort();
        assert_eq!(vertices.first(), Some(&Vertex::new(3, 0)));
    }

    // Tests recovering a direction from two adjacent vertices
    // Verified by accepting diagonal steps
    #[test]
    fn test_direction_between() {
        let origin = Vertex::new(1, 1);
        for direction in Direction::ALL {
            assert_eq!(
                Direction::between(origin, origin.step(direction)),
                Some(direction)
            );
        }
        assert_eq!(Direction::between(origin, Vertex::new(2, 2)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    // Tests that touching footprints do not count as overlapping
    // Verified by using inclusive comparisons in overlaps
    #[test]
    fn test_footprint_overlap() {
        let tile = Cell::new(0, 0).footprint();
        assert!(!tile.overlaps(&Cell::new(1, 0).footprint()));
        assert!(!tile.overlaps(&Cell::new(1, 1).footprint()));

        let body = Footprint {
            min: Vertex::new(0, 0),
            max: Vertex::new(2, 2),
        };
        assert!(tile.overlaps(&body));
        assert!(Cell::new(1, 1).footprint().overlaps(&body));
        assert!(!Cell::new(2, 1).footprint().overlaps(&body));
    }

    // Tests coordinate formatting used in log output
    // Verified by printing coordinates as y,x
    #[test]
    fn test_display() {
        assert_eq!(Cell::new(-1, 4).to_string(), "(-1, 4)");
        assert_eq!(Vertex::from((3, 0)).to_string(), "(3, 0)");
    }
}
