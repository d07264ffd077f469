//! Tests for walking exposed edges into minimal closed loops

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use tileloops::BoundaryError;
    use tileloops::algorithm::edges::{Edge, EdgeSet, exposed_edges};
    use tileloops::algorithm::grouping::group_all;
    use tileloops::algorithm::walk::{Loop, extract_loops, turn_priority, walk_loops};
    use tileloops::spatial::{ActiveRegion, Cell, Direction, SolidFilter, TileStore, Vertex};

    fn loops_of(store: &TileStore) -> Vec<Loop> {
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(store, &region);
        group_all(&solid, store.bounds())
            .iter()
            .flat_map(|group| extract_loops(&solid, group).unwrap())
            .collect()
    }

    fn vertices(points: &[(i32, i32)]) -> Vec<Vertex> {
        points.iter().copied().map(Vertex::from).collect()
    }

    // Tests the documented 3x3 block boundary exactly
    // Verified by starting the walk at the first edge instead of the minimum vertex
    #[test]
    fn test_three_by_three_block() {
        let store = TileStore::from_rows(&["###", "###", "###"]).unwrap();
        let loops = loops_of(&store);

        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].vertices(), vertices(&[(0, 0), (3, 0), (3, 3), (0, 3)]));
    }

    // Tests that removing the centre adds the unit hole loop
    // Verified by stopping after the first loop
    #[test]
    fn test_three_by_three_with_hole() {
        let mut store = TileStore::from_rows(&["###", "###", "###"]).unwrap();
        store.set_alive(Cell::new(1, 1), false);
        let loops = loops_of(&store);

        assert_eq!(loops.len(), 2);
        assert_eq!(loops[0].vertices(), vertices(&[(0, 0), (3, 0), (3, 3), (0, 3)]));
        assert_eq!(loops[1].vertices(), vertices(&[(1, 1), (2, 1), (2, 2), (1, 2)]));
    }

    // Tests that every solid rectangle yields exactly its four corners
    // Verified by keeping colinear vertices
    #[test]
    fn test_rectangles_have_four_corners() {
        for width in 1..=5 {
            for height in 1..=5 {
                let row = "#".repeat(width);
                let rows: Vec<&str> = (0..height).map(|_| row.as_str()).collect();
                let store = TileStore::from_rows(&rows).unwrap();
                let loops = loops_of(&store);

                let (w, h) = (width as i32, height as i32);
                assert_eq!(loops.len(), 1, "{width}x{height}");
                assert_eq!(
                    loops[0].vertices(),
                    vertices(&[(0, 0), (w, 0), (w, h), (0, h)]),
                    "{width}x{height}"
                );
            }
        }
    }

    // Tests that an L shape keeps its six corners and drops colinear points
    // Verified by dropping vertices where the heading turns counter-clockwise
    #[test]
    fn test_l_shape_corners() {
        let store = TileStore::from_rows(&["#..", "#..", "###"]).unwrap();
        let loops = loops_of(&store);

        assert_eq!(loops.len(), 1);
        assert_eq!(
            loops[0].vertices(),
            vertices(&[(0, 0), (1, 0), (1, 2), (3, 2), (3, 3), (0, 3)])
        );
    }

    // Tests that a pinch vertex is crossed without losing any edge
    // Verified by removing only the outgoing edge at a pinch
    #[test]
    fn test_pinch_vertex_covered() {
        let store = TileStore::from_rows(&["###", "#.#", "##."]).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);
        let loops = loops_of(&store);

        let walked: Vec<Edge> = loops.iter().flat_map(Loop::edges).collect();
        let unique: HashSet<Edge> = walked.iter().copied().collect();
        assert_eq!(walked.len(), unique.len());
        assert_eq!(unique, exposed_edges(&solid, store.bounds().cells()));
        assert_eq!(loops.len(), 1);
        assert_eq!(
            loops[0]
                .vertices()
                .iter()
                .filter(|&&vertex| vertex == Vertex::new(2, 2))
                .count(),
            2
        );
    }

    // Tests that turn priority prefers clockwise, then counter-clockwise, then straight
    // Verified by trying straight before counter-clockwise
    #[test]
    fn test_turn_priority_order() {
        assert_eq!(
            turn_priority(Direction::Right),
            [Direction::Down, Direction::Up, Direction::Right]
        );
        assert_eq!(
            turn_priority(Direction::Up),
            [Direction::Right, Direction::Left, Direction::Up]
        );
    }

    // Tests that an open path is reported instead of looping forever
    // Verified by breaking out of the walk on a dead end
    #[test]
    fn test_dead_end_is_topology_error() {
        let mut edges = EdgeSet::new();
        edges.insert(Edge::new(Vertex::new(0, 0), Vertex::new(1, 0)));
        edges.insert(Edge::new(Vertex::new(1, 0), Vertex::new(1, 1)));

        let result = walk_loops(edges);
        assert!(matches!(
            result,
            Err(BoundaryError::InconsistentTopology { vertex, .. }) if vertex == Vertex::new(1, 1)
        ));
    }

    // Tests that no loops come from an empty group
    // Verified by emitting a loop for an empty edge set
    #[test]
    fn test_empty_group_has_no_loops() {
        let store = TileStore::from_rows(&["#"]).unwrap();
        let region = ActiveRegion::unbounded();
        let solid = SolidFilter::new(&store, &region);
        assert!(extract_loops(&solid, &[]).unwrap().is_empty());
        assert!(walk_loops(EdgeSet::new()).unwrap().is_empty());
    }

    // Tests signed area and canonical rotation of a loop
    // Verified by rotating canonical loops to the maximum vertex
    #[test]
    fn test_loop_geometry_helpers() {
        let store = TileStore::from_rows(&["###", "###", "###"]).unwrap();
        let outer = loops_of(&store).remove(0);
        assert_eq!(outer.doubled_area(), 18);
        assert_eq!(outer.edges().len(), 12);
        assert_eq!(outer.segments().count(), 4);

        let rotated = Loop::from_vertices(vertices(&[(3, 3), (0, 3), (0, 0), (3, 0)]));
        assert_eq!(rotated.canonical(), outer);
        assert!(!outer.is_empty());
        assert_eq!(outer.len(), 4);
    }
}
