//! Tests for the in-memory physics world

#[cfg(test)]
mod tests {
    use tileloops::physics::{ColliderHandle, MemoryPhysics, PhysicsWorld};
    use tileloops::spatial::{Cell, Footprint, Vertex};

    fn square() -> Vec<Vertex> {
        Cell::new(0, 0).corners().to_vec()
    }

    // Tests that handles are unique and disposal removes the collider
    // Verified by reusing handles after disposal
    #[test]
    fn test_create_and_dispose() {
        let mut physics = MemoryPhysics::new();
        let first = physics.create_closed_loop_collider(&square()).unwrap();
        let second = physics.create_closed_loop_collider(&square()).unwrap();
        assert_ne!(first, second);
        assert_eq!(physics.live_count(), 2);
        assert_eq!(physics.collider(first), Some(square().as_slice()));

        physics.dispose_collider(first).unwrap();
        assert!(physics.collider(first).is_none());
        assert!(physics.dispose_collider(first).is_err());
        assert_eq!(physics.created_count(), 2);
        assert_eq!(physics.disposed_count(), 1);
        assert_eq!(physics.colliders().count(), 1);
    }

    // Tests that degenerate shapes are refused
    // Verified by accepting loops with fewer than three vertices
    #[test]
    fn test_rejects_degenerate_loop() {
        let mut physics = MemoryPhysics::new();
        let line = [Vertex::new(0, 0), Vertex::new(1, 0)];
        assert!(physics.create_closed_loop_collider(&line).is_err());
        assert_eq!(physics.live_count(), 0);
    }

    // Tests injected failures after a number of successes
    // Verified by counting failed creations as successes
    #[test]
    fn test_injected_failure() {
        let mut physics = MemoryPhysics::new();
        physics.fail_creation_after(1);
        assert!(physics.create_closed_loop_collider(&square()).is_ok());
        let error = physics.create_closed_loop_collider(&square()).unwrap_err();
        assert_eq!(error.operation, "create collider");

        physics.clear_failure();
        assert!(physics.create_closed_loop_collider(&square()).is_ok());
    }

    // Tests dynamic body overlap queries
    // Verified by treating touching footprints as overlapping
    #[test]
    fn test_body_overlap() {
        let mut physics = MemoryPhysics::new();
        let tile = Cell::new(2, 2).footprint();
        assert!(!physics.is_any_dynamic_entity_overlapping(&tile));

        physics.add_body(Footprint {
            min: Vertex::new(1, 1),
            max: Vertex::new(3, 3),
        });
        assert!(physics.is_any_dynamic_entity_overlapping(&tile));
        assert!(!physics.is_any_dynamic_entity_overlapping(&Cell::new(3, 3).footprint()));

        physics.clear_bodies();
        assert!(!physics.is_any_dynamic_entity_overlapping(&tile));
    }

    // Tests handle formatting in logs
    // Verified by printing the handle with Debug formatting
    #[test]
    fn test_handle_display() {
        assert_eq!(ColliderHandle(3).to_string(), "collider#3");
    }
}
