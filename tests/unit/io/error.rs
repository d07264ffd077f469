//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;
    use tileloops::BoundaryError;
    use tileloops::io::error::{invalid_parameter, invariant_violation};
    use tileloops::physics::PhysicsError;
    use tileloops::spatial::Vertex;

    // Tests that topology errors name the offending vertex
    // Verified by omitting the vertex from the Display output
    #[test]
    fn test_topology_message() {
        let error = BoundaryError::InconsistentTopology {
            vertex: Vertex::new(4, 2),
            reason: "dead end".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Inconsistent edge topology at (4, 2): dead end"
        );
        assert!(error.source().is_none());
    }

    // Tests that engine errors convert and remain reachable as the source
    // Verified by returning None from source for physics errors
    #[test]
    fn test_physics_conversion_keeps_source() {
        let engine = PhysicsError {
            operation: "dispose collider",
            reason: "unknown handle".to_string(),
        };
        let error = BoundaryError::from(engine.clone());

        assert!(matches!(error, BoundaryError::Physics { group: None, .. }));
        assert_eq!(
            error.source().map(ToString::to_string),
            Some(engine.to_string())
        );
    }

    // Tests helper constructors
    // Verified by swapping value and reason in invalid_parameter
    #[test]
    fn test_helper_constructors() {
        let parameter = invalid_parameter("margin", &-1, &"negative");
        assert_eq!(
            parameter.to_string(),
            "Invalid parameter 'margin' = '-1': negative"
        );

        let violation = invariant_violation("coverage", &"edge missing");
        assert_eq!(
            violation.to_string(),
            "Invariant 'coverage' violated: edge missing"
        );
    }

    // Tests that io errors become file system errors
    // Verified by mapping io errors to the worker variant
    #[test]
    fn test_io_error_conversion() {
        let error = BoundaryError::from(io::Error::other("disk full"));
        assert!(matches!(error, BoundaryError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
        assert!(error.source().is_some());
    }

    // Tests worker failure formatting
    // Verified by omitting the reason from the worker message
    #[test]
    fn test_worker_message() {
        let error = BoundaryError::Worker {
            reason: "worker panicked".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Region rebuild worker failed: worker panicked"
        );
    }
}
