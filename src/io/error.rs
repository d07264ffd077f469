//! Error types for boundary extraction and collider maintenance

use std::fmt;
use std::path::PathBuf;

use crate::physics::PhysicsError;
use crate::spatial::Vertex;

/// Main error type for all boundary operations
#[derive(Debug)]
pub enum BoundaryError {
    /// Exposed edges could not be walked into closed loops
    ///
    /// This is an invariant violation in grouping or edge collection, never a
    /// recoverable runtime condition.
    InconsistentTopology {
        /// Vertex where the walk or degree check failed
        vertex: Vertex,
        /// Description of the inconsistency
        reason: String,
    },

    /// The physics engine refused to create or dispose a collider
    Physics {
        /// Number of the group being bound, if any
        group: Option<u32>,
        /// Underlying engine error
        source: PhysicsError,
    },

    /// An audit found the published geometry out of sync with the tiles
    InvariantViolation {
        /// Short name of the broken invariant
        invariant: &'static str,
        /// What was observed
        detail: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a level image from disk
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered overlay to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The background region rebuild did not report completion
    Worker {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentTopology { vertex, reason } => {
                write!(f, "Inconsistent edge topology at {vertex}: {reason}")
            }
            Self::Physics {
                group: Some(group),
                source,
            } => {
                write!(f, "Physics error while binding group {group}: {source}")
            }
            Self::Physics { group: None, source } => {
                write!(f, "Physics error: {source}")
            }
            Self::InvariantViolation { invariant, detail } => {
                write!(f, "Invariant '{invariant}' violated: {detail}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Worker { reason } => {
                write!(f, "Region rebuild worker failed: {reason}")
            }
        }
    }
}

impl std::error::Error for BoundaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Physics { source, .. } => Some(source),
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for boundary results
pub type Result<T> = std::result::Result<T, BoundaryError>;

impl From<PhysicsError> for BoundaryError {
    fn from(err: PhysicsError) -> Self {
        Self::Physics {
            group: None,
            source: err,
        }
    }
}

impl From<std::io::Error> for BoundaryError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BoundaryError {
    BoundaryError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(invariant: &'static str, detail: &impl ToString) -> BoundaryError {
    BoundaryError::InvariantViolation {
        invariant,
        detail: detail.to_string(),
    }
}
