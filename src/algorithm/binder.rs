//! Publishing loops to the physics engine as static colliders
//!
//! Binding is all-or-nothing: when any collider of a batch cannot be created,
//! every collider already created for that batch is disposed again and the
//! error is returned, leaving the caller's previous geometry untouched.

use tracing::warn;

use crate::algorithm::groups::{GroupRecord, PendingGroup};
use crate::algorithm::walk::Loop;
use crate::physics::{ColliderHandle, PhysicsError, PhysicsWorld};

/// Create one collider per loop
///
/// # Errors
///
/// Returns the creation error after disposing the colliders created so far
pub fn bind_loops<P>(
    physics: &mut P,
    loops: &[Loop],
) -> std::result::Result<Vec<ColliderHandle>, PhysicsError>
where
    P: PhysicsWorld + ?Sized,
{
    let mut handles = Vec::with_capacity(loops.len());
    for boundary in loops {
        match physics.create_closed_loop_collider(boundary.vertices()) {
            Ok(handle) => handles.push(handle),
            Err(error) => {
                roll_back(physics, &handles);
                return Err(error);
            }
        }
    }
    Ok(handles)
}

/// Bind every pending group, or none of them
///
/// # Errors
///
/// Returns the index of the group whose binding failed together with the
/// engine error. Colliders created for earlier groups have been disposed.
pub fn bind_groups<P>(
    physics: &mut P,
    pending: Vec<PendingGroup>,
) -> std::result::Result<Vec<GroupRecord>, (usize, PhysicsError)>
where
    P: PhysicsWorld + ?Sized,
{
    let mut records: Vec<GroupRecord> = Vec::with_capacity(pending.len());
    for (index, group) in pending.into_iter().enumerate() {
        match bind_loops(physics, &group.loops) {
            Ok(colliders) => records.push(GroupRecord {
                members: group.members,
                loops: group.loops,
                colliders,
            }),
            Err(error) => {
                for record in &records {
                    roll_back(physics, &record.colliders);
                }
                return Err((index, error));
            }
        }
    }
    Ok(records)
}

/// Dispose every handle, attempting all of them
///
/// # Errors
///
/// Returns the first disposal error; later handles are still disposed
pub fn release<P>(
    physics: &mut P,
    colliders: &[ColliderHandle],
) -> std::result::Result<usize, PhysicsError>
where
    P: PhysicsWorld + ?Sized,
{
    let mut first_error = None;
    let mut disposed = 0;
    for &handle in colliders {
        match physics.dispose_collider(handle) {
            Ok(()) => disposed += 1,
            Err(error) => {
                first_error.get_or_insert(error);
            }
        }
    }
    first_error.map_or(Ok(disposed), Err)
}

fn roll_back<P>(physics: &mut P, handles: &[ColliderHandle])
where
    P: PhysicsWorld + ?Sized,
{
    if let Err(error) = release(physics, handles) {
        warn!(%error, colliders = handles.len(), "rollback could not dispose every collider");
    }
}
