//! Group records and the arena that owns them
//!
//! Tiles refer to their group by [`GroupId`]; the record owns the group's
//! loops and collider handles, so disposing a group's geometry never needs to
//! visit its tiles.

use std::fmt;

use crate::algorithm::walk::{Loop, extract_loops};
use crate::io::error::Result;
use crate::physics::ColliderHandle;
use crate::spatial::{Cell, Solidity};

/// Index of a group in a [`GroupTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Connected tiles with their extracted boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGroup {
    /// Member cells
    pub members: Vec<Cell>,
    /// Outer boundary and holes
    pub loops: Vec<Loop>,
}

/// Extract loops for each group of cells
///
/// # Errors
///
/// Returns the first topology error encountered
pub fn extract_groups<S>(solid: &S, groups: Vec<Vec<Cell>>) -> Result<Vec<PendingGroup>>
where
    S: Solidity + ?Sized,
{
    groups
        .into_iter()
        .map(|members| {
            let loops = extract_loops(solid, &members)?;
            Ok(PendingGroup { members, loops })
        })
        .collect()
}

/// Installed group: members, loops and one collider per loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Member cells
    pub members: Vec<Cell>,
    /// Outer boundary and holes
    pub loops: Vec<Loop>,
    /// Colliders in the same order as `loops`
    pub colliders: Vec<ColliderHandle>,
}

/// Arena of live groups with slot reuse
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    slots: Vec<Option<GroupRecord>>,
    free: Vec<u32>,
}

impl GroupTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, reusing a freed slot when available
    pub fn insert(&mut self, record: GroupRecord) -> GroupId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                *slot = Some(record);
                return GroupId(index);
            }
        }
        self.slots.push(Some(record));
        GroupId((self.slots.len() - 1) as u32)
    }

    /// Take a record out of the table
    pub fn remove(&mut self, id: GroupId) -> Option<GroupRecord> {
        let record = self.slots.get_mut(id.0 as usize)?.take()?;
        self.free.push(id.0);
        Some(record)
    }

    /// Look up a live record
    pub fn get(&self, id: GroupId) -> Option<&GroupRecord> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// Iterate live records in slot order
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &GroupRecord)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|record| (GroupId(index as u32), record)))
    }

    /// Remove and return every live record
    pub fn drain(&mut self) -> Vec<(GroupId, GroupRecord)> {
        let drained = self
            .slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.take().map(|record| (GroupId(index as u32), record)))
            .collect();
        self.slots.clear();
        self.free.clear();
        drained
    }

    /// Number of live groups
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Test if no groups are live
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of colliders across all groups
    pub fn collider_count(&self) -> usize {
        self.iter().map(|(_, record)| record.colliders.len()).sum()
    }
}
