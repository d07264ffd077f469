/// Invariant checks over published geometry
pub mod audit;
/// Collider creation and disposal with rollback
pub mod binder;
/// Fixed-size visited set for flood fills
pub mod cellset;
/// Seeded random destruction for stress runs
pub mod churn;
/// Incremental destroy and revive handling
pub mod coordinator;
/// Weapon flags and destructibility predicates
pub mod destruction;
/// Exposed edge collection
pub mod edges;
/// 4-connected grouping of solid tiles
pub mod grouping;
/// Group records and their arena
pub mod groups;
/// Background full-region rebuild
pub mod rebuild;
/// Boundary loop walking
pub mod walk;
