//! Core business logic - framework-agnostic inventory, archival, admin,
//! and settings operations.
//!
//! Every mutation that carries an invariant lives here: the ledger's
//! non-negative stock transaction, the archival state machine, the
//! self-protecting user administration, and the expiry-threshold setting.
//! The admin API and tests are thin callers over these functions.

/// User administration - roles, activity flags, display names
pub mod admin;
/// Archival workflow - archive, restore, hard delete
pub mod archive;
/// Expiry-date classification for the approaching-expiry badge
pub mod expiry;
/// Stock ledger - atomic adjustments and the append-only log
pub mod ledger;
/// Product catalog operations
pub mod product;
/// Process-wide settings (expiry-warning threshold)
pub mod settings;
/// Dashboard aggregates
pub mod stats;
/// Zone directory queries and seeding
pub mod zone;
