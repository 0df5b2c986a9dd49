//! Membership Registry Module
//!
//! This module maps entity names to their registered verification keys.
//! Peers resolve transaction signers through it, and validators resolve
//! named verification key references.

mod directory;
pub use directory::{MemberRecord, MembershipDirectory};
