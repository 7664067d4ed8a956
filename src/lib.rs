//! Resolve the effective access a Dynamics user holds over an entity set,
//! working entirely from dumped Web API collections.
//!
//! A dump is a directory of flat `<collection>.json` files captured from a
//! Dynamics environment. Given an entity set and a `systemuserid`, the crate
//! walks role and team memberships, expands them into privileges, and folds
//! the result into a user-level verdict. The main components:
//!
//! * [`store::RecordStore`] reads collection envelopes from the dump
//!   directory.
//! * [`membership::MembershipResolver`] and [`membership::TeamRoleExpander`]
//!   scan the junction collections.
//! * [`privileges::PrivilegeAggregator`] expands roles into privilege
//!   records, indexing the privilege catalog once.
//! * [`access::AccessEvaluator`] runs the full resolution and produces an
//!   [`report::AccessReport`] ending in a [`report::Verdict`].
//!
//! Everything is synchronous and read-only; resolution is a few filtered
//! scans over local files.

pub mod access;
pub mod config;
pub mod error;
pub mod membership;
pub mod privileges;
pub mod records;
pub mod report;
pub mod store;

pub use access::AccessEvaluator;
pub use config::{load_dump_config, DumpConfig};
pub use error::{AccessError, AccessResult};
pub use records::AccessLevel;
pub use report::{AccessReport, RoleGrant, TeamGrant, Verdict};
pub use store::RecordStore;
