//! Typed records for the dumped collections.
//!
//! Field names match the Dynamics attribute names verbatim, so the structs
//! deserialize straight out of the dump files. Real dumps carry plenty of
//! attributes beyond the ones resolution needs; serde ignores the extras.
//!
//! Each record type knows the basename of the collection file it is dumped
//! under (`COLLECTION`), which is also the name callers pass to the store.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every dumped collection: the records live under a
/// top-level `value` array, optionally annotated with OData metadata.
///
/// A non-null `@odata.nextLink` means the server paged the response and the
/// dump holds only the first page; the store warns about it, since
/// aggregating over a truncated collection can under-report privileges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityCollection<T> {
    #[serde(
        rename = "@odata.context",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub odata_context: Option<String>,
    #[serde(
        rename = "@odata.count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub odata_count: Option<i64>,
    #[serde(
        rename = "@odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub odata_next: Option<String>,
    pub value: Vec<T>,
}

/// Coarse scope tier of a privilege.
///
/// Only `User` is interpreted when deciding the final verdict; the other
/// tiers are carried through for reporting. Tiers this tool does not know
/// about deserialize as `Other` instead of failing the whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    User,
    Team,
    BusinessUnit,
    Organization,
    #[serde(other)]
    Other,
}

/// A named bundle of privileges assignable to users or teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub roleid: String,
    pub name: String,
}

impl Role {
    pub const COLLECTION: &'static str = "roles";
}

/// A group of users that can be granted roles collectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub teamid: String,
    pub name: String,
}

impl Team {
    pub const COLLECTION: &'static str = "teams";
}

/// A single permission record, scoped to one entity set and one access tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privilege {
    pub privilegeid: String,
    pub name: String,
    pub entity_name: String,
    pub access_level: AccessLevel,
}

impl Privilege {
    pub const COLLECTION: &'static str = "privileges";
}

/// Links a user to a directly assigned role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoleMembership {
    pub systemuserid: String,
    pub roleid: String,
}

impl UserRoleMembership {
    pub const COLLECTION: &'static str = "systemuserrolescollection";
}

/// Links a user to a team they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub systemuserid: String,
    pub teamid: String,
}

impl TeamMembership {
    pub const COLLECTION: &'static str = "teammemberships";
}

/// Links a team to a role granted to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRole {
    pub teamid: String,
    pub roleid: String,
}

impl TeamRole {
    pub const COLLECTION: &'static str = "teamrolescollection";
}

/// Links a role to a privilege attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePrivilege {
    pub roleid: String,
    pub privilegeid: String,
}

impl RolePrivilege {
    pub const COLLECTION: &'static str = "roleprivilegescollection";
}
