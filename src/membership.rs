//! Membership lookups: which roles and teams a user belongs to, and which
//! roles a team carries.
//!
//! These are thin scans over the junction collections. Absence of rows is an
//! ordinary outcome (a user with no roles simply has none), so every lookup
//! returns a possibly-empty list rather than an error.

use log::debug;

use crate::error::AccessResult;
use crate::records::{TeamMembership, TeamRole, UserRoleMembership};
use crate::store::RecordStore;

/// Resolves a user's direct role and team memberships.
#[derive(Debug, Clone)]
pub struct MembershipResolver {
    store: RecordStore,
}

impl MembershipResolver {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Role ids the user holds directly, in collection order.
    pub fn role_memberships_of(&self, user_id: &str) -> AccessResult<Vec<String>> {
        let links = self.store.find(
            UserRoleMembership::COLLECTION,
            |link: &UserRoleMembership| link.systemuserid == user_id,
        )?;
        debug!("user {user_id} holds {} direct role(s)", links.len());
        Ok(links.into_iter().map(|link| link.roleid).collect())
    }

    /// Team ids the user is a member of, in collection order.
    pub fn team_memberships_of(&self, user_id: &str) -> AccessResult<Vec<String>> {
        let links = self
            .store
            .find(TeamMembership::COLLECTION, |link: &TeamMembership| {
                link.systemuserid == user_id
            })?;
        debug!("user {user_id} belongs to {} team(s)", links.len());
        Ok(links.into_iter().map(|link| link.teamid).collect())
    }
}

/// Expands a team into the role ids assigned to it.
#[derive(Debug, Clone)]
pub struct TeamRoleExpander {
    store: RecordStore,
}

impl TeamRoleExpander {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Role ids assigned to the team, in collection order.
    pub fn roles_of_team(&self, team_id: &str) -> AccessResult<Vec<String>> {
        let links = self
            .store
            .find(TeamRole::COLLECTION, |link: &TeamRole| {
                link.teamid == team_id
            })?;
        Ok(links.into_iter().map(|link| link.roleid).collect())
    }
}
