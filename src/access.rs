//! Effective-access resolution.
//!
//! [`AccessEvaluator::check_access`] walks the dump for one `(entity set,
//! user)` pair: gate on the entity set's collection file, collect the user's
//! direct roles and teams, expand both sides into privilege sets, and fold
//! the direct-role set into a verdict. Every step reads through the same
//! [`RecordStore`], so two runs over an unchanged dump produce identical
//! reports.

use log::debug;

use crate::error::{AccessError, AccessResult};
use crate::membership::{MembershipResolver, TeamRoleExpander};
use crate::privileges::PrivilegeAggregator;
use crate::records::{AccessLevel, Privilege, Role, Team, TeamMembership, TeamRole, UserRoleMembership};
use crate::report::{AccessReport, RoleGrant, TeamGrant, Verdict};
use crate::store::RecordStore;

/// Resolves what access a user effectively holds over an entity set.
#[derive(Debug)]
pub struct AccessEvaluator {
    store: RecordStore,
    memberships: MembershipResolver,
    teams: TeamRoleExpander,
    privileges: PrivilegeAggregator,
}

impl AccessEvaluator {
    pub fn new(store: RecordStore) -> Self {
        Self {
            memberships: MembershipResolver::new(store.clone()),
            teams: TeamRoleExpander::new(store.clone()),
            privileges: PrivilegeAggregator::new(store.clone()),
            store,
        }
    }

    /// Resolve the user's effective access over `entity_set`.
    ///
    /// Fails with [`AccessError::EntityNotFound`] when the dump has no
    /// collection file for `entity_set`; no other collection is read before
    /// that check. A membership row pointing at a role, team, or privilege
    /// that its collection does not define fails the whole resolution with
    /// [`AccessError::InconsistentData`].
    ///
    /// The verdict folds the deduplicated union of direct-role privileges
    /// only. Team-granted privileges appear in the report breakdown but do
    /// not move the verdict.
    pub fn check_access(&self, entity_set: &str, user_id: &str) -> AccessResult<AccessReport> {
        if !self.store.exists(entity_set) {
            return Err(AccessError::entity_not_found(entity_set));
        }
        debug!("resolving access of user {user_id} over '{entity_set}'");

        let role_ids = self.memberships.role_memberships_of(user_id)?;
        let team_ids = self.memberships.team_memberships_of(user_id)?;

        let mut user_roles = Vec::with_capacity(role_ids.len());
        let mut direct = Vec::with_capacity(role_ids.len());
        let mut user_privileges: Vec<Privilege> = Vec::new();
        for role_id in &role_ids {
            let role = self.resolve_role(role_id, UserRoleMembership::COLLECTION)?;
            let privileges = self.privileges.privileges_of_role(role_id)?;
            direct.push(RoleGrant {
                role: role.name.clone(),
                privileges: privileges.iter().map(|p| p.name.clone()).collect(),
            });
            for privilege in privileges {
                push_unique(&mut user_privileges, privilege);
            }
            user_roles.push(role.name);
        }

        let mut user_teams = Vec::with_capacity(team_ids.len());
        let mut team = Vec::with_capacity(team_ids.len());
        let mut team_privileges: Vec<Privilege> = Vec::new();
        for team_id in &team_ids {
            let team_record = self.resolve_team(team_id)?;
            let team_role_ids = self.teams.roles_of_team(team_id)?;
            let mut roles = Vec::with_capacity(team_role_ids.len());
            for role_id in &team_role_ids {
                let role = self.resolve_role(role_id, TeamRole::COLLECTION)?;
                let privileges = self.privileges.privileges_of_role(role_id)?;
                roles.push(RoleGrant {
                    role: role.name,
                    privileges: privileges.iter().map(|p| p.name.clone()).collect(),
                });
                for privilege in privileges {
                    push_unique(&mut team_privileges, privilege);
                }
            }
            team.push(TeamGrant {
                team: team_record.name.clone(),
                roles,
            });
            user_teams.push(team_record.name);
        }

        let verdict = if grants_user_access(&user_privileges, entity_set) {
            Verdict::User
        } else {
            Verdict::None
        };
        if verdict == Verdict::None && grants_user_access(&team_privileges, entity_set) {
            debug!(
                "user {user_id} reaches '{entity_set}' only through team grants; \
                 the verdict stays None"
            );
        }

        Ok(AccessReport {
            entity_set: entity_set.to_string(),
            user_id: user_id.to_string(),
            user_roles,
            user_teams,
            direct,
            team,
            verdict,
        })
    }

    fn resolve_role(&self, role_id: &str, referenced_from: &str) -> AccessResult<Role> {
        self.store
            .find(Role::COLLECTION, |role: &Role| role.roleid == role_id)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AccessError::dangling(Role::COLLECTION, "roleid", role_id, referenced_from)
            })
    }

    fn resolve_team(&self, team_id: &str) -> AccessResult<Team> {
        self.store
            .find(Team::COLLECTION, |team: &Team| team.teamid == team_id)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AccessError::dangling(
                    Team::COLLECTION,
                    "teamid",
                    team_id,
                    TeamMembership::COLLECTION,
                )
            })
    }
}

/// Append `candidate` unless a privilege with the same id is already
/// present. First occurrence wins, so union order follows discovery order.
fn push_unique(privileges: &mut Vec<Privilege>, candidate: Privilege) {
    if privileges
        .iter()
        .all(|privilege| privilege.privilegeid != candidate.privilegeid)
    {
        privileges.push(candidate);
    }
}

/// Whether any privilege targets `entity_set` at user-level depth.
fn grants_user_access(privileges: &[Privilege], entity_set: &str) -> bool {
    privileges.iter().any(|privilege| {
        privilege.entity_name == entity_set && privilege.access_level == AccessLevel::User
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privilege(id: &str, entity: &str, level: AccessLevel) -> Privilege {
        Privilege {
            privilegeid: id.to_string(),
            name: format!("prv{id}"),
            entity_name: entity.to_string(),
            access_level: level,
        }
    }

    #[test]
    fn push_unique_keeps_first_occurrence() {
        let mut union = Vec::new();
        push_unique(&mut union, privilege("p1", "accounts", AccessLevel::User));
        push_unique(&mut union, privilege("p2", "contacts", AccessLevel::User));
        push_unique(&mut union, privilege("p1", "accounts", AccessLevel::User));
        assert_eq!(union.len(), 2);
        assert_eq!(union[0].privilegeid, "p1");
        assert_eq!(union[1].privilegeid, "p2");
    }

    #[test]
    fn user_access_requires_matching_entity_and_level() {
        let privileges = vec![
            privilege("p1", "accounts", AccessLevel::Organization),
            privilege("p2", "contacts", AccessLevel::User),
        ];
        assert!(!grants_user_access(&privileges, "accounts"));
        assert!(grants_user_access(&privileges, "contacts"));
        assert!(!grants_user_access(&privileges, "leads"));
    }

    #[test]
    fn unknown_access_levels_never_grant() {
        let privileges = vec![privilege("p1", "accounts", AccessLevel::Other)];
        assert!(!grants_user_access(&privileges, "accounts"));
    }
}
