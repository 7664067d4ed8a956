//! The access report: everything one resolution discovered, plus the
//! verdict.
//!
//! The report is a plain value so callers can render it, serialize it, or
//! compare two of them; resolution logic lives in [`crate::access`].

use std::fmt;

use serde::Serialize;

/// Effective access of a user over an entity set.
///
/// `User` means at least one privilege granted through a direct role targets
/// the entity set at user-level depth. Privileges arriving through teams are
/// reported in the breakdown but do not move the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    User,
    None,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::User => write!(f, "User"),
            Verdict::None => write!(f, "None"),
        }
    }
}

/// Privileges granted through one role, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub role: String,
    pub privileges: Vec<String>,
}

/// Roles (and their privileges) granted through one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamGrant {
    pub team: String,
    pub roles: Vec<RoleGrant>,
}

/// Full outcome of one access resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessReport {
    pub entity_set: String,
    pub user_id: String,
    /// Names of the user's direct roles, in membership order.
    pub user_roles: Vec<String>,
    /// Names of the user's teams, in membership order.
    pub user_teams: Vec<String>,
    /// Per-role privilege breakdown for direct roles.
    pub direct: Vec<RoleGrant>,
    /// Per-team, per-role privilege breakdown.
    pub team: Vec<TeamGrant>,
    pub verdict: Verdict,
}

impl fmt::Display for AccessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[+] user roles: {:?}", self.user_roles)?;
        writeln!(f, "[+] user teams: {:?}", self.user_teams)?;
        for grant in &self.direct {
            writeln!(f, "[+] user role {} privileges:", grant.role)?;
            for privilege in &grant.privileges {
                writeln!(f, "[+]\t{privilege}")?;
            }
        }
        for team in &self.team {
            writeln!(f, "[+] user team {} roles:", team.team)?;
            for grant in &team.roles {
                writeln!(
                    f,
                    "[+]\tuser team {} role {} privileges:",
                    team.team, grant.role
                )?;
                for privilege in &grant.privileges {
                    writeln!(f, "[+]\t\t{privilege}")?;
                }
            }
        }
        write!(f, "[+] access level: {}", self.verdict)
    }
}
