use std::fs;
use std::path::Path;

use serde_json::{json, Value};

/// Write one collection file in the OData envelope shape the dumps use.
pub fn write_collection(dir: &Path, name: &str, records: Value) {
    let envelope = json!({
        "@odata.context": format!("https://org.crm.dynamics.com/api/data/v9.2/$metadata#{name}"),
        "value": records,
    });
    fs::write(dir.join(format!("{name}.json")), envelope.to_string()).unwrap();
}

/// Seed a dump with the baseline organization the integration tests share.
///
/// * `u1` holds Sales Manager directly, which reads accounts at user level.
/// * `u3` is only a member of West Team, which carries Team Contributor.
/// * `u4` holds Auditor directly, whose account privilege is
///   organization-wide.
pub fn standard_dump(dir: &Path) {
    write_collection(
        dir,
        "roles",
        json!([
            {"roleid": "r1", "name": "Sales Manager"},
            {"roleid": "r2", "name": "Team Contributor"},
            {"roleid": "r3", "name": "Auditor"},
        ]),
    );
    write_collection(
        dir,
        "teams",
        json!([
            {"teamid": "t1", "name": "West Team"},
        ]),
    );
    write_collection(
        dir,
        "privileges",
        json!([
            {"privilegeid": "p1", "name": "prvReadAccount", "entity_name": "accounts", "access_level": "User"},
            {"privilegeid": "p2", "name": "prvReadContact", "entity_name": "contacts", "access_level": "User"},
            {"privilegeid": "p3", "name": "prvWriteAccount", "entity_name": "accounts", "access_level": "Organization"},
        ]),
    );
    write_collection(
        dir,
        "systemuserrolescollection",
        json!([
            {"systemuserid": "u1", "roleid": "r1"},
            {"systemuserid": "u4", "roleid": "r3"},
        ]),
    );
    write_collection(
        dir,
        "teammemberships",
        json!([
            {"systemuserid": "u3", "teamid": "t1"},
        ]),
    );
    write_collection(
        dir,
        "teamrolescollection",
        json!([
            {"teamid": "t1", "roleid": "r2"},
        ]),
    );
    write_collection(
        dir,
        "roleprivilegescollection",
        json!([
            {"roleid": "r1", "privilegeid": "p1"},
            {"roleid": "r2", "privilegeid": "p1"},
            {"roleid": "r3", "privilegeid": "p3"},
        ]),
    );
    // Entity collections whose presence gates resolution.
    write_collection(dir, "accounts", json!([]));
    write_collection(dir, "contacts", json!([]));
}
