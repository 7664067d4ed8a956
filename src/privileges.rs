//! Privilege definitions and their attachment to roles.
//!
//! The privilege catalog is the one collection every role expansion touches,
//! so it is parsed once per aggregator and indexed by id. The memo lives on
//! the aggregator instance rather than in process state: two aggregators
//! over different dumps never share a catalog.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::OnceCell;

use crate::error::{AccessError, AccessResult};
use crate::records::{Privilege, RolePrivilege};
use crate::store::RecordStore;

/// Lazily-built index of the `privileges` collection, keyed by privilege id.
#[derive(Debug, Default)]
pub struct PrivilegeCatalog {
    by_id: OnceCell<HashMap<String, Privilege>>,
}

impl PrivilegeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog index, loading it from the store on first use.
    ///
    /// The first call does the read and parse; later calls return the same
    /// index without touching storage. A failed first load is not cached, so
    /// a later call may retry.
    pub fn get_or_load(&self, store: &RecordStore) -> AccessResult<&HashMap<String, Privilege>> {
        self.by_id.get_or_try_init(|| {
            let records: Vec<Privilege> = store.load(Privilege::COLLECTION)?;
            debug!("indexed {} privilege definition(s)", records.len());
            Ok(records
                .into_iter()
                .map(|privilege| (privilege.privilegeid.clone(), privilege))
                .collect())
        })
    }
}

/// Expands roles into full privilege records.
#[derive(Debug)]
pub struct PrivilegeAggregator {
    store: RecordStore,
    catalog: PrivilegeCatalog,
}

impl PrivilegeAggregator {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            catalog: PrivilegeCatalog::new(),
        }
    }

    /// Full privilege records attached to a role, in assignment order.
    ///
    /// Each role-privilege link must resolve against the catalog; a link to
    /// an id the catalog does not define is corrupt data, not an empty
    /// result.
    pub fn privileges_of_role(&self, role_id: &str) -> AccessResult<Vec<Privilege>> {
        let links = self
            .store
            .find(RolePrivilege::COLLECTION, |link: &RolePrivilege| {
                link.roleid == role_id
            })?;

        let mut privileges = Vec::with_capacity(links.len());
        for link in links {
            privileges.push(self.resolve_privilege(&link.privilegeid)?);
        }
        Ok(privileges)
    }

    fn resolve_privilege(&self, privilege_id: &str) -> AccessResult<Privilege> {
        let catalog = self.catalog.get_or_load(&self.store)?;
        catalog.get(privilege_id).cloned().ok_or_else(|| {
            AccessError::dangling(
                Privilege::COLLECTION,
                "privilegeid",
                privilege_id,
                RolePrivilege::COLLECTION,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn write_collection(dir: &std::path::Path, name: &str, records: serde_json::Value) {
        let envelope = json!({ "value": records });
        fs::write(dir.join(format!("{name}.json")), envelope.to_string()).unwrap();
    }

    fn seeded_dump(dir: &std::path::Path) {
        write_collection(
            dir,
            "privileges",
            json!([
                {"privilegeid": "p1", "name": "prvReadAccount", "entity_name": "accounts", "access_level": "User"},
                {"privilegeid": "p2", "name": "prvReadContact", "entity_name": "contacts", "access_level": "User"},
            ]),
        );
        write_collection(
            dir,
            "roleprivilegescollection",
            json!([
                {"roleid": "r1", "privilegeid": "p1"},
                {"roleid": "r1", "privilegeid": "p2"},
                {"roleid": "r2", "privilegeid": "p2"},
            ]),
        );
    }

    #[test]
    fn role_privileges_resolve_in_assignment_order() {
        let dir = tempdir().unwrap();
        seeded_dump(dir.path());

        let aggregator = PrivilegeAggregator::new(RecordStore::new(dir.path()));
        let privileges = aggregator.privileges_of_role("r1").unwrap();
        let names: Vec<_> = privileges.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["prvReadAccount", "prvReadContact"]);
    }

    #[test]
    fn role_without_links_resolves_empty() {
        let dir = tempdir().unwrap();
        seeded_dump(dir.path());

        let aggregator = PrivilegeAggregator::new(RecordStore::new(dir.path()));
        assert!(aggregator.privileges_of_role("r9").unwrap().is_empty());
    }

    #[test]
    fn dangling_privilege_link_is_inconsistent_data() {
        let dir = tempdir().unwrap();
        write_collection(
            dir.path(),
            "privileges",
            json!([
                {"privilegeid": "p1", "name": "prvReadAccount", "entity_name": "accounts", "access_level": "User"},
            ]),
        );
        write_collection(
            dir.path(),
            "roleprivilegescollection",
            json!([{"roleid": "r1", "privilegeid": "p404"}]),
        );

        let aggregator = PrivilegeAggregator::new(RecordStore::new(dir.path()));
        let err = aggregator.privileges_of_role("r1").unwrap_err();
        match err {
            AccessError::InconsistentData { collection, id, .. } => {
                assert_eq!(collection, "privileges");
                assert_eq!(id, "p404");
            }
            other => panic!("expected InconsistentData, got {other}"),
        }
    }

    #[test]
    fn catalog_is_read_once_per_aggregator() {
        let dir = tempdir().unwrap();
        seeded_dump(dir.path());

        let aggregator = PrivilegeAggregator::new(RecordStore::new(dir.path()));
        aggregator.privileges_of_role("r1").unwrap();

        // With the catalog memoized, deleting the backing file must not
        // affect later expansions.
        fs::remove_file(dir.path().join("privileges.json")).unwrap();
        let privileges = aggregator.privileges_of_role("r2").unwrap();
        assert_eq!(privileges.len(), 1);
        assert_eq!(privileges[0].name, "prvReadContact");
    }

    #[test]
    fn failed_catalog_load_is_not_memoized() {
        let dir = tempdir().unwrap();
        write_collection(
            dir.path(),
            "roleprivilegescollection",
            json!([{"roleid": "r1", "privilegeid": "p1"}]),
        );

        let aggregator = PrivilegeAggregator::new(RecordStore::new(dir.path()));
        assert!(aggregator.privileges_of_role("r1").is_err());

        // A later call sees the repaired dump.
        write_collection(
            dir.path(),
            "privileges",
            json!([
                {"privilegeid": "p1", "name": "prvReadAccount", "entity_name": "accounts", "access_level": "User"},
            ]),
        );
        assert_eq!(aggregator.privileges_of_role("r1").unwrap().len(), 1);
    }
}
