// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{PersistenceError, SqlitePersistence};

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = SqlitePersistence::new_in_memory().unwrap();
    let mut db2 = SqlitePersistence::new_in_memory().unwrap();

    let profile_id = db1.create_profile("Ada", "user").unwrap();

    assert!(db1.get_profile(profile_id).unwrap().is_some());
    assert!(
        db2.get_profile(profile_id).unwrap().is_none(),
        "db2 must not see rows written to db1"
    );
}

#[test]
fn test_file_database_persists_across_reopen() {
    let path = std::env::temp_dir().join(format!(
        "gamenight-persistence-test-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let profile_id = {
        let mut persistence = SqlitePersistence::new_with_file(&path).unwrap();
        persistence.create_profile("Grace", "admin").unwrap()
    };

    let mut reopened = SqlitePersistence::new_with_file(&path).unwrap();
    let profile = reopened.get_profile(profile_id).unwrap().unwrap();
    assert_eq!(profile.display_name, "Grace");
    assert_eq!(profile.role, "admin");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
