use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let orders = common::orders_file(&[(1, "100.0")]);
    let operations = common::operations_file(&["create, 1, , 100.0, Cash,"]);

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::new(cargo_bin!("paysettle"));
    cmd.arg(operations.path())
        .arg("--orders")
        .arg(orders.path())
        .arg("--db-path")
        .arg(dir.path().join("some_db"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARN"))
        .stderr(predicate::str::contains("Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."))
        .stderr(predicate::str::contains("WARNING").not())
        .stdout(predicate::str::contains("1,100,pending,0,100,0,false"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let orders = common::orders_file(&[(1, "100.0")]);
    let operations = common::operations_file(&["create, 1, , 100.0, Cash,"]);

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("paysettle"));
    cmd.arg(operations.path())
        .arg("--orders")
        .arg(orders.path())
        .arg("--db-path")
        .arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Falling back").not());
}
