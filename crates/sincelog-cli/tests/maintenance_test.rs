mod common;
use common::{TestFixture, release_42};
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_import_reports_count_and_version() {
    let fixture = TestFixture::new();
    let path = fixture.write_document("release.json", &release_42());

    fixture
        .command()
        .arg("import")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 5 entries (current version 4.2)",
        ));

    assert!(fixture.data_dir().join("sincelog.db").exists());
}

#[test]
fn test_import_rejects_malformed_document() {
    let fixture = TestFixture::new();
    let path = fixture.write_document(
        "bad.json",
        &json!({"entries": [{"post_type": "page", "title": "about"}]}),
    );

    fixture
        .command()
        .arg("import")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse import document"));
}

#[test]
fn test_rebuild_summarizes_versions() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    fixture
        .command()
        .arg("rebuild")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rebuilt change index for 2 versions (7 entries classified, 0 skipped)",
        ));
}

#[test]
fn test_versions_marks_current() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    fixture
        .command()
        .arg("versions")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  4.0\t2 introduced, 0 modified, 0 deprecated\n",
        ))
        .stdout(predicate::str::contains(
            "* 4.2\t3 introduced, 1 modified, 1 deprecated\n",
        ))
        .stdout(predicate::str::contains("Last import: "));
}

#[test]
fn test_reimport_is_stable() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("first import failed");
    let first = fixture
        .command()
        .args(["since", "4.2"])
        .output()
        .expect("Failed to run since");

    fixture.import(&release_42()).expect("second import failed");
    let second = fixture
        .command()
        .args(["since", "4.2"])
        .output()
        .expect("Failed to run since");

    assert_eq!(first.stdout, second.stdout);
}
