mod common;
use common::{TestFixture, release_42};
use predicates::prelude::*;

#[test]
fn test_report_requires_store() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("since")
        .arg("4.2")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Workspace not initialized"));
}

#[test]
fn test_report_groups_and_orders_entries() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    let output = fixture
        .command()
        .arg("since")
        .arg("4.2")
        .output()
        .expect("Failed to run since");

    assert!(
        output.status.success(),
        "since failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("Changes in 4.2\n"));
    let positions: Vec<usize> = [
        "Introduced",
        "\tClasses",
        "\t\tc_class",
        "\tFunctions",
        "\t\ta_func",
        "\t\tb_func",
        "Modified",
        "\t\tmod_func",
        "Deprecated",
        "\tHooks",
        "\t\told_hook",
    ]
    .iter()
    .map(|needle| {
        stdout
            .find(needle)
            .unwrap_or_else(|| panic!("missing {:?} in:\n{}", needle, stdout))
    })
    .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "unexpected order:\n{}",
        stdout
    );

    assert!(stdout.contains("\t\t\tticket: https://core.trac.wordpress.org/ticket/30000\n"));
    assert!(stdout.contains("\t\t\tsource: wp-includes/class-c.php\n"));
    assert!(stdout.contains("\t\t\tmodification: Added the $args parameter.\n"));
    assert!(stdout.contains("\t\t\talternative: Use new_hook instead.\n"));
    assert!(stdout.contains("\t\t\tpackage: unspecified\n"));
}

#[test]
fn test_defaults_to_current_version() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    fixture
        .command()
        .arg("since")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Changes in 4.2\n"));
}

#[test]
fn test_unknown_version_fails_without_report() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    fixture
        .command()
        .arg("since")
        .arg("99.99")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown version: 99.99"));
}

#[test]
fn test_missing_current_version_reports_every_reason() {
    let fixture = TestFixture::new();
    let mut document = release_42();
    document.as_object_mut().unwrap().remove("version");
    fixture.import(&document).expect("import failed");

    fixture
        .command()
        .arg("since")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Couldn't get current version"))
        .stderr(predicate::str::contains("Error: No imported version recorded"));
}

#[test]
fn test_empty_group_prints_no_changes() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    fixture
        .command()
        .args(["since", "4.0", "--change_type=deprecated"])
        .assert()
        .success()
        .stdout("Changes in 4.0\n\nNo changes.\n");
}

#[test]
fn test_post_type_filter_accepts_dashed_alias() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");

    fixture
        .command()
        .args(["since", "4.2", "--change-type", "introduced", "--post-type", "function"])
        .assert()
        .success()
        .stdout("Changes in 4.2\n\na_func\n\tpackage: unspecified\nb_func\n\tpackage: WordPress\n");
}

#[test]
fn test_rejects_unknown_change_type() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .args(["since", "4.2", "--change_type=removed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_config_controls_detail_lines() {
    let fixture = TestFixture::new();
    fixture.import(&release_42()).expect("import failed");
    fixture.write_config(
        "[report]\nticket_url = \"https://tracker.example/issue/\"\nunspecified_package = \"(none)\"\n",
    );

    fixture
        .command()
        .args(["since", "4.2", "--change_type=introduced", "--post_type=class"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\tticket: https://tracker.example/issue/30000\n",
        ))
        .stdout(predicate::str::contains("\tpackage: (none)\n"));
}
