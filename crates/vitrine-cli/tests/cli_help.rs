use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    cargo_bin_cmd!("vitrine")
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("exec")
                .and(predicate::str::contains("config"))
                .and(predicate::str::contains("--token")),
        );
}

#[test]
fn version_flag_works() {
    cargo_bin_cmd!("vitrine")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vitrine"));
}
