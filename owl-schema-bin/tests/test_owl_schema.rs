use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::process::Command; // Run programs

#[test]
fn integration_run() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-summary")?;

    cmd.assert().failure().stderr(predicate::str::contains(
        "The following required arguments were not provided",
    ));

    Ok(())
}

#[test]
fn integration_file_doesnt_exist_owx() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-summary")?;

    cmd.arg("test/file/doesnt/exist.owx");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No such file or directory"));

    Ok(())
}

#[test]
fn integration_unknown_format() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-summary")?;

    cmd.arg("tests/data/zoo.txt");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse a file of this format"));

    Ok(())
}

#[test]
fn integration_summary() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-summary")?;

    cmd.arg("tests/data/packages.owx");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Classes: 8"))
        .stdout(predicate::str::contains("Object Properties: 2"))
        .stdout(predicate::str::contains("Datatype Properties: 1"))
        .stdout(predicate::str::contains(
            "Default Namespace: http://www.example.com/packages#",
        ));

    Ok(())
}

#[test]
fn integration_packages() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-packages")?;

    cmd.arg("tests/data/packages.owx");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Packages: 2"))
        .stdout(predicate::str::contains("Package1"))
        .stdout(predicate::str::contains("Outside any package: 1"));

    Ok(())
}

#[test]
fn integration_packages_forget() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-packages")?;

    cmd.arg("tests/data/packages.owx")
        .arg("--forget-package")
        .arg("http://www.example.com/packages#Package2");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Packages: 1"));

    Ok(())
}

#[test]
fn integration_packages_unknown_class() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-packages")?;

    cmd.arg("tests/data/packages.owx")
        .arg("--force-package")
        .arg("http://www.example.com/packages#NoSuchClass");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown class"));

    Ok(())
}

#[test]
fn integration_depends() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-depends")?;

    cmd.arg("tests/data/zoo.owx").arg("zoo:Keeper");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Keeper"))
        .stdout(predicate::str::contains("Animal"))
        .stdout(predicate::str::contains("Mouse").not());

    Ok(())
}

#[test]
fn integration_depends_unbounded() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-depends")?;

    cmd.arg("tests/data/zoo.owx")
        .arg("http://www.example.com/zoo#Cat")
        .arg("--unbounded");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Mouse"))
        .stdout(predicate::str::contains("Feline"));

    Ok(())
}

#[test]
fn integration_hierarchy() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema-hierarchy")?;

    cmd.arg("tests/data/zoo.owx");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"Domestic Cat\""))
        .stdout(predicate::str::contains("tom"));

    Ok(())
}

#[test]
fn integration_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("owl-schema")?;

    cmd.arg("summary").arg("tests/data/zoo.owx");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Individuals: 1"));

    Ok(())
}
