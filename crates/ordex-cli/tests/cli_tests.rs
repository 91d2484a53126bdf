//! Integration tests for the ordex CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const ORDER_HTML: &str = r#"
<html><body>
  <p>Hi Rohan,</p>
  <p>Thank you for ordering from Spice Villa</p>
  <div>ordered on 12 Jan 2023</div>
  <div>2x Chicken Roll - ₹180.00</div>
  <div>1x Veg Burger - ₹90.00</div>
  <div>Total paid ₹450.00</div>
  <p>This invoice is issued on behalf of Spice Villa 12 MG Road Bengaluru 560001</p>
</body></html>
"#;

fn write_email(dir: &TempDir, name: &str, html: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, html).unwrap();
    path
}

#[test]
fn process_extracts_order_fields() {
    let dir = TempDir::new().unwrap();
    let input = write_email(&dir, "order.html", ORDER_HTML);

    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rohan"))
        .stdout(predicate::str::contains("Spice Villa"))
        .stdout(predicate::str::contains("450.00"));
}

#[test]
fn process_text_format() {
    let dir = TempDir::new().unwrap();
    let input = write_email(&dir, "order.html", ORDER_HTML);

    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("process")
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2x Chicken Roll"))
        .stdout(predicate::str::contains("12 MG Road Bengaluru"));
}

#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_email(&dir, "order.html", ORDER_HTML);
    let output = dir.path().join("record.json");

    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("process")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("Spice Villa"));
}

#[test]
fn process_rejects_loyalty_notice() {
    let dir = TempDir::new().unwrap();
    let input = write_email(
        &dir,
        "gold.html",
        "<p>Congratulations! You've unlocked Zomato Gold</p>",
    );

    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Not an order email"));
}

#[test]
fn process_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("process")
        .arg("no_such_file.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn batch_writes_summary_csv() {
    let dir = TempDir::new().unwrap();
    write_email(&dir, "a.html", ORDER_HTML);
    write_email(
        &dir,
        "b.html",
        "<p>Congratulations! You've unlocked Zomato Gold</p>",
    );
    let out_dir = dir.path().join("out");

    let pattern = dir.path().join("*.html");
    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Orders parsed:\s+1").unwrap())
        .stdout(predicate::str::is_match(r"Rejected:\s+1").unwrap());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("a.html,parsed"));
    assert!(summary.contains("b.html,rejected"));

    // Parsed order also gets its own record file
    assert!(out_dir.join("a.json").exists());
    assert!(!out_dir.join("b.json").exists());
}

#[test]
fn batch_fails_on_empty_glob() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.html");

    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn config_show_prints_defaults() {
    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("denylist"))
        .stdout(predicate::str::contains("currency_symbol"));
}

#[test]
fn config_init_creates_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut cmd = Command::cargo_bin("ordex").unwrap();
    cmd.arg("config")
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .success();

    assert!(path.exists());
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("food_keywords"));
}
