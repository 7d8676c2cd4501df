mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_cli_replay_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("replay").arg("tests/fixtures/events.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "request,outcome,status,billing_name,token",
        ))
        .stdout(predicate::str::contains("1,succeeded,,Jane Doe,tok_123"))
        // the stray request code 991 is ignored; the latest attempt is cancelled
        .stdout(predicate::str::contains("2,cancelled,,,"))
        .stdout(predicate::str::contains("3,failed,409,,"))
        // unrecognized code 17 emits nothing but unlocks attempt 5
        .stdout(predicate::str::contains("4,").not())
        .stdout(predicate::str::contains("5,succeeded,,,"))
        .stdout(predicate::str::contains("991").not());

    Ok(())
}

#[test]
fn test_cli_readiness_document() {
    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.arg("readiness");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"allowedPaymentMethods\""))
        .stdout(predicate::str::contains("\"billingAddressRequired\": true"))
        .stdout(predicate::str::contains("\"tokenizationSpecification\"").not());
}

#[test]
fn test_cli_request_document() {
    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.args(["request", "--price", "0.5", "--shipping"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"totalPrice\": \"50\""))
        .stdout(predicate::str::contains("\"totalPriceStatus\": \"FINAL\""))
        .stdout(predicate::str::contains("\"type\": \"PAYMENT_GATEWAY\""))
        .stdout(predicate::str::contains("\"shippingAddressRequired\": true"));
}

#[test]
fn test_cli_request_with_direct_only_config() {
    let mut config = NamedTempFile::new().unwrap();
    common::write_config(
        &mut config,
        &serde_json::json!({
            "direct": { "protocol_version": "ECv2", "public_key": "BASE64KEY" }
        }),
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.arg("--config")
        .arg(config.path())
        .args(["request", "--price", "12.34"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"DIRECT\""))
        .stdout(predicate::str::contains("\"publicKey\": \"BASE64KEY\""))
        .stdout(predicate::str::contains("\"totalPrice\": \"1234\""))
        .stdout(predicate::str::contains("PAYMENT_GATEWAY").not())
        .stdout(predicate::str::contains("shippingAddressParameters").not());
}

#[test]
fn test_cli_request_rejects_empty_networks() {
    let mut config = NamedTempFile::new().unwrap();
    common::write_config(&mut config, &serde_json::json!({ "card_networks": [] })).unwrap();

    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.env("PAYSHEET_CONFIG", config.path())
        .args(["request", "--price", "0.5"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no card networks configured"));
}

#[test]
fn test_cli_replay_not_ready() {
    let mut cmd = Command::new(cargo_bin!("paysheet"));
    cmd.args(["replay", "tests/fixtures/events.csv", "--not-ready"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Payment not available"))
        .stdout(predicate::str::is_empty());
}
