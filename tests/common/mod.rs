#![allow(dead_code)]

use paysheet::application::config_builder::ConfigBuilder;
use paysheet::application::controller::PaymentFlowController;
use paysheet::domain::config::PaymentConfiguration;
use paysheet::infrastructure::in_memory::{RecordingNotifier, RecordingPaymentSheet};
use std::io::{Error, Write};
use std::path::Path;
use std::sync::Arc;

pub struct Harness {
    pub controller: PaymentFlowController,
    pub sheet: RecordingPaymentSheet,
    pub notifier: RecordingNotifier,
}

pub fn harness(config: PaymentConfiguration) -> Harness {
    let sheet = RecordingPaymentSheet::new();
    let notifier = RecordingNotifier::new();
    let controller = PaymentFlowController::new(
        ConfigBuilder::new(Arc::new(config)),
        Box::new(sheet.clone()),
        Box::new(notifier.clone()),
    );
    Harness {
        controller,
        sheet,
        notifier,
    }
}

pub fn success_payload(name: &str, token: &str) -> String {
    serde_json::json!({
        "apiVersion": 2,
        "apiVersionMinor": 0,
        "paymentMethodData": {
            "type": "CARD",
            "info": {
                "cardNetwork": "VISA",
                "cardDetails": "1234",
                "billingAddress": { "name": name }
            },
            "tokenizationData": { "type": "PAYMENT_GATEWAY", "token": token }
        }
    })
    .to_string()
}

/// Writes a replay script with one initiate/result pair per price, all
/// resolved as cancelled.
pub fn generate_events(path: &Path, attempts: usize) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["event", "price", "request", "result", "payload"])?;

    for i in 1..=attempts {
        let price = format!("{i}.00");
        wtr.write_record(["initiate", price.as_str(), "", "", ""])?;
        wtr.write_record(["result", "", "", "cancelled", ""])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_config(file: &mut impl Write, json: &serde_json::Value) -> Result<(), Error> {
    write!(file, "{json}")?;
    file.flush()
}
