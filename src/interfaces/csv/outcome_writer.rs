use crate::domain::outcome::{CorrelationToken, PaymentOutcome};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    request: u32,
    outcome: &'a str,
    status: Option<i32>,
    billing_name: Option<&'a str>,
    token: Option<&'a str>,
}

/// Writes resolved outcomes as CSV rows:
/// `request,outcome,status,billing_name,token`.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    /// Creates the writer and emits the header row.
    pub fn new(destination: W) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(destination);
        writer.write_record(["request", "outcome", "status", "billing_name", "token"])?;
        Ok(Self { writer })
    }

    pub fn write_outcome(
        &mut self,
        request: CorrelationToken,
        outcome: &PaymentOutcome,
    ) -> Result<()> {
        let mut record = OutcomeRecord {
            request: request.0,
            outcome: outcome.label(),
            status: None,
            billing_name: None,
            token: None,
        };
        match outcome {
            PaymentOutcome::Succeeded(Some(credentials)) => {
                record.billing_name = Some(credentials.billing_name.as_str());
                record.token = Some(credentials.token.as_str());
            }
            PaymentOutcome::Failed(status) => record.status = Some(*status),
            PaymentOutcome::Succeeded(None) | PaymentOutcome::Cancelled => {}
        }
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::PaymentCredentials;

    #[test]
    fn test_writes_header_and_rows() {
        let mut buffer = Vec::new();
        {
            let mut writer = OutcomeWriter::new(&mut buffer).unwrap();
            writer
                .write_outcome(
                    CorrelationToken(1),
                    &PaymentOutcome::Succeeded(Some(PaymentCredentials {
                        token: "tok_1".to_string(),
                        billing_name: "Jane Doe".to_string(),
                    })),
                )
                .unwrap();
            writer
                .write_outcome(CorrelationToken(2), &PaymentOutcome::Failed(405))
                .unwrap();
            writer
                .write_outcome(CorrelationToken(3), &PaymentOutcome::Cancelled)
                .unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "request,outcome,status,billing_name,token\n\
             1,succeeded,,Jane Doe,tok_1\n\
             2,failed,405,,\n\
             3,cancelled,,,\n"
        );
    }
}
