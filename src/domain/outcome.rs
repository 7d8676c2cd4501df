use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Binds a dispatched payment request to its eventual sheet result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationToken(pub u32);

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result code reported by the payment sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ResultCode {
    Ok,
    Cancelled,
    Error,
    Other(i32),
}

impl ResultCode {
    pub const RAW_OK: i32 = -1;
    pub const RAW_CANCELLED: i32 = 0;
    pub const RAW_ERROR: i32 = 1;

    pub fn from_raw(code: i32) -> Self {
        match code {
            Self::RAW_OK => ResultCode::Ok,
            Self::RAW_CANCELLED => ResultCode::Cancelled,
            Self::RAW_ERROR => ResultCode::Error,
            other => ResultCode::Other(other),
        }
    }
}

impl FromStr for ResultCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(ResultCode::Ok),
            "cancelled" | "canceled" => Ok(ResultCode::Cancelled),
            "error" => Ok(ResultCode::Error),
            other => other
                .parse::<i32>()
                .map(ResultCode::from_raw)
                .map_err(|_| format!("unknown result code: {s}")),
        }
    }
}

impl TryFrom<String> for ResultCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        value.parse()
    }
}

/// A completion event delivered by the payment sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetResult {
    pub request_code: CorrelationToken,
    pub result_code: ResultCode,
    /// Opaque JSON returned alongside the result code.
    pub payload: Option<String>,
}

impl SheetResult {
    pub fn new(request_code: CorrelationToken, result_code: ResultCode) -> Self {
        Self {
            request_code,
            result_code,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

/// Fields extracted from a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCredentials {
    pub token: String,
    pub billing_name: String,
}

/// Final classification of a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The sheet reported success. Credentials are `None` when the payload
    /// could not be parsed.
    Succeeded(Option<PaymentCredentials>),
    Cancelled,
    Failed(i32),
}

impl PaymentOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentOutcome::Succeeded(_) => "succeeded",
            PaymentOutcome::Cancelled => "cancelled",
            PaymentOutcome::Failed(_) => "failed",
        }
    }
}

/// Whether a payment attempt is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    RequestIssued { token: CorrelationToken },
}

/// User-visible notifications raised by the payment flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Cancelled,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Cancelled => f.write_str("Canceled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_code_from_raw() {
        assert_eq!(ResultCode::from_raw(-1), ResultCode::Ok);
        assert_eq!(ResultCode::from_raw(0), ResultCode::Cancelled);
        assert_eq!(ResultCode::from_raw(1), ResultCode::Error);
        assert_eq!(ResultCode::from_raw(42), ResultCode::Other(42));
    }

    #[test]
    fn test_result_code_from_str() {
        assert_eq!("OK".parse::<ResultCode>(), Ok(ResultCode::Ok));
        assert_eq!("canceled".parse::<ResultCode>(), Ok(ResultCode::Cancelled));
        assert_eq!(" error ".parse::<ResultCode>(), Ok(ResultCode::Error));
        assert_eq!("-1".parse::<ResultCode>(), Ok(ResultCode::Ok));
        assert_eq!("7".parse::<ResultCode>(), Ok(ResultCode::Other(7)));
        assert!("maybe".parse::<ResultCode>().is_err());
    }

    #[test]
    fn test_result_code_deserializes_from_name_or_raw() {
        let codes: Vec<ResultCode> =
            serde_json::from_str(r#"["ok", "cancelled", "error", "-1", "7"]"#).unwrap();
        assert_eq!(
            codes,
            vec![
                ResultCode::Ok,
                ResultCode::Cancelled,
                ResultCode::Error,
                ResultCode::Ok,
                ResultCode::Other(7),
            ]
        );
        assert!(serde_json::from_str::<ResultCode>(r#""maybe""#).is_err());
    }
}
