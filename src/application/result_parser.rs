//! Extraction of the fields this layer cares about from sheet payloads.
//!
//! Only the nested path down to each field is modelled; everything else in
//! the payload is ignored.

use crate::domain::outcome::PaymentCredentials;
use crate::error::ParseError;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentData {
    payment_method_data: PaymentMethodData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentMethodData {
    info: CardInfo,
    tokenization_data: TokenizationData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardInfo {
    billing_address: BillingAddress,
}

#[derive(Deserialize)]
struct BillingAddress {
    name: String,
}

#[derive(Deserialize)]
struct TokenizationData {
    token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorStatus {
    status_code: i32,
}

/// Reads the billing name and payment token from a success payload.
pub fn parse(payload: Option<&str>) -> Result<PaymentCredentials, ParseError> {
    let data: PaymentData = serde_json::from_str(payload.ok_or(ParseError::MissingPayload)?)?;
    let method = data.payment_method_data;
    Ok(PaymentCredentials {
        token: method.tokenization_data.token,
        billing_name: method.info.billing_address.name,
    })
}

/// Reads the integer status code from an error payload.
pub fn parse_status(payload: Option<&str>) -> Result<i32, ParseError> {
    let status: ErrorStatus = serde_json::from_str(payload.ok_or(ParseError::MissingPayload)?)?;
    Ok(status.status_code)
}
