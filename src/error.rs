use miette::Diagnostic;
use thiserror::Error;

/// Raised when the active configuration cannot produce a valid payment request.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no card networks configured")]
    #[diagnostic(
        code(paysheet::config::card_networks),
        help("list at least one network, e.g. \"VISA\"")
    )]
    EmptyCardNetworks,
    #[error("no card auth methods configured")]
    #[diagnostic(
        code(paysheet::config::auth_methods),
        help("use \"PAN_ONLY\" and/or \"CRYPTOGRAM_3DS\"")
    )]
    EmptyAuthMethods,
    #[error("duplicate entry {0} in {1}")]
    #[diagnostic(code(paysheet::config::duplicate))]
    Duplicate(String, &'static str),
    #[error("no tokenization mode configured")]
    #[diagnostic(
        code(paysheet::config::tokenization),
        help("set either `gateway` or `direct`")
    )]
    MissingTokenization,
    #[error("both gateway and direct tokenization are configured")]
    #[diagnostic(
        code(paysheet::config::tokenization),
        help("keep only one of `gateway` or `direct`")
    )]
    ConflictingTokenization,
    #[error("{0} must not be empty")]
    #[diagnostic(code(paysheet::config::empty_field))]
    EmptyField(&'static str),
    #[error("invalid country code: {0:?}")]
    #[diagnostic(
        code(paysheet::config::country_code),
        help("use ISO 3166-1 alpha-2 codes such as \"US\"")
    )]
    InvalidCountryCode(String),
    #[error("invalid currency code: {0:?}")]
    #[diagnostic(
        code(paysheet::config::currency_code),
        help("use ISO 4217 codes such as \"USD\"")
    )]
    InvalidCurrencyCode(String),
    #[error("shipping requested but no shipping countries configured")]
    #[diagnostic(code(paysheet::config::shipping_countries))]
    NoShippingCountries,
    #[error("invalid price: {0}")]
    #[diagnostic(code(paysheet::config::price))]
    InvalidPrice(String),
}

/// Failure reported by the wallet readiness service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("readiness service failed with status {0}")]
    Status(i32),
    #[error("readiness service unavailable: {0}")]
    Unavailable(String),
}

/// Failure to hand a request over to the payment sheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("payment sheet rejected the request: {0}")]
    Rejected(String),
    #[error("payment sheet unavailable")]
    Unavailable,
}

/// Malformed payload returned by the payment sheet.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("payload is missing")]
    MissingPayload,
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("Event error: {0}")]
    EventError(String),
    #[error("Session closed")]
    SessionClosed,
}

pub type Result<T> = std::result::Result<T, PaymentError>;
