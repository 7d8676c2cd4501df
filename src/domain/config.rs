use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Wallet environment the payments client is created for.
///
/// `Production` makes the wallet return chargeable card data and requires the
/// merchant to be approved by the wallet provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => f.write_str("test"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Card networks accepted by the merchant. Cards on other networks are not
/// offered in the payment sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardNetwork {
    Amex,
    Discover,
    Electron,
    Elo,
    EloDebit,
    Interac,
    Jcb,
    Maestro,
    Mastercard,
    Visa,
}

/// How the wallet may authenticate a card.
///
/// `PanOnly` covers cards on file with the wallet account, `Cryptogram3ds`
/// covers device tokens authenticated with a 3-D Secure cryptogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMethod {
    #[serde(rename = "PAN_ONLY")]
    PanOnly,
    #[serde(rename = "CRYPTOGRAM_3DS")]
    Cryptogram3ds,
}

/// Tokenization through a payment processor/gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayTokenization {
    pub gateway: String,
    pub gateway_merchant_id: String,
}

/// Direct tokenization: the wallet encrypts card data with the merchant's key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectTokenization {
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
    pub public_key: String,
}

fn default_protocol_version() -> String {
    "ECv2".to_string()
}

/// The active tokenization mode, borrowed from a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizationMode<'a> {
    Gateway(&'a GatewayTokenization),
    Direct(&'a DirectTokenization),
}

/// Static, process-wide payment configuration.
///
/// Loaded once and shared behind an `Arc`. A configuration may be
/// structurally invalid when loaded; [`PaymentConfiguration::validate`]
/// reports why, and request building refuses to proceed in that case.
///
/// When read from a file, the example gateway is used only if neither
/// tokenization mode is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct PaymentConfiguration {
    pub environment: Environment,
    /// User-visible merchant name.
    pub merchant_name: String,
    pub card_networks: Vec<CardNetwork>,
    pub auth_methods: Vec<AuthMethod>,
    /// ISO 3166-1 alpha-2 code of the merchant's country.
    pub country_code: String,
    /// ISO 4217 code of the transaction currency.
    pub currency_code: String,
    /// Countries a shipping address may be in, when one is requested.
    pub shipping_countries: Vec<String>,
    pub gateway: Option<GatewayTokenization>,
    pub direct: Option<DirectTokenization>,
}

impl Default for PaymentConfiguration {
    fn default() -> Self {
        Self {
            environment: Environment::Test,
            merchant_name: "InManage-Test".to_string(),
            card_networks: vec![
                CardNetwork::Amex,
                CardNetwork::Discover,
                CardNetwork::Jcb,
                CardNetwork::Mastercard,
                CardNetwork::Visa,
            ],
            auth_methods: vec![AuthMethod::PanOnly, AuthMethod::Cryptogram3ds],
            country_code: "US".to_string(),
            currency_code: "USD".to_string(),
            shipping_countries: vec!["US".to_string(), "GB".to_string(), "IL".to_string()],
            gateway: Some(GatewayTokenization {
                gateway: "example".to_string(),
                gateway_merchant_id: "exampleGatewayMerchantId".to_string(),
            }),
            direct: None,
        }
    }
}

/// On-disk shape of [`PaymentConfiguration`]. Absent keys take the defaults,
/// except the tokenization modes, which start out unset.
#[derive(Deserialize)]
#[serde(default)]
struct ConfigFile {
    environment: Environment,
    merchant_name: String,
    card_networks: Vec<CardNetwork>,
    auth_methods: Vec<AuthMethod>,
    country_code: String,
    currency_code: String,
    shipping_countries: Vec<String>,
    gateway: Option<GatewayTokenization>,
    direct: Option<DirectTokenization>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let defaults = PaymentConfiguration::default();
        Self {
            environment: defaults.environment,
            merchant_name: defaults.merchant_name,
            card_networks: defaults.card_networks,
            auth_methods: defaults.auth_methods,
            country_code: defaults.country_code,
            currency_code: defaults.currency_code,
            shipping_countries: defaults.shipping_countries,
            gateway: None,
            direct: None,
        }
    }
}

impl From<ConfigFile> for PaymentConfiguration {
    fn from(file: ConfigFile) -> Self {
        let gateway = match (file.gateway, &file.direct) {
            (None, None) => PaymentConfiguration::default().gateway,
            (gateway, _) => gateway,
        };
        Self {
            environment: file.environment,
            merchant_name: file.merchant_name,
            card_networks: file.card_networks,
            auth_methods: file.auth_methods,
            country_code: file.country_code,
            currency_code: file.currency_code,
            shipping_countries: file.shipping_countries,
            gateway,
            direct: file.direct,
        }
    }
}

impl PaymentConfiguration {
    /// Reads a JSON configuration file. Missing keys fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Returns the single active tokenization mode.
    pub fn tokenization_mode(&self) -> std::result::Result<TokenizationMode<'_>, ConfigError> {
        match (&self.gateway, &self.direct) {
            (Some(gateway), None) => {
                non_empty(&gateway.gateway, "gateway")?;
                non_empty(&gateway.gateway_merchant_id, "gateway_merchant_id")?;
                Ok(TokenizationMode::Gateway(gateway))
            }
            (None, Some(direct)) => {
                non_empty(&direct.protocol_version, "protocol_version")?;
                non_empty(&direct.public_key, "public_key")?;
                Ok(TokenizationMode::Direct(direct))
            }
            (Some(_), Some(_)) => Err(ConfigError::ConflictingTokenization),
            (None, None) => Err(ConfigError::MissingTokenization),
        }
    }

    /// Checks every structural rule a payment request depends on.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        non_empty(&self.merchant_name, "merchant_name")?;

        if self.card_networks.is_empty() {
            return Err(ConfigError::EmptyCardNetworks);
        }
        unique(&self.card_networks, "card_networks")?;

        if self.auth_methods.is_empty() {
            return Err(ConfigError::EmptyAuthMethods);
        }
        unique(&self.auth_methods, "auth_methods")?;

        if !is_code(&self.country_code, 2) {
            return Err(ConfigError::InvalidCountryCode(self.country_code.clone()));
        }
        if !is_code(&self.currency_code, 3) {
            return Err(ConfigError::InvalidCurrencyCode(self.currency_code.clone()));
        }
        if let Some(bad) = self.shipping_countries.iter().find(|c| !is_code(c, 2)) {
            return Err(ConfigError::InvalidCountryCode(bad.clone()));
        }

        self.tokenization_mode().map(|_| ())
    }
}

fn non_empty(value: &str, field: &'static str) -> std::result::Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::EmptyField(field))
    } else {
        Ok(())
    }
}

fn unique<T: fmt::Debug + Eq + std::hash::Hash>(
    items: &[T],
    field: &'static str,
) -> std::result::Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item) {
            return Err(ConfigError::Duplicate(format!("{item:?}"), field));
        }
    }
    Ok(())
}

fn is_code(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_uppercase())
}
