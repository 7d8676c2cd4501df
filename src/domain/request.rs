//! Typed request documents accepted by the wallet service.
//!
//! Every nested object of the wire format has its own record here, so a
//! document that serializes is a document of the right shape. Field names are
//! serialized in the camelCase the service expects.

use super::config::{AuthMethod, CardNetwork};
use serde::{Deserialize, Serialize};

pub const API_VERSION: u8 = 2;
pub const API_VERSION_MINOR: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingAddressFormat {
    Min,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddressParameters {
    pub format: BillingAddressFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardParameters {
    pub allowed_auth_methods: Vec<AuthMethod>,
    pub allowed_card_networks: Vec<CardNetwork>,
    pub billing_address_required: bool,
    pub billing_address_parameters: BillingAddressParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayParameters {
    pub gateway: String,
    pub gateway_merchant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectParameters {
    pub protocol_version: String,
    pub public_key: String,
}

/// How the wallet turns the selected card into a processor-usable token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parameters", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenizationSpecification {
    PaymentGateway(GatewayParameters),
    Direct(DirectParameters),
}

/// A card payment method. The tokenization block is only present in
/// payment-data requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentMethod {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub parameters: CardParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenization_specification: Option<TokenizationSpecification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TotalPriceStatus {
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    /// Minor units, encoded as a decimal string.
    pub total_price: String,
    pub total_price_status: TotalPriceStatus,
    pub country_code: String,
    pub currency_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub merchant_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressParameters {
    pub phone_number_required: bool,
    pub allowed_country_codes: Vec<String>,
}

/// Asks the wallet whether the user can pay with any of the allowed methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityRequest {
    pub api_version: u8,
    pub api_version_minor: u8,
    pub allowed_payment_methods: Vec<CardPaymentMethod>,
}

/// Describes what the payment sheet should collect for one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDataRequest {
    pub api_version: u8,
    pub api_version_minor: u8,
    pub allowed_payment_methods: Vec<CardPaymentMethod>,
    pub transaction_info: TransactionInfo,
    pub merchant_info: MerchantInfo,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shipping_address_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address_parameters: Option<ShippingAddressParameters>,
}

impl CapabilityRequest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl PaymentDataRequest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Tokenization blocks across every allowed payment method.
    pub fn tokenization_specifications(&self) -> impl Iterator<Item = &TokenizationSpecification> {
        self.allowed_payment_methods
            .iter()
            .filter_map(|method| method.tokenization_specification.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tokenization_specification_wire_shape() {
        let gateway = TokenizationSpecification::PaymentGateway(GatewayParameters {
            gateway: "example".to_string(),
            gateway_merchant_id: "exampleGatewayMerchantId".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&gateway).unwrap(),
            json!({
                "type": "PAYMENT_GATEWAY",
                "parameters": {
                    "gateway": "example",
                    "gatewayMerchantId": "exampleGatewayMerchantId"
                }
            })
        );

        let direct = TokenizationSpecification::Direct(DirectParameters {
            protocol_version: "ECv2".to_string(),
            public_key: "KEY".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&direct).unwrap(),
            json!({
                "type": "DIRECT",
                "parameters": { "protocolVersion": "ECv2", "publicKey": "KEY" }
            })
        );
    }

    #[test]
    fn test_card_method_omits_absent_tokenization() {
        let method = CardPaymentMethod {
            method_type: PaymentMethodType::Card,
            parameters: CardParameters {
                allowed_auth_methods: vec![AuthMethod::Cryptogram3ds],
                allowed_card_networks: vec![CardNetwork::Mastercard],
                billing_address_required: true,
                billing_address_parameters: BillingAddressParameters {
                    format: BillingAddressFormat::Full,
                },
            },
            tokenization_specification: None,
        };
        assert_eq!(
            serde_json::to_value(&method).unwrap(),
            json!({
                "type": "CARD",
                "parameters": {
                    "allowedAuthMethods": ["CRYPTOGRAM_3DS"],
                    "allowedCardNetworks": ["MASTERCARD"],
                    "billingAddressRequired": true,
                    "billingAddressParameters": { "format": "FULL" }
                }
            })
        );
    }
}
