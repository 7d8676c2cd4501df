use crate::domain::config::{PaymentConfiguration, TokenizationMode};
use crate::domain::money::Price;
use crate::domain::request::{
    API_VERSION, API_VERSION_MINOR, BillingAddressFormat, BillingAddressParameters,
    CapabilityRequest, CardParameters, CardPaymentMethod, DirectParameters, GatewayParameters,
    MerchantInfo, PaymentDataRequest, PaymentMethodType, ShippingAddressParameters,
    TokenizationSpecification, TotalPriceStatus, TransactionInfo,
};
use crate::error::ConfigError;
use std::sync::Arc;

/// Builds wallet request documents from the shared configuration.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Arc<PaymentConfiguration>,
}

impl ConfigBuilder {
    pub fn new(config: Arc<PaymentConfiguration>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaymentConfiguration {
        &self.config
    }

    /// Builds the readiness check request. Never fails.
    pub fn build_capability_request(&self) -> CapabilityRequest {
        CapabilityRequest {
            api_version: API_VERSION,
            api_version_minor: API_VERSION_MINOR,
            allowed_payment_methods: vec![self.base_card_method()],
        }
    }

    /// Builds the payment-data request for one attempt.
    ///
    /// The configuration is validated first; on error nothing is built and no
    /// external call must follow.
    pub fn build_payment_request(
        &self,
        price: Price,
        shipping_required: bool,
    ) -> Result<PaymentDataRequest, ConfigError> {
        self.config.validate()?;

        let tokenization = match self.config.tokenization_mode()? {
            TokenizationMode::Gateway(gateway) => {
                TokenizationSpecification::PaymentGateway(GatewayParameters {
                    gateway: gateway.gateway.clone(),
                    gateway_merchant_id: gateway.gateway_merchant_id.clone(),
                })
            }
            TokenizationMode::Direct(direct) => TokenizationSpecification::Direct(DirectParameters {
                protocol_version: direct.protocol_version.clone(),
                public_key: direct.public_key.clone(),
            }),
        };

        let shipping_address_parameters = if shipping_required {
            if self.config.shipping_countries.is_empty() {
                return Err(ConfigError::NoShippingCountries);
            }
            Some(ShippingAddressParameters {
                phone_number_required: false,
                allowed_country_codes: self.config.shipping_countries.clone(),
            })
        } else {
            None
        };

        let card_method = CardPaymentMethod {
            tokenization_specification: Some(tokenization),
            ..self.base_card_method()
        };

        Ok(PaymentDataRequest {
            api_version: API_VERSION,
            api_version_minor: API_VERSION_MINOR,
            allowed_payment_methods: vec![card_method],
            transaction_info: TransactionInfo {
                total_price: price.to_string(),
                total_price_status: TotalPriceStatus::Final,
                country_code: self.config.country_code.clone(),
                currency_code: self.config.currency_code.clone(),
            },
            merchant_info: MerchantInfo {
                merchant_name: self.config.merchant_name.clone(),
            },
            shipping_address_required: shipping_required,
            shipping_address_parameters,
        })
    }

    fn base_card_method(&self) -> CardPaymentMethod {
        CardPaymentMethod {
            method_type: PaymentMethodType::Card,
            parameters: CardParameters {
                allowed_auth_methods: self.config.auth_methods.clone(),
                allowed_card_networks: self.config.card_networks.clone(),
                billing_address_required: true,
                billing_address_parameters: BillingAddressParameters {
                    format: BillingAddressFormat::Full,
                },
            },
            tokenization_specification: None,
        }
    }
}
