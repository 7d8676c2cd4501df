use super::config_builder::ConfigBuilder;
use crate::domain::ports::ReadinessServiceBox;
use crate::domain::request::CapabilityRequest;
use crate::error::ProbeError;
use tracing::{debug, warn};

/// Decides whether the payment entry point should be offered at all.
pub struct CapabilityProbe {
    service: ReadinessServiceBox,
}

impl CapabilityProbe {
    pub fn new(service: ReadinessServiceBox) -> Self {
        Self { service }
    }

    /// Issues one readiness check.
    pub async fn check(&self, request: &CapabilityRequest) -> Result<bool, ProbeError> {
        self.service.is_ready_to_pay(request).await
    }

    /// Builds the capability request and checks it. Failures are logged and
    /// count as "not ready"; they are never retried here.
    pub async fn is_ready(&self, builder: &ConfigBuilder) -> bool {
        let request = builder.build_capability_request();
        match self.check(&request).await {
            Ok(ready) => {
                debug!(ready, "readiness check completed");
                ready
            }
            Err(e) => {
                warn!(error = %e, "readiness check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::PaymentConfiguration;
    use crate::infrastructure::in_memory::StaticReadinessService;
    use std::sync::Arc;

    fn builder() -> ConfigBuilder {
        ConfigBuilder::new(Arc::new(PaymentConfiguration::default()))
    }

    #[tokio::test]
    async fn test_ready() {
        let probe = CapabilityProbe::new(Box::new(StaticReadinessService::ready()));
        assert!(probe.is_ready(&builder()).await);
    }

    #[tokio::test]
    async fn test_not_ready() {
        let probe = CapabilityProbe::new(Box::new(StaticReadinessService::not_ready()));
        assert!(!probe.is_ready(&builder()).await);
    }

    #[tokio::test]
    async fn test_failure_is_treated_as_not_ready() {
        let service = StaticReadinessService::failing(ProbeError::Status(8));
        let probe = CapabilityProbe::new(Box::new(service.clone()));

        let request = builder().build_capability_request();
        assert_eq!(probe.check(&request).await, Err(ProbeError::Status(8)));
        assert!(!probe.is_ready(&builder()).await);
        // one call per check, no retries
        assert_eq!(service.calls().await, 2);
    }
}
