use crate::domain::outcome::{CorrelationToken, Notice};
use crate::domain::ports::{Notifier, PaymentSheet, ReadinessService};
use crate::domain::request::{CapabilityRequest, PaymentDataRequest};
use crate::error::{DispatchError, ProbeError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tracing::info;

/// A readiness service with a fixed answer.
///
/// Counts the calls it receives so callers can check that nothing retries.
#[derive(Clone)]
pub struct StaticReadinessService {
    answer: Result<bool, ProbeError>,
    calls: Arc<RwLock<usize>>,
}

impl StaticReadinessService {
    pub fn ready() -> Self {
        Self::answering(Ok(true))
    }

    pub fn not_ready() -> Self {
        Self::answering(Ok(false))
    }

    pub fn failing(error: ProbeError) -> Self {
        Self::answering(Err(error))
    }

    fn answering(answer: Result<bool, ProbeError>) -> Self {
        Self {
            answer,
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub async fn calls(&self) -> usize {
        *self.calls.read().await
    }
}

#[async_trait]
impl ReadinessService for StaticReadinessService {
    async fn is_ready_to_pay(&self, _request: &CapabilityRequest) -> Result<bool, ProbeError> {
        *self.calls.write().await += 1;
        self.answer.clone()
    }
}

/// A payment sheet that only records what it was asked to show.
///
/// Results are delivered separately, as the real sheet would after the user
/// interacts with it.
#[derive(Default, Clone)]
pub struct RecordingPaymentSheet {
    launches: Arc<RwLock<Vec<(CorrelationToken, PaymentDataRequest)>>>,
    failure: Option<DispatchError>,
}

impl RecordingPaymentSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sheet whose every launch fails with `error`.
    pub fn failing(error: DispatchError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Requests launched so far, oldest first.
    pub async fn launches(&self) -> Vec<(CorrelationToken, PaymentDataRequest)> {
        self.launches.read().await.clone()
    }
}

#[async_trait]
impl PaymentSheet for RecordingPaymentSheet {
    async fn launch(
        &self,
        request: &PaymentDataRequest,
        token: CorrelationToken,
    ) -> Result<(), DispatchError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let mut launches = self.launches.write().await;
        launches.push((token, request.clone()));
        Ok(())
    }
}

/// Collects notices instead of showing them. Every notice is also logged.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        info!(%notice, "user notice");
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config_builder::ConfigBuilder;
    use crate::domain::config::PaymentConfiguration;
    use crate::domain::money::Price;

    #[tokio::test]
    async fn test_recording_sheet_keeps_launch_order() {
        let sheet = RecordingPaymentSheet::new();
        let builder = ConfigBuilder::new(Arc::new(PaymentConfiguration::default()));
        let first = builder.build_payment_request(Price::from_minor_units(1), false).unwrap();
        let second = builder.build_payment_request(Price::from_minor_units(2), false).unwrap();

        sheet.launch(&first, CorrelationToken(1)).await.unwrap();
        sheet.launch(&second, CorrelationToken(2)).await.unwrap();

        let launches = sheet.launches().await;
        assert_eq!(launches.len(), 2);
        assert_eq!(launches[0].0, CorrelationToken(1));
        assert_eq!(launches[1].1.transaction_info.total_price, "2");
    }

    #[tokio::test]
    async fn test_failing_sheet_records_nothing() {
        let sheet = RecordingPaymentSheet::failing(DispatchError::Rejected("bad".to_string()));
        let builder = ConfigBuilder::new(Arc::new(PaymentConfiguration::default()));
        let request = builder.build_payment_request(Price::ZERO, false).unwrap();

        assert!(sheet.launch(&request, CorrelationToken(1)).await.is_err());
        assert!(sheet.launches().await.is_empty());
    }

    #[test]
    fn test_notifier_collects_notices() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::Cancelled);
        assert_eq!(notifier.notices(), vec![Notice::Cancelled]);
        assert_eq!(Notice::Cancelled.to_string(), "Canceled");
    }
}
