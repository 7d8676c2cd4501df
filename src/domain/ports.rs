use super::outcome::{CorrelationToken, Notice};
use super::request::{CapabilityRequest, PaymentDataRequest};
use crate::error::{DispatchError, ProbeError};
use async_trait::async_trait;

/// The wallet's "is ready to pay" service.
#[async_trait]
pub trait ReadinessService: Send + Sync {
    async fn is_ready_to_pay(&self, request: &CapabilityRequest) -> Result<bool, ProbeError>;
}

/// The external payment sheet.
///
/// `launch` only hands the request over. The user's decision arrives later
/// as a [`SheetResult`](super::outcome::SheetResult) carrying `token`.
#[async_trait]
pub trait PaymentSheet: Send + Sync {
    async fn launch(
        &self,
        request: &PaymentDataRequest,
        token: CorrelationToken,
    ) -> Result<(), DispatchError>;
}

/// Presents user-visible notices (toasts, banners).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub type ReadinessServiceBox = Box<dyn ReadinessService>;
pub type PaymentSheetBox = Box<dyn PaymentSheet>;
pub type NotifierBox = Box<dyn Notifier>;
