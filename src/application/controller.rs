use super::config_builder::ConfigBuilder;
use super::result_parser;
use crate::domain::money::Price;
use crate::domain::outcome::{
    CorrelationToken, FlowState, Notice, PaymentCredentials, PaymentOutcome, ResultCode,
    SheetResult,
};
use crate::domain::ports::{NotifierBox, PaymentSheetBox};
use crate::error::{ParseError, Result};
use tracing::{debug, error, info, warn};

/// What `initiate` did with a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initiation {
    /// The request went to the payment sheet under this token.
    Dispatched(CorrelationToken),
    /// Another attempt is already in flight; nothing happened.
    Ignored,
}

/// Drives a single payment attempt at a time.
///
/// `PaymentFlowController` owns the flow state. A new attempt is only accepted
/// while idle, the sheet result is matched against the one outstanding
/// correlation token, and every matched result returns the controller to idle
/// whatever the result code was.
pub struct PaymentFlowController {
    builder: ConfigBuilder,
    sheet: PaymentSheetBox,
    notifier: NotifierBox,
    state: FlowState,
    last_token: u32,
}

impl PaymentFlowController {
    /// Creates a new idle controller.
    ///
    /// # Arguments
    ///
    /// * `builder` - Builds the payment-data request for each attempt.
    /// * `sheet` - The external payment sheet requests are dispatched to.
    /// * `notifier` - Receives user-visible notices.
    pub fn new(builder: ConfigBuilder, sheet: PaymentSheetBox, notifier: NotifierBox) -> Self {
        Self {
            builder,
            sheet,
            notifier,
            state: FlowState::Idle,
            last_token: 0,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The correlation token of the attempt in flight, if any.
    pub fn outstanding(&self) -> Option<CorrelationToken> {
        match self.state {
            FlowState::Idle => None,
            FlowState::RequestIssued { token } => Some(token),
        }
    }

    /// Starts a payment attempt.
    ///
    /// Silently ignored unless idle. A configuration error is logged and
    /// returned before anything is dispatched.
    pub async fn initiate(&mut self, price: Price, shipping_required: bool) -> Result<Initiation> {
        if let FlowState::RequestIssued { token } = self.state {
            debug!(%token, "payment already in flight, ignoring initiate");
            return Ok(Initiation::Ignored);
        }

        let request = match self.builder.build_payment_request(price, shipping_required) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "can't build payment data request");
                return Err(e.into());
            }
        };

        let token = self.next_token();
        self.state = FlowState::RequestIssued { token };
        info!(%token, %price, "dispatching payment request");

        if let Err(e) = self.sheet.launch(&request, token).await {
            error!(%token, error = %e, "payment sheet failed to launch");
            self.state = FlowState::Idle;
            return Err(e.into());
        }

        Ok(Initiation::Dispatched(token))
    }

    /// Reconciles a payment sheet result.
    ///
    /// Results whose request code does not match the outstanding token are
    /// dropped without touching the state. Matched results always leave the
    /// controller idle.
    pub fn on_external_result(&mut self, result: SheetResult) -> Option<PaymentOutcome> {
        let token = match std::mem::take(&mut self.state) {
            FlowState::RequestIssued { token } if token == result.request_code => token,
            other => {
                self.state = other;
                debug!(request_code = %result.request_code, "ignoring unmatched sheet result");
                return None;
            }
        };
        // From here the controller is idle, whichever branch runs below.

        let outcome = match result.result_code {
            ResultCode::Ok => Some(PaymentOutcome::Succeeded(Self::credentials(
                token,
                result.payload.as_deref(),
            ))),
            ResultCode::Cancelled => {
                self.notifier.notify(Notice::Cancelled);
                Some(PaymentOutcome::Cancelled)
            }
            ResultCode::Error => match result_parser::parse_status(result.payload.as_deref()) {
                Ok(status) => {
                    warn!(%token, status, "payment sheet reported an error");
                    Some(PaymentOutcome::Failed(status))
                }
                Err(ParseError::MissingPayload) => {
                    warn!(%token, "payment sheet reported an error without a status");
                    None
                }
                Err(e) => {
                    warn!(%token, error = %e, "payment sheet error status unreadable");
                    None
                }
            },
            ResultCode::Other(code) => {
                debug!(%token, code, "unrecognized result code");
                None
            }
        };

        if let Some(outcome) = &outcome {
            info!(%token, outcome = outcome.label(), "payment attempt resolved");
        }
        outcome
    }

    /// Gives up on the attempt in flight, if any, and returns to idle.
    ///
    /// Nothing inside the flow times out a stalled sheet; a supervisor calls
    /// this when it decides to stop waiting. A late result for the abandoned
    /// token is then ignored.
    pub fn abandon(&mut self) -> Option<CorrelationToken> {
        let token = self.outstanding();
        if let Some(token) = token {
            warn!(%token, "abandoning payment attempt");
        }
        self.state = FlowState::Idle;
        token
    }

    fn next_token(&mut self) -> CorrelationToken {
        self.last_token = self.last_token.wrapping_add(1);
        CorrelationToken(self.last_token)
    }

    fn credentials(token: CorrelationToken, payload: Option<&str>) -> Option<PaymentCredentials> {
        match result_parser::parse(payload) {
            Ok(credentials) => {
                debug!(%token, billing_name = %credentials.billing_name, "payment data parsed");
                Some(credentials)
            }
            Err(ParseError::MissingPayload) => {
                warn!(%token, "payment succeeded without payment data");
                None
            }
            Err(e) => {
                error!(%token, error = %e, "could not read payment data");
                None
            }
        }
    }
}
