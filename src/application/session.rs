use super::controller::{Initiation, PaymentFlowController};
use crate::domain::money::Price;
use crate::domain::outcome::{CorrelationToken, FlowState, PaymentOutcome, SheetResult};
use crate::error::{PaymentError, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

const COMMAND_BUFFER: usize = 32;

enum Command {
    Initiate {
        price: Price,
        shipping_required: bool,
        reply: oneshot::Sender<Result<Initiation>>,
    },
    ExternalResult {
        result: SheetResult,
        reply: oneshot::Sender<Option<PaymentOutcome>>,
    },
    Abandon {
        reply: oneshot::Sender<Option<CorrelationToken>>,
    },
}

/// Cloneable sender side of a [`PaymentSession`].
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
}

/// Runs a [`PaymentFlowController`] on its own task.
///
/// Every initiate and every sheet result goes through one channel, so the
/// controller handles them one at a time in arrival order no matter how many
/// handles feed it.
pub struct PaymentSession {
    handle: SessionHandle,
    task: JoinHandle<FlowState>,
}

impl PaymentSession {
    /// Spawns the session task. Requires a running tokio runtime.
    pub fn spawn(mut controller: PaymentFlowController) -> Self {
        let (commands, mut rx) = mpsc::channel(COMMAND_BUFFER);

        let task = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Initiate {
                        price,
                        shipping_required,
                        reply,
                    } => {
                        let result = controller.initiate(price, shipping_required).await;
                        let _ = reply.send(result);
                    }
                    Command::ExternalResult { result, reply } => {
                        let _ = reply.send(controller.on_external_result(result));
                    }
                    Command::Abandon { reply } => {
                        let _ = reply.send(controller.abandon());
                    }
                }
            }
            debug!("payment session closed");
            controller.state()
        });

        Self {
            handle: SessionHandle { commands },
            task,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stops accepting commands once every handle is dropped and returns the
    /// controller's final state.
    pub async fn shutdown(self) -> Result<FlowState> {
        drop(self.handle);
        self.task
            .await
            .map_err(|e| PaymentError::EventError(e.to_string()))
    }
}

impl SessionHandle {
    pub async fn initiate(&self, price: Price, shipping_required: bool) -> Result<Initiation> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Initiate {
            price,
            shipping_required,
            reply,
        })
        .await?;
        rx.await.map_err(|_| PaymentError::SessionClosed)?
    }

    pub async fn deliver(&self, result: SheetResult) -> Result<Option<PaymentOutcome>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::ExternalResult { result, reply }).await?;
        rx.await.map_err(|_| PaymentError::SessionClosed)
    }

    pub async fn abandon(&self) -> Result<Option<CorrelationToken>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Abandon { reply }).await?;
        rx.await.map_err(|_| PaymentError::SessionClosed)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| PaymentError::SessionClosed)
    }
}
