use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paysheet::application::config_builder::ConfigBuilder;
use paysheet::application::controller::{Initiation, PaymentFlowController};
use paysheet::application::probe::CapabilityProbe;
use paysheet::application::session::PaymentSession;
use paysheet::domain::config::PaymentConfiguration;
use paysheet::domain::money::Price;
use paysheet::domain::outcome::{FlowState, SheetResult};
use paysheet::infrastructure::in_memory::{
    RecordingNotifier, RecordingPaymentSheet, StaticReadinessService,
};
use paysheet::interfaces::csv::event_reader::{EventReader, ReplayAction};
use paysheet::interfaces::csv::outcome_writer::OutcomeWriter;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payment configuration JSON file. Built-in defaults are used when absent.
    #[arg(long, global = true, env = "PAYSHEET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the readiness (capability) request document
    Readiness,
    /// Print the payment data request document for a price
    Request {
        /// Price in major currency units, e.g. 0.5
        #[arg(long)]
        price: Decimal,
        /// Ask the payment sheet for a shipping address
        #[arg(long)]
        shipping: bool,
    },
    /// Replay payment sheet events from a CSV file and print the outcomes
    Replay {
        /// Events CSV file (event,price,request,result,payload)
        input: PathBuf,
        /// Ask the payment sheet for a shipping address
        #[arg(long)]
        shipping: bool,
        /// Simulate a wallet that reports it cannot pay
        #[arg(long)]
        not_ready: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => PaymentConfiguration::load(path).into_diagnostic()?,
        None => PaymentConfiguration::default(),
    };
    let builder = ConfigBuilder::new(Arc::new(config));

    match cli.command {
        Command::Readiness => {
            let request = builder.build_capability_request();
            println!("{}", serde_json::to_string_pretty(&request).into_diagnostic()?);
        }
        Command::Request { price, shipping } => {
            let price = Price::from_major(price)?;
            let request = builder.build_payment_request(price, shipping)?;
            println!("{}", serde_json::to_string_pretty(&request).into_diagnostic()?);
        }
        Command::Replay {
            input,
            shipping,
            not_ready,
        } => replay(builder, input, shipping, not_ready).await?,
    }

    Ok(())
}

async fn replay(
    builder: ConfigBuilder,
    input: PathBuf,
    shipping: bool,
    not_ready: bool,
) -> Result<()> {
    let readiness = if not_ready {
        StaticReadinessService::not_ready()
    } else {
        StaticReadinessService::ready()
    };
    let probe = CapabilityProbe::new(Box::new(readiness));

    if !probe.is_ready(&builder).await {
        eprintln!("Payment not available");
        return Ok(());
    }

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock()).into_diagnostic()?;

    info!(environment = %builder.config().environment, "starting payment session");
    let controller = PaymentFlowController::new(
        builder,
        Box::new(RecordingPaymentSheet::new()),
        Box::new(RecordingNotifier::new()),
    );
    let session = PaymentSession::spawn(controller);
    let handle = session.handle();
    let mut latest = None;

    let file = File::open(input).into_diagnostic()?;
    for action in EventReader::new(file).actions() {
        match action {
            Ok(ReplayAction::Initiate(price)) => match handle.initiate(price, shipping).await {
                Ok(Initiation::Dispatched(token)) => latest = Some(token),
                Ok(Initiation::Ignored) => {}
                Err(e) => eprintln!("Error initiating payment: {}", e),
            },
            Ok(ReplayAction::Deliver {
                request,
                result_code,
                payload,
            }) => {
                let Some(request_code) = request.or(latest) else {
                    eprintln!("Error reading event: no payment dispatched yet");
                    continue;
                };
                let result = SheetResult {
                    request_code,
                    result_code,
                    payload,
                };
                if let Some(outcome) = handle.deliver(result).await.into_diagnostic()? {
                    writer.write_outcome(request_code, &outcome).into_diagnostic()?;
                }
            }
            Err(e) => eprintln!("Error reading event: {}", e),
        }
    }

    drop(handle);
    if let FlowState::RequestIssued { token } = session.shutdown().await.into_diagnostic()? {
        warn!(%token, "replay ended with a payment still in flight");
    }

    Ok(())
}
