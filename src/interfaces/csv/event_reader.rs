use crate::domain::money::Price;
use crate::domain::outcome::{CorrelationToken, ResultCode};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Initiate,
    Result,
}

/// One raw row of a replay script: `event, price, request, result, payload`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ReplayEvent {
    pub event: EventKind,
    /// Price in major units, for `initiate` rows.
    pub price: Option<Decimal>,
    /// Request code of a `result` row; empty means the latest dispatch.
    pub request: Option<u32>,
    pub result: Option<ResultCode>,
    pub payload: Option<String>,
}

/// A validated replay step.
#[derive(Debug, PartialEq, Clone)]
pub enum ReplayAction {
    Initiate(Price),
    Deliver {
        request: Option<CorrelationToken>,
        result_code: ResultCode,
        payload: Option<String>,
    },
}

impl TryFrom<ReplayEvent> for ReplayAction {
    type Error = PaymentError;

    fn try_from(event: ReplayEvent) -> Result<Self> {
        match event.event {
            EventKind::Initiate => {
                let price = event
                    .price
                    .ok_or_else(|| PaymentError::EventError("initiate without price".to_string()))?;
                Ok(ReplayAction::Initiate(Price::from_major(price)?))
            }
            EventKind::Result => {
                let result_code = event.result.ok_or_else(|| {
                    PaymentError::EventError("result without result code".to_string())
                })?;
                Ok(ReplayAction::Deliver {
                    request: event.request.map(CorrelationToken),
                    result_code,
                    payload: event.payload,
                })
            }
        }
    }
}

/// Reads replay steps from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record lengths,
/// so trailing empty columns may be left out.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and validates each row.
    pub fn actions(self) -> impl Iterator<Item = Result<ReplayAction>> {
        self.reader
            .into_deserialize::<ReplayEvent>()
            .map(|result| result.map_err(PaymentError::from).and_then(ReplayAction::try_from))
    }
}
