//! Application layer orchestrating a payment attempt.
//!
//! `ConfigBuilder` turns configuration into request documents,
//! `CapabilityProbe` decides whether payment is offered at all, and
//! `PaymentFlowController` drives one attempt from dispatch to outcome. The
//! controller can run behind a `PaymentSession`, an actor-like task fed
//! through `tokio` channels so every event is handled on one context.

pub mod config_builder;
pub mod controller;
pub mod probe;
pub mod result_parser;
pub mod session;
