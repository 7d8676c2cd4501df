//! Domain types: configuration, request documents, prices, outcomes and the
//! ports the application layer talks through.

pub mod config;
pub mod money;
pub mod outcome;
pub mod ports;
pub mod request;
