//! CSV replay of payment sheet events and CSV output of outcomes.

pub mod event_reader;
pub mod outcome_writer;
