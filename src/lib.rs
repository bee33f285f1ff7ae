//! Delphi Feeder Library
//!
//! Exchange quote normalization and submission for the delphioracle contract

pub mod chain;
pub mod config;
pub mod feeder;
pub mod oracle;
pub mod types;
