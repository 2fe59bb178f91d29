//! Terminal and CI output for the command layer

pub mod ci;
pub mod error;
pub mod output;
