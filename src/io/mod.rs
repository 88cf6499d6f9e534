//! Macro-file emission for generated scan configurations

pub mod mac;

pub use mac::{EmissionError, MacWriter};
