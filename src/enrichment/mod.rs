//! Deterministic derivation of classification and index fields from raw day records.

pub mod engine;
pub mod indices;
