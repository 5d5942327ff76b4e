//! Access-credential types shared across Mol crates.
//!
//! Provides JWT issuance/validation and the bearer `Identity` extractor.

pub mod identity;
pub mod token;
