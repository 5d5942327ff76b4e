//! Domain types shared across Mol crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod pagination;
pub mod permission;
pub mod role;
pub mod validation;
