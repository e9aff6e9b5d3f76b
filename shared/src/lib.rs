//! Shared types and models for the Vehicle Marketplace Platform
//!
//! This crate contains the super-vendor domain models, pure derivation
//! logic (pricing, metrics, invoice lifecycle), and validation helpers
//! shared between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
