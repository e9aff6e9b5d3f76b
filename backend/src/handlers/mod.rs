//! HTTP handlers for the Vehicle Marketplace Platform

mod health;
mod inventory;
mod invoice;
mod ledger;
mod reporting;
mod super_vendor;

pub use health::*;
pub use inventory::*;
pub use invoice::*;
pub use ledger::*;
pub use reporting::*;
pub use super_vendor::*;
