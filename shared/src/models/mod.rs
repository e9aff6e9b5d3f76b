//! Domain models for the Vehicle Marketplace Platform

mod inventory;
mod invoice;
mod super_vendor;
mod transaction;
mod vendor;

pub use inventory::*;
pub use invoice::*;
pub use super_vendor::*;
pub use transaction::*;
pub use vendor::*;
