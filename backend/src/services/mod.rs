//! Business logic services for the Vehicle Marketplace Platform

pub mod inventory;
pub mod invoice;
pub mod ledger;
pub mod reporting;
pub mod super_vendor;
