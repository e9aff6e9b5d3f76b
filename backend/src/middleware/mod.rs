//! Request middleware and extractors

mod actor;

pub use actor::CurrentActor;
