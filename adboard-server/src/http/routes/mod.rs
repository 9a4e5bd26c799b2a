//! Route handlers organized by resource

pub mod advertisements;
pub mod health;
