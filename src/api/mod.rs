//! API endpoint handlers module

pub mod ask;
pub mod health;
