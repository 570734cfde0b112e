//! Route handlers organized by resource

pub mod challenges;
pub mod common;
pub mod health;
pub mod places;
pub mod players;
