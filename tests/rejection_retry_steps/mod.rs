//! Step definitions for rejection retry scenarios.

mod given;
mod then;
mod when;
pub mod world;
