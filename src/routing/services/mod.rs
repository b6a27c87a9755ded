//! Router service.

mod router;

pub use router::{Router, RouterBuilder};
