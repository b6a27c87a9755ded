//! Stock route strategies.

mod fixed;
mod function;
mod payload_kind;
mod selector;

pub use fixed::StaticRoutes;
pub use function::FunctionRoutes;
pub use payload_kind::PayloadKindRoutes;
pub use selector::SelectorRoutes;
