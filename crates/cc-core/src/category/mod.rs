//! Category policy and equip-time constraint checking.

mod controller;
mod engine;
mod rejection;

pub use controller::CategoryController;
pub use engine::ConstraintEngine;
pub use rejection::Rejection;
