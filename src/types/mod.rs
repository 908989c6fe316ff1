//! Type definitions

pub mod duty;
pub mod messages;
pub mod plan;
pub mod trip;

pub use duty::*;
pub use messages::*;
pub use plan::*;
pub use trip::*;
