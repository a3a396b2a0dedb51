pub mod error;
mod irrigation;
mod market;
mod notification;
mod profile;
mod recommendation;
mod sensor;
pub mod simulation;

pub use irrigation::*;
pub use market::*;
pub use notification::*;
pub use profile::*;
pub use recommendation::*;
pub use sensor::*;

pub static CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
