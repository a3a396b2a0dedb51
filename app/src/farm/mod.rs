pub mod observer;
pub mod seed;
pub mod state;

pub use observer::ConcurrentObserver;
