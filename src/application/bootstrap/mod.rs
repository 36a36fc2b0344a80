//! Startup mode selection and post-startup connection observation.

mod observer;
mod selector;

pub use observer::{ConnectionEvent, ConnectionObserver};
pub use selector::{Bootstrap, BootstrapSelector};
