//! Bootstrap domain - service mode, the one-shot bootstrap state machine,
//! and the retry policy that drives it.

mod errors;
mod mode;
mod retry;

pub use errors::ConfigurationError;
pub use mode::{BootstrapPhase, ServiceMode};
pub use retry::{AttemptOutcome, RetryAttempt, RetryPolicy};
