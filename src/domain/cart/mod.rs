//! Cart domain - the local cart view, its lines, and store records.
//!
//! The local view is the source of truth for the current session. The
//! durable store holds an independent, eventually consistent copy that is
//! reconciled by the engine in `application::cart`.

mod errors;
mod line;
mod record;
mod view;

pub use errors::{CartError, CartStoreError};
pub use line::CartLine;
pub use record::{validate_quantity, NewLine, QuantityUpdate, StoredLine};
pub use view::{CartSnapshot, LocalView};
