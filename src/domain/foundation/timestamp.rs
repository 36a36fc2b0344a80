//! UTC timestamps for catalog records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time a product was created or last edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from the store.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_order_by_time() {
        let oldest = Timestamp::from_datetime(DateTime::<Utc>::MIN_UTC);
        assert!(oldest < Timestamp::now());
        assert_eq!(oldest.as_datetime(), &DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn serializes_as_plain_rfc3339_string() {
        let json = serde_json::to_value(Timestamp::from_datetime(DateTime::<Utc>::MIN_UTC)).unwrap();
        assert!(json.is_string());
    }
}
