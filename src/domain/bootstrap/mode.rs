//! Service mode and bootstrap phase.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Process-wide mode, chosen once at startup and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// The durable store was reachable; requests go through the cart engine.
    Persistent,
    /// The store was unreachable or unconfigured; fixed read-only handlers.
    Degraded,
}

impl ServiceMode {
    pub fn is_persistent(&self) -> bool {
        matches!(self, ServiceMode::Persistent)
    }
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceMode::Persistent => write!(f, "persistent"),
            ServiceMode::Degraded => write!(f, "degraded"),
        }
    }
}

/// Bootstrap lifecycle.
///
/// ```text
/// Probing --[connected]--------> PersistentActive
/// Probing --[attempts exhausted]--> DegradedActive
/// ```
///
/// Both active states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    Probing,
    PersistentActive,
    DegradedActive,
}

impl BootstrapPhase {
    /// Mode for a terminal phase.
    pub fn mode(&self) -> Option<ServiceMode> {
        match self {
            BootstrapPhase::Probing => None,
            BootstrapPhase::PersistentActive => Some(ServiceMode::Persistent),
            BootstrapPhase::DegradedActive => Some(ServiceMode::Degraded),
        }
    }
}

impl StateMachine for BootstrapPhase {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            BootstrapPhase::Probing => vec![
                BootstrapPhase::PersistentActive,
                BootstrapPhase::DegradedActive,
            ],
            BootstrapPhase::PersistentActive | BootstrapPhase::DegradedActive => vec![],
        }
    }
}
