//! Dispatch configuration models.

use serde::{Deserialize, Serialize};

/// Dispatch layer configuration.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DispatchConfig {
    /// Engine mailbox capacity; senders back-pressure once it fills.
    pub mailbox_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 64,
        }
    }
}

impl DispatchConfig {
    #[must_use]
    pub const fn new(mailbox_capacity: usize) -> Self {
        Self { mailbox_capacity }
    }
}
