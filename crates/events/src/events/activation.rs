use serde::{Deserialize, Serialize};

/// Activation domain events, emitted while walking the load order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActivationEvent {
    /// Components of a mod were produced
    ModActivated {
        name: String,
        version: String,
        components: usize,
    },

    /// The component factory failed for a mod
    ModFailed { name: String, error: String },
}
