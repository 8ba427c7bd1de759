//! Response envelopes

use serde::{Deserialize, Serialize};

/// Confirmation returned by operations that persist something
///
/// Serializes as `{"message": ..., "data": ..., "success": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    /// Human-readable outcome
    pub message: String,

    /// Payload of the confirmation
    pub data: T,

    /// Whether the operation succeeded
    pub success: bool,
}

impl<T> MessageResponse<T> {
    /// Create a successful confirmation
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
            success: true,
        }
    }
}
