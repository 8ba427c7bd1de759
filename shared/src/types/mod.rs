//! Type definitions shared across crates
//!
//! - `response` - Confirmation envelopes returned by service operations

pub mod response;

pub use response::MessageResponse;
