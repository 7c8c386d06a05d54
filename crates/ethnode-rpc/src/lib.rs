//! ethnode RPC - JSON-RPC wire protocol definitions
//!
//! This crate defines:
//! - Hex quantity encoding used by the node API
//! - Request/response envelopes and request id allocation
//! - Method names and wire models

pub mod error;
pub mod hex;
pub mod methods;
pub mod request;
pub mod response;
pub mod types;

pub use error::*;
pub use hex::Quantity;
pub use request::*;
pub use response::*;
pub use types::*;
