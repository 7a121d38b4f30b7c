//! # qna-board-api
//!
//! Shared API types for the qna-board service.
//! The crate only depends on serde, uuid and chrono so it stays usable from
//! WASM frontends as well as from the backend.
//!
//! ## Example
//!
//! ```rust
//! use qna_board_api::{PageLink, ToggleResponse};
//!
//! let toggled = ToggleResponse { active: true, count: 3 };
//! assert!(toggled.active);
//!
//! let link = PageLink::Page { number: 2 };
//! assert_eq!(serde_json::to_string(&link).unwrap(), r#"{"kind":"page","number":2}"#);
//! ```

pub mod error;
pub mod requests;
pub mod responses;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use requests::*;
pub use responses::*;
