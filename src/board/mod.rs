//! Question/answer board: toggles, view counting, listings and the service
//! tying them to the HTTP layer.

pub mod listing;
pub mod pagination;
pub mod services;
pub mod toggle;
pub mod views;
