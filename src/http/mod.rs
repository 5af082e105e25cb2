//! HTTP transport layer for the message board
//!
//! Routes requests to the message store and renders results as JSON.

pub mod extractors;
pub mod handlers;
pub mod response;
