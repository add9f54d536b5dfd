//! Networking modules for the course REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and error-message extraction, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod types;
