//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the page chrome and the session gates while reading
//! shared state from Leptos context providers.

pub mod base_header;
pub mod main_wrapper;
pub mod pager;
pub mod private_route;
pub mod toast_host;
