//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (cookies, storage,
//! token decoding) from page and component logic to improve reuse and
//! testability.

pub mod auth;
pub mod cart_id;
pub mod credentials;
pub mod jwt;
pub mod paging;
pub mod session_init;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_support;
