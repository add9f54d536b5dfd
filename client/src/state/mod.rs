//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `toast`) so individual components
//! can depend on small focused models.

pub mod session;
pub mod toast;
