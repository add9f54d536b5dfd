//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (validation, API calls, toasts,
//! navigation) and delegates session bookkeeping to `util::session_init`.

pub mod change_password;
pub mod create_new_password;
pub mod dashboard;
pub mod forgot_password;
pub mod index;
pub mod login;
pub mod logout;
pub mod register;
