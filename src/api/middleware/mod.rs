//! API middleware.
//!
//! Execution order (outermost → innermost):
//! 1. `Cache-Control: no-store` header
//! 2. Access log
//! 3. Panic catcher (`tower_http::catch_panic`)
//! 4. Body size limit

pub mod access_log;
