//! Middleware modules.

pub mod allowed_hosts;
pub mod error;
