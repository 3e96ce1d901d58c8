//! Runtime utilities for the economics API server.
#![allow(missing_docs)]

pub mod health;
pub mod rate_limiter;
pub mod shutdown;
