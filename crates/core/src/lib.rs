//! Summarist Core
//!
//! Foundational types for the Summarist workspace. This crate has no
//! dependency on the LLM providers or on the application crate.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration shared by every HTTP-using component

pub mod error;
pub mod proxy;

pub use error::{CoreError, CoreResult};
pub use proxy::{ProxyConfig, ProxyProtocol};
