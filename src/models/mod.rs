//! Data Models
//!
//! Configuration, request and response structures.

pub mod request;
pub mod response;
pub mod settings;

pub use request::*;
pub use response::*;
pub use settings::*;
