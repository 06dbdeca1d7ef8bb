//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod auth;
pub mod crypto;
pub mod gemini;

pub use auth::*;
pub use crypto::*;
pub use gemini::*;
