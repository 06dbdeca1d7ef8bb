//! HTTP Handlers

mod admin;
mod history;
mod ping;
mod tools;

pub use admin::*;
pub use history::*;
pub use ping::*;
pub use tools::*;
