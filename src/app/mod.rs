pub mod api;
pub mod cli;
pub mod config;
mod context;

pub use context::AppContext;
