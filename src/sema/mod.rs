// src/sema/mod.rs
pub mod analyzer;
pub mod compatibility;
pub mod scope;
pub mod std_env;
pub mod types;

pub use analyzer::{Analyzer, TypeError};
pub use types::Type;
