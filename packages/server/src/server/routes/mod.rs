// HTTP routes
pub mod gemini;
pub mod health;
pub mod operations;
pub mod projects;

pub use gemini::*;
pub use health::*;
pub use operations::*;
pub use projects::*;
