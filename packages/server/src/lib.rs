// Civic Documenter - API Server
//
// Keeps the Gemini API key on the server: a raw generateContent proxy for
// browser clients plus JSON routes for each document operation.

pub mod config;
pub mod server;

pub use config::*;
