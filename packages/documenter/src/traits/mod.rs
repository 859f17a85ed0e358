//! Core trait abstractions.
//!
//! - [`model::Model`] - the generative model endpoint

pub mod model;

pub use model::Model;
