//! Provider implementations of the [`Model`](crate::traits::Model) trait.

pub mod gemini;
