//! Neuronpedia API integration
//!
//! HTTP client and response types for the Neuronpedia interpretability API.

mod client;
mod types;

pub use client::{DEFAULT_TOP_K, NeuronpediaClient};
pub use types::*;
