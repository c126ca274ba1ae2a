//! # anomx Core
//!
//! Core types for the anomx anomaly detection library:
//!
//! - [`FeatureMatrix`] - row-major numeric feature matrix
//! - [`Embedding`] - fixed-dimension text embedding with cosine similarity
//! - [`Label`] - binary normal/anomaly label
//! - [`Error`] / [`Result`] - shared error taxonomy

pub mod embedding;
pub mod error;
pub mod label;
pub mod matrix;

pub use embedding::Embedding;
pub use error::{Error, Result};
pub use label::Label;
pub use matrix::FeatureMatrix;
