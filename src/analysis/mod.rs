//! Text analysis module for palabras.
//!
//! This module provides the record-wise transformation stages, the
//! lemmatization services they rely on, the tokenizers, and the pipeline that
//! composes the stages in their fixed order.

pub mod lemmatizer;
pub mod pipeline;
pub mod stage;
pub mod tokenizer;

// Re-export commonly used types
pub use lemmatizer::*;
pub use pipeline::*;
pub use stage::*;
pub use tokenizer::*;
