//! Text normalization and fuzzy matching primitives

pub mod fuzzy;
pub mod text_processor;
