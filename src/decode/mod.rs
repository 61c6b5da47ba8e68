//! Decoders producing layer trees for the engine.
//!
//! The engine itself never parses a binary document. A decoder turns a
//! document into nodes implementing [`LayerNode`](crate::layer::LayerNode);
//! this module ships one for JSON layer dumps.

mod dump;

pub use dump::{DumpLayer, DumpPixels, LayerDump};
