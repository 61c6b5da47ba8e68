//! # psdskin
//!
//! Converts the decoded layer tree of a layered image document into a skin
//! description: one JSON document listing every leaf layer with its
//! geometry, plus a PNG per pixel layer.
//!
//! ## Features
//!
//! - Groups are flattened away; leaves keep their depth-first order
//! - Text layers get font, justification, line height, color, size and text
//!   resolved from their style dictionaries, with a font fallback chain
//! - Pixel layers are composited and written as `skins/<name>.png`
//! - A failing layer never fails the document
//!
//! ## Quick Start
//!
//! ```no_run
//! use psdskin::convert::{ConvertConfig, OutputLayout, convert_to_layout};
//! use psdskin::decode::LayerDump;
//! use psdskin::style::FixedFontPrompt;
//!
//! let dump = LayerDump::from_path("assets/banner.json")?;
//! let config = ConvertConfig::default();
//! let layout = OutputLayout::new("result", "banner", &config);
//! layout.prepare(false)?;
//!
//! let mut prompt = FixedFontPrompt::new("Arial");
//! let report = convert_to_layout("banner", &dump.layers, &layout, config, &mut prompt)?;
//! for issue in &report.issues {
//!     eprintln!("{issue}");
//! }
//! # Ok::<(), psdskin::Error>(())
//! ```
//!
//! ## Bringing your own decoder
//!
//! The engine only talks to [`LayerNode`]. Implement it for the node type
//! of any decoder and pass the top-level nodes to
//! [`Converter::convert`](convert::Converter::convert).

pub mod convert;
pub mod decode;
pub mod document;
pub mod error;
pub mod export;
pub mod layer;
pub mod style;
pub(crate) mod util;
pub mod walk;

pub use convert::{ConversionReport, ConvertConfig, Converter, LeafIssue, OutputLayout};
pub use document::{DocumentRecord, LayerRecord, assemble};
pub use error::{Error, Result};
pub use layer::{Bounds, LayerKind, LayerNode};
pub use style::{FontPrompt, TextStyle};
