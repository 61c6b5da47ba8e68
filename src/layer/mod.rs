//! The layer tree as seen by the conversion engine.
//!
//! A decoder hands the engine an ordered tree of nodes. The engine only
//! needs a handful of accessors from each node, captured by [`LayerNode`].
//! The bundled [`DumpLayer`](crate::decode::DumpLayer) implements it for
//! JSON layer dumps; other decoders can implement it directly.

use image::RgbaImage;
use serde_json::Value;

use crate::error::Result;
use crate::util::truncate;

/// Broad classification of a layer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Container whose children are spliced into the output in place.
    Group,
    /// Type layer carrying text and a style dictionary.
    Text,
    /// Anything rendered from pixels (raster, shape, smart object, ...).
    Pixel,
}

impl LayerKind {
    /// Map a decoder kind string onto a layer kind.
    ///
    /// `"group"` and `"type"` are recognised; every other value is a
    /// pixel layer.
    pub fn from_kind_str(kind: &str) -> Self {
        match kind {
            "group" => LayerKind::Group,
            "type" => LayerKind::Text,
            _ => LayerKind::Pixel,
        }
    }
}

/// Layer bounding box in document coordinates. Values may be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Integer geometry `(x, y, width, height)`, truncated toward zero.
    pub fn truncated(&self) -> (i64, i64, i64, i64) {
        (
            truncate(self.left),
            truncate(self.top),
            truncate(self.width),
            truncate(self.height),
        )
    }
}

/// Font names a node exposes outside its style dictionary.
///
/// Consulted in field order when the dictionary's font set does not yield
/// a name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontHints<'a> {
    /// Font named by the alternate text-data block.
    pub text_data_font: Option<&'a str>,
    /// Font from the node's typography options.
    pub typography_font: Option<&'a str>,
    /// The node's `text.font` attribute.
    pub text_font: Option<&'a str>,
    /// The node's `font` attribute.
    pub font: Option<&'a str>,
    /// The node's `fontset` list; only the first entry is used.
    pub fontset: &'a [String],
}

/// A node of a decoded layer tree.
pub trait LayerNode: Sized {
    fn name(&self) -> &str;

    fn kind(&self) -> LayerKind;

    fn is_group(&self) -> bool {
        self.kind() == LayerKind::Group
    }

    /// Ordered children. Empty for leaves.
    fn children(&self) -> &[Self];

    fn bounds(&self) -> Bounds;

    /// Text content of a type layer.
    fn text(&self) -> Option<&str> {
        None
    }

    /// Raw style dictionary of a type layer (`StyleRun`, `ParagraphRun`,
    /// `ResourceDict`, ...).
    fn engine_dict(&self) -> Option<&Value> {
        None
    }

    fn font_hints(&self) -> FontHints<'_> {
        FontHints::default()
    }

    /// Rasterize the layer's visible pixels.
    fn composite(&self) -> Result<RgbaImage>;
}
