//! JSON layer dumps.
//!
//! A layer dump is the decoded layer tree of a document serialized as JSON:
//! one object per layer with its geometry, kind, text properties and pixel
//! data. Pixels are either a PNG file next to the dump or inline base64 RGBA.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::layer::{Bounds, FontHints, LayerKind, LayerNode};

/// Root of a layer dump.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerDump {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub layers: Vec<DumpLayer>,
}

/// Pixel data of a dumped layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DumpPixels {
    /// PNG file, relative paths resolved against the dump's directory.
    File { path: PathBuf },
    /// Tightly packed RGBA8 rows, base64 encoded.
    Inline { width: u32, height: u32, rgba: String },
}

/// One layer of a dump. Groups carry `children`; type layers carry `text`
/// and `engine_dict`; pixel layers carry `image`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DumpLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub children: Vec<DumpLayer>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub engine_dict: Option<Value>,
    #[serde(default)]
    pub text_data: Option<Value>,
    #[serde(default)]
    pub typography: Option<Value>,
    #[serde(default)]
    pub text_font: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub fontset: Vec<String>,
    #[serde(default)]
    pub image: Option<DumpPixels>,
}

impl LayerDump {
    /// Load a dump from disk. Relative pixel file paths are resolved
    /// against the dump's directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_slice(&bytes, base)
    }

    pub fn from_slice(bytes: &[u8], base_dir: &Path) -> Result<Self> {
        let mut dump: LayerDump = serde_json::from_slice(bytes)?;
        rebase(&mut dump.layers, base_dir);
        Ok(dump)
    }
}

fn rebase(layers: &mut [DumpLayer], base_dir: &Path) {
    for layer in layers {
        if let Some(DumpPixels::File { path }) = &mut layer.image
            && path.is_relative()
        {
            *path = base_dir.join(&*path);
        }
        rebase(&mut layer.children, base_dir);
    }
}

impl DumpLayer {
    pub fn group(name: impl Into<String>, children: Vec<DumpLayer>) -> Self {
        Self {
            name: name.into(),
            kind: "group".to_string(),
            children,
            ..Default::default()
        }
    }

    /// A pixel layer without pixel data; add some with [`with_rgba`](Self::with_rgba).
    pub fn pixel(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "pixel".to_string(),
            ..Default::default()
        }
    }

    pub fn type_layer(name: impl Into<String>, text: impl Into<String>, engine_dict: Option<Value>) -> Self {
        Self {
            name: name.into(),
            kind: "type".to_string(),
            text: Some(text.into()),
            engine_dict,
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rgba(mut self, width: u32, height: u32, rgba: &[u8]) -> Self {
        self.image = Some(DumpPixels::Inline {
            width,
            height,
            rgba: STANDARD.encode(rgba),
        });
        self
    }

    pub fn with_image_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = Some(DumpPixels::File { path: path.into() });
        self
    }
}

impl LayerNode for DumpLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> LayerKind {
        LayerKind::from_kind_str(&self.kind)
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.width, self.height)
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn engine_dict(&self) -> Option<&Value> {
        self.engine_dict.as_ref().filter(|v| !v.is_null())
    }

    fn font_hints(&self) -> FontHints<'_> {
        let text_data_font = self
            .text_data
            .as_ref()
            .and_then(|d| d.get("Font").or_else(|| d.get("FontName")))
            .and_then(Value::as_str);
        let typography_font = self
            .typography
            .as_ref()
            .and_then(|t| t.get("font"))
            .and_then(Value::as_str);

        FontHints {
            text_data_font,
            typography_font,
            text_font: self.text_font.as_deref(),
            font: self.font.as_deref(),
            fontset: &self.fontset,
        }
    }

    fn composite(&self) -> Result<RgbaImage> {
        match &self.image {
            Some(DumpPixels::File { path }) => Ok(image::open(path)?.to_rgba8()),
            Some(DumpPixels::Inline { width, height, rgba }) => {
                let bytes = STANDARD
                    .decode(rgba)
                    .map_err(|e| Error::InvalidDump(format!("layer '{}': bad base64 pixels: {e}", self.name)))?;
                RgbaImage::from_raw(*width, *height, bytes).ok_or_else(|| {
                    Error::InvalidDump(format!(
                        "layer '{}': pixel data does not fill {width}x{height}",
                        self.name
                    ))
                })
            }
            None => Err(Error::InvalidDump(format!("layer '{}' has no pixel data", self.name))),
        }
    }
}
