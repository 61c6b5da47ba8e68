//! Output records and the document assembler.
//!
//! A [`DocumentRecord`] is the JSON written for one converted document:
//! its name, output path, a fixed `info` block and one [`LayerRecord`] per
//! leaf layer, in traversal order.

use std::io::Write;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::layer::Bounds;
use crate::style::TextStyle;

/// Output type of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Text,
    Image,
}

/// Type-specific part of a layer record.
///
/// `None` means the part could not be produced for this layer and its
/// fields are left out of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerContent {
    Text(Option<TextStyle>),
    /// `src` reference of the exported asset.
    Image(Option<String>),
}

impl LayerContent {
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerContent::Text(_) => LayerType::Text,
            LayerContent::Image(_) => LayerType::Image,
        }
    }
}

/// One leaf layer of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRecord {
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub content: LayerContent,
}

impl LayerRecord {
    pub fn new(name: impl Into<String>, bounds: Bounds, content: LayerContent) -> Self {
        let (x, y, width, height) = bounds.truncated();
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            content,
        }
    }

    pub fn layer_type(&self) -> LayerType {
        self.content.layer_type()
    }
}

// Serialized flat: geometry and type first, then the type-specific fields.
impl Serialize for LayerRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("x", &self.x)?;
        map.serialize_entry("y", &self.y)?;
        map.serialize_entry("width", &self.width)?;
        map.serialize_entry("height", &self.height)?;
        map.serialize_entry("type", &self.layer_type())?;
        match &self.content {
            LayerContent::Text(Some(style)) => {
                map.serialize_entry("font", &style.font)?;
                map.serialize_entry("justification", &style.justification)?;
                map.serialize_entry("lineHeight", &style.line_height)?;
                map.serialize_entry("color", &style.color)?;
                map.serialize_entry("size", &style.size)?;
                map.serialize_entry("text", &style.text)?;
            }
            LayerContent::Image(Some(src)) => {
                map.serialize_entry("src", src)?;
            }
            LayerContent::Text(None) | LayerContent::Image(None) => {}
        }
        map.end()
    }
}

/// Descriptive block of the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub description: String,
    pub file: String,
    pub date: String,
    pub title: String,
    pub author: String,
    pub keywords: String,
    pub generator: String,
}

impl DocumentInfo {
    /// The fixed info block; only `file` varies.
    pub fn for_file(file: impl Into<String>) -> Self {
        Self {
            description: "Normal".to_string(),
            file: file.into(),
            date: "sRGB".to_string(),
            title: String::new(),
            author: String::new(),
            keywords: String::new(),
            generator: "Idk export kit".to_string(),
        }
    }
}

/// Root object of the output JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    pub name: String,
    pub path: String,
    pub info: DocumentInfo,
    pub layers: Vec<LayerRecord>,
}

/// Build the document record. Pure; `output_path` gains a trailing `/` if
/// it lacks one.
pub fn assemble(document_id: &str, output_path: &str, layers: Vec<LayerRecord>) -> DocumentRecord {
    let path = if output_path.ends_with('/') {
        output_path.to_string()
    } else {
        format!("{output_path}/")
    };
    DocumentRecord {
        name: document_id.to_string(),
        path,
        info: DocumentInfo::for_file(document_id),
        layers,
    }
}

impl DocumentRecord {
    /// Write pretty-printed JSON indented by `indent` spaces, then flush.
    pub fn write_json<W: Write>(&self, mut writer: W, indent: usize) -> Result<()> {
        let indent = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut ser)?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_json_bytes(&self, indent: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_json(&mut buf, indent)?;
        Ok(buf)
    }

    pub fn to_json_string(&self, indent: usize) -> Result<String> {
        let buf = self.to_json_bytes(indent)?;
        // serde_json only emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn text_layers(&self) -> impl Iterator<Item = &LayerRecord> {
        self.layers.iter().filter(|l| l.layer_type() == LayerType::Text)
    }

    pub fn image_layers(&self) -> impl Iterator<Item = &LayerRecord> {
        self.layers.iter().filter(|l| l.layer_type() == LayerType::Image)
    }
}
