//! Text style resolution for type layers.
//!
//! [`resolve_text_style`] reads font, justification, line height, fill
//! color, font size and text out of a layer's style dictionary. Each field
//! has a default; only a dictionary that is missing altogether or is
//! structurally broken makes resolution fail, and that failure is confined
//! to the one layer.

mod color;
mod engine_dict;
mod font;

use log::debug;
use thiserror::Error;

use crate::layer::LayerNode;
use crate::util::truncate;

pub use color::{DEFAULT_COLOR, fill_color_hex, format_hex};
pub use engine_dict::{DEFAULT_JUSTIFICATION, EngineDict, FontSet, StyleSheetData};
pub use font::{
    FixedFontPrompt, FontPrompt, FontSource, LineFontPrompt, NoFontPrompt, ResolveContext,
    find_font_name,
};

/// Why a type layer's style could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("missing key {0}")]
    MissingKey(String),

    #[error("malformed style data: {0}")]
    Malformed(String),
}

/// Resolved typography of a type layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// `None` when neither the document nor the prompt named a font.
    pub font: Option<String>,
    pub justification: String,
    pub line_height: i64,
    /// `0xRRGGBB`.
    pub color: String,
    pub size: i64,
    pub text: String,
}

/// Resolve the text style of a type layer.
///
/// The prompt in `ctx` is consulted only after every other field resolved
/// and no font was found in the document.
pub fn resolve_text_style<N: LayerNode>(
    node: &N,
    ctx: &mut ResolveContext<'_>,
) -> Result<TextStyle, StyleError> {
    let root = node
        .engine_dict()
        .ok_or_else(|| StyleError::MissingKey("engine_dict".to_string()))?;
    let dict = EngineDict::new(root);

    let style = dict.style_sheet_data()?;
    let found = find_font_name(dict.font_set(), style, node.font_hints())?;
    let justification = dict.justification()?;
    let line_height = truncate(style.leading());
    let color = fill_color_hex(style.fill_color_values())?;
    let size = truncate(style.font_size());
    let text = node.text().unwrap_or_default().to_string();

    let font = match found {
        Some((name, source)) => {
            debug!("layer '{}': font '{name}' ({source:?})", node.name());
            Some(name.to_string())
        }
        None => ctx.ask_font(node.name()),
    };

    Ok(TextStyle {
        font,
        justification,
        line_height,
        color,
        size,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DumpLayer;
    use serde_json::{Value, json};

    #[derive(Default)]
    struct RecordingPrompt {
        answer: Option<String>,
        asked: Vec<String>,
    }

    impl FontPrompt for RecordingPrompt {
        fn ask_font_name(&mut self, layer_name: &str) -> Option<String> {
            self.asked.push(layer_name.to_string());
            self.answer.clone()
        }
    }

    fn full_dict() -> Value {
        json!({
            "ResourceDict": { "FontSet": [
                { "Name": "Arial" }, { "Name": "Lato" }, { "Name": "Montserrat-Bold" }
            ]},
            "StyleRun": { "RunArray": [
                { "StyleSheet": { "StyleSheetData": {
                    "Font": 2,
                    "Leading": 36.7,
                    "FontSize": 28.9,
                    "FillColor": { "Values": [1.0, 0.2, 0.4, 0.6] }
                }}}
            ]},
            "ParagraphRun": { "RunArray": [
                { "ParagraphSheet": { "Properties": { "Justification": "Center" } } }
            ]}
        })
    }

    fn resolve(layer: &DumpLayer, prompt: &mut RecordingPrompt) -> Result<TextStyle, StyleError> {
        let mut ctx = ResolveContext::new(prompt);
        resolve_text_style(layer, &mut ctx)
    }

    #[test]
    fn resolves_every_field() {
        let layer = DumpLayer::type_layer("title", "Hello", Some(full_dict()));
        let mut prompt = RecordingPrompt::default();
        let style = resolve(&layer, &mut prompt).unwrap();

        assert_eq!(
            style,
            TextStyle {
                font: Some("Montserrat-Bold".to_string()),
                justification: "center".to_string(),
                line_height: 36,
                color: "0x336699".to_string(),
                size: 28,
                text: "Hello".to_string(),
            }
        );
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn sparse_dict_uses_defaults() {
        let dict = json!({ "ResourceDict": { "FontSet": [ { "Name": "Arial" } ] } });
        let mut layer = DumpLayer::type_layer("body", "", Some(dict));
        layer.text = None;
        let mut prompt = RecordingPrompt::default();
        let style = resolve(&layer, &mut prompt).unwrap();

        assert_eq!(style.font.as_deref(), Some("Arial"));
        assert_eq!(style.justification, DEFAULT_JUSTIFICATION);
        assert_eq!(style.line_height, 0);
        assert_eq!(style.color, DEFAULT_COLOR);
        assert_eq!(style.size, 0);
        assert_eq!(style.text, "");
    }

    #[test]
    fn missing_dict_fails() {
        let layer = DumpLayer::type_layer("title", "Hello", None);
        let mut prompt = RecordingPrompt::default();
        assert_eq!(
            resolve(&layer, &mut prompt),
            Err(StyleError::MissingKey("engine_dict".to_string()))
        );
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn unresolved_font_asks_prompt_once_with_layer_name() {
        let layer = DumpLayer::type_layer("headline", "Hi", Some(json!({})));
        let mut prompt = RecordingPrompt {
            answer: Some("Montserrat-Bold".to_string()),
            ..Default::default()
        };
        let style = resolve(&layer, &mut prompt).unwrap();
        assert_eq!(style.font.as_deref(), Some("Montserrat-Bold"));
        assert_eq!(prompt.asked, ["headline"]);
    }

    #[test]
    fn prompt_without_answer_leaves_font_empty() {
        let layer = DumpLayer::type_layer("headline", "Hi", Some(json!({})));
        let mut prompt = RecordingPrompt::default();
        let style = resolve(&layer, &mut prompt).unwrap();
        assert_eq!(style.font, None);
        assert_eq!(style.text, "Hi");
    }

    #[test]
    fn node_hints_beat_prompt() {
        let mut layer = DumpLayer::type_layer("headline", "Hi", Some(json!({})));
        layer.fontset = vec!["Helvetica".to_string(), "Times".to_string()];
        let mut prompt = RecordingPrompt::default();
        let style = resolve(&layer, &mut prompt).unwrap();
        assert_eq!(style.font.as_deref(), Some("Helvetica"));
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn malformed_color_does_not_ask_prompt() {
        let dict = json!({
            "StyleRun": { "RunArray": [
                { "StyleSheet": { "StyleSheetData": { "FillColor": { "Values": [0, 0, 0] } } } }
            ]}
        });
        let layer = DumpLayer::type_layer("headline", "Hi", Some(dict));
        let mut prompt = RecordingPrompt::default();
        assert!(matches!(resolve(&layer, &mut prompt), Err(StyleError::Malformed(_))));
        assert!(prompt.asked.is_empty());
    }
}
