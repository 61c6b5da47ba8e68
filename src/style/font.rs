//! Font name resolution.
//!
//! The font of a type layer is looked up in several places, first hit
//! wins:
//!
//! 1. the font set entry selected by the first style run's font index;
//! 2. the first font set entry;
//! 3. the node's [`FontHints`], in field order;
//! 4. a [`FontPrompt`] asked with the layer's name.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use log::{debug, info};

use super::StyleError;
use super::engine_dict::{FontSet, StyleSheetData};
use crate::layer::FontHints;

/// Where a font name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSource {
    /// Font set entry selected by the style run's index.
    FontSetIndex(usize),
    FirstFontSetEntry,
    TextData,
    Typography,
    TextAttribute,
    FontAttribute,
    FontsetList,
}

/// Supplies a font name when nothing in the document names one.
///
/// Called synchronously with the layer's name. Returning `None` leaves the
/// layer without a font.
pub trait FontPrompt {
    fn ask_font_name(&mut self, layer_name: &str) -> Option<String>;
}

impl<F> FontPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn ask_font_name(&mut self, layer_name: &str) -> Option<String> {
        self(layer_name)
    }
}

/// Always answers with the same font.
#[derive(Debug, Clone)]
pub struct FixedFontPrompt(pub String);

impl FixedFontPrompt {
    pub fn new(font: impl Into<String>) -> Self {
        Self(font.into())
    }
}

impl FontPrompt for FixedFontPrompt {
    fn ask_font_name(&mut self, _layer_name: &str) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Never answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFontPrompt;

impl FontPrompt for NoFontPrompt {
    fn ask_font_name(&mut self, _layer_name: &str) -> Option<String> {
        None
    }
}

/// Asks an operator line by line: writes a question to `output`, reads one
/// line of `input`. An empty line or end of input means no answer.
#[derive(Debug)]
pub struct LineFontPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineFontPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> FontPrompt for LineFontPrompt<R, W> {
    fn ask_font_name(&mut self, layer_name: &str) -> Option<String> {
        write!(
            self.output,
            "Font not found for layer '{layer_name}'. Please enter the font (e.g. Montserrat-Bold): "
        )
        .ok()?;
        self.output.flush().ok()?;

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => non_empty(line.trim()).map(str::to_string),
        }
    }
}

/// Per-run state for text style resolution.
///
/// Holds the font prompt and remembers its answers by layer name, so each
/// distinct unresolved layer name is asked about once per run.
pub struct ResolveContext<'p> {
    prompt: &'p mut dyn FontPrompt,
    answers: HashMap<String, Option<String>>,
}

impl<'p> ResolveContext<'p> {
    pub fn new(prompt: &'p mut dyn FontPrompt) -> Self {
        Self {
            prompt,
            answers: HashMap::new(),
        }
    }

    /// Ask the prompt for a layer's font, or reuse an earlier answer.
    pub fn ask_font(&mut self, layer_name: &str) -> Option<String> {
        if let Some(answer) = self.answers.get(layer_name) {
            return answer.clone();
        }
        info!("no font found for layer '{layer_name}', asking");
        let answer = self
            .prompt
            .ask_font_name(layer_name)
            .and_then(|a| non_empty(a.trim()).map(str::to_string));
        self.answers.insert(layer_name.to_string(), answer.clone());
        answer
    }
}

impl std::fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveContext")
            .field("answers", &self.answers)
            .finish_non_exhaustive()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Find a font name in the document, without asking anyone.
///
/// Returns `Ok(None)` when every source comes up empty. An entry of the
/// font set that is selected but carries no `Name` is an error.
pub fn find_font_name<'a>(
    font_set: FontSet<'a>,
    style: StyleSheetData<'a>,
    hints: FontHints<'a>,
) -> Result<Option<(&'a str, FontSource)>, StyleError> {
    if let Some(index) = style.font_index()
        && let Some(name) = font_set.name_at(index)?.and_then(non_empty)
    {
        return Ok(Some((name, FontSource::FontSetIndex(index))));
    }

    if let Some(name) = font_set.name_at(0)?.and_then(non_empty) {
        return Ok(Some((name, FontSource::FirstFontSetEntry)));
    }

    let candidates = [
        (hints.text_data_font, FontSource::TextData),
        (hints.typography_font, FontSource::Typography),
        (hints.text_font, FontSource::TextAttribute),
        (hints.font, FontSource::FontAttribute),
        (hints.fontset.first().map(String::as_str), FontSource::FontsetList),
    ];
    let found = candidates
        .into_iter()
        .find_map(|(name, source)| name.and_then(non_empty).map(|n| (n, source)));
    if let Some((name, source)) = found {
        debug!("font '{name}' taken from {source:?}");
    }
    Ok(found)
}
