//! Conversion driver.
//!
//! Ties the pieces together for one document: flatten the layer tree,
//! resolve each text leaf or export each pixel leaf, and assemble the
//! result. Problems with a single leaf are logged and collected in the
//! [`ConversionReport`]; they never stop the run. Structural problems with
//! the tree abort it before anything is written.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::document::{DocumentRecord, LayerContent, LayerRecord, assemble};
use crate::error::{Error, Result};
use crate::export::{SkinConfig, SkinExporter};
use crate::layer::{LayerKind, LayerNode};
use crate::style::{FontPrompt, ResolveContext, StyleError, resolve_text_style};
use crate::util::write_atomic;
use crate::walk::{DEFAULT_MAX_DEPTH, FlatLeaf, flatten};

/// Configuration for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Deepest group nesting accepted before the tree is rejected.
    pub max_depth: usize,
    /// Name of the asset directory inside the output folder.
    pub skins_dir_name: String,
    /// Spaces per indentation level of the JSON output.
    pub indent: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            skins_dir_name: "skins".to_string(),
            indent: 4,
        }
    }
}

/// Paths of one output folder: `<root>/<folder>/<folder>.json` and
/// `<root>/<folder>/<skins>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub folder: String,
    pub dir: PathBuf,
    pub json_path: PathBuf,
    pub skins_dir: PathBuf,
}

impl OutputLayout {
    pub fn new(result_root: impl AsRef<Path>, folder: &str, config: &ConvertConfig) -> Self {
        let dir = result_root.as_ref().join(folder);
        Self {
            folder: folder.to_string(),
            json_path: dir.join(format!("{folder}.json")),
            skins_dir: dir.join(&config.skins_dir_name),
            dir,
        }
    }

    /// Create the output directories.
    ///
    /// Unless `overwrite` is set, an existing output folder or JSON file
    /// is an error.
    pub fn prepare(&self, overwrite: bool) -> Result<()> {
        if !overwrite {
            if self.json_path.exists() {
                return Err(Error::OutputExists(self.json_path.clone()));
            }
            if self.dir.exists() {
                return Err(Error::OutputExists(self.dir.clone()));
            }
        }
        fs::create_dir_all(&self.skins_dir)?;
        Ok(())
    }
}

/// What went wrong with a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Style fields were left out.
    Style(StyleError),
    /// No asset was written; `src` was left out.
    Export(String),
    /// No font could be found or obtained; `font` is null.
    FontUnresolved,
}

/// A leaf-level problem, recorded against the leaf's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafIssue {
    pub index: usize,
    pub layer: String,
    pub kind: IssueKind,
}

impl fmt::Display for LeafIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::Style(e) => write!(f, "layer '{}': text properties skipped: {e}", self.layer),
            IssueKind::Export(e) => write!(f, "layer '{}': image not exported: {e}", self.layer),
            IssueKind::FontUnresolved => write!(f, "layer '{}': font unresolved", self.layer),
        }
    }
}

/// Result of a conversion: the document plus every leaf-level issue.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub document: DocumentRecord,
    pub issues: Vec<LeafIssue>,
}

/// Converts layer trees into document records.
pub struct Converter<'p> {
    config: ConvertConfig,
    exporter: SkinExporter,
    ctx: ResolveContext<'p>,
}

impl<'p> Converter<'p> {
    /// Create a converter exporting assets into `skins_dir`.
    pub fn new(config: ConvertConfig, skins_dir: impl Into<PathBuf>, prompt: &'p mut dyn FontPrompt) -> Self {
        let exporter = SkinExporter::new(skins_dir).with_config(SkinConfig {
            skins_dir_name: config.skins_dir_name.clone(),
        });
        Self {
            config,
            exporter,
            ctx: ResolveContext::new(prompt),
        }
    }

    /// Convert one document's top-level layers.
    ///
    /// The tree is flattened before any leaf is processed, so a structural
    /// error returns before any asset is written.
    pub fn convert<N: LayerNode>(
        &mut self,
        document_id: &str,
        output_path: &str,
        roots: &[N],
    ) -> Result<ConversionReport> {
        let leaves = flatten(roots, self.config.max_depth)?;
        info!("converting '{document_id}': {} leaf layers", leaves.len());

        let mut records = Vec::with_capacity(leaves.len());
        let mut issues = Vec::new();
        for leaf in &leaves {
            records.push(self.process_leaf(leaf, &mut issues));
        }

        Ok(ConversionReport {
            document: assemble(document_id, output_path, records),
            issues,
        })
    }

    /// Build the record for one leaf, appending any issue to `issues`.
    pub fn process_leaf<N: LayerNode>(&mut self, leaf: &FlatLeaf<'_, N>, issues: &mut Vec<LeafIssue>) -> LayerRecord {
        let node = leaf.node;
        let mut issue = |kind: IssueKind| {
            let issue = LeafIssue {
                index: leaf.index,
                layer: node.name().to_string(),
                kind,
            };
            warn!("{issue}");
            issues.push(issue);
        };

        let content = match node.kind() {
            LayerKind::Text => match resolve_text_style(node, &mut self.ctx) {
                Ok(style) => {
                    if style.font.is_none() {
                        issue(IssueKind::FontUnresolved);
                    }
                    LayerContent::Text(Some(style))
                }
                Err(e) => {
                    issue(IssueKind::Style(e));
                    LayerContent::Text(None)
                }
            },
            // Groups never reach here; anything else is exported as pixels.
            LayerKind::Pixel | LayerKind::Group => match self.exporter.export(node) {
                Ok(src) => LayerContent::Image(Some(src)),
                Err(e) => {
                    issue(IssueKind::Export(e.to_string()));
                    LayerContent::Image(None)
                }
            },
        };

        LayerRecord::new(node.name(), node.bounds(), content)
    }
}

/// Convert `roots` into `layout` and write the JSON file.
///
/// `layout` must already be prepared. Nothing is written when the tree
/// fails structurally. The JSON goes through a sibling temp file, so a
/// failed write leaves any previous file in place.
pub fn convert_to_layout<N: LayerNode>(
    document_id: &str,
    roots: &[N],
    layout: &OutputLayout,
    config: ConvertConfig,
    prompt: &mut dyn FontPrompt,
) -> Result<ConversionReport> {
    let indent = config.indent;
    let mut converter = Converter::new(config, &layout.skins_dir, prompt);
    let report = converter.convert(document_id, &layout.folder, roots)?;

    let bytes = report.document.to_json_bytes(indent)?;
    write_atomic(&layout.json_path, &bytes)?;
    info!("wrote {}", layout.json_path.display());
    Ok(report)
}
