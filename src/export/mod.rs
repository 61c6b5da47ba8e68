//! Raster asset export for pixel layers.
//!
//! Each pixel layer is composited and written as `<skins>/<name>.png`. The
//! record refers to it by a path relative to the JSON document,
//! `./skins/<name>.png`.
//!
//! Layer names are used as file names verbatim. Two layers with the same
//! name write the same file, and the one exported last wins. Names are not
//! sanitized either: path separators or `..` in a name are kept as given,
//! so such a layer may land outside the skins directory.
//!
//! # Example
//!
//! ```no_run
//! use psdskin::decode::LayerDump;
//! use psdskin::export::SkinExporter;
//!
//! let dump = LayerDump::from_path("banner.json")?;
//! let exporter = SkinExporter::new("result/banner/skins");
//! let src = exporter.export(&dump.layers[0])?;
//! assert!(src.starts_with("./skins/"));
//! # Ok::<(), psdskin::Error>(())
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use log::debug;

use crate::error::{Error, Result};
use crate::layer::LayerNode;
use crate::util::write_atomic;

/// Configuration for skin export.
#[derive(Debug, Clone)]
pub struct SkinConfig {
    /// Directory name used in `src` references.
    pub skins_dir_name: String,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            skins_dir_name: "skins".to_string(),
        }
    }
}

/// Writes layer composites as PNG files into one directory.
#[derive(Debug, Clone)]
pub struct SkinExporter {
    skins_dir: PathBuf,
    config: SkinConfig,
}

impl SkinExporter {
    /// Create an exporter writing into `skins_dir`, which must exist.
    pub fn new(skins_dir: impl Into<PathBuf>) -> Self {
        Self {
            skins_dir: skins_dir.into(),
            config: SkinConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SkinConfig) -> Self {
        self.config = config;
        self
    }

    /// Reference to a layer's asset as written into its record.
    pub fn src_for(&self, layer_name: &str) -> String {
        format!("./{}/{}", self.config.skins_dir_name, asset_file_name(layer_name))
    }

    /// Composite `node`, write it, and return its `src` reference.
    ///
    /// The PNG is encoded in memory and moved into place only once fully
    /// written, so a failure never leaves a truncated file behind.
    pub fn export<N: LayerNode>(&self, node: &N) -> Result<String> {
        let image = node.composite()?;
        let path = self.skins_dir.join(asset_file_name(node.name()));
        write_png(&image, &path, node.name())?;
        debug!("wrote {} ({}x{})", path.display(), image.width(), image.height());
        Ok(self.src_for(node.name()))
    }
}

/// File name of a layer's asset.
pub fn asset_file_name(layer_name: &str) -> String {
    format!("{layer_name}.png")
}

/// Encode `image` as PNG into `path`, going through a sibling temp file.
pub fn write_png(image: &RgbaImage, path: &Path, layer_name: &str) -> Result<()> {
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::EmptyComposite(layer_name.to_string()));
    }

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    write_atomic(path, &bytes)?;
    Ok(())
}
