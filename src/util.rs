//! Small helpers shared by the resolver, the record builder and the writers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Truncate a floating value toward zero.
///
/// Matches integer casting of layer geometry and style metrics: `12.9`
/// becomes `12`, `-3.7` becomes `-3`. NaN maps to `0` and infinities
/// saturate.
#[inline]
pub fn truncate(value: f64) -> i64 {
    value as i64
}

/// Scale a `[0, 1]` color channel to a byte, rounding down.
///
/// Out-of-range inputs are clamped first so the result always fits in
/// two hex digits.
#[inline]
pub fn channel_to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).floor() as u8
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// On failure the temp file is removed and `path` keeps its old contents.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_replaces_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!dir.path().join("out.json.tmp").exists());
    }

    #[test]
    fn failed_atomic_write_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");
        assert!(write_atomic(&path, b"data").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn truncate_goes_toward_zero() {
        assert_eq!(truncate(12.9), 12);
        assert_eq!(truncate(-3.7), -3);
        assert_eq!(truncate(0.0), 0);
        assert_eq!(truncate(f64::NAN), 0);
    }

    #[test]
    fn channel_floor_and_clamp() {
        assert_eq!(channel_to_byte(0.2), 51);
        assert_eq!(channel_to_byte(0.4), 102);
        assert_eq!(channel_to_byte(0.6), 153);
        assert_eq!(channel_to_byte(1.0), 255);
        assert_eq!(channel_to_byte(1.5), 255);
        assert_eq!(channel_to_byte(-0.1), 0);
    }
}
