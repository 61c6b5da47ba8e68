//! Fill color encoding.
//!
//! Fill colors arrive as `[alpha, red, green, blue]` with each channel in
//! `[0, 1]`. The output keeps only the color channels, as `0xRRGGBB`.

use serde_json::Value;

use super::StyleError;
use crate::util::channel_to_byte;

pub const DEFAULT_COLOR: &str = "0x000000";

/// Format a byte triple as `0xRRGGBB` with uppercase digits.
pub fn format_hex(r: u8, g: u8, b: u8) -> String {
    format!("0x{r:02X}{g:02X}{b:02X}")
}

/// Encode `FillColor→Values`.
///
/// Absent or empty values give [`DEFAULT_COLOR`]. Anything else must be at
/// least four numbers; index 0 (alpha) is read but not encoded.
pub fn fill_color_hex(values: Option<&[Value]>) -> Result<String, StyleError> {
    let values = match values {
        None | Some([]) => return Ok(DEFAULT_COLOR.to_string()),
        Some(values) => values,
    };
    if values.len() < 4 {
        return Err(StyleError::Malformed(format!(
            "FillColor.Values has {} channels, expected 4",
            values.len()
        )));
    }

    let mut channels = [0.0f64; 4];
    for (slot, value) in channels.iter_mut().zip(values) {
        *slot = value
            .as_f64()
            .ok_or_else(|| StyleError::Malformed(format!("FillColor.Values has non-numeric channel {value}")))?;
    }
    let [_alpha, r, g, b] = channels;
    Ok(format_hex(channel_to_byte(r), channel_to_byte(g), channel_to_byte(b)))
}
