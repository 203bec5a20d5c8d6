// File: ./src/model/parser.rs
// Handles pasted color text (hex lists and CSS snippets)
use crate::color_utils::{Rgb, parse_hex};
use crate::model::{PALETTE_SIZE, Palette};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n,\s]+").unwrap());
static CSS_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})").unwrap());
static CSS_RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").unwrap()
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("No valid colors found. Please check your input.")]
    NoColors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// One color per token, `#` optional.
    Hex,
    /// Anything containing `#hex` or `rgb(r, g, b)` values.
    Css,
}

/// Tokens split on commas, whitespace and newlines; each must be a 3- or
/// 6-digit hex color with or without `#`. Invalid tokens are dropped.
pub fn extract_hex_colors(input: &str) -> Vec<Rgb> {
    SEPARATORS
        .split(input)
        .filter(|part| !part.is_empty())
        .filter_map(|part| parse_hex(part).ok())
        .collect()
}

/// All `#hex` matches first, then all `rgb()` matches. Channels above 255 saturate.
pub fn extract_css_colors(input: &str) -> Vec<Rgb> {
    let mut colors: Vec<Rgb> = CSS_HEX
        .find_iter(input)
        .filter_map(|m| parse_hex(m.as_str()).ok())
        .collect();

    let channel = |s: &str| s.parse::<u32>().map_or(255, |v| v.min(255)) as u8;
    colors.extend(
        CSS_RGB
            .captures_iter(input)
            .map(|caps| Rgb::new(channel(&caps[1]), channel(&caps[2]), channel(&caps[3]))),
    );
    colors
}

/// Exactly `PALETTE_SIZE` colors: extra colors are dropped, missing ones
/// repeat the last color.
pub fn normalize_import(mut colors: Vec<Rgb>) -> Result<Palette, ImportError> {
    colors.truncate(PALETTE_SIZE);
    let Some(&fill) = colors.last() else {
        return Err(ImportError::NoColors);
    };
    colors.resize(PALETTE_SIZE, fill);
    Ok(colors)
}

pub fn import_colors(input: &str, mode: ImportMode) -> Result<Palette, ImportError> {
    let colors = match mode {
        ImportMode::Hex => extract_hex_colors(input),
        ImportMode::Css => extract_css_colors(input),
    };
    normalize_import(colors)
}

/// Picks the mode from the text itself: CSS when it looks like a stylesheet
/// or config snippet, plain hex list otherwise.
pub fn detect_mode(input: &str) -> ImportMode {
    if input.contains(':') || input.contains("rgb(") || input.contains('{') {
        ImportMode::Css
    } else {
        ImportMode::Hex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_list_accepts_mixed_separators() {
        let colors = extract_hex_colors("#FF5733, 33ff57\n#abc  zzz #12345");
        assert_eq!(
            colors,
            vec![
                Rgb::new(0xFF, 0x57, 0x33),
                Rgb::new(0x33, 0xFF, 0x57),
                Rgb::new(0xAA, 0xBB, 0xCC),
            ]
        );
    }

    #[test]
    fn css_extracts_hex_then_rgb() {
        let css = ":root {\n  --a: rgb(255, 87, 51);\n  --b: #0f0;\n  --c: rgb( 1 ,2, 3 );\n}";
        assert_eq!(
            extract_css_colors(css),
            vec![
                Rgb::new(0, 255, 0),
                Rgb::new(255, 87, 51),
                Rgb::new(1, 2, 3),
            ]
        );
    }

    #[test]
    fn css_rgb_channels_saturate() {
        assert_eq!(
            extract_css_colors("color: rgb(300, 0, 99999999999)"),
            vec![Rgb::new(255, 0, 255)]
        );
    }

    #[test]
    fn import_pads_with_last_color() {
        let palette = import_colors("#111111 #222222", ImportMode::Hex).unwrap();
        assert_eq!(palette.len(), PALETTE_SIZE);
        assert_eq!(palette[1..], [Rgb::new(0x22, 0x22, 0x22); 4]);
    }

    #[test]
    fn import_truncates_to_five() {
        let input = "#010101 #020202 #030303 #040404 #050505 #060606";
        let palette = import_colors(input, ImportMode::Hex).unwrap();
        assert_eq!(palette.len(), PALETTE_SIZE);
        assert_eq!(palette[4], Rgb::new(5, 5, 5));
    }

    #[test]
    fn import_without_colors_fails() {
        assert_eq!(
            import_colors("nothing here", ImportMode::Hex),
            Err(ImportError::NoColors)
        );
        assert_eq!(import_colors("", ImportMode::Css), Err(ImportError::NoColors));
    }

    #[test]
    fn mode_detection() {
        assert_eq!(detect_mode("#fff 000"), ImportMode::Hex);
        assert_eq!(detect_mode("--color-1: #fff;"), ImportMode::Css);
        assert_eq!(detect_mode("rgb(1,2,3)"), ImportMode::Css);
    }
}
