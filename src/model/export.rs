// File: ./src/model/export.rs
// Text renderings of colors and palettes
use crate::color_utils::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a single swatch label is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Css,
    #[serde(rename = "TW")]
    Tailwind,
}

impl ColorFormat {
    pub fn next(self) -> Self {
        match self {
            ColorFormat::Hex => ColorFormat::Rgb,
            ColorFormat::Rgb => ColorFormat::Hsl,
            ColorFormat::Hsl => ColorFormat::Css,
            ColorFormat::Css => ColorFormat::Tailwind,
            ColorFormat::Tailwind => ColorFormat::Hex,
        }
    }

    /// Label for the color at `index` (0-based) of a palette.
    pub fn format(self, color: Rgb, index: usize) -> String {
        match self {
            ColorFormat::Hex => color.to_string(),
            ColorFormat::Rgb => format!("RGB({}, {}, {})", color.r, color.g, color.b),
            ColorFormat::Hsl => {
                let hsl = color.to_hsl();
                format!(
                    "HSL({}°, {}%, {}%)",
                    hsl.h.round(),
                    (hsl.s * 100.0).round(),
                    (hsl.l * 100.0).round()
                )
            }
            ColorFormat::Css => format!("var(--color-{})", index + 1),
            ColorFormat::Tailwind => format!("palette-{}", index + 1),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsl => "HSL",
            ColorFormat::Css => "CSS",
            ColorFormat::Tailwind => "TW",
        };
        f.write_str(name)
    }
}

/// Whole-palette export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Css,
    Scss,
    Tailwind,
    Hex,
}

impl ExportFormat {
    pub fn next(self) -> Self {
        match self {
            ExportFormat::Css => ExportFormat::Scss,
            ExportFormat::Scss => ExportFormat::Tailwind,
            ExportFormat::Tailwind => ExportFormat::Hex,
            ExportFormat::Hex => ExportFormat::Css,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Css => "CSS Variables",
            ExportFormat::Scss => "SCSS Variables",
            ExportFormat::Tailwind => "Tailwind Config",
            ExportFormat::Hex => "Hex Codes",
        }
    }

    pub fn render(self, palette: &[Rgb]) -> String {
        match self {
            ExportFormat::Css => css_variables(palette),
            ExportFormat::Scss => scss_variables(palette),
            ExportFormat::Tailwind => tailwind_config(palette),
            ExportFormat::Hex => hex_list(palette),
        }
    }
}

pub fn css_variables(palette: &[Rgb]) -> String {
    let mut s = String::from(":root {\n");
    for (i, color) in palette.iter().enumerate() {
        s.push_str(&format!("  --color-{}: {};\n", i + 1, color.to_hex()));
    }
    s.push('}');
    s
}

pub fn scss_variables(palette: &[Rgb]) -> String {
    palette
        .iter()
        .enumerate()
        .map(|(i, color)| format!("$color-{}: {};\n", i + 1, color.to_hex()))
        .collect()
}

pub fn tailwind_config(palette: &[Rgb]) -> String {
    let mut s = String::from("// Add this to your tailwind.config.js\n");
    s.push_str("module.exports = {\n  theme: {\n    extend: {\n      colors: {\n");
    for (i, color) in palette.iter().enumerate() {
        s.push_str(&format!(
            "        'palette-{}': '{}',\n",
            i + 1,
            color.to_hex()
        ));
    }
    s.push_str("      }\n    }\n  }\n}");
    s
}

pub fn hex_list(palette: &[Rgb]) -> String {
    palette
        .iter()
        .map(|c| c.to_hex())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parser::{ImportMode, extract_css_colors, import_colors};

    fn sample() -> Vec<Rgb> {
        vec![Rgb::new(255, 0, 0), Rgb::new(0, 128, 255)]
    }

    #[test]
    fn css_block() {
        assert_eq!(
            css_variables(&sample()),
            ":root {\n  --color-1: #ff0000;\n  --color-2: #0080ff;\n}"
        );
    }

    #[test]
    fn scss_lines() {
        assert_eq!(
            scss_variables(&sample()),
            "$color-1: #ff0000;\n$color-2: #0080ff;\n"
        );
    }

    #[test]
    fn tailwind_snippet() {
        let out = tailwind_config(&sample());
        assert!(out.starts_with("// Add this to your tailwind.config.js\nmodule.exports = {"));
        assert!(out.contains("        'palette-2': '#0080ff',\n"));
        assert!(out.ends_with("  }\n}"));
    }

    #[test]
    fn exports_read_back_through_import() {
        let palette = vec![
            Rgb::new(1, 2, 3),
            Rgb::new(40, 50, 60),
            Rgb::new(70, 80, 90),
            Rgb::new(100, 110, 120),
            Rgb::new(250, 251, 252),
        ];
        for format in [ExportFormat::Css, ExportFormat::Scss, ExportFormat::Tailwind] {
            assert_eq!(extract_css_colors(&format.render(&palette)), palette);
        }
        assert_eq!(
            import_colors(&hex_list(&palette), ImportMode::Hex).unwrap(),
            palette
        );
    }

    #[test]
    fn swatch_labels() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(ColorFormat::Hex.format(red, 0), "#FF0000");
        assert_eq!(ColorFormat::Rgb.format(red, 0), "RGB(255, 0, 0)");
        assert_eq!(ColorFormat::Hsl.format(red, 0), "HSL(0°, 100%, 50%)");
        assert_eq!(ColorFormat::Css.format(red, 2), "var(--color-3)");
        assert_eq!(ColorFormat::Tailwind.format(red, 4), "palette-5");
    }

    #[test]
    fn format_cycle_and_serde_names() {
        assert_eq!(ColorFormat::Tailwind.next(), ColorFormat::Hex);
        assert_eq!(
            serde_json::to_string(&ColorFormat::Tailwind).unwrap(),
            "\"TW\""
        );
        assert_eq!(
            serde_json::from_str::<ColorFormat>("\"HSL\"").unwrap(),
            ColorFormat::Hsl
        );
    }
}
