// File: src/color_utils.rs
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 24-bit sRGB color. Displays as uppercase `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accessibility {
    pub white_contrast: f64,
    pub black_contrast: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("'{0}' is not a #RGB or #RRGGBB color")]
    InvalidHex(String),
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    /// Key used by the frequency table: `"r,g,b"`.
    pub fn frequency_key(self) -> String {
        format!("{},{},{}", self.r, self.g, self.b)
    }

    /// Channels scaled to [0.0, 1.0].
    pub fn normalized(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl Hsl {
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }
}

/// Lenient hex parse: strips one leading `#` and reads the leading hex digits.
/// Garbage in gives garbage out; no digits at all gives black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let value = digits
        .chars()
        .map_while(|c| c.to_digit(16))
        .fold(0u32, |acc, d| acc.wrapping_mul(16).wrapping_add(d));

    Rgb {
        r: ((value >> 16) & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: (value & 0xFF) as u8,
    }
}

/// Strict parse of `#RGB` / `#RRGGBB` (the `#` is optional, case-insensitive).
/// 3-digit forms expand by digit doubling.
pub fn parse_hex(input: &str) -> Result<Rgb, ColorParseError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidHex(input.to_string()));
    }

    let expanded = match digits.len() {
        6 => digits.to_string(),
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => return Err(ColorParseError::InvalidHex(input.to_string())),
    };

    Ok(hex_to_rgb(&expanded))
}

/// Packs channels into lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // achromatic
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: h / 6.0 * 360.0,
        s,
        l,
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// HSL to RGB. Hue in degrees, saturation and lightness in [0, 1].
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h / 360.0;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb {
        r: to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: to_channel(hue_to_channel(p, q, h)),
        b: to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    }
}

fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance.
pub fn relative_luminance(color: Rgb) -> f64 {
    let (r, g, b) = color.normalized();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Contrast ratios of `color` against pure white and pure black.
pub fn color_accessibility(color: Rgb) -> Accessibility {
    let luminance = relative_luminance(color);
    Accessibility {
        white_contrast: (1.0 + 0.05) / (luminance + 0.05),
        black_contrast: (luminance + 0.05) / 0.05,
    }
}

/// Qualitative name such as "Dark Vibrant Blue" or "Gray (50%)".
pub fn color_name(color: Rgb) -> String {
    let hsl = color.to_hsl();

    if hsl.s < 0.15 {
        if hsl.l < 0.2 {
            return "Black".to_string();
        }
        if hsl.l > 0.8 {
            return "White".to_string();
        }
        return format!("Gray ({}%)", (hsl.l * 100.0).round() as u32);
    }

    let mut name = String::new();
    if hsl.l < 0.2 {
        name.push_str("Dark ");
    } else if hsl.l > 0.8 {
        name.push_str("Light ");
    } else if hsl.l > 0.6 {
        name.push_str("Pale ");
    }

    if hsl.s < 0.3 {
        name.push_str("Muted ");
    } else if hsl.s > 0.8 {
        name.push_str("Vibrant ");
    }

    let hue = match hsl.h {
        h if h < 30.0 => "Red",
        h if h < 60.0 => "Orange",
        h if h < 90.0 => "Yellow",
        h if h < 150.0 => "Green",
        h if h < 210.0 => "Cyan",
        h if h < 270.0 => "Blue",
        h if h < 330.0 => "Purple",
        _ => "Pink",
    };
    name.push_str(hue);
    name
}

/// Complement (+180), analogous (+30, -30) and triadic (+120) at the same S/L.
pub fn color_harmony(color: Rgb) -> [Rgb; 4] {
    let hsl = color.to_hsl();
    [180.0, 30.0, -30.0, 120.0].map(|offset| {
        hsl_to_rgb((hsl.h + offset).rem_euclid(360.0), hsl.s, hsl.l)
    })
}

pub fn rgb_to_cmyk(color: Rgb) -> Cmyk {
    let (r, g, b) = color.normalized();
    let (c, m, y) = (1.0 - r, 1.0 - g, 1.0 - b);
    let k = c.min(m).min(y);

    if k == 1.0 {
        return Cmyk {
            c: 0,
            m: 0,
            y: 0,
            k: 100,
        };
    }

    let pct = |v: f64| ((v - k) / (1.0 - k) * 100.0).round() as u8;
    Cmyk {
        c: pct(c),
        m: pct(m),
        y: pct(y),
        k: (k * 100.0).round() as u8,
    }
}

/// Euclidean distance in RGB space.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Uniform over `0x000000..0xFFFFFF` (white itself is never drawn).
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let value: u32 = rng.gen_range(0..0xFF_FFFF);
    Rgb {
        r: ((value >> 16) & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: (value & 0xFF) as u8,
    }
}

/// Determines if text on top of this color should be white rather than black.
pub fn is_dark(color: Rgb) -> bool {
    let (r, g, b) = color.normalized();
    let brightness = 0.299 * r + 0.587 * g + 0.114 * b;
    brightness < 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hex_round_trip_is_case_normalized() {
        for hex in ["#000000", "#ffffff", "#ff5733", "#0a0b0c", "#ABCDEF"] {
            assert_eq!(hex_to_rgb(hex).to_hex(), hex.to_lowercase());
        }
    }

    #[test]
    fn hex_to_rgb_tolerates_missing_hash_and_garbage() {
        assert_eq!(hex_to_rgb("ff0000"), Rgb::new(255, 0, 0));
        assert_eq!(hex_to_rgb("zzzzzz"), Rgb::BLACK);
        assert_eq!(hex_to_rgb(""), Rgb::BLACK);
    }

    #[test]
    fn parse_hex_expands_short_form() {
        assert_eq!(parse_hex("#fa0"), Ok(Rgb::new(0xFF, 0xAA, 0x00)));
        assert_eq!(parse_hex("ABC"), Ok(Rgb::new(0xAA, 0xBB, 0xCC)));
        assert!(parse_hex("#12345").is_err());
        assert!(parse_hex("#12345g").is_err());
    }

    #[test]
    fn display_is_uppercase() {
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_string(), "#AB01FF");
        assert_eq!(Rgb::new(0xab, 0x01, 0xff).to_hex(), "#ab01ff");
    }

    #[test]
    fn hsl_round_trip_within_one_step() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let c = random_color(&mut rng);
            let back = c.to_hsl().to_rgb();
            assert!((c.r as i16 - back.r as i16).abs() <= 1, "{c} -> {back}");
            assert!((c.g as i16 - back.g as i16).abs() <= 1, "{c} -> {back}");
            assert!((c.b as i16 - back.b as i16).abs() <= 1, "{c} -> {back}");
        }
    }

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        let hsl = rgb_to_hsl(128, 128, 128);
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);
    }

    #[test]
    fn primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgb::new(0, 0, 255));
        let blue = rgb_to_hsl(0, 0, 255);
        assert!((blue.h - 240.0).abs() < 1e-9);
    }

    #[test]
    fn black_contrast_extremes() {
        let a = color_accessibility(Rgb::BLACK);
        assert!((a.white_contrast - 21.0).abs() < 1e-9);
        assert!((a.black_contrast - 1.0).abs() < 1e-9);

        let w = color_accessibility(Rgb::new(255, 255, 255));
        assert!((w.white_contrast - 1.0).abs() < 1e-9);
        assert!((w.black_contrast - 21.0).abs() < 1e-9);
    }

    #[test]
    fn names() {
        assert_eq!(color_name(Rgb::BLACK), "Black");
        assert_eq!(color_name(Rgb::new(255, 255, 255)), "White");
        assert_eq!(color_name(Rgb::new(128, 128, 128)), "Gray (50%)");
        assert_eq!(color_name(Rgb::new(255, 0, 0)), "Vibrant Red");
        assert_eq!(color_name(Rgb::new(0, 0, 80)), "Dark Vibrant Blue");
        assert_eq!(color_name(Rgb::new(255, 102, 102)), "Pale Vibrant Red");
        assert_eq!(color_name(Rgb::new(255, 170, 170)), "Light Vibrant Red");
        assert_eq!(color_name(Rgb::new(255, 0, 64)), "Vibrant Pink");
        assert_eq!(color_name(Rgb::new(100, 140, 100)), "Muted Green");
    }

    #[test]
    fn harmony_of_red() {
        let [comp, right, left, triad] = color_harmony(Rgb::new(255, 0, 0));
        assert_eq!(comp, Rgb::new(0, 255, 255));
        assert!((right.to_hsl().h - 30.0).abs() < 1.0);
        assert!((left.to_hsl().h - 330.0).abs() < 1.0);
        assert_eq!(triad, Rgb::new(0, 255, 0));
    }

    #[test]
    fn cmyk_of_pure_colors() {
        assert_eq!(
            rgb_to_cmyk(Rgb::BLACK),
            Cmyk {
                c: 0,
                m: 0,
                y: 0,
                k: 100
            }
        );
        assert_eq!(
            rgb_to_cmyk(Rgb::new(255, 0, 0)),
            Cmyk {
                c: 0,
                m: 100,
                y: 100,
                k: 0
            }
        );
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Rgb::new(0, 0, 0), Rgb::new(3, 4, 0)), 5.0);
        assert_eq!(distance(Rgb::new(9, 9, 9), Rgb::new(9, 9, 9)), 0.0);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&vec![Rgb::new(255, 0, 16)]).unwrap();
        assert_eq!(json, r##"["#ff0010"]"##);
        let back: Vec<Rgb> = serde_json::from_str(r##"["#FF0010","0f0"]"##).unwrap();
        assert_eq!(back, vec![Rgb::new(255, 0, 16), Rgb::new(0, 255, 0)]);
    }
}
