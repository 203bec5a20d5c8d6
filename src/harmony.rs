// File: src/harmony.rs
// Fixed hue-offset palette generators
use crate::color_utils::{Hsl, Rgb, hsl_to_rgb, random_color};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Random,
    Harmonious,
    Analogous,
    Monochromatic,
    Complementary,
    Triadic,
    Tetradic,
    /// Driven by the learning engine instead of a fixed rule.
    Adaptive,
}

impl GenerationMode {
    pub const ALL: [GenerationMode; 8] = [
        Self::Random,
        Self::Harmonious,
        Self::Analogous,
        Self::Monochromatic,
        Self::Complementary,
        Self::Triadic,
        Self::Tetradic,
        Self::Adaptive,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Whether the mode derives its palette from a seed color.
    pub fn needs_seed(self) -> bool {
        !matches!(self, Self::Random | Self::Adaptive)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Harmonious => "harmonious",
            Self::Analogous => "analogous",
            Self::Monochromatic => "monochromatic",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Adaptive => "adaptive",
        };
        f.write_str(name)
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown generation mode: {}", s))
    }
}

fn at_hue(hsl: Hsl, hue: f64) -> Rgb {
    hsl_to_rgb(hue.rem_euclid(360.0), hsl.s, hsl.l)
}

/// Dispatches to the generator for `mode`. `Adaptive` is not a fixed rule and
/// falls back to random here; callers route it to the learning engine.
pub fn generate_for_mode<R: Rng + ?Sized>(
    mode: GenerationMode,
    seed: Rgb,
    count: usize,
    rng: &mut R,
) -> Vec<Rgb> {
    match mode {
        GenerationMode::Random | GenerationMode::Adaptive => random_palette(count, rng),
        GenerationMode::Harmonious => harmonious_palette(seed, count),
        GenerationMode::Analogous => analogous_palette(seed, count),
        GenerationMode::Monochromatic => monochromatic_palette(seed, count),
        GenerationMode::Complementary => complementary_palette(seed, count),
        GenerationMode::Triadic => triadic_palette(seed, count),
        GenerationMode::Tetradic => tetradic_palette(seed, count),
    }
}

pub fn random_palette<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Rgb> {
    (0..count).map(|_| random_color(rng)).collect()
}

/// Seed plus evenly spaced hues around the wheel.
pub fn harmonious_palette(seed: Rgb, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }
    let hsl = seed.to_hsl();
    let step = 360.0 / count as f64;

    let mut palette = vec![seed];
    palette.extend((1..count).map(|i| at_hue(hsl, hsl.h + i as f64 * step)));
    palette
}

/// Seed, then +30, -30, +60, -60... until full.
pub fn analogous_palette(seed: Rgb, count: usize) -> Vec<Rgb> {
    const STEP: f64 = 30.0;
    if count == 0 {
        return Vec::new();
    }
    let hsl = seed.to_hsl();
    let side_count = count / 2;

    let mut palette = vec![seed];
    for i in 1..=side_count {
        palette.push(at_hue(hsl, hsl.h + i as f64 * STEP));
        if palette.len() < count {
            palette.push(at_hue(hsl, hsl.h - i as f64 * STEP));
        }
    }
    if palette.len() < count {
        palette.push(at_hue(hsl, hsl.h + (side_count + 1) as f64 * STEP));
    }
    palette.truncate(count);
    palette
}

/// Seed hue and saturation with lightness spread over 20%..80%.
/// The seed itself is not part of the output.
pub fn monochromatic_palette(seed: Rgb, count: usize) -> Vec<Rgb> {
    let hsl = seed.to_hsl();
    if count == 1 {
        return vec![hsl_to_rgb(hsl.h, hsl.s, hsl.l)];
    }
    (0..count)
        .map(|i| {
            let lightness = 20.0 + (i as f64 * 60.0) / (count - 1) as f64;
            hsl_to_rgb(hsl.h, hsl.s, lightness / 100.0)
        })
        .collect()
}

/// Seed, desaturated seed variants, the complement, then desaturated complement variants.
pub fn complementary_palette(seed: Rgb, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }
    let hsl = seed.to_hsl();
    let complement_hue = (hsl.h + 180.0) % 360.0;
    let fade = |i: usize| (1.0 - i as f64 * 0.2).max(0.0);

    let mut palette = vec![seed];
    let variations = count.saturating_sub(2);

    if variations > 0 {
        let per_side = variations / 2;
        for i in 1..=per_side {
            palette.push(hsl_to_rgb(hsl.h, hsl.s * fade(i), hsl.l));
        }
        palette.push(hsl_to_rgb(complement_hue, hsl.s, hsl.l));
        for i in 1..=(variations - per_side) {
            palette.push(hsl_to_rgb(complement_hue, hsl.s * fade(i), hsl.l));
        }
    } else {
        palette.push(hsl_to_rgb(complement_hue, hsl.s, hsl.l));
    }

    palette.truncate(count);
    palette
}

/// Seed, +120, +240; extra slots step by 30 degrees from the seed at 80% saturation.
pub fn triadic_palette(seed: Rgb, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }
    let hsl = seed.to_hsl();

    let mut palette = vec![seed, at_hue(hsl, hsl.h + 120.0)];
    if count >= 3 {
        palette.push(at_hue(hsl, hsl.h + 240.0));
    }
    for i in 0..count.saturating_sub(3) {
        let offset = (i as f64 * 30.0) % 360.0;
        palette.push(hsl_to_rgb((hsl.h + offset) % 360.0, hsl.s * 0.8, hsl.l));
    }

    palette.truncate(count);
    palette
}

/// Seed, +60, +180, +240; extra slots cycle those hues at 70% saturation and
/// 120% lightness. Lightness wraps modulo 1.0 rather than clamping.
pub fn tetradic_palette(seed: Rgb, count: usize) -> Vec<Rgb> {
    if count == 0 {
        return Vec::new();
    }
    let hsl = seed.to_hsl();
    let hues = [
        hsl.h,
        (hsl.h + 60.0) % 360.0,
        (hsl.h + 180.0) % 360.0,
        (hsl.h + 240.0) % 360.0,
    ];

    let mut palette = vec![seed];
    palette.extend(
        hues[1..]
            .iter()
            .take(count.min(4) - 1)
            .map(|&h| hsl_to_rgb(h, hsl.s, hsl.l)),
    );

    for i in 0..count.saturating_sub(4) {
        palette.push(hsl_to_rgb(hues[i % 4], hsl.s * 0.7, (hsl.l * 1.2) % 1.0));
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_utils::hex_to_rgb;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn hexes(palette: &[Rgb]) -> Vec<String> {
        palette.iter().map(|c| c.to_hex()).collect()
    }

    #[test]
    fn harmonious_red_is_rgb_triad() {
        assert_eq!(
            hexes(&harmonious_palette(hex_to_rgb("#FF0000"), 3)),
            vec!["#ff0000", "#00ff00", "#0000ff"]
        );
    }

    #[test]
    fn every_generator_honours_count() {
        let seed = Rgb::new(40, 120, 200);
        let mut rng = StdRng::seed_from_u64(1);
        for mode in GenerationMode::ALL {
            for count in 0..9 {
                let palette = generate_for_mode(mode, seed, count, &mut rng);
                assert_eq!(palette.len(), count, "{mode} with {count}");
            }
        }
    }

    #[test]
    fn analogous_alternates_right_then_left() {
        let palette = analogous_palette(RED, 5);
        let hues: Vec<f64> = palette.iter().map(|c| c.to_hsl().h.round()).collect();
        assert_eq!(hues[0], 0.0);
        assert!((hues[1] - 30.0).abs() <= 1.0);
        assert!((hues[2] - 330.0).abs() <= 1.0);
        assert!((hues[3] - 60.0).abs() <= 1.0);
        assert!((hues[4] - 300.0).abs() <= 1.0);
    }

    #[test]
    fn monochromatic_spreads_lightness() {
        let palette = monochromatic_palette(RED, 5);
        let first = palette[0].to_hsl();
        let last = palette[4].to_hsl();
        assert!((first.l - 0.2).abs() < 0.01);
        assert!((last.l - 0.8).abs() < 0.01);
        assert!(palette.windows(2).all(|w| w[0].to_hsl().l < w[1].to_hsl().l));
    }

    #[test]
    fn monochromatic_single_color_keeps_seed_lightness() {
        let seed = Rgb::new(10, 200, 90);
        assert_eq!(monochromatic_palette(seed, 1), vec![seed]);
    }

    #[test]
    fn complementary_layout_for_five() {
        let palette = complementary_palette(RED, 5);
        assert_eq!(palette[0], RED);
        assert_eq!(palette[2], Rgb::new(0, 255, 255));
        // base variant and complement variants are desaturated
        assert!((palette[1].to_hsl().s - 0.8).abs() < 0.01);
        assert!((palette[3].to_hsl().s - 0.8).abs() < 0.01);
        assert!((palette[4].to_hsl().s - 0.6).abs() < 0.01);
    }

    #[test]
    fn complementary_two_is_seed_and_complement() {
        assert_eq!(
            complementary_palette(RED, 2),
            vec![RED, Rgb::new(0, 255, 255)]
        );
    }

    #[test]
    fn complementary_large_count_does_not_go_negative() {
        let palette = complementary_palette(RED, 16);
        assert_eq!(palette.len(), 16);
        assert!(palette.iter().all(|c| c.to_hsl().s >= 0.0));
    }

    #[test]
    fn triadic_extras_start_at_seed_hue() {
        let palette = triadic_palette(RED, 5);
        assert_eq!(palette[..3], [RED, Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)]);
        let extra = palette[3].to_hsl();
        assert!(extra.h.abs() < 1.0);
        assert!((extra.s - 0.8).abs() < 0.01);
        assert!((palette[4].to_hsl().h - 30.0).abs() < 1.0);
    }

    #[test]
    fn tetradic_grows_incrementally() {
        let four = tetradic_palette(RED, 4);
        for n in 1..=4 {
            assert_eq!(tetradic_palette(RED, n), four[..n].to_vec());
        }
        assert_eq!(four[2], Rgb::new(0, 255, 255));
    }

    #[test]
    fn tetradic_extra_lightness_wraps() {
        // l = 0.9 -> 1.08 % 1.0 = 0.08, a very dark color rather than white
        let seed = hsl_to_rgb(0.0, 1.0, 0.9);
        let palette = tetradic_palette(seed, 5);
        let extra = palette[4].to_hsl();
        assert!(extra.l < 0.1, "lightness {} should wrap", extra.l);
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in GenerationMode::ALL {
            assert_eq!(mode.to_string().parse::<GenerationMode>(), Ok(mode));
        }
        assert!("sepia".parse::<GenerationMode>().is_err());
        assert_eq!(GenerationMode::Adaptive.next(), GenerationMode::Random);
    }
}
