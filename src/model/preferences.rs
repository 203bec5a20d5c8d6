// File: ./src/model/preferences.rs
// Learned color preferences and the update rule that shifts them
use crate::color_utils::{Rgb, distance};
use std::collections::BTreeMap;
use tracing::debug;

pub const HUE_BUCKETS: usize = 36;
pub const HUE_WEIGHT_MIN: f64 = 0.1;
pub const HUE_WEIGHT_MAX: f64 = 2.0;
pub const PREFERENCE_MIN: f64 = 0.1;
pub const PREFERENCE_MAX: f64 = 0.9;
/// Two colors closer than this (RGB Euclidean) count as the same color.
pub const SIMILARITY_THRESHOLD: f64 = 30.0;

const HUE_STEP: f64 = 0.1;
const EMA_WEIGHT: f64 = 0.1;
const CONFIDENCE_SAMPLES: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Liked,
    Disliked,
}

impl Sentiment {
    pub fn value(self) -> f64 {
        match self {
            Sentiment::Liked => 1.0,
            Sentiment::Disliked => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBias {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for ColorBias {
    fn default() -> Self {
        Self {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        }
    }
}

impl ColorBias {
    pub fn clamped(self) -> Self {
        Self {
            r: clamp_preference(self.r),
            g: clamp_preference(self.g),
            b: clamp_preference(self.b),
        }
    }
}

pub(crate) fn clamp_preference(v: f64) -> f64 {
    v.clamp(PREFERENCE_MIN, PREFERENCE_MAX)
}

pub(crate) fn clamp_hue_weight(v: f64) -> f64 {
    v.clamp(HUE_WEIGHT_MIN, HUE_WEIGHT_MAX)
}

/// `pref * 0.9 + 0.1 * sentiment * value`, clamped. The sentiment multiplies
/// the raw value, so a dislike drags the preference towards zero.
fn signed_ema(pref: f64, sentiment: f64, value: f64) -> f64 {
    clamp_preference((1.0 - EMA_WEIGHT) * pref + EMA_WEIGHT * sentiment * value)
}

/// Hue bucket (10 degrees wide) for a hue in degrees.
pub fn hue_bucket(hue: f64) -> usize {
    ((hue / 10.0).floor() as usize) % HUE_BUCKETS
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceModel {
    pub(crate) liked_colors: Vec<Rgb>,
    pub(crate) disliked_colors: Vec<Rgb>,
    pub(crate) color_frequency: BTreeMap<String, u32>,
    pub(crate) hue_preferences: [f64; HUE_BUCKETS],
    pub(crate) saturation_preference: f64,
    pub(crate) lightness_preference: f64,
    pub(crate) color_bias: ColorBias,
}

impl Default for PreferenceModel {
    fn default() -> Self {
        Self {
            liked_colors: Vec::new(),
            disliked_colors: Vec::new(),
            color_frequency: BTreeMap::new(),
            hue_preferences: [1.0; HUE_BUCKETS],
            saturation_preference: 0.5,
            lightness_preference: 0.5,
            color_bias: ColorBias::default(),
        }
    }
}

impl PreferenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learn_from_palette(&mut self, palette: &[Rgb], sentiment: Sentiment) {
        let sign = sentiment.value();

        for &color in palette {
            let hsl = color.to_hsl();

            let bucket = hue_bucket(hsl.h);
            self.hue_preferences[bucket] =
                clamp_hue_weight(self.hue_preferences[bucket] + sign * HUE_STEP);

            self.saturation_preference = signed_ema(self.saturation_preference, sign, hsl.s);
            self.lightness_preference = signed_ema(self.lightness_preference, sign, hsl.l);

            let (r, g, b) = color.normalized();
            self.color_bias = ColorBias {
                r: signed_ema(self.color_bias.r, sign, r),
                g: signed_ema(self.color_bias.g, sign, g),
                b: signed_ema(self.color_bias.b, sign, b),
            };

            let set = match sentiment {
                Sentiment::Liked => &mut self.liked_colors,
                Sentiment::Disliked => &mut self.disliked_colors,
            };
            if !set.contains(&color) {
                set.push(color);
            }

            *self
                .color_frequency
                .entry(color.frequency_key())
                .or_insert(0) += 1;
        }

        debug!(
            "Learned {:?} from {} colors (liked {}, disliked {})",
            sentiment,
            palette.len(),
            self.liked_colors.len(),
            self.disliked_colors.len()
        );
    }

    pub fn set_color_bias(&mut self, bias: ColorBias) {
        self.color_bias = bias.clamped();
    }

    pub fn set_saturation_preference(&mut self, value: f64) {
        self.saturation_preference = clamp_preference(value);
    }

    pub fn set_lightness_preference(&mut self, value: f64) {
        self.lightness_preference = clamp_preference(value);
    }

    /// Neutral weights and scalars; liked/disliked history is kept.
    pub fn reset_preferences(&mut self) {
        let defaults = Self::default();
        self.hue_preferences = defaults.hue_preferences;
        self.saturation_preference = defaults.saturation_preference;
        self.lightness_preference = defaults.lightness_preference;
        self.color_bias = defaults.color_bias;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when `color` lies within the similarity threshold of a disliked color.
    pub fn is_disliked(&self, color: Rgb) -> bool {
        is_too_similar(color, &self.disliked_colors, SIMILARITY_THRESHOLD)
    }

    pub fn liked_colors(&self) -> &[Rgb] {
        &self.liked_colors
    }

    pub fn disliked_colors(&self) -> &[Rgb] {
        &self.disliked_colors
    }

    pub fn color_frequency(&self) -> &BTreeMap<String, u32> {
        &self.color_frequency
    }

    pub fn frequency_of(&self, color: Rgb) -> u32 {
        self.color_frequency
            .get(&color.frequency_key())
            .copied()
            .unwrap_or(0)
    }

    pub fn hue_preferences(&self) -> &[f64; HUE_BUCKETS] {
        &self.hue_preferences
    }

    pub fn saturation_preference(&self) -> f64 {
        self.saturation_preference
    }

    pub fn lightness_preference(&self) -> f64 {
        self.lightness_preference
    }

    pub fn color_bias(&self) -> ColorBias {
        self.color_bias
    }

    pub fn total_samples(&self) -> usize {
        self.liked_colors.len() + self.disliked_colors.len()
    }

    pub fn liked_colors_count(&self) -> usize {
        self.liked_colors.len()
    }

    pub fn disliked_colors_count(&self) -> usize {
        self.disliked_colors.len()
    }

    /// Sample coverage (saturating at 50) scaled by how far the hue weights
    /// have moved away from neutral. In [0, 1].
    pub fn confidence_score(&self) -> f64 {
        let total = self.total_samples();
        if total == 0 {
            return 0.0;
        }
        let sample_confidence = (total as f64 / CONFIDENCE_SAMPLES).min(1.0);
        let strength = self
            .hue_preferences
            .iter()
            .map(|w| (w - 1.0).abs())
            .sum::<f64>()
            / HUE_BUCKETS as f64;

        (sample_confidence * (0.5 + 0.5 * strength)).min(1.0)
    }
}

/// True when `color` is closer than `threshold` to any color in `others`.
pub fn is_too_similar(color: Rgb, others: &[Rgb], threshold: f64) -> bool {
    others.iter().any(|&o| distance(color, o) < threshold)
}
