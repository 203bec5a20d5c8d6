// File: ./src/engine.rs
// Preference-driven palette generation
use crate::color_utils::{Rgb, hsl_to_rgb, random_color};
use crate::model::preferences::{
    PREFERENCE_MAX, PREFERENCE_MIN, PreferenceModel, SIMILARITY_THRESHOLD, Sentiment,
    is_too_similar,
};
use crate::model::{ColorBias, Palette, Preset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Upper bound on re-draws when a candidate lands next to a disliked color.
pub const MAX_DISLIKE_RETRIES: usize = 10;
/// Chance that a slot after the first is derived from an existing color.
const HARMONY_PROBABILITY: f64 = 0.7;
const TRAINING_ROUNDS: usize = 10;

/// How a color ended up in an adaptive palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// First slot, always from the preference model.
    Seed,
    /// Hue-shifted from an earlier color and far enough from all of them.
    Harmony,
    /// Drawn from the preference model, either directly or after a harmony
    /// candidate was rejected as too similar.
    Preferred,
}

/// Read-only summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineStats {
    pub total_samples: usize,
    pub liked_colors: usize,
    pub disliked_colors: usize,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedColor {
    pub color: Rgb,
    pub placement: Placement,
}

/// Owns one preference model and the randomness used to sample from it.
pub struct LearningEngine {
    model: PreferenceModel,
    rng: StdRng,
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningEngine {
    pub fn new() -> Self {
        Self::with_model(PreferenceModel::default(), StdRng::from_entropy())
    }

    /// Deterministic engine for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_model(PreferenceModel::default(), StdRng::seed_from_u64(seed))
    }

    pub fn with_model(model: PreferenceModel, rng: StdRng) -> Self {
        Self { model, rng }
    }

    pub fn model(&self) -> &PreferenceModel {
        &self.model
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn learn_from_palette(&mut self, palette: &[Rgb], sentiment: Sentiment) {
        self.model.learn_from_palette(palette, sentiment);
    }

    pub fn set_color_bias(&mut self, bias: ColorBias) {
        self.model.set_color_bias(bias);
    }

    pub fn set_saturation_preference(&mut self, value: f64) {
        self.model.set_saturation_preference(value);
    }

    pub fn set_lightness_preference(&mut self, value: f64) {
        self.model.set_lightness_preference(value);
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        preset.apply(&mut self.model);
        info!("Applied preference preset '{}'", preset);
    }

    pub fn reset_preferences(&mut self) {
        self.model.reset_preferences();
    }

    pub fn reset(&mut self) {
        self.model.reset();
        info!("Learning engine reset");
    }

    pub fn save_to_json(&self) -> Result<String, serde_json::Error> {
        self.model.save_to_json()
    }

    /// Replaces the model from snapshot JSON. Unparsable input resets the
    /// engine instead of failing.
    pub fn load_from_json(&mut self, json: &str) {
        match PreferenceModel::from_json(json) {
            Ok(model) => self.model = model,
            Err(e) => {
                warn!("Error loading learning data: {}. Resetting.", e);
                self.reset();
            }
        }
    }

    pub fn total_samples(&self) -> usize {
        self.model.total_samples()
    }

    pub fn liked_colors_count(&self) -> usize {
        self.model.liked_colors_count()
    }

    pub fn disliked_colors_count(&self) -> usize {
        self.model.disliked_colors_count()
    }

    pub fn confidence_score(&self) -> f64 {
        self.model.confidence_score()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            total_samples: self.total_samples(),
            liked_colors: self.liked_colors_count(),
            disliked_colors: self.disliked_colors_count(),
            confidence: self.confidence_score(),
        }
    }

    /// `count` colors shaped by the learned preferences. `creativity` in
    /// [0, 1] trades reuse of liked colors (0) for exploration (1).
    pub fn generate_palette(&mut self, count: usize, creativity: f64) -> Palette {
        self.generate_palette_traced(count, creativity)
            .into_iter()
            .map(|p| p.color)
            .collect()
    }

    pub fn generate_palette_traced(&mut self, count: usize, creativity: f64) -> Vec<PlacedColor> {
        let creativity = creativity.clamp(0.0, 1.0);
        let mut placed: Vec<PlacedColor> = Vec::with_capacity(count);
        if count == 0 {
            return placed;
        }

        placed.push(PlacedColor {
            color: self.generate_preferred_color(creativity),
            placement: Placement::Seed,
        });

        let mut palette: Vec<Rgb> = vec![placed[0].color];
        for _ in 1..count {
            let next = if self.rng.gen_bool(HARMONY_PROBABILITY) {
                let base = palette[self.rng.gen_range(0..palette.len())];
                let candidate = self.harmony_shift(base);
                if is_too_similar(candidate, &palette, SIMILARITY_THRESHOLD) {
                    PlacedColor {
                        color: self.generate_preferred_color(creativity),
                        placement: Placement::Preferred,
                    }
                } else {
                    PlacedColor {
                        color: candidate,
                        placement: Placement::Harmony,
                    }
                }
            } else {
                PlacedColor {
                    color: self.generate_preferred_color(creativity),
                    placement: Placement::Preferred,
                }
            };
            palette.push(next.color);
            placed.push(next);
        }

        debug!(
            "Generated adaptive palette of {} (creativity {:.2})",
            count, creativity
        );
        placed
    }

    /// Rotates the hue by a randomly chosen color-theory offset and jitters
    /// saturation and lightness by 0.8..1.2.
    fn harmony_shift(&mut self, base: Rgb) -> Rgb {
        let hsl = base.to_hsl();
        let jitter = self.rng.gen_range(-10.0_f64..10.0);
        let harmony: f64 = self.rng.gen_range(0.0_f64..1.0);

        let shift = if harmony < 0.3 {
            // analogous
            self.rng.gen_range(-20.0_f64..20.0)
        } else if harmony < 0.6 {
            // complementary
            180.0 + jitter
        } else if harmony < 0.8 {
            // triadic
            120.0 * f64::from(self.rng.gen_range(1u8..=2)) + jitter
        } else {
            // split complementary
            let side = if self.rng.gen_bool(0.5) { 30.0 } else { -30.0 };
            180.0 + side + jitter
        };

        let hue = (hsl.h + shift).rem_euclid(360.0);
        let saturation =
            (hsl.s * self.rng.gen_range(0.8_f64..1.2)).clamp(PREFERENCE_MIN, PREFERENCE_MAX);
        let lightness =
            (hsl.l * self.rng.gen_range(0.8_f64..1.2)).clamp(PREFERENCE_MIN, PREFERENCE_MAX);

        hsl_to_rgb(hue, saturation, lightness)
    }

    /// One color sampled from the preference model. Candidates near a
    /// disliked color are re-drawn with more creativity, at most
    /// `MAX_DISLIKE_RETRIES` times; after that the last candidate is kept.
    pub fn generate_preferred_color(&mut self, creativity: f64) -> Rgb {
        let mut creativity = creativity.clamp(0.0, 1.0);
        let mut candidate = self.preferred_candidate(creativity);

        for _ in 0..MAX_DISLIKE_RETRIES {
            if !self.model.is_disliked(candidate) {
                return candidate;
            }
            creativity = (creativity + 0.2).min(1.0);
            candidate = self.preferred_candidate(creativity);
        }

        if self.model.is_disliked(candidate) {
            warn!(
                "Gave up avoiding disliked colors after {} retries; using {}",
                MAX_DISLIKE_RETRIES, candidate
            );
        }
        candidate
    }

    fn preferred_candidate(&mut self, creativity: f64) -> Rgb {
        let liked = self.model.liked_colors();
        if !liked.is_empty() && self.rng.gen_range(0.0_f64..1.0) > creativity {
            return liked[self.rng.gen_range(0..liked.len())];
        }

        let bucket = self.sample_hue_bucket();
        let mut hue = bucket as f64 * 10.0 + self.rng.gen_range(0.0_f64..10.0);
        hue += creativity * self.rng.gen_range(-30.0_f64..30.0);
        let hue = hue.rem_euclid(360.0);

        let saturation = self.blend_with_random(self.model.saturation_preference(), creativity);
        let lightness = self.blend_with_random(self.model.lightness_preference(), creativity);

        let mut color = hsl_to_rgb(hue, saturation, lightness);

        if creativity < 0.7 {
            let strength = 0.3 * (1.0 - creativity);
            let bias = self.model.color_bias();
            let pull = |channel: u8, target: f64| {
                (channel as f64 * (1.0 - strength) + 255.0 * target * strength)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            color = Rgb::new(
                pull(color.r, bias.r),
                pull(color.g, bias.g),
                pull(color.b, bias.b),
            );
        }
        color
    }

    /// Learned value weighted by `1 - 0.5 * creativity`, plus a random
    /// term that grows with creativity.
    fn blend_with_random(&mut self, preference: f64, creativity: f64) -> f64 {
        let noise = self.rng.gen_range(0.0_f64..1.0) * creativity * 0.8;
        (preference * (1.0 - creativity * 0.5) + noise).clamp(PREFERENCE_MIN, PREFERENCE_MAX)
    }

    /// Roulette-wheel pick over the hue weights; ties go to the lower bucket.
    fn sample_hue_bucket(&mut self) -> usize {
        let weights = self.model.hue_preferences();
        let total: f64 = weights.iter().sum();
        let mut remaining = self.rng.gen_range(0.0_f64..1.0) * total;

        for (i, w) in weights.iter().enumerate() {
            remaining -= w;
            if remaining <= 0.0 {
                return i;
            }
        }
        0
    }

    /// Feeds random palettes with coin-flip sentiment through the learner.
    /// `on_step` receives progress in percent after each round.
    pub fn train<F>(&mut self, palette_size: usize, mut on_step: F)
    where
        F: FnMut(usize),
    {
        for round in 0..TRAINING_ROUNDS {
            let palette: Palette = (0..palette_size)
                .map(|_| random_color(&mut self.rng))
                .collect();
            let sentiment = if self.rng.gen_bool(0.5) {
                Sentiment::Liked
            } else {
                Sentiment::Disliked
            };
            self.model.learn_from_palette(&palette, sentiment);
            on_step((round + 1) * 100 / TRAINING_ROUNDS);
        }
        info!(
            "Training finished: {} samples, confidence {:.2}",
            self.total_samples(),
            self.confidence_score()
        );
    }
}
