// File: ./src/studio.rs
// Front-end agnostic session: current palette, history and the learning engine
use crate::color_utils::{Rgb, random_color};
use crate::config::Config;
use crate::engine::{EngineStats, LearningEngine};
use crate::harmony::{GenerationMode, generate_for_mode};
use crate::history::History;
use crate::model::parser::{detect_mode, import_colors};
use crate::model::{ColorFormat, ImportError, Palette, Preset, Sentiment};
use crate::storage::{LocalStorage, Session};
use anyhow::Result;
use tracing::{info, warn};

pub struct Studio {
    engine: LearningEngine,
    session: Session,
    storage: Option<LocalStorage>,
    palette_size: usize,
}

impl Studio {
    pub fn new(engine: LearningEngine, palette_size: usize) -> Self {
        Self {
            engine,
            session: Session::default(),
            storage: None,
            palette_size: palette_size.max(1),
        }
    }

    /// Builds a studio from config and restores whatever `storage` holds.
    /// An empty session gets a fresh random palette.
    pub fn open(config: &Config, storage: LocalStorage) -> Result<Self> {
        let engine = match config.seed {
            Some(seed) => LearningEngine::with_seed(seed),
            None => LearningEngine::new(),
        };
        let mut studio = Self::new(engine, config.palette_size);

        storage.load_learning(&mut studio.engine)?;
        studio.session = storage.load_session()?;
        studio.storage = Some(storage);

        if let Some(preset) = config.preset {
            studio.engine.apply_preset(preset);
        }
        if studio.session.current_palette.is_empty() {
            studio.session.current_palette = generate_for_mode(
                GenerationMode::Random,
                Rgb::BLACK,
                studio.palette_size,
                studio.engine.rng(),
            );
        }
        info!(
            "Studio opened with {} learned samples",
            studio.engine.total_samples()
        );
        Ok(studio)
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.session.current_palette
    }

    pub fn history(&self) -> &History {
        &self.session.history
    }

    pub fn color_format(&self) -> ColorFormat {
        self.session.color_format
    }

    pub fn stats(&self) -> EngineStats {
        self.engine.stats()
    }

    /// Replaces the current palette, pushing the old one onto the history.
    fn replace_palette(&mut self, palette: Palette) {
        let previous = std::mem::replace(&mut self.session.current_palette, palette);
        self.session.history.push(&previous);
    }

    pub fn generate(&mut self, mode: GenerationMode, creativity: f64) -> &[Rgb] {
        let palette = if mode == GenerationMode::Adaptive {
            self.engine.generate_palette(self.palette_size, creativity)
        } else {
            let seed = match self.session.current_palette.first() {
                Some(&c) => c,
                None => random_color(self.engine.rng()),
            };
            generate_for_mode(mode, seed, self.palette_size, self.engine.rng())
        };
        self.replace_palette(palette);
        &self.session.current_palette
    }

    /// Feeds the current palette to the learner. No-op on an empty palette.
    pub fn rate(&mut self, sentiment: Sentiment) -> bool {
        if self.session.current_palette.is_empty() {
            return false;
        }
        self.engine
            .learn_from_palette(&self.session.current_palette, sentiment);
        true
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        self.engine.apply_preset(preset);
    }

    pub fn train<F: FnMut(usize)>(&mut self, on_step: F) {
        self.engine.train(self.palette_size, on_step);
    }

    pub fn reset_ai(&mut self) {
        self.engine.reset();
    }

    pub fn select_history(&mut self, index: usize) -> Option<&[Rgb]> {
        let current = self.session.current_palette.clone();
        let selected = self.session.history.select(index, &current)?;
        self.session.current_palette = selected;
        Some(&self.session.current_palette)
    }

    /// Imports colors from pasted text, detecting hex-list vs CSS input.
    pub fn import(&mut self, text: &str) -> Result<usize, ImportError> {
        let palette = import_colors(text, detect_mode(text))?;
        let count = palette.len();
        self.replace_palette(palette);
        Ok(count)
    }

    pub fn edit_color(&mut self, index: usize, color: Rgb) -> bool {
        match self.session.current_palette.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    pub fn set_color_format(&mut self, format: ColorFormat) {
        self.session.color_format = format;
    }

    /// Writes learning data and session to storage, if any is attached.
    pub fn save(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            storage.save_learning(&self.engine)?;
            storage.save_session(&self.session)?;
        }
        Ok(())
    }

    /// Like `save`, but only logs failures.
    pub fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Error saving data: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_LIMIT;

    fn studio() -> Studio {
        Studio::new(LearningEngine::with_seed(4), 5)
    }

    #[test]
    fn generation_pushes_history() {
        let mut studio = studio();
        studio.generate(GenerationMode::Random, 0.5);
        assert!(studio.history().is_empty());

        for _ in 0..7 {
            studio.generate(GenerationMode::Adaptive, 0.5);
        }
        assert_eq!(studio.history().len(), HISTORY_LIMIT);
        assert_eq!(studio.palette().len(), 5);
    }

    #[test]
    fn seeded_modes_use_first_color() {
        let mut studio = studio();
        studio.import("#ff0000").unwrap();
        let palette = studio.generate(GenerationMode::Complementary, 0.5).to_vec();
        assert_eq!(palette[0], Rgb::new(255, 0, 0));
        assert_eq!(palette[2], Rgb::new(0, 255, 255));
    }

    #[test]
    fn rating_requires_a_palette() {
        let mut studio = studio();
        assert!(!studio.rate(Sentiment::Liked));
        studio.generate(GenerationMode::Random, 0.5);
        assert!(studio.rate(Sentiment::Liked));
        assert!(studio.stats().liked_colors > 0);
    }

    #[test]
    fn history_selection_round_trip() {
        let mut studio = studio();
        studio.import("#111111").unwrap();
        studio.import("#222222").unwrap();

        let picked = studio.select_history(0).unwrap().to_vec();
        assert_eq!(picked[0], Rgb::new(0x11, 0x11, 0x11));
        assert_eq!(
            studio.history().entries()[0].colors[0],
            Rgb::new(0x22, 0x22, 0x22)
        );
        assert!(studio.select_history(9).is_none());
    }

    #[test]
    fn editing_out_of_range_is_rejected() {
        let mut studio = studio();
        studio.generate(GenerationMode::Random, 0.5);
        assert!(studio.edit_color(4, Rgb::BLACK));
        assert_eq!(studio.palette()[4], Rgb::BLACK);
        assert!(!studio.edit_color(5, Rgb::BLACK));
    }

    #[test]
    fn import_failure_leaves_palette_alone() {
        let mut studio = studio();
        studio.generate(GenerationMode::Random, 0.5);
        let before = studio.palette().to_vec();
        assert_eq!(studio.import("nope"), Err(ImportError::NoColors));
        assert_eq!(studio.palette(), &before[..]);
    }
}
