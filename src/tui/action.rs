use crate::color_utils::Rgb;
use crate::engine::EngineStats;
use crate::harmony::GenerationMode;
use crate::history::History;
use crate::model::{ColorFormat, Palette, Preset};

#[derive(Debug)]
pub enum Action {
    Generate(GenerationMode, f64),
    Like,
    Dislike,
    ApplyPreset(Preset),
    Train,
    ResetAi,
    SelectHistory(usize),
    Import(String),
    EditColor(usize, Rgb),
    SetColorFormat(ColorFormat),
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    SessionLoaded(Palette, History, ColorFormat),
    PaletteChanged(Palette, History),
    Stats(EngineStats),
    TrainingProgress(usize),
    Error(String),
    Status(String),
}
