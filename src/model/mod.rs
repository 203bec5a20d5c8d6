// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod export;
pub mod parser;
pub mod preferences;
pub mod preset;
pub mod snapshot;

pub use export::{ColorFormat, ExportFormat};
pub use parser::ImportError;
pub use preferences::{ColorBias, PreferenceModel, Sentiment};
pub use preset::Preset;
pub use snapshot::Snapshot;

use crate::color_utils::Rgb;

/// Number of colors the application works with.
pub const PALETTE_SIZE: usize = 5;

pub type Palette = Vec<Rgb>;
