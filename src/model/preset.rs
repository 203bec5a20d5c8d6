// File: ./src/model/preset.rs
// Named shortcuts that push the preference model in one direction
use crate::model::preferences::{ColorBias, PreferenceModel};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Balanced,
    Warm,
    Cool,
    Vibrant,
    Pastel,
    Dark,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Self::Balanced,
        Self::Warm,
        Self::Cool,
        Self::Vibrant,
        Self::Pastel,
        Self::Dark,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Only the named knobs move; everything else is left as learned,
    /// except `Balanced` which resets all preferences to neutral.
    pub fn apply(self, model: &mut PreferenceModel) {
        match self {
            Preset::Warm => model.set_color_bias(ColorBias {
                r: 0.7,
                g: 0.5,
                b: 0.3,
            }),
            Preset::Cool => model.set_color_bias(ColorBias {
                r: 0.3,
                g: 0.5,
                b: 0.7,
            }),
            Preset::Vibrant => model.set_saturation_preference(0.8),
            Preset::Pastel => {
                model.set_saturation_preference(0.3);
                model.set_lightness_preference(0.8);
            }
            Preset::Dark => model.set_lightness_preference(0.2),
            Preset::Balanced => model.reset_preferences(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Preset::Balanced => "balanced",
            Preset::Warm => "warm",
            Preset::Cool => "cool",
            Preset::Vibrant => "vibrant",
            Preset::Pastel => "pastel",
            Preset::Dark => "dark",
        };
        f.write_str(name)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown preset: {}", s))
    }
}
