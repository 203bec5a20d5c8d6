// File: ./src/model/snapshot.rs
// JSON snapshot of a PreferenceModel
use crate::color_utils::{Rgb, parse_hex};
use crate::model::preferences::{
    ColorBias, HUE_BUCKETS, PreferenceModel, clamp_hue_weight, clamp_preference,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BiasSnapshot {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub liked_colors: Vec<String>,
    pub disliked_colors: Vec<String>,
    pub color_frequency: BTreeMap<String, u32>,
    pub hue_preferences: Vec<f64>,
    pub saturation_preference: f64,
    pub lightness_preference: f64,
    pub color_bias: BiasSnapshot,
}

impl From<&PreferenceModel> for Snapshot {
    fn from(model: &PreferenceModel) -> Self {
        Self {
            liked_colors: model.liked_colors.iter().map(|c| c.to_hex()).collect(),
            disliked_colors: model.disliked_colors.iter().map(|c| c.to_hex()).collect(),
            color_frequency: model.color_frequency.clone(),
            hue_preferences: model.hue_preferences.to_vec(),
            saturation_preference: model.saturation_preference,
            lightness_preference: model.lightness_preference,
            color_bias: BiasSnapshot {
                r: model.color_bias.r,
                g: model.color_bias.g,
                b: model.color_bias.b,
            },
        }
    }
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, key: &str) -> Option<T> {
    obj.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Non-zero scalar, clamped. Zero counts as missing.
fn scalar(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    field::<f64>(obj, key)
        .filter(|v| *v != 0.0 && v.is_finite())
        .map(clamp_preference)
}

fn colors(obj: &Map<String, Value>, key: &str) -> Vec<Rgb> {
    let mut out: Vec<Rgb> = Vec::new();
    for raw in field::<Vec<String>>(obj, key).unwrap_or_default() {
        if let Ok(color) = parse_hex(&raw)
            && !out.contains(&color)
        {
            out.push(color);
        }
    }
    out
}

impl PreferenceModel {
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    pub fn save_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_snapshot())
    }

    /// Rebuilds a model from snapshot JSON. Each field that is missing or
    /// malformed falls back to its default on its own; only JSON that is not
    /// an object at all is rejected.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(obj) = value else {
            return Err(serde::de::Error::custom("learning snapshot is not an object"));
        };

        let defaults = Self::default();

        let hue_preferences = field::<Vec<f64>>(&obj, "huePreferences")
            .filter(|v| v.len() == HUE_BUCKETS && v.iter().all(|w| w.is_finite()))
            .and_then(|v| <[f64; HUE_BUCKETS]>::try_from(v).ok())
            .map(|arr| arr.map(clamp_hue_weight))
            .unwrap_or(defaults.hue_preferences);

        let color_bias = field::<BiasSnapshot>(&obj, "colorBias")
            .map(|b| {
                ColorBias {
                    r: b.r,
                    g: b.g,
                    b: b.b,
                }
                .clamped()
            })
            .unwrap_or(defaults.color_bias);

        Ok(Self {
            liked_colors: colors(&obj, "likedColors"),
            disliked_colors: colors(&obj, "dislikedColors"),
            color_frequency: field(&obj, "colorFrequency").unwrap_or_default(),
            hue_preferences,
            saturation_preference: scalar(&obj, "saturationPreference")
                .unwrap_or(defaults.saturation_preference),
            lightness_preference: scalar(&obj, "lightnessPreference")
                .unwrap_or(defaults.lightness_preference),
            color_bias,
        })
    }
}
