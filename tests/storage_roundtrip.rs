use hueloom::color_utils::Rgb;
use hueloom::config::Config;
use hueloom::engine::LearningEngine;
use hueloom::harmony::GenerationMode;
use hueloom::model::{ColorFormat, Preset, Sentiment};
use hueloom::storage::{LocalStorage, Session};
use hueloom::studio::Studio;
use std::fs;

const RED: Rgb = Rgb::new(255, 0, 0);

#[test]
fn test_learning_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path());

    // 1. Learn a palette with a repeated color
    let mut engine = LearningEngine::with_seed(1);
    engine.learn_from_palette(&[RED, RED], Sentiment::Liked);
    storage.save_learning(&engine).unwrap();

    // 2. A fresh engine picks it all back up
    let mut restored = LearningEngine::with_seed(2);
    storage.load_learning(&mut restored).unwrap();

    assert_eq!(restored.liked_colors_count(), 1);
    assert_eq!(restored.model().frequency_of(RED), 2);
    assert_eq!(
        restored.model().hue_preferences(),
        engine.model().hue_preferences()
    );

    // 3. No temp file is left behind by the atomic write
    assert!(!dir.path().join("learning.tmp").exists());
}

#[test]
fn test_missing_learning_file_keeps_engine() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().join("nested"));

    let mut engine = LearningEngine::with_seed(1);
    engine.learn_from_palette(&[RED], Sentiment::Disliked);
    storage.load_learning(&mut engine).unwrap();

    assert_eq!(engine.disliked_colors_count(), 1);
}

#[test]
fn test_corrupt_learning_file_resets_engine() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("learning.json"), "{ not json").unwrap();
    let storage = LocalStorage::new(dir.path());

    let mut engine = LearningEngine::with_seed(1);
    engine.learn_from_palette(&[RED], Sentiment::Liked);
    storage.load_learning(&mut engine).unwrap();

    assert_eq!(engine.total_samples(), 0);
    assert_eq!(engine.confidence_score(), 0.0);
}

#[test]
fn test_partial_learning_file_keeps_valid_fields() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("learning.json"),
        r##"{"likedColors": ["#ff0000", "bogus"], "saturationPreference": 0.95}"##,
    )
    .unwrap();
    let storage = LocalStorage::new(dir.path());

    let mut engine = LearningEngine::with_seed(1);
    storage.load_learning(&mut engine).unwrap();

    assert_eq!(engine.model().liked_colors(), &[RED]);
    assert_eq!(engine.model().saturation_preference(), 0.9);
    assert_eq!(engine.model().lightness_preference(), 0.5);
}

#[test]
fn test_session_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path());

    let mut session = Session {
        current_palette: vec![RED; 5],
        color_format: ColorFormat::Hsl,
        ..Session::default()
    };
    session.history.push(&[Rgb::BLACK; 5]);
    storage.save_session(&session).unwrap();

    assert_eq!(storage.load_session().unwrap(), session);
}

#[test]
fn test_corrupt_session_gives_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("session.json"), "[1, 2").unwrap();
    let storage = LocalStorage::new(dir.path());

    assert_eq!(storage.load_session().unwrap(), Session::default());
}

#[test]
fn test_studio_reopens_where_it_left_off() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        seed: Some(9),
        preset: Some(Preset::Warm),
        ..Config::default()
    };

    // 1. First run: a fresh palette, one like, one generation
    let mut studio = Studio::open(&config, LocalStorage::new(dir.path())).unwrap();
    assert_eq!(studio.palette().len(), 5);
    studio.rate(Sentiment::Liked);
    studio.generate(GenerationMode::Triadic, 0.5);
    studio.set_color_format(ColorFormat::Rgb);
    studio.save().unwrap();

    let palette = studio.palette().to_vec();
    let liked = studio.stats().liked_colors;

    // 2. Second run restores palette, history and learning
    let reopened = Studio::open(&config, LocalStorage::new(dir.path())).unwrap();
    assert_eq!(reopened.palette(), &palette[..]);
    assert_eq!(reopened.history().len(), 1);
    assert_eq!(reopened.color_format(), ColorFormat::Rgb);
    assert_eq!(reopened.stats().liked_colors, liked);
}
