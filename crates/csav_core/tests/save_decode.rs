use std::fs;
use std::path::PathBuf;

use csav_core::ability::Ability;
use csav_core::save::{LEVEL_COUNT, MAGIC, MIN_SAVE_LEN, SaveRecord};
use csav_core::stats::Statistics;
use csav_core::{CoreError, CoreErrorCode};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = workspace_root().join("tests/fixtures").join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e))
}

#[test]
fn example_fixture_decodes_raw_fields() {
    let record = SaveRecord::decode(&fixture_bytes("example.bin")).expect("example decodes");

    assert_eq!(record.magic, 1);
    assert!(!record.has_expected_magic());
    assert_eq!(record.completed_levels, 2);
    assert_eq!(record.unlocked_abilities, 0b101);
    assert_eq!(record.completion_ticks[0], 500);
    assert_eq!(record.completion_ticks[1], 1500);
    assert!(record.completion_ticks[2..].iter().all(|&t| t == 0));
    assert_eq!(record.speedrun_ticks, 2000);
    assert_eq!(
        record.abilities(),
        vec![Ability::NoAbility, Ability::Glider]
    );
}

#[test]
fn example_fixture_statistics() {
    let record = SaveRecord::decode(&fixture_bytes("example.bin")).expect("example decodes");
    let stats = Statistics::compute(&record);

    assert_eq!(stats.speedrun_seconds, 20.0);
    let seconds: Vec<(usize, f64)> = stats.levels.iter().map(|l| (l.number(), l.seconds)).collect();
    assert_eq!(seconds, vec![(1, 5.0), (2, 15.0)]);

    let shortest = stats.shortest.expect("shortest present");
    assert_eq!((shortest.number(), shortest.seconds), (1, 5.0));
    let longest = stats.longest.expect("longest present");
    assert_eq!((longest.number(), longest.seconds), (2, 15.0));
}

#[test]
fn progress_fixture_has_csav_tag_and_trailing_bytes() {
    let bytes = fixture_bytes("progress.bin");
    assert!(bytes.len() > MIN_SAVE_LEN);

    let record = SaveRecord::decode(&bytes).expect("progress decodes");
    assert_eq!(record.magic, MAGIC);
    assert!(record.has_expected_magic());
    assert_eq!(
        record.abilities(),
        vec![
            Ability::DoubleJump,
            Ability::Glider,
            Ability::Dash,
            Ability::WallJump
        ]
    );

    let stats = Statistics::compute(&record);
    assert_eq!(stats.completed_slot_count(), 5);
    // Levels 3 and 4 share the best time; the earlier one wins.
    assert_eq!(stats.shortest.map(|l| l.number()), Some(3));
    assert_eq!(stats.longest.map(|l| l.number()), Some(5));
    assert_eq!(stats.longest.map(|l| l.seconds), Some(600.0));
}

#[test]
fn fresh_save_has_no_extremes() {
    let record = SaveRecord::decode(&fixture_bytes("fresh.bin")).expect("fresh decodes");
    let stats = Statistics::compute(&record);

    assert_eq!(stats.speedrun_seconds, 0.0);
    assert!(stats.levels.is_empty());
    assert!(stats.shortest.is_none());
    assert!(stats.longest.is_none());
}

#[test]
fn every_prefix_shorter_than_minimum_is_truncated() {
    let bytes = fixture_bytes("example.bin");
    for len in [0, 1, 11, 12, 100, 523, 524, 527] {
        let err = SaveRecord::decode(&bytes[..len]).expect_err("prefix should be rejected");
        assert_eq!(err.code(), CoreErrorCode::Truncated);
        match err {
            CoreError::Truncated { expected, actual } => {
                assert_eq!(expected, MIN_SAVE_LEN);
                assert_eq!(actual, len);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn truncated_message_names_both_lengths() {
    let err = SaveRecord::decode(&fixture_bytes("truncated.bin")).expect_err("100 bytes");
    let message = err.to_string();
    assert!(message.contains("528"));
    assert!(message.contains("100"));
}

#[test]
fn decoding_is_deterministic() {
    let bytes = fixture_bytes("progress.bin");
    let first = SaveRecord::decode(&bytes).expect("first decode");
    let second = SaveRecord::decode(&bytes).expect("second decode");
    assert_eq!(first, second);
    assert_eq!(Statistics::compute(&first), Statistics::compute(&second));
}

#[test]
fn seconds_scale_every_tick_field() {
    let record = SaveRecord::decode(&fixture_bytes("progress.bin")).expect("progress decodes");
    let stats = Statistics::compute(&record);

    assert_eq!(stats.speedrun_seconds, record.speedrun_ticks as f64 * 0.01);
    for index in 0..LEVEL_COUNT {
        let ticks = record.completion_ticks[index];
        match stats.level(index) {
            Some(level) => {
                assert_eq!(level.ticks, ticks);
                assert_eq!(level.seconds, ticks as f64 * 0.01);
            }
            None => assert_eq!(ticks, 0),
        }
    }
}
