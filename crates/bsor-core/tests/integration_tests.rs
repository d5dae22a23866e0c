//! Integration tests for bsor-core
//!
//! These tests build synthetic replay files with the mock builder and run
//! them through decoding, score replay and statistics.

use bsor_core::mock::{MockNote, MockReplayBuilder};
use bsor_core::replay::{AutomaticHeight, ColorType, Frame, Info, NoteEventType, Pause};
use bsor_core::{ErrorKind, ReplayEvents, ReplayStats, decode_bytes, decode_reader};

const RED_NOTE: u32 = 30_000;
const BLUE_NOTE: u32 = 31_010;

fn sample_info(score: i32) -> Info {
    Info {
        mod_version: "0.9.0".to_string(),
        game_version: "1.34.2".to_string(),
        timestamp: 1_700_000_000,
        player_id: "76561198000000000".to_string(),
        player_name: "Player".to_string(),
        platform: "steam".to_string(),
        tracking_system: "Oculus".to_string(),
        hmd: "Quest 2".to_string(),
        controller: "Touch".to_string(),
        hash: "ABCDEF0123".to_string(),
        song_name: "Song".to_string(),
        mapper: "Mapper".to_string(),
        difficulty: "ExpertPlus".to_string(),
        score,
        mode: "Standard".to_string(),
        environment: "Default".to_string(),
        modifiers: "FS,GN".to_string(),
        jump_distance: 18.5,
        left_handed: false,
        height: 1.75,
        start_time: 0.0,
        fail_time: 0.0,
        speed: 0.0,
    }
}

fn frame(time: f32) -> Frame {
    Frame {
        time,
        fps: 90,
        ..Default::default()
    }
}

/// Decoding of complete synthetic files
mod decode_tests {
    use super::*;

    fn full_replay() -> Vec<u8> {
        MockReplayBuilder::new()
            .info(&sample_info(345))
            .frames(&[frame(0.0), frame(1.5), frame(12.25)])
            .notes(&[MockNote::perfect(RED_NOTE, 1.0), MockNote::miss(BLUE_NOTE, 2.0)])
            .walls(&[(121, 0.3, 4.0, 3.0)])
            .heights(&[AutomaticHeight {
                height: 1.7,
                time: 0.5,
            }])
            .pauses(&[Pause {
                duration: 250,
                time: 6.0,
            }])
            .build()
    }

    #[test]
    fn test_decode_all_parts() {
        let replay = decode_bytes(&full_replay()).unwrap();

        assert_eq!(replay.info, sample_info(345));
        assert_eq!(replay.frames.len(), 3);
        assert_eq!(replay.frames[2].fps, 90);
        assert_eq!(replay.end_time(), 12.25);

        assert_eq!(replay.notes.len(), 2);
        assert_eq!(replay.notes[0].event_type, NoteEventType::Good);
        assert!(replay.notes[0].cut_info.is_some());
        assert_eq!(replay.notes[1].event_type, NoteEventType::Miss);
        assert_eq!(replay.notes[1].color, ColorType::Blue);
        assert_eq!(replay.notes[1].line_index(), 1);
        assert!(replay.notes[1].cut_info.is_none());

        assert_eq!(replay.walls.len(), 1);
        assert_eq!(replay.walls[0].id.line_index, 1);
        assert_eq!(replay.walls[0].id.obstacle_type, 2);
        assert_eq!(replay.walls[0].id.width, 1);

        assert_eq!(replay.heights.len(), 1);
        assert_eq!(replay.pauses[0].duration, 250);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let data = full_replay();
        assert_eq!(decode_bytes(&data).unwrap(), decode_bytes(&data).unwrap());
    }

    #[test]
    fn test_reader_matches_bytes() {
        let data = full_replay();
        let from_reader = decode_reader(data.as_slice()).unwrap();
        assert_eq!(from_reader, decode_bytes(&data).unwrap());
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("play.bsor");
        std::fs::write(&path, full_replay()).unwrap();

        let replay = bsor_core::decode_file(&path).unwrap();
        assert_eq!(replay.info.player_name, "Player");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = bsor_core::decode_file(dir.path().join("missing.bsor")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_truncated_note_is_error() {
        let mut data = MockReplayBuilder::new()
            .notes(&[MockNote::perfect(RED_NOTE, 1.0)])
            .build();
        data.truncate(data.len() - 3);

        let err = decode_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_unknown_event_type_is_field_error() {
        let mut note = MockNote::miss(RED_NOTE, 1.0);
        note.event_type = 7;
        let data = MockReplayBuilder::new().notes(&[note]).build();

        let err = decode_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldDecode);
    }

    #[test]
    fn test_bad_timestamp_is_field_error() {
        let data = MockReplayBuilder::new()
            .raw(&[0])
            .write_string("0.9.0")
            .write_string("1.34.2")
            .write_string("yesterday")
            .build();

        let err = decode_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldDecode);
    }

    #[test]
    fn test_wrong_magic_is_format_error() {
        let data = MockReplayBuilder::empty().header(0x442d3d24, 1).build();
        let err = decode_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

/// Recovery of corrupted name lengths
mod recovery_tests {
    use super::*;

    #[test]
    fn test_short_name_length_recovered_by_probe() {
        let info = sample_info(0);
        let data = MockReplayBuilder::new()
            .info_with_name_length(&info, 3)
            .build();

        let replay = decode_bytes(&data).unwrap();
        assert_eq!(replay.info, info);
    }

    #[test]
    fn test_implausible_name_length_recovered_by_sliding() {
        let info = sample_info(0);
        let mut raw_name = vec![0xFF, 0xFF, 0xFF, 0xFF];
        raw_name.extend_from_slice(&6u32.to_le_bytes());
        raw_name.extend_from_slice(b"Player");

        let data = MockReplayBuilder::new()
            .info_with_raw_name(&info, &raw_name)
            .notes(&[MockNote::perfect(RED_NOTE, 1.0)])
            .build();

        let from_bytes = decode_bytes(&data).unwrap();
        assert_eq!(from_bytes.info, info);
        assert_eq!(from_bytes.notes.len(), 1);

        let from_reader = decode_reader(data.as_slice()).unwrap();
        assert_eq!(from_reader, from_bytes);
    }

    #[test]
    fn test_unrecoverable_name_is_format_error() {
        let info = sample_info(0);
        let raw_name = vec![0xFF; 4096];
        let data = MockReplayBuilder::new()
            .info_with_raw_name(&info, &raw_name)
            .build();

        let err = decode_bytes(&data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

/// Decode, replay and aggregate together
mod replay_tests {
    use super::*;

    #[test]
    fn test_end_to_end_good_miss_bad() {
        // Good: 0.5 * 70 = 35, 0.75 * 30 = 22.5 -> 23, 15 * (1 - 0.06 / 0.3) = 12
        let data = MockReplayBuilder::new()
            .info(&sample_info(70))
            .frames(&[frame(0.0), frame(4.0)])
            .notes(&[
                MockNote::good(RED_NOTE, 1.0, 0.5, 0.75, 0.06),
                MockNote::miss(BLUE_NOTE, 2.0),
                MockNote::bad(RED_NOTE, 3.0),
            ])
            .build();

        let replay = decode_bytes(&data).unwrap();
        let events = ReplayEvents::from_replay(&replay);

        // Score: 70 * 1. Max: 115 * 1 + 115 * 2 + 115 * 2.
        assert_eq!(events.info.calc_score, 70);
        assert_eq!(events.info.max_score, 575);
        assert!((events.info.accuracy - 70.0 / 575.0 * 100.0).abs() < 1e-9);
        assert_eq!(events.info.max_combo, 1);
        assert_eq!(events.info.max_left_combo, 1);
        assert_eq!(events.info.max_right_combo, 0);
        assert!(!events.info.reconciled);
        assert_eq!(events.info.end_time, 4.0);

        // FC: 70, miss predicted 115 (no right-hand history), bad predicted 70
        assert_eq!(events.info.fc_score, 70 + 115 * 2 + 70 * 2);
        assert_eq!(events.misses[0].predicted_score, 115);
        assert_eq!(events.bad_cuts[0].predicted_score, 70);

        let stats = ReplayStats::from_events(&events);
        assert_eq!(stats.info.calc_score, 70);
        assert_eq!(stats.stats.total.notes, 3);
        assert_eq!(stats.stats.left.notes, 2);
        assert_eq!(stats.stats.left.bad_cuts, 1);
        assert_eq!(stats.stats.right.misses, 1);
        assert_eq!(stats.stats.left.score.max, 70);
        assert_eq!(stats.stats.left.before_cut.median, 35.0);
        assert_eq!(stats.stats.total.max_combo, 1);
    }

    #[test]
    fn test_duplicate_note_record_reconciled() {
        // Without the duplicate: 115 * 1 + 115 * 2
        let data = MockReplayBuilder::new()
            .info(&sample_info(345))
            .notes(&[
                MockNote::perfect(RED_NOTE, 1.0),
                MockNote::perfect(RED_NOTE, 1.0),
                MockNote::perfect(BLUE_NOTE, 2.0),
            ])
            .build();

        let replay = decode_bytes(&data).unwrap();
        let events = ReplayEvents::from_replay(&replay);

        assert!(events.info.reconciled);
        assert_eq!(events.info.calc_score, 345);
        assert_eq!(events.hits.len(), 2);
        assert_eq!(events.info.accuracy, 100.0);
    }

    #[test]
    fn test_split_note_parts_replay_identically() {
        let notes = [
            MockNote::perfect(RED_NOTE, 1.0),
            MockNote::miss(BLUE_NOTE, 1.0),
            MockNote::good(BLUE_NOTE, 2.0, 0.9, 0.8, 0.1),
        ];
        let forward = MockReplayBuilder::new()
            .info(&sample_info(0))
            .notes(&notes)
            .build();
        let events = ReplayEvents::from_replay(&decode_bytes(&forward).unwrap());

        // Same records split across two parts keep their indices.
        let split = MockReplayBuilder::new()
            .info(&sample_info(0))
            .notes(&notes[..1])
            .notes(&notes[1..])
            .build();
        let split_events = ReplayEvents::from_replay(&decode_bytes(&split).unwrap());

        assert_eq!(events, split_events);
    }

    #[test]
    fn test_walls_break_combo() {
        let data = MockReplayBuilder::new()
            .info(&sample_info(0))
            .notes(&[
                MockNote::perfect(RED_NOTE, 1.0),
                MockNote::perfect(RED_NOTE, 3.0),
            ])
            .walls(&[(0, 0.5, 2.0, 1.5)])
            .build();

        let events = ReplayEvents::from_replay(&decode_bytes(&data).unwrap());
        assert_eq!(events.walls.len(), 1);
        assert_eq!(events.walls[0].index, 2);
        assert_eq!(events.info.max_combo, 1);

        let stats = ReplayStats::from_events(&events);
        assert_eq!(stats.info.wall_hits, 1);
    }
}
