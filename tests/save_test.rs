//! Tests for the textual save format and file persistence.

use reversi_engine::{
    Board, CorruptSave, Disk, GameState, PlayerMode, SaveError, parse, read_save, serialize,
    write_save,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_FILE: AtomicU32 = AtomicU32::new(0);

fn temp_path() -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("reversi-save-test-{}-{n}.txt", std::process::id()))
}

const MID_GAME: &str = "x00\n\
                        --------\n\
                        x-------\n\
                        -o------\n\
                        --ooo---\n\
                        ---ox---\n\
                        -----oox\n\
                        ---ooo--\n\
                        --o-x---\n";

#[test]
fn test_file_round_trip_is_byte_identical() {
    let path = temp_path();
    std::fs::write(&path, MID_GAME).unwrap();

    let state = read_save(&path).unwrap();
    assert_eq!(state.turn, Some(Disk::Dark));
    assert_eq!(state.dark_mode, PlayerMode::Manual);
    assert_eq!(state.light_mode, PlayerMode::Manual);

    let out = temp_path();
    write_save(&out, &state).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), MID_GAME);
}

#[test]
fn test_fresh_state_serializes_to_the_new_game_literal() {
    let state = GameState {
        board: Board::new(),
        turn: Some(Disk::Dark),
        dark_mode: PlayerMode::Manual,
        light_mode: PlayerMode::Manual,
    };
    assert_eq!(
        serialize(&state),
        "x00\n\
         --------\n\
         --------\n\
         --------\n\
         ---ox---\n\
         ---xo---\n\
         --------\n\
         --------\n\
         --------\n"
    );
}

#[test]
fn test_missing_file_surfaces_io_error() {
    let path = temp_path();
    match read_save(&path) {
        Err(SaveError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_corrupt_file_surfaces_corrupt_error() {
    let path = temp_path();
    std::fs::write(&path, "not a save file\n").unwrap();
    assert!(matches!(
        read_save(&path),
        Err(SaveError::Corrupt(CorruptSave::WrongLineCount(_)))
    ));
}

#[test]
fn test_mode_digits_round_trip() {
    for (dark, light, header) in [
        (PlayerMode::Manual, PlayerMode::Manual, "x00"),
        (PlayerMode::Automated, PlayerMode::Manual, "x10"),
        (PlayerMode::Manual, PlayerMode::Automated, "x01"),
        (PlayerMode::Automated, PlayerMode::Automated, "x11"),
    ] {
        let state = GameState {
            board: Board::new(),
            turn: Some(Disk::Dark),
            dark_mode: dark,
            light_mode: light,
        };
        let text = serialize(&state);
        assert!(text.starts_with(header));
        assert_eq!(parse(&text).unwrap(), state);
    }
}
