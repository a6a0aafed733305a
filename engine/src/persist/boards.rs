//! Running-board files
//!
//! Boards are persisted independently of the company snapshot, one JSON
//! file per board, keyed by a filesystem-safe transform of the board
//! name: alphanumerics, spaces, underscores and dashes pass through,
//! everything else becomes an underscore.

use crate::models::board::RunningBoard;
use crate::persist::PersistError;
use std::fs;
use std::path::{Path, PathBuf};

/// File name a board is stored under.
pub fn board_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.json", safe)
}

fn board_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(board_file_name(name))
}

/// Whether a board of this name exists in the directory.
pub fn board_exists(dir: &Path, name: &str) -> bool {
    board_path(dir, name).is_file()
}

/// Write a board, creating the directory if needed.
pub fn save_board(dir: &Path, board: &RunningBoard) -> Result<(), PersistError> {
    fs::create_dir_all(dir)?;
    let path = board_path(dir, &board.name);
    fs::write(path, serde_json::to_string_pretty(board)?)?;
    Ok(())
}

/// Read a board back by its original (unsanitized) name.
pub fn load_board(dir: &Path, name: &str) -> Result<RunningBoard, PersistError> {
    let path = board_path(dir, name);
    if !path.is_file() {
        return Err(PersistError::NotFound {
            kind: "running board",
            name: name.to_string(),
        });
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Names of every readable board in the directory, sorted.
///
/// Files that fail to parse are skipped; a broken board file must not
/// hide the rest.
pub fn list_boards(dir: &Path) -> Result<Vec<String>, PersistError> {
    let mut names = Vec::new();

    if !dir.is_dir() {
        return Ok(names);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let Ok(text) = fs::read_to_string(&path) else {
            continue;
        };
        if let Ok(board) = serde_json::from_str::<RunningBoard>(&text) {
            names.push(board.name);
        }
    }

    names.sort();
    Ok(names)
}

/// Delete a board file.
pub fn delete_board(dir: &Path, name: &str) -> Result<(), PersistError> {
    let path = board_path(dir, name);
    if !path.is_file() {
        return Err(PersistError::NotFound {
            kind: "running board",
            name: name.to_string(),
        });
    }
    fs::remove_file(path)?;
    Ok(())
}

/// Load every board that has a bus assigned, in name order. This is the
/// set the day engine operates on in running-board mode.
pub fn load_active_boards(dir: &Path) -> Result<Vec<RunningBoard>, PersistError> {
    let mut boards = Vec::new();
    for name in list_boards(dir)? {
        let board = load_board(dir, &name)?;
        if board.assigned_bus_id.is_some() {
            boards.push(board);
        }
    }
    Ok(boards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::{DepartureTime, Trip};

    fn sample_board(name: &str) -> RunningBoard {
        RunningBoard::new(
            name,
            vec![Trip::new(
                "Route 1",
                "Ryde",
                DepartureTime::new(9, 30).unwrap(),
            )],
        )
    }

    #[test]
    fn test_file_name_sanitized() {
        assert_eq!(board_file_name("Early Turn 1"), "Early Turn 1.json");
        assert_eq!(
            board_file_name("Route 12: Newport/Ryde"),
            "Route 12_ Newport_Ryde.json"
        );
        assert_eq!(board_file_name("a..b"), "a__b.json");
    }

    #[test]
    fn test_save_load_round_trip_by_original_name() {
        let dir = tempfile::tempdir().unwrap();
        let board = sample_board("Route 12: Newport/Ryde");
        save_board(dir.path(), &board).unwrap();

        // loaded by the original, unsanitized name
        let restored = load_board(dir.path(), "Route 12: Newport/Ryde").unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_load_missing_board() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_board(dir.path(), "nothing here").unwrap_err();
        assert!(matches!(err, PersistError::NotFound { .. }));
    }

    #[test]
    fn test_list_is_sorted_and_tolerant() {
        let dir = tempfile::tempdir().unwrap();
        save_board(dir.path(), &sample_board("Late Turn")).unwrap();
        save_board(dir.path(), &sample_board("Early Turn")).unwrap();
        fs::write(dir.path().join("junk.json"), "}{").unwrap();

        let names = list_boards(dir.path()).unwrap();
        assert_eq!(names, vec!["Early Turn", "Late Turn"]);
    }

    #[test]
    fn test_delete_board() {
        let dir = tempfile::tempdir().unwrap();
        save_board(dir.path(), &sample_board("Turn 1")).unwrap();
        delete_board(dir.path(), "Turn 1").unwrap();
        assert!(!board_exists(dir.path(), "Turn 1"));
        assert!(matches!(
            delete_board(dir.path(), "Turn 1"),
            Err(PersistError::NotFound { .. })
        ));
    }

    #[test]
    fn test_active_boards_filter() {
        let dir = tempfile::tempdir().unwrap();
        let mut assigned = sample_board("Assigned");
        assigned.assigned_bus_id = Some(3);
        save_board(dir.path(), &assigned).unwrap();
        save_board(dir.path(), &sample_board("Idle")).unwrap();

        let active = load_active_boards(dir.path()).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Assigned");
    }
}
