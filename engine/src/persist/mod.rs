//! Persistence
//!
//! Two independent stores, both plain JSON on disk:
//!
//! - **Company snapshots** (`snapshot`): the whole company in one file,
//!   guarded by a SHA-256 checksum of the canonical serialization and a
//!   referential-integrity validation pass on load.
//! - **Running boards** (`boards`): one file per board, keyed by a
//!   filesystem-safe transform of the board name.
//!
//! Every failure here is local: a load that goes wrong yields an error
//! and no new state; whatever was in memory before is untouched.

mod boards;
mod snapshot;

pub use boards::{
    board_exists, board_file_name, delete_board, list_boards, load_active_boards, load_board,
    save_board,
};
pub use snapshot::{list_saves, load_company, save_company, validate_company, SaveSummary};

use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed save data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("checksum mismatch: the save file is corrupt")]
    ChecksumMismatch,

    #[error("no saved {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("snapshot failed validation: {0}")]
    Invalid(String),
}
