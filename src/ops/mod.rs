pub mod board_ops;
pub mod check;
pub mod item_ops;
pub mod list_ops;
pub mod order_ops;

use crate::model::EntityKind;

/// Error type for entity CRUD operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} ID already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },
    #[error("item {item} names board {board} but list {list} belongs to another board")]
    BoardMismatch {
        item: String,
        list: String,
        board: String,
    },
}

impl EntityError {
    pub(crate) fn not_found(kind: EntityKind, id: &str) -> Self {
        EntityError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn already_exists(kind: EntityKind, id: &str) -> Self {
        EntityError::AlreadyExists {
            kind,
            id: id.to_string(),
        }
    }
}

/// What a delete removed, including everything it cascaded to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cascade {
    pub lists: usize,
    pub items: usize,
}
