use tracing::debug;

use super::order_ops;
use super::{Cascade, EntityError};
use crate::model::{Board, BoardPatch, EntityKind, Store};
use crate::util::new_id;

/// Create a board with no lists and append it to the sidebar order.
pub fn add_board(store: &mut Store, id: &str, title: &str) -> Result<Board, EntityError> {
    // ids are unique across all three tables
    if let Some(kind) = store.kind_of(id) {
        return Err(EntityError::already_exists(kind, id));
    }
    let board = Board::new(id, title);
    store.boards.insert(id.to_string(), board.clone());
    order_ops::append(&mut store.board_order, id);
    debug!(board = id, "added board");
    Ok(board)
}

/// Create a board under a freshly generated id.
pub fn create_board(store: &mut Store, title: &str) -> Result<Board, EntityError> {
    add_board(store, &new_id(), title)
}

/// Change a board's title.
pub fn rename_board(store: &mut Store, id: &str, title: &str) -> Result<Board, EntityError> {
    update_board(store, id, BoardPatch::title(title))
}

/// Apply a partial update to a board.
pub fn update_board(store: &mut Store, id: &str, patch: BoardPatch) -> Result<Board, EntityError> {
    let board = store
        .board_mut(id)
        .ok_or_else(|| EntityError::not_found(EntityKind::Board, id))?;
    patch.apply(board);
    Ok(board.clone())
}

/// Delete a board together with its lists and their items.
///
/// Returns `None` when the board does not exist (nothing is changed).
pub fn delete_board(store: &mut Store, id: &str) -> Option<Cascade> {
    store.boards.shift_remove(id)?;
    order_ops::remove(&mut store.board_order, id);

    let lists_before = store.lists.len();
    store.lists.retain(|_, list| list.board_id != id);
    let items_before = store.items.len();
    store.items.retain(|_, item| item.board_id != id);

    let cascade = Cascade {
        lists: lists_before - store.lists.len(),
        items: items_before - store.items.len(),
    };
    debug!(
        board = id,
        lists = cascade.lists,
        items = cascade.items,
        "deleted board"
    );
    Some(cascade)
}
