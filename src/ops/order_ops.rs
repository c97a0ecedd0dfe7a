use indexmap::IndexMap;
use tracing::debug;

use super::check;
use crate::model::{EntityKind, Store};

/// Error type for order index operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },
    #[error("{kind} {id} is not in the order of its {container}")]
    NotOrdered {
        kind: EntityKind,
        id: String,
        container: String,
    },
}

// ---------------------------------------------------------------------------
// Sequence primitives
// ---------------------------------------------------------------------------

/// Append `id` at the end. Returns false if it was already present.
pub fn append(seq: &mut Vec<String>, id: &str) -> bool {
    if seq.iter().any(|s| s == id) {
        return false;
    }
    seq.push(id.to_string());
    true
}

/// Remove `id`, returning its former index. Absent ids are not an error.
pub fn remove(seq: &mut Vec<String>, id: &str) -> Option<usize> {
    let idx = seq.iter().position(|s| s == id)?;
    seq.remove(idx);
    Some(idx)
}

/// Move `id` to `index`, counted against the sequence after `id` has been
/// taken out: moving position 2 to target 2 in a 5-element sequence leaves
/// it at position 2 and shifts the old occupant. Targets past the end clamp
/// to the end.
///
/// Returns the final index, or `None` if `id` is not in the sequence.
pub fn move_to_index(seq: &mut Vec<String>, id: &str, index: usize) -> Option<usize> {
    let from = seq.iter().position(|s| s == id)?;
    let item = seq.remove(from);
    let to = index.min(seq.len());
    seq.insert(to, item);
    Some(to)
}

/// Copy of `seq` with the element at `from` moved to `to` (post-removal
/// index). Out-of-range `from` returns the sequence unchanged.
pub fn array_move(seq: &[String], from: usize, to: usize) -> Vec<String> {
    let mut out = seq.to_vec();
    if from >= out.len() {
        return out;
    }
    let item = out.remove(from);
    let to = to.min(out.len());
    out.insert(to, item);
    out
}

/// Replace the whole sequence, keeping the first occurrence of any repeated id.
pub fn replace(seq: &mut Vec<String>, ids: &[String]) {
    seq.clear();
    for id in ids {
        append(seq, id);
    }
}

// ---------------------------------------------------------------------------
// Store-level moves
// ---------------------------------------------------------------------------

/// Move a board within the sidebar order.
pub fn move_board(store: &mut Store, id: &str, index: usize) -> Result<usize, OrderError> {
    let to = move_to_index(&mut store.board_order, id, index).ok_or_else(|| {
        OrderError::NotOrdered {
            kind: EntityKind::Board,
            id: id.to_string(),
            container: "sidebar".into(),
        }
    })?;
    debug!(board = id, index = to, "moved board");
    Ok(to)
}

/// Move a list within its board's list order.
pub fn move_list(store: &mut Store, id: &str, index: usize) -> Result<usize, OrderError> {
    let board_id = store
        .list(id)
        .map(|l| l.board_id.clone())
        .ok_or_else(|| not_found(EntityKind::List, id))?;
    let board = store
        .board_mut(&board_id)
        .ok_or_else(|| not_found(EntityKind::Board, &board_id))?;
    let to = move_to_index(&mut board.list_order, id, index).ok_or_else(|| {
        OrderError::NotOrdered {
            kind: EntityKind::List,
            id: id.to_string(),
            container: board_id.clone(),
        }
    })?;
    debug!(list = id, board = %board_id, index = to, "moved list");
    Ok(to)
}

/// Move an item within its current list.
pub fn move_item_within_list(
    store: &mut Store,
    id: &str,
    index: usize,
) -> Result<usize, OrderError> {
    let list_id = store
        .item(id)
        .map(|i| i.list_id.clone())
        .ok_or_else(|| not_found(EntityKind::Item, id))?;
    let list = store
        .list_mut(&list_id)
        .ok_or_else(|| not_found(EntityKind::List, &list_id))?;
    let to = move_to_index(&mut list.item_order, id, index).ok_or_else(|| {
        OrderError::NotOrdered {
            kind: EntityKind::Item,
            id: id.to_string(),
            container: list_id.clone(),
        }
    })?;
    debug!(item = id, list = %list_id, index = to, "moved item");
    Ok(to)
}

/// Move an item into `list_id` at `index` (clamped), updating its list and
/// board references. Moving into the item's own list is a plain reorder.
pub fn move_item_to_list(
    store: &mut Store,
    id: &str,
    list_id: &str,
    index: usize,
) -> Result<usize, OrderError> {
    let source = store
        .item(id)
        .map(|i| i.list_id.clone())
        .ok_or_else(|| not_found(EntityKind::Item, id))?;
    if source == list_id {
        return move_item_within_list(store, id, index);
    }
    let board_id = store
        .list(list_id)
        .map(|l| l.board_id.clone())
        .ok_or_else(|| not_found(EntityKind::List, list_id))?;

    if let Some(list) = store.list_mut(&source) {
        remove(&mut list.item_order, id);
    }
    let to = match store.list_mut(list_id) {
        Some(list) => {
            remove(&mut list.item_order, id);
            let to = index.min(list.item_order.len());
            list.item_order.insert(to, id.to_string());
            to
        }
        None => return Err(not_found(EntityKind::List, list_id)),
    };
    if let Some(item) = store.item_mut(id) {
        item.list_id = list_id.to_string();
        item.board_id = board_id;
    }
    debug!(item = id, from = %source, to = list_id, index = to, "moved item to list");
    Ok(to)
}

/// Replace the sidebar board order wholesale.
pub fn set_board_order(store: &mut Store, ids: &[String]) {
    replace(&mut store.board_order, ids);
}

/// Replace a board's list order wholesale.
pub fn set_list_order(store: &mut Store, board_id: &str, ids: &[String]) -> Result<(), OrderError> {
    let board = store
        .board_mut(board_id)
        .ok_or_else(|| not_found(EntityKind::Board, board_id))?;
    replace(&mut board.list_order, ids);
    Ok(())
}

/// Replace a list's item order wholesale.
pub fn set_item_order(store: &mut Store, list_id: &str, ids: &[String]) -> Result<(), OrderError> {
    let list = store
        .list_mut(list_id)
        .ok_or_else(|| not_found(EntityKind::List, list_id))?;
    replace(&mut list.item_order, ids);
    Ok(())
}

fn not_found(kind: EntityKind, id: &str) -> OrderError {
    OrderError::NotFound {
        kind,
        id: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Every order sequence in the store plus each item's owning list, taken at
/// the start of a drag so the drag can be rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    board_order: Vec<String>,
    list_orders: IndexMap<String, Vec<String>>,
    item_orders: IndexMap<String, Vec<String>>,
    item_lists: IndexMap<String, String>,
}

impl OrderSnapshot {
    pub fn capture(store: &Store) -> Self {
        OrderSnapshot {
            board_order: store.board_order.clone(),
            list_orders: store
                .boards
                .values()
                .map(|b| (b.id.clone(), b.list_order.clone()))
                .collect(),
            item_orders: store
                .lists
                .values()
                .map(|l| (l.id.clone(), l.item_order.clone()))
                .collect(),
            item_lists: store
                .items
                .values()
                .map(|i| (i.id.clone(), i.list_id.clone()))
                .collect(),
        }
    }

    pub fn board_order(&self) -> &[String] {
        &self.board_order
    }

    pub fn list_order(&self, board_id: &str) -> Option<&[String]> {
        self.list_orders.get(board_id).map(Vec::as_slice)
    }

    pub fn item_order(&self, list_id: &str) -> Option<&[String]> {
        self.item_orders.get(list_id).map(Vec::as_slice)
    }

    /// The list `item_id` belonged to when the snapshot was taken.
    pub fn item_list(&self, item_id: &str) -> Option<&str> {
        self.item_lists.get(item_id).map(String::as_str)
    }

    /// Write the captured orders and item ownership back into `store`.
    ///
    /// Entities deleted since the capture are dropped from the restored
    /// orders, and entities created since are appended, so the store is
    /// consistent afterwards even if it changed under the drag.
    pub fn restore(&self, store: &mut Store) {
        for (item_id, list_id) in &self.item_lists {
            let Some(board_id) = store.list(list_id).map(|l| l.board_id.clone()) else {
                continue;
            };
            if let Some(item) = store.item_mut(item_id) {
                item.list_id = list_id.clone();
                item.board_id = board_id;
            }
        }
        replace(&mut store.board_order, &self.board_order);
        for (board_id, order) in &self.list_orders {
            if let Some(board) = store.board_mut(board_id) {
                replace(&mut board.list_order, order);
            }
        }
        for (list_id, order) in &self.item_orders {
            if let Some(list) = store.list_mut(list_id) {
                replace(&mut list.item_order, order);
            }
        }
        let repaired = check::repair(store);
        debug!(repaired, "restored order snapshot");
    }
}
