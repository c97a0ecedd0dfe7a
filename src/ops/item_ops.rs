use tracing::debug;

use super::EntityError;
use super::order_ops;
use crate::model::{EntityKind, Item, ItemPatch, Store};
use crate::util::new_id;

/// Create an item and append it to its list's item order.
///
/// `board_id` must be the board owning `list_id`.
pub fn add_item(
    store: &mut Store,
    id: &str,
    list_id: &str,
    board_id: &str,
    value: &str,
) -> Result<Item, EntityError> {
    // ids are unique across all three tables
    if let Some(kind) = store.kind_of(id) {
        return Err(EntityError::already_exists(kind, id));
    }
    let list = store
        .list_mut(list_id)
        .ok_or_else(|| EntityError::not_found(EntityKind::List, list_id))?;
    if list.board_id != board_id {
        return Err(EntityError::BoardMismatch {
            item: id.to_string(),
            list: list_id.to_string(),
            board: board_id.to_string(),
        });
    }
    order_ops::append(&mut list.item_order, id);

    let item = Item::new(id, list_id, board_id, value);
    store.items.insert(id.to_string(), item.clone());
    debug!(item = id, list = list_id, "added item");
    Ok(item)
}

/// Create an item under a freshly generated id. The board is taken from
/// the list.
pub fn create_item(store: &mut Store, list_id: &str, value: &str) -> Result<Item, EntityError> {
    let board_id = store
        .list(list_id)
        .map(|l| l.board_id.clone())
        .ok_or_else(|| EntityError::not_found(EntityKind::List, list_id))?;
    add_item(store, &new_id(), list_id, &board_id, value)
}

/// Replace an item's text.
pub fn edit_item(store: &mut Store, id: &str, value: &str) -> Result<Item, EntityError> {
    update_item(store, id, ItemPatch::value(value))
}

/// Apply a partial update to an item.
pub fn update_item(store: &mut Store, id: &str, patch: ItemPatch) -> Result<Item, EntityError> {
    let item = store
        .item_mut(id)
        .ok_or_else(|| EntityError::not_found(EntityKind::Item, id))?;
    patch.apply(item);
    Ok(item.clone())
}

/// Delete an item and remove it from its list's item order.
///
/// Returns `false` when the item does not exist.
pub fn delete_item(store: &mut Store, id: &str) -> bool {
    let Some(item) = store.items.shift_remove(id) else {
        return false;
    };
    if let Some(list) = store.list_mut(&item.list_id) {
        order_ops::remove(&mut list.item_order, id);
    }
    debug!(item = id, list = %item.list_id, "deleted item");
    true
}
