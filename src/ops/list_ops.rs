use tracing::debug;

use super::order_ops;
use super::{Cascade, EntityError};
use crate::model::{EntityKind, List, ListPatch, Store};
use crate::util::new_id;

/// Create an empty list and append it to its board's list order.
pub fn add_list(
    store: &mut Store,
    id: &str,
    board_id: &str,
    title: &str,
) -> Result<List, EntityError> {
    // ids are unique across all three tables
    if let Some(kind) = store.kind_of(id) {
        return Err(EntityError::already_exists(kind, id));
    }
    let board = store
        .board_mut(board_id)
        .ok_or_else(|| EntityError::not_found(EntityKind::Board, board_id))?;
    order_ops::append(&mut board.list_order, id);

    let list = List::new(id, board_id, title);
    store.lists.insert(id.to_string(), list.clone());
    debug!(list = id, board = board_id, "added list");
    Ok(list)
}

pub fn create_list(store: &mut Store, board_id: &str, title: &str) -> Result<List, EntityError> {
    add_list(store, &new_id(), board_id, title)
}

/// Change a list's title.
pub fn rename_list(store: &mut Store, id: &str, title: &str) -> Result<List, EntityError> {
    update_list(store, id, ListPatch::title(title))
}

/// Apply a partial update to a list.
pub fn update_list(store: &mut Store, id: &str, patch: ListPatch) -> Result<List, EntityError> {
    let list = store
        .list_mut(id)
        .ok_or_else(|| EntityError::not_found(EntityKind::List, id))?;
    patch.apply(list);
    Ok(list.clone())
}

/// Delete a list and its items, removing it from its board's list order.
///
/// Returns `None` when the list does not exist (nothing is changed).
pub fn delete_list(store: &mut Store, id: &str) -> Option<Cascade> {
    let list = store.lists.shift_remove(id)?;
    if let Some(board) = store.board_mut(&list.board_id) {
        order_ops::remove(&mut board.list_order, id);
    }

    let items_before = store.items.len();
    store.items.retain(|_, item| item.list_id != id);

    let cascade = Cascade {
        lists: 1,
        items: items_before - store.items.len(),
    };
    debug!(list = id, items = cascade.items, "deleted list");
    Some(cascade)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{board_ops, item_ops};
    use pretty_assertions::assert_eq;

    fn setup() -> Store {
        let mut store = Store::new();
        board_ops::add_board(&mut store, "b1", "Test Board").unwrap();
        add_list(&mut store, "l1", "b1", "Grocery List").unwrap();
        add_list(&mut store, "l2", "b1", "Walmart List").unwrap();
        item_ops::add_item(&mut store, "i1", "l1", "b1", "Buy bananas").unwrap();
        item_ops::add_item(&mut store, "i2", "l1", "b1", "Buy apples").unwrap();
        item_ops::add_item(&mut store, "i3", "l2", "b1", "Buy grapes").unwrap();
        store
    }

    #[test]
    fn test_add_list_appends_to_board() {
        let store = setup();
        assert_eq!(store.list_order("b1").unwrap(), &["l1".to_string(), "l2".to_string()]);
        let list = store.list("l1").unwrap();
        assert_eq!(list.board_id, "b1");
        assert_eq!(list.title, "Grocery List");
    }

    #[test]
    fn test_add_list_to_missing_board() {
        let mut store = setup();
        let before = store.clone();
        let err = add_list(&mut store, "l9", "nope", "x").unwrap_err();
        assert_eq!(err, EntityError::not_found(EntityKind::Board, "nope"));
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_duplicate_list_fails() {
        let mut store = setup();
        assert!(add_list(&mut store, "l1", "b1", "dup").is_err());
        assert_eq!(store.list_order("b1").unwrap().len(), 2);
    }

    #[test]
    fn test_list_id_may_not_reuse_board_id() {
        let mut store = setup();
        let err = add_list(&mut store, "b1", "b1", "dup").unwrap_err();
        assert_eq!(err, EntityError::already_exists(EntityKind::Board, "b1"));
        assert_eq!(store.list_count(), 2);
    }

    #[test]
    fn test_rename_list() {
        let mut store = setup();
        rename_list(&mut store, "l2", "Costco").unwrap();
        assert_eq!(store.list("l2").unwrap().title, "Costco");
        assert!(rename_list(&mut store, "gone", "x").is_err());
    }

    #[test]
    fn test_delete_list_cascades_to_items() {
        let mut store = setup();
        let cascade = delete_list(&mut store, "l1").unwrap();
        assert_eq!(cascade, Cascade { lists: 1, items: 2 });
        assert_eq!(store.list_order("b1").unwrap(), &["l2".to_string()]);
        assert!(store.item("i1").is_none());
        assert!(store.item("i2").is_none());
        assert!(store.item("i3").is_some());
    }

    #[test]
    fn test_delete_missing_list_is_noop() {
        let mut store = setup();
        assert_eq!(delete_list(&mut store, "l1"), Some(Cascade { lists: 1, items: 2 }));
        assert_eq!(delete_list(&mut store, "l1"), None);
    }
}
