use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::order_ops;
use crate::model::Store;

/// Structured result of an integrity check, suitable for JSON output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
}

/// A broken link between the entity tables and the order sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// The sidebar order names a board that doesn't exist
    #[serde(rename = "dangling_board")]
    DanglingBoard { board_id: String },
    /// A board exists but is missing from the sidebar order
    #[serde(rename = "unordered_board")]
    UnorderedBoard { board_id: String },
    /// A board appears more than once in the sidebar order
    #[serde(rename = "duplicate_board")]
    DuplicateBoard { board_id: String },
    /// A board's list order names a list that doesn't exist
    #[serde(rename = "dangling_list")]
    DanglingList { board_id: String, list_id: String },
    /// A board's list order names a list owned by another board
    #[serde(rename = "misplaced_list")]
    MisplacedList {
        board_id: String,
        list_id: String,
        owner: String,
    },
    /// A list is missing from its board's list order
    #[serde(rename = "unordered_list")]
    UnorderedList { board_id: String, list_id: String },
    /// A list appears more than once in its board's list order
    #[serde(rename = "duplicate_list")]
    DuplicateList { board_id: String, list_id: String },
    /// A list's board doesn't exist
    #[serde(rename = "orphan_list")]
    OrphanList { list_id: String, board_id: String },
    /// A list's item order names an item that doesn't exist
    #[serde(rename = "dangling_item")]
    DanglingItem { list_id: String, item_id: String },
    /// A list's item order names an item owned by another list
    #[serde(rename = "misplaced_item")]
    MisplacedItem {
        list_id: String,
        item_id: String,
        owner: String,
    },
    /// An item is missing from its list's item order
    #[serde(rename = "unordered_item")]
    UnorderedItem { list_id: String, item_id: String },
    /// An item appears more than once in its list's item order
    #[serde(rename = "duplicate_item")]
    DuplicateItem { list_id: String, item_id: String },
    /// An item's list doesn't exist
    #[serde(rename = "orphan_item")]
    OrphanItem { item_id: String, list_id: String },
    /// An item's board differs from its list's board
    #[serde(rename = "board_mismatch")]
    BoardMismatch {
        item_id: String,
        item_board: String,
        list_board: String,
    },
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::DanglingBoard { board_id } => {
                write!(f, "board order: unknown board {}", board_id)
            }
            CheckError::UnorderedBoard { board_id } => {
                write!(f, "board order: missing board {}", board_id)
            }
            CheckError::DuplicateBoard { board_id } => {
                write!(f, "board order: duplicate board {}", board_id)
            }
            CheckError::DanglingList { board_id, list_id } => {
                write!(f, "board {}: unknown list {}", board_id, list_id)
            }
            CheckError::MisplacedList {
                board_id,
                list_id,
                owner,
            } => write!(
                f,
                "board {}: list {} belongs to board {}",
                board_id, list_id, owner
            ),
            CheckError::UnorderedList { board_id, list_id } => {
                write!(f, "board {}: missing list {}", board_id, list_id)
            }
            CheckError::DuplicateList { board_id, list_id } => {
                write!(f, "board {}: duplicate list {}", board_id, list_id)
            }
            CheckError::OrphanList { list_id, board_id } => {
                write!(f, "list {}: unknown board {}", list_id, board_id)
            }
            CheckError::DanglingItem { list_id, item_id } => {
                write!(f, "list {}: unknown item {}", list_id, item_id)
            }
            CheckError::MisplacedItem {
                list_id,
                item_id,
                owner,
            } => write!(
                f,
                "list {}: item {} belongs to list {}",
                list_id, item_id, owner
            ),
            CheckError::UnorderedItem { list_id, item_id } => {
                write!(f, "list {}: missing item {}", list_id, item_id)
            }
            CheckError::DuplicateItem { list_id, item_id } => {
                write!(f, "list {}: duplicate item {}", list_id, item_id)
            }
            CheckError::OrphanItem { item_id, list_id } => {
                write!(f, "item {}: unknown list {}", item_id, list_id)
            }
            CheckError::BoardMismatch {
                item_id,
                item_board,
                list_board,
            } => write!(
                f,
                "item {}: board {} but its list is on board {}",
                item_id, item_board, list_board
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Main check entry point
// ---------------------------------------------------------------------------

/// Validate the store and return structured results.
///
/// This is a read-only operation. Checks performed:
/// 1. The sidebar order holds every board exactly once and nothing else
/// 2. Each board's list order holds exactly the lists owned by that board
/// 3. Each list's item order holds exactly the items owned by that list
/// 4. Every list and item points at an existing owner
/// 5. Every item's board matches its list's board
pub fn check_store(store: &Store) -> CheckResult {
    let mut result = CheckResult::default();
    check_board_order(store, &mut result);
    check_list_orders(store, &mut result);
    check_item_orders(store, &mut result);
    result.valid = result.errors.is_empty();
    result
}

fn check_board_order(store: &Store, result: &mut CheckResult) {
    let mut seen = HashSet::new();
    for id in &store.board_order {
        if store.board(id).is_none() {
            result.errors.push(CheckError::DanglingBoard {
                board_id: id.clone(),
            });
        } else if !seen.insert(id.as_str()) {
            result.errors.push(CheckError::DuplicateBoard {
                board_id: id.clone(),
            });
        }
    }
    for board in store.boards() {
        if !seen.contains(board.id.as_str()) {
            result.errors.push(CheckError::UnorderedBoard {
                board_id: board.id.clone(),
            });
        }
    }
}

fn check_list_orders(store: &Store, result: &mut CheckResult) {
    for board in store.boards() {
        let mut seen = HashSet::new();
        for list_id in &board.list_order {
            match store.list(list_id) {
                None => result.errors.push(CheckError::DanglingList {
                    board_id: board.id.clone(),
                    list_id: list_id.clone(),
                }),
                Some(list) if list.board_id != board.id => {
                    result.errors.push(CheckError::MisplacedList {
                        board_id: board.id.clone(),
                        list_id: list_id.clone(),
                        owner: list.board_id.clone(),
                    })
                }
                Some(_) => {
                    if !seen.insert(list_id.as_str()) {
                        result.errors.push(CheckError::DuplicateList {
                            board_id: board.id.clone(),
                            list_id: list_id.clone(),
                        });
                    }
                }
            }
        }
    }
    for list in store.lists() {
        match store.board(&list.board_id) {
            None => result.errors.push(CheckError::OrphanList {
                list_id: list.id.clone(),
                board_id: list.board_id.clone(),
            }),
            Some(board) if !board.list_order.contains(&list.id) => {
                result.errors.push(CheckError::UnorderedList {
                    board_id: board.id.clone(),
                    list_id: list.id.clone(),
                })
            }
            Some(_) => {}
        }
    }
}

fn check_item_orders(store: &Store, result: &mut CheckResult) {
    for list in store.lists() {
        let mut seen = HashSet::new();
        for item_id in &list.item_order {
            match store.item(item_id) {
                None => result.errors.push(CheckError::DanglingItem {
                    list_id: list.id.clone(),
                    item_id: item_id.clone(),
                }),
                Some(item) if item.list_id != list.id => {
                    result.errors.push(CheckError::MisplacedItem {
                        list_id: list.id.clone(),
                        item_id: item_id.clone(),
                        owner: item.list_id.clone(),
                    })
                }
                Some(_) => {
                    if !seen.insert(item_id.as_str()) {
                        result.errors.push(CheckError::DuplicateItem {
                            list_id: list.id.clone(),
                            item_id: item_id.clone(),
                        });
                    }
                }
            }
        }
    }
    for item in store.items() {
        match store.list(&item.list_id) {
            None => result.errors.push(CheckError::OrphanItem {
                item_id: item.id.clone(),
                list_id: item.list_id.clone(),
            }),
            Some(list) => {
                if !list.item_order.contains(&item.id) {
                    result.errors.push(CheckError::UnorderedItem {
                        list_id: list.id.clone(),
                        item_id: item.id.clone(),
                    });
                }
                if list.board_id != item.board_id {
                    result.errors.push(CheckError::BoardMismatch {
                        item_id: item.id.clone(),
                        item_board: item.board_id.clone(),
                        list_board: list.board_id.clone(),
                    });
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Repair
// ---------------------------------------------------------------------------

/// Bring the store back in line with the invariants, returning the number
/// of entities and order entries that changed.
///
/// Orphaned lists and items are deleted (their owner is gone, so the
/// cascade that should have removed them is completed). Order sequences
/// drop dangling, misplaced and duplicate ids and gain any missing members
/// at the end, in table order. Item boards follow their list.
pub fn repair(store: &mut Store) -> usize {
    let mut fixes = 0;

    let boards: HashSet<String> = store.boards.keys().cloned().collect();
    let before = store.lists.len();
    store.lists.retain(|_, l| boards.contains(&l.board_id));
    fixes += before - store.lists.len();

    let lists: HashSet<String> = store.lists.keys().cloned().collect();
    let before = store.items.len();
    store.items.retain(|_, i| lists.contains(&i.list_id));
    fixes += before - store.items.len();

    for item in store.items.values_mut() {
        if let Some(list) = store.lists.get(&item.list_id)
            && list.board_id != item.board_id
        {
            item.board_id = list.board_id.clone();
            fixes += 1;
        }
    }

    let board_ids: Vec<String> = store.boards.keys().cloned().collect();
    fixes += rebuild(&mut store.board_order, &board_ids);

    for board in store.boards.values_mut() {
        let owned: Vec<String> = store
            .lists
            .values()
            .filter(|l| l.board_id == board.id)
            .map(|l| l.id.clone())
            .collect();
        fixes += rebuild(&mut board.list_order, &owned);
    }

    for list in store.lists.values_mut() {
        let owned: Vec<String> = store
            .items
            .values()
            .filter(|i| i.list_id == list.id)
            .map(|i| i.id.clone())
            .collect();
        fixes += rebuild(&mut list.item_order, &owned);
    }

    if fixes > 0 {
        warn!(fixes, "repaired store integrity");
    }
    fixes
}

/// Keep the members of `seq` that are in `members` (first occurrence only),
/// then append missing members. Returns how many entries were dropped or added.
fn rebuild(seq: &mut Vec<String>, members: &[String]) -> usize {
    let allowed: HashSet<&str> = members.iter().map(String::as_str).collect();
    let original_len = seq.len();
    let mut kept: Vec<String> = Vec::with_capacity(members.len());
    for id in seq.iter() {
        if allowed.contains(id.as_str()) {
            order_ops::append(&mut kept, id);
        }
    }
    let dropped = original_len - kept.len();
    let mut added = 0;
    for id in members {
        if order_ops::append(&mut kept, id) {
            added += 1;
        }
    }
    *seq = kept;
    dropped + added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{board_ops, item_ops, list_ops};
    use pretty_assertions::assert_eq;

    fn setup() -> Store {
        let mut store = Store::new();
        board_ops::add_board(&mut store, "b1", "Board").unwrap();
        list_ops::add_list(&mut store, "l1", "b1", "One").unwrap();
        list_ops::add_list(&mut store, "l2", "b1", "Two").unwrap();
        item_ops::add_item(&mut store, "i1", "l1", "b1", "a").unwrap();
        item_ops::add_item(&mut store, "i2", "l1", "b1", "b").unwrap();
        store
    }

    fn report(result: &CheckResult) -> String {
        result
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_consistent_store_is_valid() {
        let result = check_store(&setup());
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_detects_order_problems() {
        let mut store = setup();
        store.board_order.push("ghost".into());
        store.board_order.push("b1".into());
        store.lists.get_mut("l1").unwrap().item_order = vec!["i2".into(), "zz".into()];
        store.boards.get_mut("b1").unwrap().list_order = vec!["l2".into()];

        let result = check_store(&store);
        assert!(!result.valid);
        insta::assert_snapshot!(report(&result), @r"
        board order: unknown board ghost
        board order: duplicate board b1
        board b1: missing list l1
        list l1: unknown item zz
        list l1: missing item i1
        ");
    }

    #[test]
    fn test_detects_ownership_problems() {
        let mut store = setup();
        store.items.get_mut("i1").unwrap().list_id = "l2".into();
        store.items.get_mut("i2").unwrap().board_id = "b9".into();

        let result = check_store(&store);
        assert_eq!(
            result.errors,
            vec![
                CheckError::MisplacedItem {
                    list_id: "l1".into(),
                    item_id: "i1".into(),
                    owner: "l2".into(),
                },
                CheckError::UnorderedItem {
                    list_id: "l2".into(),
                    item_id: "i1".into(),
                },
                CheckError::BoardMismatch {
                    item_id: "i2".into(),
                    item_board: "b9".into(),
                    list_board: "b1".into(),
                },
            ]
        );
    }

    #[test]
    fn test_serializes_tagged() {
        let err = CheckError::OrphanItem {
            item_id: "i1".into(),
            list_id: "l9".into(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"type":"orphan_item","item_id":"i1","list_id":"l9"}"#);
    }

    #[test]
    fn test_repair_restores_invariants() {
        let mut store = setup();
        store.board_order = vec!["ghost".into(), "b1".into(), "b1".into()];
        store.boards.get_mut("b1").unwrap().list_order = vec!["l2".into()];
        store.lists.get_mut("l1").unwrap().item_order = vec!["i2".into(), "i2".into(), "zz".into()];
        store
            .items
            .insert("i9".into(), crate::model::Item::new("i9", "gone", "b1", "orphan"));

        let fixes = repair(&mut store);
        assert!(fixes > 0);
        assert!(check_store(&store).valid);
        assert_eq!(store.board_order(), &["b1".to_string()]);
        assert_eq!(store.list_order("b1").unwrap(), &["l2".to_string(), "l1".to_string()]);
        assert_eq!(store.item_order("l1").unwrap(), &["i2".to_string(), "i1".to_string()]);
        assert!(store.item("i9").is_none());
    }

    #[test]
    fn test_repair_on_consistent_store_changes_nothing() {
        let mut store = setup();
        let before = store.clone();
        assert_eq!(repair(&mut store), 0);
        assert_eq!(store, before);
    }
}
