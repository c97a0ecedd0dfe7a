use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::container::ContainerMap;
use super::item::Item;
use super::list::List;

/// The three entity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Board,
    List,
    Item,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Board => write!(f, "board"),
            EntityKind::List => write!(f, "list"),
            EntityKind::Item => write!(f, "item"),
        }
    }
}

/// Normalized board/list/item tables plus the sidebar board order.
///
/// Tables are insertion-ordered. Mutations go through `crate::ops`, which
/// keep the order sequences and back-references consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub(crate) boards: IndexMap<String, Board>,
    #[serde(default)]
    pub(crate) lists: IndexMap<String, List>,
    #[serde(default)]
    pub(crate) items: IndexMap<String, Item>,
    /// Sidebar display order of boards
    #[serde(default)]
    pub(crate) board_order: Vec<String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a preloaded state. The state is taken as-is; run
    /// `ops::check::check_store` to validate it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    // --- Lookups ---

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.get(id)
    }

    pub fn list(&self, id: &str) -> Option<&List> {
        self.lists.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Which table an id belongs to
    pub fn kind_of(&self, id: &str) -> Option<EntityKind> {
        if self.boards.contains_key(id) {
            Some(EntityKind::Board)
        } else if self.lists.contains_key(id) {
            Some(EntityKind::List)
        } else if self.items.contains_key(id) {
            Some(EntityKind::Item)
        } else {
            None
        }
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    pub fn lists(&self) -> impl Iterator<Item = &List> {
        self.lists.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    // --- Order accessors ---

    /// Sidebar order of existing boards. Dangling ids are skipped;
    /// `ops::check::check_store` reports them.
    pub fn board_order(&self) -> Vec<String> {
        self.boards_in_order()
            .into_iter()
            .map(|b| b.id.clone())
            .collect()
    }

    /// List order of a board, restricted to lists that exist and belong to it.
    pub fn list_order(&self, board_id: &str) -> Option<Vec<String>> {
        self.boards.contains_key(board_id).then(|| {
            self.lists_for_board(board_id)
                .into_iter()
                .map(|l| l.id.clone())
                .collect()
        })
    }

    /// Item order of a list, restricted to items that exist and belong to it.
    pub fn item_order(&self, list_id: &str) -> Option<Vec<String>> {
        self.lists.contains_key(list_id).then(|| {
            self.items_for_list(list_id)
                .into_iter()
                .map(|i| i.id.clone())
                .collect()
        })
    }

    /// Boards in sidebar order. Dangling ids are skipped.
    pub fn boards_in_order(&self) -> Vec<&Board> {
        self.board_order
            .iter()
            .filter_map(|id| self.boards.get(id))
            .collect()
    }

    /// Lists of a board in display order. Dangling ids and lists owned by
    /// another board are skipped.
    pub fn lists_for_board(&self, board_id: &str) -> Vec<&List> {
        let Some(board) = self.boards.get(board_id) else {
            return Vec::new();
        };
        board
            .list_order
            .iter()
            .filter_map(|id| self.lists.get(id))
            .filter(|l| l.board_id == board_id)
            .collect()
    }

    /// Items of a list in display order. Dangling ids and items owned by
    /// another list are skipped.
    pub fn items_for_list(&self, list_id: &str) -> Vec<&Item> {
        let Some(list) = self.lists.get(list_id) else {
            return Vec::new();
        };
        list.item_order
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|i| i.list_id == list_id)
            .collect()
    }

    /// Container membership for one board's content area: every list (in
    /// list order) mapped to its item order, then the board itself mapped to
    /// its list order.
    pub fn lists_and_items(&self, board_id: &str) -> Option<ContainerMap> {
        let board = self.boards.get(board_id)?;
        let lists = self.lists_for_board(board_id);
        let mut map = ContainerMap::new();
        for list in &lists {
            map.insert(list.id.clone(), self.item_order(&list.id).unwrap_or_default());
        }
        map.insert(
            board.id.clone(),
            lists.iter().map(|l| l.id.clone()).collect(),
        );
        Some(map)
    }

    /// Container membership for the sidebar: every board (in sidebar order)
    /// mapped to its list order.
    pub fn sidebar(&self) -> ContainerMap {
        self.boards_in_order()
            .into_iter()
            .map(|b| (b.id.clone(), self.list_order(&b.id).unwrap_or_default()))
            .collect()
    }

    // --- Crate-internal mutable access ---

    pub(crate) fn board_mut(&mut self, id: &str) -> Option<&mut Board> {
        self.boards.get_mut(id)
    }

    pub(crate) fn list_mut(&mut self, id: &str) -> Option<&mut List> {
        self.lists.get_mut(id)
    }

    pub(crate) fn item_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.get_mut(id)
    }
}
