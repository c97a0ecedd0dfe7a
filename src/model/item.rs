use serde::{Deserialize, Serialize};

/// A card. The value is opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub value: String,
    /// Owning list; changes when the item is dragged to another list
    pub list_id: String,
    /// Owning board, duplicated from the list so board deletes can cascade
    /// without a list lookup
    pub board_id: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        list_id: impl Into<String>,
        board_id: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Item {
            id: id.into(),
            value: value.into(),
            list_id: list_id.into(),
            board_id: board_id.into(),
        }
    }
}

/// Partial update for an item. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub value: Option<String>,
}

impl ItemPatch {
    pub fn value(value: impl Into<String>) -> Self {
        ItemPatch {
            value: Some(value.into()),
        }
    }

    pub(crate) fn apply(self, item: &mut Item) {
        if let Some(value) = self.value {
            item.value = value;
        }
    }
}
