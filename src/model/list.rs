use serde::{Deserialize, Serialize};

/// A list (column) on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub title: String,
    /// Owning board
    pub board_id: String,
    /// Item ids in display order
    #[serde(default)]
    pub item_order: Vec<String>,
}

impl List {
    /// Create an empty list owned by `board_id`
    pub fn new(
        id: impl Into<String>,
        board_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        List {
            id: id.into(),
            title: title.into(),
            board_id: board_id.into(),
            item_order: Vec::new(),
        }
    }
}

/// Partial update for a list. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub title: Option<String>,
}

impl ListPatch {
    pub fn title(title: impl Into<String>) -> Self {
        ListPatch {
            title: Some(title.into()),
        }
    }

    pub(crate) fn apply(self, list: &mut List) {
        if let Some(title) = self.title {
            list.title = title;
        }
    }
}
