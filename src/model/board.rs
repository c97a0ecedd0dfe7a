use serde::{Deserialize, Serialize};

/// A board: a titled row of lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    /// List ids in display order
    #[serde(default)]
    pub list_order: Vec<String>,
}

impl Board {
    /// Create a board with no lists
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Board {
            id: id.into(),
            title: title.into(),
            list_order: Vec::new(),
        }
    }
}

/// Partial update for a board. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardPatch {
    pub title: Option<String>,
}

impl BoardPatch {
    pub fn title(title: impl Into<String>) -> Self {
        BoardPatch {
            title: Some(title.into()),
        }
    }

    pub(crate) fn apply(self, board: &mut Board) {
        if let Some(title) = self.title {
            board.title = title;
        }
    }
}
