//! State core and drag-and-drop reorder engine for a kanban board.
//!
//! [`model::Store`] holds boards, lists and items in normalized tables plus
//! the order sequences that define how they are displayed. All mutation goes
//! through [`ops`], which keeps orders and back-references consistent.
//! [`drag::DragController`] runs a drag gesture against the store:
//! provisional cross-list moves while hovering, a commit on drop and an
//! exact rollback on cancel.

pub mod drag;
pub mod io;
pub mod model;
pub mod ops;
pub mod util;

pub use drag::{DragController, DragError, DragKind, DragMove, DropOutcome, OverOutcome};
pub use model::{Config, Store};
pub use ops::EntityError;
pub use ops::order_ops::OrderError;
