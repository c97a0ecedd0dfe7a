//! Drag-and-drop reorder engine: collision resolution across nested
//! sortable scopes, the drag session state machine, and activation sensors.

pub mod collision;
pub mod sensor;
pub mod session;

pub use collision::{CollisionResolver, DragProbe, DropCandidate};
pub use sensor::{Activation, KeyAction, KeyTarget, MouseButton, PointerActivation, PressSource};
pub use session::{
    DragController, DragError, DragKind, DragMove, DropOutcome, IgnoreReason, OverOutcome,
    SortableRoot,
};
