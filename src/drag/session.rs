use tracing::{debug, warn};

use super::collision::{CollisionResolver, DragProbe, DropCandidate};
use crate::model::{Axis, Config, ContainerMap, EntityKind, Point, Rect, Store};
use crate::ops::order_ops::{self, OrderSnapshot};

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Board,
    List,
    Item,
}

impl DragKind {
    /// Boards and lists are reordered as whole containers; items are leaves.
    pub fn is_container(self) -> bool {
        !matches!(self, DragKind::Item)
    }
}

/// The independent drag area a session runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortableRoot {
    /// The board list in the sidebar
    Sidebar,
    /// One board's lists and items
    Board(String),
}

/// Error type for drag session transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("already dragging {0}")]
    AlreadyDragging(String),
    #[error("no drag in progress")]
    NotDragging,
    #[error("nothing to drag with ID {0}")]
    NotFound(String),
    #[error("{given} is not being dragged (active: {active})")]
    WrongDraggedId { given: String, active: String },
}

/// Geometry reported by the view for one pointer or keyboard move
#[derive(Debug, Clone, PartialEq)]
pub struct DragMove {
    /// `None` for keyboard drags
    pub pointer: Option<Point>,
    /// Current (translated) rectangle of the dragged element
    pub active_rect: Rect,
    pub candidates: Vec<DropCandidate>,
}

/// Why an over event was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotDragging,
    WrongDraggedId,
    /// The board the drag runs in was deleted
    RootMissing,
    MalformedGeometry,
    /// The dragged item or the target is in no known container
    NotInContainer,
    /// The target's container can't hold items
    InvalidDestination,
}

/// Result of one over event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverOutcome {
    /// Nothing under the drag; valid, nothing changes
    NoTarget,
    /// A target was found but nothing was mutated
    Hovering { target: String },
    /// The dragged item was provisionally moved into another list
    Moved {
        target: String,
        from_list: String,
        to_list: String,
        index: usize,
    },
    Ignored(IgnoreReason),
}

/// Result of committing a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Unchanged,
    /// Moved within its own scope
    Reordered { id: String, from: usize, to: usize },
    /// Ended up in a different list than it started in
    MovedToList {
        id: String,
        list_id: String,
        index: usize,
    },
}

#[derive(Debug)]
struct ActiveDrag {
    id: String,
    kind: DragKind,
    root: SortableRoot,
    snapshot: OrderSnapshot,
    resolver: CollisionResolver,
    /// Set by an over event that moved the item into another list, consumed
    /// by the next one
    recently_moved: bool,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Dragging(Box<ActiveDrag>),
}

/// Drives one drag gesture at a time against a `Store`.
///
/// `start` snapshots every order sequence, `over` applies provisional
/// cross-list moves for items, `end` commits the final position and
/// `cancel` rolls back to the snapshot.
#[derive(Debug, Default)]
pub struct DragController {
    item_axis: Axis,
    phase: Phase,
}

impl DragController {
    pub fn new(config: &Config) -> Self {
        DragController {
            item_axis: config.sorting.item_axis,
            phase: Phase::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    pub fn active_id(&self) -> Option<&str> {
        match &self.phase {
            Phase::Dragging(active) => Some(&active.id),
            Phase::Idle => None,
        }
    }

    pub fn active_kind(&self) -> Option<DragKind> {
        match &self.phase {
            Phase::Dragging(active) => Some(active.kind),
            Phase::Idle => None,
        }
    }

    pub fn root(&self) -> Option<&SortableRoot> {
        match &self.phase {
            Phase::Dragging(active) => Some(&active.root),
            Phase::Idle => None,
        }
    }

    /// Last target the resolver settled on during this drag
    pub fn last_over(&self) -> Option<&str> {
        match &self.phase {
            Phase::Dragging(active) => active.resolver.last_over(),
            Phase::Idle => None,
        }
    }

    // ---------------------------------------------------------------------
    // Start
    // ---------------------------------------------------------------------

    /// Begin dragging `id` (a board, list or item).
    pub fn start(&mut self, store: &Store, id: &str) -> Result<DragKind, DragError> {
        if let Phase::Dragging(active) = &self.phase {
            return Err(DragError::AlreadyDragging(active.id.clone()));
        }
        let (kind, root) = match store.kind_of(id) {
            Some(EntityKind::Board) => (DragKind::Board, SortableRoot::Sidebar),
            Some(EntityKind::List) => {
                let board_id = store.list(id).map(|l| l.board_id.clone());
                (DragKind::List, SortableRoot::Board(board_id.unwrap_or_default()))
            }
            Some(EntityKind::Item) => {
                let board_id = store.item(id).map(|i| i.board_id.clone());
                (DragKind::Item, SortableRoot::Board(board_id.unwrap_or_default()))
            }
            None => return Err(DragError::NotFound(id.to_string())),
        };
        debug!(id, ?kind, ?root, "drag start");
        self.phase = Phase::Dragging(Box::new(ActiveDrag {
            id: id.to_string(),
            kind,
            root,
            snapshot: OrderSnapshot::capture(store),
            resolver: CollisionResolver::new(),
            recently_moved: false,
        }));
        Ok(kind)
    }

    // ---------------------------------------------------------------------
    // Over
    // ---------------------------------------------------------------------

    /// Handle one move of the drag. Never fails: anything unexpected skips
    /// this event and leaves the session as it was.
    pub fn over(&mut self, store: &mut Store, dragged_id: &str, mv: &DragMove) -> OverOutcome {
        let item_axis = self.item_axis;
        let Phase::Dragging(active) = &mut self.phase else {
            return OverOutcome::Ignored(IgnoreReason::NotDragging);
        };
        let active = active.as_mut();
        if active.id != dragged_id {
            warn!(given = dragged_id, active = %active.id, "over event for another drag");
            return OverOutcome::Ignored(IgnoreReason::WrongDraggedId);
        }
        if !mv.active_rect.is_valid() {
            warn!(id = dragged_id, rect = ?mv.active_rect, "malformed drag rectangle");
            return OverOutcome::Ignored(IgnoreReason::MalformedGeometry);
        }
        let Some(containers) = containers_for(store, &active.root) else {
            return OverOutcome::Ignored(IgnoreReason::RootMissing);
        };

        let candidates: Vec<DropCandidate> = mv
            .candidates
            .iter()
            .filter(|c| c.rect.is_valid())
            .cloned()
            .collect();
        let pointer = mv.pointer.filter(|p| p.is_finite());
        let probe = DragProbe {
            active_id: &active.id,
            active_rect: mv.active_rect,
            pointer,
            candidates: &candidates,
        };

        let target = active
            .resolver
            .resolve(&containers, &probe, active.recently_moved);
        active.recently_moved = false;

        let Some(target) = target else {
            return OverOutcome::NoTarget;
        };
        if active.kind.is_container() {
            // container order is only decided on drop
            return OverOutcome::Hovering { target };
        }

        let (Some(from), Some(to)) = (
            containers.find_container(&active.id),
            containers.find_container(&target),
        ) else {
            return OverOutcome::Ignored(IgnoreReason::NotInContainer);
        };
        if from == to {
            return OverOutcome::Hovering { target };
        }
        if store.list(to).is_none() {
            return OverOutcome::Ignored(IgnoreReason::InvalidDestination);
        }

        let reference = pointer.unwrap_or_else(|| mv.active_rect.center());
        let index = insertion_index(&containers, to, &target, &candidates, reference, item_axis);
        match order_ops::move_item_to_list(store, &active.id, to, index) {
            Ok(index) => {
                active.recently_moved = true;
                debug!(id = %active.id, from, to, index, "provisional move");
                OverOutcome::Moved {
                    target,
                    from_list: from.to_string(),
                    to_list: to.to_string(),
                    index,
                }
            }
            Err(e) => {
                warn!(id = %active.id, error = %e, "provisional move failed");
                OverOutcome::Ignored(IgnoreReason::InvalidDestination)
            }
        }
    }

    // ---------------------------------------------------------------------
    // End
    // ---------------------------------------------------------------------

    /// Drop the dragged entity on `target` (the last resolved target, or
    /// `None` when the drop happened over nothing) and close the session.
    pub fn end(
        &mut self,
        store: &mut Store,
        dragged_id: &str,
        target: Option<&str>,
    ) -> Result<DropOutcome, DragError> {
        match &self.phase {
            Phase::Idle => return Err(DragError::NotDragging),
            Phase::Dragging(active) if active.id != dragged_id => {
                return Err(DragError::WrongDraggedId {
                    given: dragged_id.to_string(),
                    active: active.id.clone(),
                });
            }
            Phase::Dragging(_) => {}
        }
        let Phase::Dragging(active) = std::mem::take(&mut self.phase) else {
            return Err(DragError::NotDragging);
        };

        let outcome = if active.kind.is_container() {
            commit_container(store, &active, target)
        } else {
            commit_item(store, &active, target)
        };
        debug!(id = %active.id, target, ?outcome, "drag end");
        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Cancel
    // ---------------------------------------------------------------------

    /// Abort the drag and roll every order sequence and item list back to
    /// where they were at `start`. Returns false when no drag was active.
    pub fn cancel(&mut self, store: &mut Store) -> bool {
        let Phase::Dragging(active) = std::mem::take(&mut self.phase) else {
            return false;
        };
        active.snapshot.restore(store);
        debug!(id = %active.id, "drag cancelled");
        true
    }
}

fn containers_for(store: &Store, root: &SortableRoot) -> Option<ContainerMap> {
    match root {
        SortableRoot::Sidebar => Some(store.sidebar()),
        SortableRoot::Board(board_id) => store.lists_and_items(board_id),
    }
}

/// Where an item entering `container` goes: the end when hovering the
/// container itself, otherwise at the hovered sibling, or just after it when
/// the reference point is past the sibling's midpoint.
fn insertion_index(
    containers: &ContainerMap,
    container: &str,
    target: &str,
    candidates: &[DropCandidate],
    reference: Point,
    axis: Axis,
) -> usize {
    let siblings = containers.children(container).unwrap_or(&[]);
    if target == container {
        return siblings.len();
    }
    let Some(index) = siblings.iter().position(|s| s == target) else {
        return siblings.len();
    };
    let past = candidates
        .iter()
        .find(|c| c.id == target)
        .is_some_and(|c| c.rect.is_past_midpoint(reference, axis));
    if past { index + 1 } else { index }
}

/// Container drops compare positions in the order captured at `start`;
/// containers never move during the drag, so that is also their current
/// order.
fn commit_container(store: &mut Store, active: &ActiveDrag, target: Option<&str>) -> DropOutcome {
    let Some(target) = target else {
        return DropOutcome::Unchanged;
    };
    let original = match &active.root {
        SortableRoot::Sidebar => active.snapshot.board_order(),
        SortableRoot::Board(board_id) => active.snapshot.list_order(board_id).unwrap_or(&[]),
    };
    let from = original.iter().position(|id| *id == active.id);
    let to = original.iter().position(|id| id == target);
    let (Some(from), Some(to)) = (from, to) else {
        return DropOutcome::Unchanged;
    };
    if from == to {
        return DropOutcome::Unchanged;
    }

    let moved = match active.kind {
        DragKind::Board => order_ops::move_board(store, &active.id, to),
        _ => order_ops::move_list(store, &active.id, to),
    };
    match moved {
        Ok(to) => DropOutcome::Reordered {
            id: active.id.clone(),
            from,
            to,
        },
        Err(e) => {
            warn!(id = %active.id, error = %e, "container drop failed");
            DropOutcome::Unchanged
        }
    }
}

fn commit_item(store: &mut Store, active: &ActiveDrag, target: Option<&str>) -> DropOutcome {
    let containers = match (&active.root, target) {
        (SortableRoot::Board(board_id), Some(_)) => store.lists_and_items(board_id),
        _ => None,
    };
    let (Some(containers), Some(target)) = (containers, target) else {
        return settled(store, active);
    };
    let (Some(current), Some(over)) = (
        containers.find_container(&active.id),
        containers.find_container(target),
    ) else {
        return settled(store, active);
    };

    if current == over {
        if target == over {
            return settled(store, active);
        }
        let from = containers.index_in(current, &active.id);
        let to = containers.index_in(over, target);
        let (Some(from), Some(to)) = (from, to) else {
            return settled(store, active);
        };
        if from == to {
            return settled(store, active);
        }
        return match order_ops::move_item_within_list(store, &active.id, to) {
            Ok(to) => DropOutcome::Reordered {
                id: active.id.clone(),
                from,
                to,
            },
            Err(e) => {
                warn!(id = %active.id, error = %e, "item drop failed");
                settled(store, active)
            }
        };
    }

    // dropped on another list without an over event having moved it there
    if store.list(over).is_none() {
        return settled(store, active);
    }
    let index = containers
        .index_in(over, target)
        .unwrap_or_else(|| containers.children(over).map_or(0, <[String]>::len));
    if let Err(e) = order_ops::move_item_to_list(store, &active.id, over, index) {
        warn!(id = %active.id, error = %e, "item drop failed");
    }
    settled(store, active)
}

/// Report where the item ended up relative to where it started.
fn settled(store: &Store, active: &ActiveDrag) -> DropOutcome {
    let Some(item) = store.item(&active.id) else {
        return DropOutcome::Unchanged;
    };
    if active.snapshot.item_list(&active.id) == Some(item.list_id.as_str()) {
        return DropOutcome::Unchanged;
    }
    let index = store
        .item_order(&item.list_id)
        .and_then(|order| order.iter().position(|id| *id == active.id))
        .unwrap_or(0);
    DropOutcome::MovedToList {
        id: active.id.clone(),
        list_id: item.list_id.clone(),
        index,
    }
}
