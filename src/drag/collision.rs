use std::cmp::Ordering;

use crate::model::{ContainerMap, Point, Rect};

/// A droppable element as measured by the view
#[derive(Debug, Clone, PartialEq)]
pub struct DropCandidate {
    pub id: String,
    pub rect: Rect,
}

impl DropCandidate {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        DropCandidate {
            id: id.into(),
            rect,
        }
    }
}

/// A candidate hit by a collision strategy. Lower scores sort first.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub id: String,
    pub score: f64,
}

/// Everything the resolver needs to know about the current drag position
#[derive(Debug, Clone, Copy)]
pub struct DragProbe<'a> {
    pub active_id: &'a str,
    /// Where the dragged element is drawn right now
    pub active_rect: Rect,
    /// Pointer position; `None` for keyboard drags
    pub pointer: Option<Point>,
    pub candidates: &'a [DropCandidate],
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Candidates ordered by distance between their center and the center of
/// the dragged rectangle.
pub fn closest_center<'a>(
    active_rect: &Rect,
    candidates: impl IntoIterator<Item = &'a DropCandidate>,
) -> Vec<Collision> {
    let center = active_rect.center();
    sorted(
        candidates
            .into_iter()
            .map(|c| Collision {
                id: c.id.clone(),
                score: center.distance_to(c.rect.center()),
            })
            .collect(),
    )
}

/// Candidates containing the pointer, nearest first (mean distance from the
/// pointer to the rectangle's corners).
pub fn pointer_within<'a>(
    pointer: Point,
    candidates: impl IntoIterator<Item = &'a DropCandidate>,
) -> Vec<Collision> {
    sorted(
        candidates
            .into_iter()
            .filter(|c| c.rect.contains(pointer))
            .map(|c| {
                let total: f64 = c.rect.corners().iter().map(|p| pointer.distance_to(*p)).sum();
                Collision {
                    id: c.id.clone(),
                    score: total / 4.0,
                }
            })
            .collect(),
    )
}

/// Candidates overlapping the dragged rectangle, largest overlap first.
pub fn rect_intersection<'a>(
    active_rect: &Rect,
    candidates: impl IntoIterator<Item = &'a DropCandidate>,
) -> Vec<Collision> {
    sorted(
        candidates
            .into_iter()
            .filter_map(|c| {
                let ratio = active_rect.intersection_ratio(&c.rect);
                (ratio > 0.0).then(|| Collision {
                    id: c.id.clone(),
                    score: -ratio,
                })
            })
            .collect(),
    )
}

/// Stable sort, so equal scores keep the order the view reported them in.
fn sorted(mut hits: Vec<Collision>) -> Vec<Collision> {
    hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal));
    hits
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Picks the single drop target for a drag across nested sortable scopes.
///
/// Holds the last resolved target so that a drag which briefly leaves every
/// hit region (typically because the dragged item was just relocated and
/// the layout shifted) keeps pointing somewhere instead of flickering.
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    last_over: Option<String>,
}

impl CollisionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_over(&self) -> Option<&str> {
        self.last_over.as_deref()
    }

    pub fn reset(&mut self) {
        self.last_over = None;
    }

    /// Resolve the target for `probe`.
    ///
    /// `recently_moved` is set when the previous move relocated the dragged
    /// item into another container; the cached target is then pinned to the
    /// dragged item itself.
    pub fn resolve(
        &mut self,
        containers: &ContainerMap,
        probe: &DragProbe<'_>,
        recently_moved: bool,
    ) -> Option<String> {
        if containers.is_container(probe.active_id) {
            // Containers only ever collide with sibling containers: never an
            // item, and never the scope that holds the dragged container.
            let hits = closest_center(
                &probe.active_rect,
                probe.candidates.iter().filter(|c| {
                    containers.is_container(&c.id)
                        && containers.index_in(&c.id, probe.active_id).is_none()
                }),
            );
            if let Some(hit) = hits.into_iter().next() {
                return Some(hit.id);
            }
            return self.fallback(probe.active_id, recently_moved);
        }

        let pointer_hits = match probe.pointer {
            Some(pointer) => pointer_within(pointer, probe.candidates),
            None => Vec::new(),
        };
        let hits = if pointer_hits.is_empty() {
            rect_intersection(&probe.active_rect, probe.candidates)
        } else {
            pointer_hits
        };

        if let Some(first) = hits.into_iter().next() {
            let over = self.refine(containers, probe, first.id);
            self.last_over = Some(over.clone());
            return Some(over);
        }

        self.fallback(probe.active_id, recently_moved)
    }

    /// Narrow a hit on a non-empty container down to its nearest child.
    fn refine(&self, containers: &ContainerMap, probe: &DragProbe<'_>, over: String) -> String {
        let Some(children) = containers.children(&over) else {
            return over;
        };
        if children.is_empty() {
            return over;
        }
        let nearest = closest_center(
            &probe.active_rect,
            probe
                .candidates
                .iter()
                .filter(|c| c.id != over && children.contains(&c.id)),
        );
        match nearest.into_iter().next() {
            Some(hit) => hit.id,
            // children not measured; the container is the best we have
            None => over,
        }
    }

    fn fallback(&mut self, active_id: &str, recently_moved: bool) -> Option<String> {
        if recently_moved {
            self.last_over = Some(active_id.to_string());
        }
        self.last_over.clone()
    }
}
