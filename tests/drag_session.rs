use corkboard::drag::collision::{CollisionResolver, DragProbe};
use corkboard::drag::{
    Activation, DragController, DragMove, DropCandidate, DropOutcome, MouseButton, OverOutcome,
    PointerActivation, PressSource,
};
use corkboard::io::parse_config;
use corkboard::model::{ContainerMap, Point, Rect, Store};
use corkboard::ops::check::check_store;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

fn load_fixture(name: &str) -> Store {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", name, e));
    Store::from_json(&json).unwrap_or_else(|e| panic!("Bad fixture {}: {}", name, e))
}

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

const LIST_WIDTH: f64 = 200.0;
const LIST_GAP: f64 = 20.0;
const CARD_HEIGHT: f64 = 40.0;

/// Lay the board out the way a view would: lists in columns, cards stacked
/// from the top of each column.
fn measure(store: &Store, board_id: &str) -> Vec<DropCandidate> {
    let mut out = Vec::new();
    for (col, list) in store.lists_for_board(board_id).into_iter().enumerate() {
        let left = col as f64 * (LIST_WIDTH + LIST_GAP);
        out.push(DropCandidate::new(
            list.id.clone(),
            Rect::new(left, 0.0, LIST_WIDTH, 600.0),
        ));
        for (row, item) in store.items_for_list(&list.id).into_iter().enumerate() {
            out.push(DropCandidate::new(
                item.id.clone(),
                Rect::new(
                    left + 10.0,
                    40.0 + row as f64 * (CARD_HEIGHT + 10.0),
                    LIST_WIDTH - 20.0,
                    CARD_HEIGHT,
                ),
            ));
        }
    }
    out
}

fn move_to(store: &Store, x: f64, y: f64) -> DragMove {
    DragMove {
        pointer: Some(Point::new(x, y)),
        active_rect: Rect::new(x - 90.0, y - 20.0, LIST_WIDTH - 20.0, CARD_HEIGHT),
        candidates: measure(store, "b1"),
    }
}

#[test]
fn mouse_drag_into_another_list() {
    let mut store = load_fixture("groceries.json");
    let config = parse_config("[activation]\ndelay_ms = 100\n").unwrap();
    let mut sensor = PointerActivation::new(config.activation.clone());
    let mut drag = DragController::new(&config);

    // press on grapes, wiggle a little, then hold
    let t0 = Instant::now();
    assert!(sensor.press(
        PressSource::Mouse(MouseButton::Primary),
        Point::new(100.0, 110.0),
        false,
        t0
    ));
    assert_eq!(sensor.moved(Point::new(101.0, 111.0), t0), Activation::Pending);
    assert_eq!(
        sensor.tick(t0 + Duration::from_millis(100)),
        Activation::Activated
    );
    drag.start(&store, "grapes").unwrap();

    // across to costco, lower half of eggs
    let mv = move_to(&store, 320.0, 75.0);
    let outcome = drag.over(&mut store, "grapes", &mv);
    assert_eq!(
        outcome,
        OverOutcome::Moved {
            target: "eggs".into(),
            from_list: "walmart".into(),
            to_list: "costco".into(),
            index: 1,
        }
    );
    assert_eq!(store.item_order("costco").unwrap(), ids(&["eggs", "grapes"]).as_slice());

    // the view re-measures; grapes now sits under the pointer in costco
    let mv = move_to(&store, 320.0, 110.0);
    let outcome = drag.over(&mut store, "grapes", &mv);
    assert_eq!(
        outcome,
        OverOutcome::Hovering {
            target: "grapes".into()
        }
    );

    assert!(sensor.release());
    let last = drag.last_over().map(str::to_string);
    let dropped = drag.end(&mut store, "grapes", last.as_deref()).unwrap();
    assert_eq!(
        dropped,
        DropOutcome::MovedToList {
            id: "grapes".into(),
            list_id: "costco".into(),
            index: 1,
        }
    );
    assert_eq!(store.item_order("walmart").unwrap(), ids(&["bananas", "milk"]).as_slice());
    assert_eq!(store.item("grapes").unwrap().board_id, "b1");
    assert!(check_store(&store).valid);
}

#[test]
fn upper_half_of_sibling_inserts_before_it() {
    let mut store = load_fixture("groceries.json");
    let mut drag = DragController::default();
    drag.start(&store, "milk").unwrap();
    let mv = move_to(&store, 320.0, 45.0);
    let outcome = drag.over(&mut store, "milk", &mv);
    assert!(matches!(outcome, OverOutcome::Moved { index: 0, .. }));
    assert_eq!(store.item_order("costco").unwrap(), ids(&["milk", "eggs"]).as_slice());
}

#[test]
fn cancel_after_many_moves_restores_snapshot() {
    let mut store = load_fixture("groceries.json");
    let before = store.clone();
    let mut drag = DragController::default();
    drag.start(&store, "bananas").unwrap();

    let path = [
        (320.0, 60.0),
        (540.0, 300.0),
        (100.0, 150.0),
        (330.0, 90.0),
        (2000.0, 2000.0),
        (560.0, 50.0),
    ];
    let mut moved = 0;
    for (x, y) in path {
        let mv = move_to(&store, x, y);
        if let OverOutcome::Moved { .. } = drag.over(&mut store, "bananas", &mv) {
            moved += 1;
        }
    }
    assert!(moved >= 3);
    assert_ne!(store, before);

    assert!(drag.cancel(&mut store));
    assert_eq!(store, before);
}

#[test]
fn dropping_a_list_uses_pre_drag_positions() {
    let mut store = load_fixture("groceries.json");
    let mut drag = DragController::default();
    drag.start(&store, "target").unwrap();
    let dropped = drag.end(&mut store, "target", Some("walmart")).unwrap();
    assert_eq!(
        dropped,
        DropOutcome::Reordered {
            id: "target".into(),
            from: 2,
            to: 0,
        }
    );
    assert_eq!(
        store.list_order("b1").unwrap(),
        ids(&["target", "walmart", "costco"]).as_slice()
    );
}

#[test]
fn pointer_over_item_beats_its_list() {
    // list x (empty) and list y holding item3; the pointer hits y and item3
    let mut containers = ContainerMap::new();
    containers.insert("x", vec![]);
    containers.insert("y", ids(&["item3"]));
    let candidates = vec![
        DropCandidate::new("x", Rect::new(0.0, 0.0, 200.0, 400.0)),
        DropCandidate::new("y", Rect::new(190.0, 0.0, 200.0, 400.0)),
        DropCandidate::new("item3", Rect::new(195.0, 40.0, 180.0, 40.0)),
    ];
    let probe = DragProbe {
        active_id: "dragged",
        active_rect: Rect::new(110.0, 40.0, 180.0, 40.0),
        pointer: Some(Point::new(199.0, 60.0)),
        candidates: &candidates,
    };
    let mut resolver = CollisionResolver::new();
    assert_eq!(
        resolver.resolve(&containers, &probe, false).as_deref(),
        Some("item3")
    );
}
