#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn shot(id: u64, player: u64, sequence: u32) -> Element {
    Element::Shot(Shot {
        id: ElementId(id),
        player_id: ElementId(player),
        shot_type: "forehand".into(),
        start_x: 0.0,
        start_y: 0.0,
        end_x: 10.0,
        end_y: 10.0,
        sequence,
    })
}

fn movement(id: u64, player: u64, sequence: u32) -> Element {
    Element::Movement(Movement {
        id: ElementId(id),
        player_id: ElementId(player),
        start_x: 0.0,
        start_y: 0.0,
        end_x: 5.0,
        end_y: 5.0,
        sequence,
    })
}

fn player(id: u64, x: f64, y: f64) -> Element {
    Element::Player(PlayerMark { id: ElementId(id), x, y })
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn player_serializes_with_type_tag() {
    let json = serde_json::to_value(player(7, 100.0, 120.0)).unwrap();
    assert_eq!(json, json!({ "type": "player", "id": 7, "x": 100.0, "y": 120.0 }));
}

#[test]
fn shot_deserializes_camel_case_fields() {
    let el: Element = serde_json::from_value(json!({
        "type": "shot",
        "id": 3,
        "playerId": 1,
        "shotType": "backhand",
        "startX": 100.0,
        "startY": 100.0,
        "endX": 100.0,
        "endY": 300.0,
        "sequence": 4
    }))
    .unwrap();
    let Element::Shot(s) = el else {
        panic!("expected shot");
    };
    assert_eq!(s.player_id, ElementId(1));
    assert_eq!(s.shot_type, "backhand");
    assert_eq!(s.end(), pt(100.0, 300.0));
    assert_eq!(s.sequence, 4);
}

#[test]
fn missing_sequence_defaults_to_one() {
    let el: Element = serde_json::from_value(json!({
        "type": "movement",
        "id": 3,
        "playerId": 1,
        "startX": 0.0,
        "startY": 0.0,
        "endX": 1.0,
        "endY": 1.0
    }))
    .unwrap();
    assert_eq!(el.sequence(), Some(1));
}

#[test]
fn null_sequence_defaults_to_one() {
    let el: Element = serde_json::from_value(json!({
        "type": "shot",
        "id": 4,
        "playerId": 1,
        "shotType": "volley",
        "startX": 0.0,
        "startY": 0.0,
        "endX": 1.0,
        "endY": 1.0,
        "sequence": null
    }))
    .unwrap();
    assert_eq!(el.sequence(), Some(1));
}

#[test]
fn fractional_ids_round_on_load() {
    let el: Element = serde_json::from_value(json!({
        "type": "movement",
        "id": 1_712_345_678_901.42,
        "playerId": 1_712_345_678_100.6,
        "startX": 0.0,
        "startY": 0.0,
        "endX": 1.0,
        "endY": 1.0,
        "sequence": 2
    }))
    .unwrap();
    assert_eq!(el.id(), ElementId(1_712_345_678_901));
    assert_eq!(el.player_id(), Some(ElementId(1_712_345_678_101)));
}

#[test]
fn negative_id_is_rejected() {
    let res: Result<Element, _> = serde_json::from_value(json!({ "type": "player", "id": -1.5, "x": 0.0, "y": 0.0 }));
    assert!(res.is_err());
}

#[test]
fn unknown_type_is_rejected() {
    let res: Result<Element, _> = serde_json::from_value(json!({ "type": "cone", "id": 1 }));
    assert!(res.is_err());
}

// =============================================================
// Rally order
// =============================================================

#[test]
fn rally_order_sorts_by_sequence() {
    let els = vec![player(1, 0.0, 0.0), shot(10, 1, 3), movement(11, 1, 1), shot(12, 1, 2)];
    let order: Vec<u32> = rally_order(&els).iter().map(RallyStep::order).collect();
    assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn rally_order_is_stable_for_equal_sequence() {
    let els = vec![shot(10, 1, 1), movement(11, 1, 1), shot(12, 1, 1)];
    let ids: Vec<ElementId> = rally_order(&els)
        .iter()
        .map(|step| match step {
            RallyStep::Shot(s) => s.id,
            RallyStep::Movement(m) => m.id,
        })
        .collect();
    assert_eq!(ids, vec![ElementId(10), ElementId(11), ElementId(12)]);
}

#[test]
fn rally_order_treats_zero_sequence_as_one() {
    let els = vec![shot(10, 1, 2), movement(11, 1, 0)];
    let first = rally_order(&els)[0];
    assert!(matches!(first, RallyStep::Movement(_)));
    assert_eq!(first.order(), 1);
}

// =============================================================
// Player numbering
// =============================================================

#[test]
fn player_number_ranks_by_id() {
    let els = vec![player(30, 0.0, 0.0), player(10, 0.0, 0.0), player(20, 0.0, 0.0)];
    assert_eq!(player_number(&els, ElementId(10)), Some(1));
    assert_eq!(player_number(&els, ElementId(20)), Some(2));
    assert_eq!(player_number(&els, ElementId(30)), Some(3));
    assert_eq!(player_number(&els, ElementId(99)), None);
}

// =============================================================
// Ids
// =============================================================

#[test]
fn sequential_ids_are_monotonic() {
    let mut ids = SequentialIds::default();
    assert_eq!(ids.next_id(), ElementId(1));
    assert_eq!(ids.next_id(), ElementId(2));
}

#[test]
fn sequential_ids_skip_past_observed() {
    let mut ids = SequentialIds::default();
    ids.observe(ElementId(41));
    assert_eq!(ids.next_id(), ElementId(42));
    ids.observe(ElementId(5));
    assert_eq!(ids.next_id(), ElementId(43));
}

// =============================================================
// Store
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = AnnotationStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(!store.has_animatable());
}

#[test]
fn add_player_assigns_unique_ids() {
    let mut store = AnnotationStore::new();
    let a = store.add_player(pt(10.0, 10.0));
    let b = store.add_player(pt(20.0, 20.0));
    assert_ne!(a, b);
    assert_eq!(store.player(a).map(PlayerMark::position), Some(pt(10.0, 10.0)));
}

#[test]
fn add_shot_captures_start_and_increments_sequence() {
    let mut store = AnnotationStore::new();
    let p = store.add_player(pt(100.0, 100.0));
    store.add_shot(p, "serve", pt(100.0, 100.0), pt(100.0, 300.0)).unwrap();
    store.add_movement(p, pt(100.0, 100.0), pt(120.0, 100.0)).unwrap();
    let seqs: Vec<Option<u32>> = store.elements().iter().map(Element::sequence).collect();
    assert_eq!(seqs, vec![None, Some(1), Some(2)]);
    assert!(store.has_animatable());
}

#[test]
fn add_shot_for_unknown_player_fails_without_mutation() {
    let mut store = AnnotationStore::new();
    let err = store.add_shot(ElementId(9), "lob", pt(0.0, 0.0), pt(1.0, 1.0)).unwrap_err();
    assert_eq!(err, EditError::UnknownPlayer(ElementId(9)));
    assert!(store.is_empty());
}

#[test]
fn next_sequence_follows_highest_not_count() {
    let mut store = AnnotationStore::new();
    store.load(vec![player(1, 0.0, 0.0), shot(2, 1, 7), movement(3, 1, 2)]);
    assert_eq!(store.next_sequence(), 8);
}

#[test]
fn load_advances_id_counter_past_loaded_ids() {
    let mut store = AnnotationStore::new();
    store.load(vec![player(500, 0.0, 0.0)]);
    let fresh = store.add_player(pt(1.0, 1.0));
    assert_eq!(fresh, ElementId(501));
}

#[test]
fn clear_removes_everything() {
    let mut store = AnnotationStore::new();
    store.add_player(pt(1.0, 1.0));
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn flip_mirrors_x_coordinates_only() {
    let mut store = AnnotationStore::new();
    store.load(vec![
        player(1, 100.0, 50.0),
        Element::Shot(Shot {
            id: ElementId(2),
            player_id: ElementId(1),
            shot_type: String::new(),
            start_x: 100.0,
            start_y: 50.0,
            end_x: 250.0,
            end_y: 500.0,
            sequence: 1,
        }),
    ]);
    store.flip_horizontal(150.0);

    let Element::Player(p) = &store.elements()[0] else {
        panic!("expected player");
    };
    assert_eq!((p.x, p.y), (200.0, 50.0));
    let Element::Shot(s) = &store.elements()[1] else {
        panic!("expected shot");
    };
    assert_eq!((s.start_x, s.start_y, s.end_x, s.end_y), (200.0, 50.0, 50.0, 500.0));
    assert_eq!(s.start(), pt(100.0, 50.0).mirrored_x(150.0));
    assert_eq!(s.end(), pt(250.0, 500.0).mirrored_x(150.0));
}

#[test]
fn snapshot_is_isolated_from_later_mutation() {
    let mut store = AnnotationStore::new();
    store.add_player(pt(1.0, 1.0));
    let before = store.snapshot();
    store.add_player(pt(2.0, 2.0));
    store.flip_horizontal(150.0);
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].as_player().map(PlayerMark::position), Some(pt(1.0, 1.0)));
}

#[test]
fn replicate_assigns_fresh_ids_and_remaps_players() {
    let source = vec![player(1, 10.0, 10.0), player(2, 20.0, 20.0), shot(3, 2, 1), movement(4, 1, 2)];
    let mut store = AnnotationStore::new();
    store.load(source.clone());
    store.replicate(&source);

    let els = store.elements();
    assert_eq!(els.len(), 4);
    for (copy, orig) in els.iter().zip(&source) {
        assert_ne!(copy.id(), orig.id());
    }
    let new_p1 = els[0].id();
    let new_p2 = els[1].id();
    assert_eq!(els[2].player_id(), Some(new_p2));
    assert_eq!(els[3].player_id(), Some(new_p1));
}

#[test]
fn replicate_keeps_dangling_player_reference() {
    let source = vec![shot(3, 77, 1)];
    let mut store = AnnotationStore::new();
    store.replicate(&source);
    assert_eq!(store.elements()[0].player_id(), Some(ElementId(77)));
}

#[test]
fn store_player_number_matches_free_function() {
    let mut store = AnnotationStore::new();
    let a = store.add_player(pt(0.0, 0.0));
    let b = store.add_player(pt(0.0, 0.0));
    assert_eq!(store.player_number(a), Some(1));
    assert_eq!(store.player_number(b), Some(2));
    assert_eq!(store.players().count(), 2);
}
