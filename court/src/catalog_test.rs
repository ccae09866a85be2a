use serde_json::json;

use super::*;
use crate::doc::ElementId;
use crate::error::ErrorCode;

fn catalog() -> Catalog {
    serde_json::from_value(json!({
        "drills": [
            {
                "id": 1,
                "name": "Cross-court rally",
                "description": "Deep forehands",
                "duration": 10,
                "courtElements": [
                    { "type": "player", "id": 100, "x": 100.0, "y": 100.0 },
                    { "type": "shot", "id": 101, "playerId": 100, "shotType": "forehand",
                      "startX": 100.0, "startY": 100.0, "endX": 200.0, "endY": 500.0, "sequence": 1 }
                ]
            },
            { "id": 2, "name": "Footwork", "durationMinutes": 5 }
        ],
        "routines": [
            { "id": 7, "name": "Warmup", "description": "", "drillIds": [2, 99, 1] }
        ]
    }))
    .unwrap()
}

#[test]
fn deserializes_library_shape() {
    let cat = catalog();
    assert_eq!(cat.drills.len(), 2);
    assert_eq!(cat.drills[0].duration_minutes, 10);
    assert_eq!(cat.drills[1].duration_minutes, 5);
    assert!(cat.drills[1].court_elements.is_empty());
    assert!(cat.drills[0].has_animatable());
    assert!(!cat.drills[1].has_animatable());
}

#[test]
fn drill_serializes_camel_case() {
    let cat = catalog();
    let value = serde_json::to_value(&cat.drills[1]).unwrap();
    assert_eq!(value["durationMinutes"], 5);
    assert_eq!(value["courtElements"], json!([]));
}

#[test]
fn routine_drills_skip_missing_and_keep_order() {
    let cat = catalog();
    let routine = cat.routine(7).unwrap();
    let ids: Vec<i64> = cat.routine_drills(routine).iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(cat.routine_minutes(routine), 15);
}

#[test]
fn remove_drill_strips_it_from_routines() {
    let mut cat = catalog();
    let removed = cat.remove_drill(1).unwrap();
    assert_eq!(removed.name, "Cross-court rally");
    assert_eq!(cat.routine(7).map(|r| r.drill_ids.clone()), Some(vec![2, 99]));
}

#[test]
fn remove_missing_drill_fails() {
    let mut cat = catalog();
    let err = cat.remove_drill(42).unwrap_err();
    assert_eq!(err, CatalogError::DrillNotFound(42));
    assert_eq!(err.error_code(), "E_DRILL_NOT_FOUND");
    assert_eq!(cat.drills.len(), 2);
}

#[test]
fn remove_routine_keeps_drills() {
    let mut cat = catalog();
    cat.remove_routine(7).unwrap();
    assert!(cat.routines.is_empty());
    assert_eq!(cat.drills.len(), 2);
    assert_eq!(cat.remove_routine(7), Err(CatalogError::RoutineNotFound(7)));
}

#[test]
fn replicate_drill_copies_with_fresh_element_ids() {
    let mut cat = catalog();
    let id = cat.replicate_drill(1).unwrap();
    assert_eq!(id, 3);
    let copy = cat.drill(3).unwrap();
    assert_eq!(copy.name, "Cross-court rally (Copy)");
    assert_eq!(copy.duration_minutes, 10);
    assert_eq!(copy.court_elements.len(), 2);

    let player_id = copy.court_elements[0].id();
    assert_ne!(player_id, ElementId(100));
    assert_ne!(copy.court_elements[1].id(), ElementId(101));
    assert_eq!(copy.court_elements[1].player_id(), Some(player_id));

    // Source untouched.
    assert_eq!(cat.drill(1).map(|d| d.court_elements[0].id()), Some(ElementId(100)));
}

#[test]
fn replicate_routine_copies_drill_list() {
    let mut cat = catalog();
    let id = cat.replicate_routine(7).unwrap();
    let copy = cat.routine(id).unwrap();
    assert_eq!(copy.id, 8);
    assert_eq!(copy.name, "Warmup (Copy)");
    assert_eq!(copy.drill_ids, vec![2, 99, 1]);
}

#[test]
fn replicate_missing_fails() {
    let mut cat = catalog();
    assert_eq!(cat.replicate_drill(5), Err(CatalogError::DrillNotFound(5)));
    assert_eq!(cat.replicate_routine(5), Err(CatalogError::RoutineNotFound(5)));
}

#[test]
fn replicate_into_empty_catalog_starts_ids_at_one() {
    let mut cat = Catalog::default();
    cat.drills.push(Drill {
        id: 0,
        name: "Solo".into(),
        description: String::new(),
        duration_minutes: 1,
        court_elements: Vec::new(),
    });
    assert_eq!(cat.replicate_drill(0), Ok(1));
}
