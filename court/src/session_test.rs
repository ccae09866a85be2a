use serde_json::json;

use super::*;
use crate::error::ErrorCode;

fn catalog() -> Catalog {
    serde_json::from_value(json!({
        "drills": [
            { "id": 1, "name": "Serve", "duration": 5, "courtElements": [
                { "type": "player", "id": 1, "x": 150.0, "y": 560.0 },
                { "type": "shot", "id": 2, "playerId": 1, "shotType": "serve",
                  "startX": 150.0, "startY": 560.0, "endX": 200.0, "endY": 200.0, "sequence": 1 }
            ] },
            { "id": 2, "name": "Stretch", "duration": 3, "courtElements": [] }
        ],
        "routines": [
            { "id": 1, "name": "Morning", "drillIds": [1, 2] },
            { "id": 2, "name": "Ghost", "drillIds": [40, 41] }
        ]
    }))
    .unwrap()
}

#[test]
fn start_requires_routine() {
    let err = Session::start(&catalog(), None).unwrap_err();
    assert_eq!(err.to_string(), "Please select a routine first.");
    assert_eq!(err.error_code(), "E_NO_ROUTINE_SELECTED");
}

#[test]
fn start_rejects_unknown_routine() {
    assert_eq!(Session::start(&catalog(), Some(9)), Err(SessionError::RoutineNotFound(9)));
}

#[test]
fn start_rejects_routine_without_valid_drills() {
    let err = Session::start(&catalog(), Some(2)).unwrap_err();
    assert_eq!(err, SessionError::NoValidDrills);
    assert_eq!(err.to_string(), "This routine has no valid drills.");
}

#[test]
fn steps_are_bounded() {
    let mut session = Session::start(&catalog(), Some(1)).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.current().map(|d| d.id), Some(1));
    assert!(!session.previous());
    assert!(session.next());
    assert!(session.is_last());
    assert!(!session.next());
    assert_eq!(session.current().map(|d| d.id), Some(2));
    assert!(session.previous());
    assert_eq!(session.index(), 0);
}

#[test]
fn animatable_follows_current_drill() {
    let mut session = Session::start(&catalog(), Some(1)).unwrap();
    assert!(session.has_animatable());
    assert_eq!(session.current_elements().len(), 2);
    session.next();
    assert!(!session.has_animatable());
    assert!(session.current_elements().is_empty());
}

#[test]
fn session_is_a_snapshot_of_the_catalog() {
    let mut cat = catalog();
    let session = Session::start(&cat, Some(1)).unwrap();
    cat.remove_drill(2).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.routine().name, "Morning");
}
