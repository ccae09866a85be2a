use std::sync::Arc;

use court::doc::AnnotationStore;
use court::geom::Point;
use court::player::Player;

use super::*;

#[test]
fn painting_the_court_starts_a_new_frame() {
    let mut surface = LogSurface::new(SurfaceId::Preview);
    surface.draw(&court::render::annotations(&[], None)).unwrap();
    surface.draw_static_court(true).unwrap();
    assert_eq!(surface.court_draws(), 1);
    assert!(surface.last_commands().is_empty());
}

#[test]
fn player_frames_land_on_the_surface() {
    let mut store = AnnotationStore::new();
    let p = store.add_player(Point::new(100.0, 200.0));
    store.add_shot(p, "forehand", Point::new(100.0, 200.0), Point::new(100.0, 400.0)).unwrap();

    let mut player = Player::new(LogSurface::new(SurfaceId::Editor), Arc::new(store.elements().to_vec()));
    player.seek(500.0, 0.0).unwrap();

    let surface = player.surface();
    assert_eq!(surface.surface_id(), SurfaceId::Editor);
    assert_eq!(surface.timeline(), (500.0, 1000.0));
    assert!(!surface.last_commands().is_empty());
}
