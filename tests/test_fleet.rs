use alien_invasion::fleet::*;
use alien_invasion::settings::Settings;

fn settings_800x600() -> Settings {
    Settings {
        screen_width: 800.0,
        screen_height: 600.0,
        alien_width: 20.0,
        alien_height: 15.0,
        ..Settings::default()
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[test]
fn layout_800x600_with_20x15_invaders() {
    let positions = fleet_positions(800.0, 600.0, 20.0, 15.0);
    // rows: y = 37, 67, ... while y < 600 - 14*15 = 390 → 12 rows
    // cols: x = 20, 60, ... while x < 800 - 40 = 760 → 19 cols
    assert_eq!(positions.len(), 12 * 19);
    assert_eq!(positions[0], (20.0, 37.0));
    assert_eq!(positions[1], (60.0, 37.0));
    assert_eq!(positions[19], (20.0, 67.0));
    assert_eq!(*positions.last().unwrap(), (740.0, 367.0));
}

#[test]
fn layout_is_deterministic() {
    let a = fleet_positions(800.0, 600.0, 20.0, 15.0);
    let b = fleet_positions(800.0, 600.0, 20.0, 15.0);
    assert_eq!(a, b);
}

#[test]
fn layout_default_settings() {
    let s = Settings::default();
    let positions = fleet_positions(s.screen_width, s.screen_height, s.alien_width, s.alien_height);
    // 6 rows of 14 on 1200x800 with 40x30 invaders
    assert_eq!(positions.len(), 6 * 14);
}

// ── Degenerate screens ────────────────────────────────────────────────────────

#[test]
fn screen_too_small_gives_empty_fleet() {
    // 14 rows of clearance alone exceed the screen height
    assert!(fleet_positions(800.0, 200.0, 20.0, 15.0).is_empty());
    // Invader wider than the screen
    assert!(fleet_positions(30.0, 600.0, 20.0, 15.0).is_empty());
    // Invader box bigger than the whole screen
    assert!(fleet_positions(10.0, 10.0, 20.0, 15.0).is_empty());
}

#[test]
fn non_positive_or_non_finite_box_gives_empty_fleet() {
    assert!(fleet_positions(800.0, 600.0, 0.0, 15.0).is_empty());
    assert!(fleet_positions(800.0, 600.0, 20.0, -1.0).is_empty());
    assert!(fleet_positions(800.0, 600.0, f32::NAN, 15.0).is_empty());
    assert!(fleet_positions(f32::INFINITY, 600.0, 20.0, 15.0).is_empty());
}

#[test]
fn tiny_invader_box_gives_bounded_grid() {
    // 12 rows fit; columns would run to millions without the cap
    let positions = fleet_positions(800.0, 600.0, 1e-5, 15.0);
    assert_eq!(positions.len(), 12 * MAX_GRID_CELLS as usize);

    let positions = fleet_positions(800.0, 600.0, 1e-5, 1e-5);
    assert_eq!(positions.len(), (MAX_GRID_CELLS * MAX_GRID_CELLS) as usize);
}

// ── create_fleet ──────────────────────────────────────────────────────────────

#[test]
fn create_fleet_places_sized_invaders() {
    let s = settings_800x600();
    let fleet = create_fleet(&s);
    assert_eq!(fleet.len(), 228);
    assert!(fleet.iter().all(|i| i.width == 20.0 && i.height == 15.0));
    assert_eq!((fleet[0].x, fleet[0].y), (20.0, 37.0));
}

#[test]
fn fresh_fleet_touches_no_edge() {
    let s = settings_800x600();
    assert!(create_fleet(&s).iter().all(|i| !i.at_edge(s.screen_width)));
}
