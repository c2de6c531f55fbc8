//! Game-logic functions.
//!
//! Every function takes the `GameState` by `&mut` and applies one step of the
//! simulation or one state transition. Nothing here touches the terminal.

use std::time::Duration;

use crate::entities::{GameState, GameStatus, Invader, Projectile, Rect, Ship};
use crate::fleet::create_fleet;
use crate::settings::{Config, Settings};
use crate::stats::GameStats;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the process-start state: a fleet on screen, no game running.
pub fn init_state(settings: Settings) -> GameState {
    let play_button = Rect::centered_on(
        settings.screen_width / 2.0,
        settings.screen_height / 2.0,
        settings.button_width,
        settings.button_height,
    );
    let stats = GameStats::new(settings.ship_limit);
    let ship = Ship::new(&settings);
    let invaders = create_fleet(&settings);
    GameState {
        config: Config::new(settings),
        stats,
        ship,
        projectiles: Vec::new(),
        invaders,
        status: GameStatus::GameOver,
        play_button,
        cursor_visible: true,
        frame: 0,
    }
}

/// Full reset into a fresh game. Only valid while no game runs; returns
/// false (and changes nothing) otherwise.
pub fn start_new_game(state: &mut GameState) -> bool {
    if state.status.is_game_active() {
        return false;
    }
    state.config.reset_dynamic();
    state.stats.reset(state.config.settings.ship_limit);
    state.projectiles.clear();
    state.invaders = create_fleet(&state.config.settings);
    state.ship.center(&state.config.settings);
    state.ship.moving_left = false;
    state.ship.moving_right = false;
    state.status = GameStatus::Active;
    state.cursor_visible = false;
    log::info!(
        "New game: {} ships, {} invaders",
        state.stats.ships_left,
        state.invaders.len()
    );
    true
}

// ── Input-driven transitions ─────────────────────────────────────────────────

pub fn set_moving_left(state: &mut GameState, moving: bool) {
    state.ship.moving_left = moving;
}

pub fn set_moving_right(state: &mut GameState, moving: bool) {
    state.ship.moving_right = moving;
}

/// Fire from the ship's top-centre unless `bullets_allowed` projectiles are
/// already live. Returns whether a projectile was added.
pub fn fire_projectile(state: &mut GameState) -> bool {
    let settings = &state.config.settings;
    if state.projectiles.len() >= settings.bullets_allowed {
        log::debug!("Fire ignored, {} projectiles live", state.projectiles.len());
        return false;
    }
    let projectile = Projectile::from_ship(&state.ship, settings);
    state.projectiles.push(projectile);
    true
}

// ── Per-frame steps ──────────────────────────────────────────────────────────

/// Drop the fleet and reverse its direction if any invader touches a side.
/// Returns whether the direction changed.
pub fn check_fleet_edges(config: &mut Config, invaders: &mut [Invader]) -> bool {
    let screen_width = config.settings.screen_width;
    if !invaders.iter().any(|invader| invader.at_edge(screen_width)) {
        return false;
    }
    let drop = config.settings.fleet_drop_speed;
    for invader in invaders.iter_mut() {
        invader.y += drop;
    }
    config.change_fleet_direction();
    true
}

/// Move invaders, projectiles and the ship by one frame.
pub fn update_motion(state: &mut GameState) {
    let dynamic = state.config.dynamic;
    for invader in &mut state.invaders {
        invader.update(dynamic.alien_speed, dynamic.fleet_direction);
    }
    for projectile in &mut state.projectiles {
        projectile.update(dynamic.bullet_speed);
    }
    let settings = &state.config.settings;
    let clamp_to = settings.clamp_ship.then_some(settings.screen_width);
    state.ship.update(dynamic.ship_speed, clamp_to);
}

/// Drop projectiles that have left the top of the screen.
pub fn prune_projectiles(projectiles: &mut Vec<Projectile>) {
    projectiles.retain(|p| p.rect().bottom() > 0.0);
}

/// Remove every overlapping projectile/invader pair and score the kills.
///
/// Projectiles are processed in order; each removes all invaders it overlaps
/// and is itself removed. An invader already destroyed cannot be hit twice.
/// Returns the number of invaders destroyed.
pub fn resolve_projectile_hits(state: &mut GameState) -> usize {
    let points = state.config.dynamic.alien_points;
    let mut destroyed = 0;
    let mut score_gain: u32 = 0;

    let invaders = &mut state.invaders;
    state.projectiles.retain(|projectile| {
        let rect = projectile.rect();
        let before = invaders.len();
        invaders.retain(|invader| !invader.rect().intersects(&rect));
        let hits = before - invaders.len();
        if hits == 0 {
            return true;
        }
        destroyed += hits;
        score_gain = score_gain.saturating_add(points.saturating_mul(hits as u32));
        false
    });

    if score_gain > 0 && state.stats.add_points(score_gain) {
        log::debug!("New high score {}", state.stats.high_score);
    }
    destroyed
}

/// Respawn the next wave after the fleet is wiped out.
pub fn clear_wave(state: &mut GameState) {
    state.projectiles.clear();
    state.invaders = create_fleet(&state.config.settings);
    state.config.increase_speed();
    state.stats.level += 1;
    log::info!("Wave cleared, now level {}", state.stats.level);
}

/// True if any invader touches the ship or reaches the bottom of the screen.
pub fn ship_collision(state: &GameState) -> bool {
    let ship = state.ship.rect();
    let screen_height = state.config.settings.screen_height;
    state.invaders.iter().any(|invader| {
        let rect = invader.rect();
        rect.intersects(&ship) || rect.bottom() >= screen_height
    })
}

/// Lose a ship: reset the board and pause, or end the game if none are left.
pub fn ship_hit(state: &mut GameState) {
    if state.stats.ships_left > 0 {
        state.stats.ships_left -= 1;
        state.projectiles.clear();
        state.invaders = create_fleet(&state.config.settings);
        state.ship.center(&state.config.settings);
        state.status = GameStatus::Respawning {
            remaining: Duration::from_millis(state.config.settings.respawn_pause_ms),
        };
        log::info!("Ship hit, {} left", state.stats.ships_left);
    } else {
        state.status = GameStatus::GameOver;
        state.cursor_visible = true;
        log::info!(
            "Game over at level {} with score {}",
            state.stats.level,
            state.stats.score
        );
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// What happened during one call to [`tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub invaders_destroyed: usize,
    pub wave_cleared: bool,
    pub ship_hit: bool,
}

/// Advance the game by one frame of `elapsed` real time.
///
/// While `Active`: fleet edges, motion, pruning, projectile hits, wave clear,
/// then ship collision, in that order. While `Respawning` only the pause
/// timer runs. `GameOver` does nothing.
pub fn tick(state: &mut GameState, elapsed: Duration) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    match state.status {
        GameStatus::GameOver => return outcome,
        GameStatus::Respawning { remaining } => {
            let remaining = remaining.saturating_sub(elapsed);
            state.status = if remaining.is_zero() {
                GameStatus::Active
            } else {
                GameStatus::Respawning { remaining }
            };
            return outcome;
        }
        GameStatus::Active => {}
    }

    state.frame += 1;

    // ── 1. Fleet edges ───────────────────────────────────────────────────────
    check_fleet_edges(&mut state.config, &mut state.invaders);

    // ── 2. Motion ────────────────────────────────────────────────────────────
    update_motion(state);

    // ── 3. Projectiles off the top ───────────────────────────────────────────
    prune_projectiles(&mut state.projectiles);

    // ── 4. Projectile ↔ invader ──────────────────────────────────────────────
    outcome.invaders_destroyed = resolve_projectile_hits(state);

    // ── 5. Wave clear ────────────────────────────────────────────────────────
    if outcome.invaders_destroyed > 0 && state.invaders.is_empty() {
        clear_wave(state);
        outcome.wave_cleared = true;
    }

    // ── 6. Invader ↔ ship / bottom (first hit only) ──────────────────────────
    if ship_collision(state) {
        ship_hit(state);
        outcome.ship_hit = true;
    }

    outcome
}
