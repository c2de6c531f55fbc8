//! Game entity types and the master game state.
//!
//! Positions are floating-point world coordinates: origin top-left,
//! y grows downward, units match `Settings::screen_width/height`.

use std::time::Duration;

use crate::settings::{Config, FleetDirection, Settings};
use crate::stats::GameStats;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A rect of the given size centred on `(cx, cy)`.
    pub fn centered_on(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict overlap: rects that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment, `[left, right) x [top, bottom)`.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

// ── Game status ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Simulation advances every frame.
    Active,
    /// A ship was lost; the simulation is frozen until `remaining` runs out.
    Respawning { remaining: Duration },
    /// No game running. Left only by starting a new game.
    GameOver,
}

impl GameStatus {
    /// True for every state except `GameOver`.
    pub fn is_game_active(&self) -> bool {
        !matches!(self, GameStatus::GameOver)
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    /// A ship sitting at the bottom centre of the screen.
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Ship {
            x: 0.0,
            y: 0.0,
            width: settings.ship_width,
            height: settings.ship_height,
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    /// Move the ship back to the bottom centre of the screen.
    pub fn center(&mut self, settings: &Settings) {
        self.x = (settings.screen_width - self.width) / 2.0;
        self.y = settings.screen_height - self.height;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Apply the movement flags. Both flags set cancel out.
    /// With `clamp_to` the ship's x stays within `[0, clamp_to - width]`.
    pub fn update(&mut self, speed: f32, clamp_to: Option<f32>) {
        if self.moving_right {
            self.x += speed;
        }
        if self.moving_left {
            self.x -= speed;
        }
        if let Some(screen_width) = clamp_to {
            self.x = self.x.min(screen_width - self.width).max(0.0);
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    /// Fixed at creation.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Projectile {
    /// A projectile whose top-centre sits on the ship's top-centre.
    pub fn from_ship(ship: &Ship, settings: &Settings) -> Self {
        let ship_rect = ship.rect();
        Projectile {
            x: ship_rect.center_x() - settings.bullet_width / 2.0,
            y: ship_rect.top(),
            width: settings.bullet_width,
            height: settings.bullet_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move upward by `speed`.
    pub fn update(&mut self, speed: f32) {
        self.y -= speed;
    }
}

// ── Invaders ──────────────────────────────────────────────────────────────────

/// One member of the fleet. Direction is read from `Config`, never stored here.
#[derive(Clone, Debug)]
pub struct Invader {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Invader {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Invader { x, y, width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// True when the invader touches either side of the screen.
    pub fn at_edge(&self, screen_width: f32) -> bool {
        let rect = self.rect();
        rect.right() >= screen_width || rect.left() <= 0.0
    }

    pub fn update(&mut self, speed: f32, direction: FleetDirection) {
        self.x += speed * direction.sign();
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation owns. Single-threaded; the frame loop holds it
/// by `&mut`.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: Config,
    pub stats: GameStats,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub invaders: Vec<Invader>,
    pub status: GameStatus,
    /// Clickable Play control, centred on the screen.
    pub play_button: Rect,
    /// Whether the pointer should be shown (only while no game runs).
    pub cursor_visible: bool,
    /// Simulation frames advanced since process start.
    pub frame: u64,
}

impl GameState {
    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }
}
