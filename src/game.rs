//! Frame loop and input mapping.
//!
//! The loop is single-threaded: each frame drains input, advances the
//! simulation, draws, presents and then waits for the next frame. All I/O goes
//! through [`Frontend`], so the loop runs the same against a terminal or a
//! scripted test double.

use std::io;
use std::time::Duration;

use crate::compute::{
    fire_projectile, set_moving_left, set_moving_right, start_new_game, tick, TickOutcome,
};
use crate::entities::{GameState, GameStatus, Invader, Projectile, Rect, Ship};
use crate::scoreboard::Hud;
use crate::settings::Settings;

/// Keys the game reacts to. Anything else arrives as `Other` and is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    Q,
    P,
    Other,
}

/// One input event, in world coordinates for clicks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseClick { x: f32, y: f32 },
}

/// Whether the loop keeps going after an event or frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Read-only snapshot of everything a frontend draws in one frame.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub settings: &'a Settings,
    pub ship: &'a Ship,
    pub projectiles: &'a [Projectile],
    pub invaders: &'a [Invader],
    pub hud: Hud,
    pub status: GameStatus,
    /// Present only while the Play control is clickable.
    pub play_button: Option<Rect>,
    pub cursor_visible: bool,
    /// Simulation frames advanced so far; zero until the first game starts.
    pub frame: u64,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        FrameView {
            settings: &state.config.settings,
            ship: &state.ship,
            projectiles: &state.projectiles,
            invaders: &state.invaders,
            hud: Hud::from_stats(&state.stats),
            status: state.status,
            play_button: (!state.status.is_game_active()).then_some(state.play_button),
            cursor_visible: state.cursor_visible,
            frame: state.frame,
        }
    }
}

/// Rendering and input boundary.
pub trait Frontend {
    /// Every event that arrived since the last call, oldest first.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;

    fn draw(&mut self, view: &FrameView<'_>) -> io::Result<()>;

    /// Make the most recently drawn frame visible.
    fn present(&mut self) -> io::Result<()>;

    /// Wait out the rest of the frame and return the time since the previous
    /// call.
    fn tick(&mut self, target_fps: u32) -> Duration;
}

/// Apply one input event to the game.
pub fn handle_event(state: &mut GameState, event: InputEvent) -> Control {
    match event {
        InputEvent::Quit | InputEvent::KeyDown(Key::Q) => return Control::Quit,
        InputEvent::KeyDown(Key::Left) => set_moving_left(state, true),
        InputEvent::KeyDown(Key::Right) => set_moving_right(state, true),
        InputEvent::KeyUp(Key::Left) => set_moving_left(state, false),
        InputEvent::KeyUp(Key::Right) => set_moving_right(state, false),
        InputEvent::KeyDown(Key::Space) if state.status == GameStatus::Active => {
            fire_projectile(state);
        }
        InputEvent::KeyDown(Key::P) => {
            start_new_game(state);
        }
        InputEvent::MouseClick { x, y } if state.play_button.contains_point(x, y) => {
            start_new_game(state);
        }
        _ => {}
    }
    Control::Continue
}

/// One pass of the loop, minus frame pacing: input, simulation, drawing.
///
/// `elapsed` is the real time since the previous frame. A quit event stops
/// the frame before the simulation advances.
pub fn run_frame<F: Frontend>(
    state: &mut GameState,
    frontend: &mut F,
    elapsed: Duration,
) -> io::Result<(Control, TickOutcome)> {
    for event in frontend.poll_events()? {
        if handle_event(state, event) == Control::Quit {
            return Ok((Control::Quit, TickOutcome::default()));
        }
    }

    let outcome = tick(state, elapsed);

    frontend.draw(&FrameView::of(state))?;
    frontend.present()?;
    Ok((Control::Continue, outcome))
}

/// Run frames until the player quits.
pub fn run<F: Frontend>(state: &mut GameState, frontend: &mut F) -> io::Result<()> {
    let target_fps = state.config.settings.target_fps;
    let mut elapsed = Duration::from_secs(1) / target_fps.max(1);
    loop {
        let (control, _) = run_frame(state, frontend, elapsed)?;
        if control == Control::Quit {
            log::info!(
                "Quit after {} frames, high score {}",
                state.frame,
                state.stats.high_score
            );
            return Ok(());
        }
        elapsed = frontend.tick(target_fps);
    }
}
