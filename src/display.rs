//! Terminal frontend: rendering, pacing and input delivery over crossterm.
//!
//! World coordinates are scaled onto the terminal grid each frame, so the
//! game keeps its proportions when the terminal is resized. No game logic
//! is performed here.

use std::io::Write;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use alien_invasion::entities::Rect;
use alien_invasion::game::{FrameView, Frontend, InputEvent};
use alien_invasion::settings::{Rgb, Settings};

use crate::input::{translate, HeldKeys};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Black;
const C_SHIP: Color = Color::DarkBlue;
const C_INVADER: Color = Color::DarkGreen;
const C_BUTTON_BG: Color = Color::Rgb { r: 0, g: 135, b: 0 };
const C_BUTTON_TEXT: Color = Color::White;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── World ↔ terminal scaling ──────────────────────────────────────────────────

/// Inclusive cell bounds of a rect on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, settings: &Settings) -> Self {
        Viewport {
            cols,
            rows,
            sx: f32::from(cols) / settings.screen_width,
            sy: f32::from(rows) / settings.screen_height,
        }
    }

    /// Cells covered by `rect`, at least one cell per axis, clipped to the
    /// terminal. `None` when the rect is entirely off-screen.
    pub fn cell_span(&self, rect: &Rect) -> Option<CellSpan> {
        let (c0, c1) = Self::axis(rect.left(), rect.right(), self.sx, self.cols)?;
        let (r0, r1) = Self::axis(rect.top(), rect.bottom(), self.sy, self.rows)?;
        Some(CellSpan { col0: c0, row0: r0, col1: c1, row1: r1 })
    }

    fn axis(lo: f32, hi: f32, scale: f32, cells: u16) -> Option<(u16, u16)> {
        if cells == 0 {
            return None;
        }
        let first = (lo * scale).floor() as i64;
        let last = ((hi * scale).ceil() as i64 - 1).max(first);
        let max = i64::from(cells) - 1;
        if last < 0 || first > max {
            return None;
        }
        Some((first.max(0) as u16, last.min(max) as u16))
    }

    /// World point at the centre of a terminal cell.
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        ((f32::from(col) + 0.5) / self.sx, (f32::from(row) + 0.5) / self.sy)
    }
}

// ── Frontend ──────────────────────────────────────────────────────────────────

/// Frames a key stays held after its last press/repeat on terminals that
/// never report releases. 8 frames @ 60 FPS ≈ 133 ms, above the OS repeat
/// interval.
const HOLD_WINDOW: u64 = 8;

pub struct TerminalFrontend<W: Write> {
    out: W,
    rx: mpsc::Receiver<Event>,
    /// Terminal reports key releases (kitty keyboard protocol).
    keyboard_enhanced: bool,
    held: HeldKeys,
    frame: u64,
    viewport: Viewport,
    mouse_captured: bool,
    last_tick: Instant,
}

impl<W: Write> TerminalFrontend<W> {
    pub fn new(
        out: W,
        rx: mpsc::Receiver<Event>,
        keyboard_enhanced: bool,
        settings: &Settings,
    ) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_viewport(
            out,
            rx,
            keyboard_enhanced,
            Viewport::new(cols, rows, settings),
        ))
    }

    /// Build against a fixed viewport. `draw` still re-reads the terminal size.
    pub fn with_viewport(
        out: W,
        rx: mpsc::Receiver<Event>,
        keyboard_enhanced: bool,
        viewport: Viewport,
    ) -> Self {
        TerminalFrontend {
            out,
            rx,
            keyboard_enhanced,
            held: HeldKeys::default(),
            frame: 0,
            viewport,
            mouse_captured: false,
            last_tick: Instant::now(),
        }
    }

    /// Restore anything this frontend changed on the terminal.
    pub fn release(&mut self) -> std::io::Result<()> {
        if self.mouse_captured {
            self.out.execute(DisableMouseCapture)?;
            self.mouse_captured = false;
        }
        Ok(())
    }

    /// Mouse capture stands in for the pointer: on only while Play is clickable.
    fn sync_mouse_capture(&mut self, wanted: bool) -> std::io::Result<()> {
        if wanted == self.mouse_captured {
            return Ok(());
        }
        if wanted {
            self.out.execute(EnableMouseCapture)?;
        } else {
            self.out.execute(DisableMouseCapture)?;
        }
        self.mouse_captured = wanted;
        Ok(())
    }
}

impl<W: Write> Frontend for TerminalFrontend<W> {
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>> {
        self.frame += 1;
        let mut events = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            if let Event::Resize(..) = ev {
                continue;
            }
            if let Some(input) = translate(&ev, &self.viewport, &mut self.held, self.frame) {
                events.push(input);
            }
        }
        if !self.keyboard_enhanced {
            events.extend(self.held.expire(self.frame, HOLD_WINDOW));
        }
        Ok(events)
    }

    fn draw(&mut self, view: &FrameView<'_>) -> std::io::Result<()> {
        let (cols, rows) = terminal::size()?;
        self.viewport = Viewport::new(cols, rows, view.settings);
        self.sync_mouse_capture(view.cursor_visible)?;
        render(&mut self.out, view, &self.viewport)
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    fn tick(&mut self, target_fps: u32) -> Duration {
        let frame = Duration::from_secs(1) / target_fps.max(1);
        let spent = self.last_tick.elapsed();
        if spent < frame {
            std::thread::sleep(frame - spent);
        }
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        elapsed
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Queue one complete frame. The caller flushes.
pub fn render<W: Write>(out: &mut W, view: &FrameView<'_>, vp: &Viewport) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(rgb(view.settings.bg_color)))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for projectile in view.projectiles {
        fill(out, vp, &projectile.rect(), rgb(view.settings.bullet_color), "║")?;
    }
    fill(out, vp, &view.ship.rect(), C_SHIP, "▲")?;
    for invader in view.invaders {
        fill(out, vp, &invader.rect(), C_INVADER, "▼")?;
    }

    draw_hud(out, view, vp)?;

    if let Some(button) = view.play_button {
        draw_play_button(out, view, vp, &button)?;
    }

    draw_controls_hint(out, view, vp)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    Ok(())
}

/// Paint every cell a rect covers with `glyph`.
fn fill<W: Write>(
    out: &mut W,
    vp: &Viewport,
    rect: &Rect,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    let Some(span) = vp.cell_span(rect) else {
        return Ok(());
    };
    let width = usize::from(span.col1 - span.col0) + 1;
    let line = glyph.repeat(width);
    out.queue(style::SetForegroundColor(color))?;
    for row in span.row0..=span.row1 {
        out.queue(cursor::MoveTo(span.col0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &FrameView<'_>, vp: &Viewport) -> std::io::Result<()> {
    let hud = &view.hud;
    out.queue(style::SetForegroundColor(C_HUD))?;

    // Ships left, left-aligned
    let ships = format!("Ships:{}", "▲".repeat(hud.ships_left as usize));
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(&ships))?;

    // High score, centred
    let high = format!("High: {}", hud.high_score);
    out.queue(cursor::MoveTo(centered(vp.cols, &high), 0))?;
    out.queue(Print(&high))?;

    // Score and level, right-aligned
    let score = format!("Score: {}  Level: {}", hud.score, hud.level);
    let sx = vp.cols.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(Print(&score))?;

    Ok(())
}

fn centered(cols: u16, text: &str) -> u16 {
    (cols / 2).saturating_sub(text.chars().count() as u16 / 2)
}

// ── Play button ───────────────────────────────────────────────────────────────

fn draw_play_button<W: Write>(
    out: &mut W,
    view: &FrameView<'_>,
    vp: &Viewport,
    button: &Rect,
) -> std::io::Result<()> {
    let Some(span) = vp.cell_span(button) else {
        return Ok(());
    };

    // A game has been played if any frame was simulated.
    if view.frame > 0 && span.row0 > 0 {
        let msg = "GAME  OVER";
        out.queue(style::SetForegroundColor(C_GAME_OVER))?;
        out.queue(cursor::MoveTo(centered(vp.cols, msg), span.row0 - 1))?;
        out.queue(Print(msg))?;
    }

    let width = usize::from(span.col1 - span.col0) + 1;
    out.queue(style::SetBackgroundColor(C_BUTTON_BG))?;
    out.queue(style::SetForegroundColor(C_BUTTON_TEXT))?;
    let mid = span.row0 + (span.row1 - span.row0) / 2;
    for row in span.row0..=span.row1 {
        let text = if row == mid { "Play" } else { "" };
        out.queue(cursor::MoveTo(span.col0, row))?;
        out.queue(Print(format!("{text:^width$}")))?;
    }
    out.queue(style::SetBackgroundColor(rgb(view.settings.bg_color)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    view: &FrameView<'_>,
    vp: &Viewport,
) -> std::io::Result<()> {
    let hint = if view.play_button.is_some() {
        "Click Play or press P   Q : Quit"
    } else {
        "← → / A D : Move   SPACE : Shoot   Q : Quit"
    };
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alien_invasion::game::Key;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    fn viewport() -> Viewport {
        // 1200x800 world onto 120x40 cells: 10 units per column, 20 per row.
        Viewport::new(120, 40, &Settings::default())
    }

    #[test]
    fn cell_span_covers_partial_cells() {
        let span = viewport().cell_span(&Rect::new(15.0, 30.0, 20.0, 15.0));
        assert_eq!(span, Some(CellSpan { col0: 1, row0: 1, col1: 3, row1: 2 }));
    }

    #[test]
    fn cell_span_is_at_least_one_cell() {
        let span = viewport().cell_span(&Rect::new(100.0, 100.0, 3.0, 15.0));
        assert_eq!(span, Some(CellSpan { col0: 10, row0: 5, col1: 10, row1: 5 }));
    }

    #[test]
    fn cell_span_clips_and_drops_offscreen() {
        let vp = viewport();
        let span = vp.cell_span(&Rect::new(-20.0, 780.0, 40.0, 60.0));
        assert_eq!(span, Some(CellSpan { col0: 0, row0: 39, col1: 1, row1: 39 }));
        assert_eq!(vp.cell_span(&Rect::new(0.0, -30.0, 3.0, 15.0)), None);
        assert_eq!(vp.cell_span(&Rect::new(1300.0, 10.0, 40.0, 30.0)), None);
    }

    fn key_event(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn frontend(keyboard_enhanced: bool) -> (mpsc::Sender<Event>, TerminalFrontend<Vec<u8>>) {
        let (tx, rx) = mpsc::channel();
        let fe = TerminalFrontend::with_viewport(Vec::new(), rx, keyboard_enhanced, viewport());
        (tx, fe)
    }

    #[test]
    fn press_without_release_is_released_after_hold_window() {
        let (tx, mut fe) = frontend(false);
        tx.send(key_event(KeyCode::Left, KeyEventKind::Press)).unwrap();
        assert_eq!(fe.poll_events().unwrap(), vec![InputEvent::KeyDown(Key::Left)]);

        for _ in 0..HOLD_WINDOW {
            assert!(fe.poll_events().unwrap().is_empty());
        }
        assert_eq!(fe.poll_events().unwrap(), vec![InputEvent::KeyUp(Key::Left)]);
        assert!(fe.poll_events().unwrap().is_empty());
    }

    #[test]
    fn repeated_press_keeps_key_held() {
        let (tx, mut fe) = frontend(false);
        tx.send(key_event(KeyCode::Right, KeyEventKind::Press)).unwrap();
        fe.poll_events().unwrap();
        for _ in 0..3 * HOLD_WINDOW {
            // Classic terminals repeat a held key as further presses
            tx.send(key_event(KeyCode::Right, KeyEventKind::Press)).unwrap();
            let events = fe.poll_events().unwrap();
            assert!(!events.contains(&InputEvent::KeyUp(Key::Right)));
        }
    }

    #[test]
    fn enhanced_terminal_waits_for_real_release() {
        let (tx, mut fe) = frontend(true);
        tx.send(key_event(KeyCode::Left, KeyEventKind::Press)).unwrap();
        fe.poll_events().unwrap();
        for _ in 0..3 * HOLD_WINDOW {
            assert!(fe.poll_events().unwrap().is_empty());
        }
        tx.send(key_event(KeyCode::Left, KeyEventKind::Release)).unwrap();
        assert_eq!(fe.poll_events().unwrap(), vec![InputEvent::KeyUp(Key::Left)]);
    }

    #[test]
    fn to_world_hits_cell_centre() {
        let (x, y) = viewport().to_world(60, 20);
        assert!((x - 605.0).abs() < 1e-3);
        assert!((y - 410.0).abs() < 1e-3);
    }
}
