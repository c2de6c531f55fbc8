//! Terminal input: the reader thread and translation into game events.
//!
//! Two classes of terminal are handled:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Release`
//!   events become `KeyUp`.
//! * **Classic terminals**: only `Press` arrives, repeated by the OS while a
//!   key is held. A held movement key expires after a few silent frames and
//!   a `KeyUp` is synthesized (see [`HeldKeys::expire`]).

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use alien_invasion::game::{InputEvent, Key};

use crate::display::Viewport;

/// Dedicate a thread to blocking event reads so the frame loop never blocks
/// on I/O. The thread ends when the receiver is dropped.
pub fn spawn_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(err) => {
                log::warn!("Input reader stopped: {err}");
                break;
            }
        }
    });
    rx
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Q,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => Key::P,
        _ => Key::Other,
    }
}

/// Movement keys currently held, with the frame each was last seen.
#[derive(Debug, Default)]
pub struct HeldKeys {
    last_seen: HashMap<Key, u64>,
}

impl HeldKeys {
    fn touch(&mut self, key: Key, frame: u64) {
        if matches!(key, Key::Left | Key::Right) {
            self.last_seen.insert(key, frame);
        }
    }

    fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    /// Drop keys not seen within `window` frames and report them released.
    pub fn expire(&mut self, frame: u64, window: u64) -> Vec<InputEvent> {
        let mut stale: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, &last)| frame.saturating_sub(last) > window)
            .map(|(&key, _)| key)
            .collect();
        stale.sort_by_key(|key| *key as u8);
        for key in &stale {
            self.last_seen.remove(key);
        }
        stale.into_iter().map(InputEvent::KeyUp).collect()
    }
}

/// Translate one terminal event. Returns `None` for anything the game ignores.
pub fn translate(
    ev: &Event,
    viewport: &Viewport,
    held: &mut HeldKeys,
    frame: u64,
) -> Option<InputEvent> {
    match ev {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
            if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return Some(InputEvent::Quit);
            }
            let key = map_key(*code);
            if key == Key::Other {
                return None;
            }
            match kind {
                KeyEventKind::Press => {
                    held.touch(key, frame);
                    Some(InputEvent::KeyDown(key))
                }
                // Repeat only keeps the key alive; it is not a fresh press
                KeyEventKind::Repeat => {
                    held.touch(key, frame);
                    None
                }
                KeyEventKind::Release => {
                    held.release(key);
                    Some(InputEvent::KeyUp(key))
                }
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => {
            let (x, y) = viewport.to_world(*column, *row);
            Some(InputEvent::MouseClick { x, y })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alien_invasion::settings::Settings;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
    }

    fn viewport() -> Viewport {
        Viewport::new(120, 40, &Settings::default())
    }

    #[test]
    fn arrows_and_wasd_map_to_movement() {
        let mut held = HeldKeys::default();
        let vp = viewport();
        let ev = translate(&key(KeyCode::Left, KeyEventKind::Press), &vp, &mut held, 1);
        assert_eq!(ev, Some(InputEvent::KeyDown(Key::Left)));
        let ev = translate(&key(KeyCode::Char('d'), KeyEventKind::Release), &vp, &mut held, 1);
        assert_eq!(ev, Some(InputEvent::KeyUp(Key::Right)));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut held = HeldKeys::default();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(translate(&ev, &viewport(), &mut held, 1), Some(InputEvent::Quit));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut held = HeldKeys::default();
        let ev = key(KeyCode::Char('z'), KeyEventKind::Press);
        assert_eq!(translate(&ev, &viewport(), &mut held, 1), None);
    }

    #[test]
    fn held_key_expires_after_window() {
        let mut held = HeldKeys::default();
        let vp = viewport();
        translate(&key(KeyCode::Right, KeyEventKind::Press), &vp, &mut held, 10);
        assert!(held.expire(18, 8).is_empty());
        assert_eq!(held.expire(19, 8), vec![InputEvent::KeyUp(Key::Right)]);
        assert!(held.expire(30, 8).is_empty());
    }

    #[test]
    fn repeat_refreshes_hold() {
        let mut held = HeldKeys::default();
        let vp = viewport();
        translate(&key(KeyCode::Left, KeyEventKind::Press), &vp, &mut held, 1);
        let ev = translate(&key(KeyCode::Left, KeyEventKind::Repeat), &vp, &mut held, 8);
        assert_eq!(ev, None);
        assert!(held.expire(15, 8).is_empty());
    }

    #[test]
    fn left_click_maps_to_world() {
        let mut held = HeldKeys::default();
        let ev = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row: 20,
            modifiers: KeyModifiers::NONE,
        });
        match translate(&ev, &viewport(), &mut held, 1) {
            Some(InputEvent::MouseClick { x, y }) => {
                assert!((x - 605.0).abs() < 1e-3);
                assert!((y - 410.0).abs() < 1e-3);
            }
            other => panic!("expected a click, got {other:?}"),
        }
    }
}
