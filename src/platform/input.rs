//! Keyboard input
//!
//! Terminals differ in what they report: kitty-protocol terminals send
//! press/repeat/release events, classic ones only send a press per OS key
//! repeat. A direction key therefore counts as held while a release has not
//! arrived and its last press/repeat is at most [`HOLD_WINDOW`] frames old.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    QueueableCommand,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use crate::sim::FrameInput;

/// Frames a press keeps a key held without a repeat
pub const HOLD_WINDOW: u64 = 4;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Pause,
    Quit,
}

/// Map a terminal key event to a game key
pub fn map_key(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Some(Key::Pause),
        _ => None,
    }
}

/// Turns a stream of key events into per-frame snapshots
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Frame each held key was last pressed or repeated
    last_seen: HashMap<Key, u64>,
    frame: u64,
    /// One-shot flags collected since the last snapshot
    pending: FrameInput,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event
    pub fn handle(&mut self, event: &KeyEvent) {
        let Some(key) = map_key(event) else { return };

        match (event.kind, key) {
            (KeyEventKind::Press, Key::Quit) => self.pending.quit = true,
            (KeyEventKind::Press, Key::Pause) => self.pending.pause = true,
            (KeyEventKind::Press | KeyEventKind::Repeat, Key::Left | Key::Right) => {
                self.last_seen.insert(key, self.frame);
            }
            (KeyEventKind::Release, _) => {
                self.last_seen.remove(&key);
            }
            _ => {}
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.last_seen
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    /// Close the current frame: report its input and start the next one
    pub fn snapshot(&mut self) -> FrameInput {
        let input = FrameInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            ..std::mem::take(&mut self.pending)
        };
        self.frame += 1;
        self.last_seen
            .retain(|_, last| self.frame.saturating_sub(*last) <= HOLD_WINDOW);
        input
    }
}

/// A per-frame input snapshot provider
pub trait InputSource {
    /// Drain everything pending and report this frame's input
    fn poll(&mut self) -> Result<FrameInput>;
}

/// Keyboard input from the controlling terminal
pub struct TerminalInput {
    tracker: KeyTracker,
    /// Release events were requested and must be switched off again
    enhanced: bool,
}

impl TerminalInput {
    /// Ask the terminal for release events where it supports them
    pub fn new() -> Result<Self> {
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            let mut out = io::stdout();
            out.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            out.flush()?;
        }
        log::info!(
            "Keyboard input ready (release events: {})",
            if enhanced { "yes" } else { "no" }
        );
        Ok(Self {
            tracker: KeyTracker::new(),
            enhanced,
        })
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<FrameInput> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.tracker.handle(&key);
            }
        }
        Ok(self.tracker.snapshot())
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.enhanced {
            let mut out = io::stdout();
            let _ = out.queue(PopKeyboardEnhancementFlags);
            let _ = out.flush();
        }
    }
}
