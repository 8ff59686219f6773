use crate::state::State;
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => {
                    if let Ok(CrosstermEvent::Key(key)) = event::read() {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => Ok(handle_key(event, state)),
            Event::Tick => {
                state.tick();
                Ok(true)
            }
        }
    }
}

/// Apply a key press to the state. Returns false if exit was requested.
///
pub fn handle_key(event: KeyEvent, state: &mut State) -> bool {
    if event.kind != KeyEventKind::Press {
        return true;
    }
    let result = match event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q'),
            ..
        } => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyEvent {
            code: KeyCode::Down | KeyCode::Char('j'),
            ..
        } => {
            state.next();
            Ok(())
        }
        KeyEvent {
            code: KeyCode::Up | KeyCode::Char('k'),
            ..
        } => {
            state.previous();
            Ok(())
        }
        KeyEvent {
            code: KeyCode::Enter | KeyCode::Right | KeyCode::Char('l'),
            ..
        } => state.select(false),
        KeyEvent {
            code: KeyCode::Char('o') | KeyCode::Char(' '),
            ..
        } => state.select(true),
        KeyEvent {
            code: KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h'),
            ..
        } => state.back(),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => state.refresh(),
        KeyEvent {
            code: KeyCode::Char('`'),
            ..
        } => {
            state.toggle_log();
            Ok(())
        }
        _ => {
            debug!("Skipping processing of terminal event '{:?}'...", event);
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!("Ignoring key {:?}: {}", event.code, e);
    }
    true
}
