use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{DecodePrimitive, Signal};
use crate::config;
use crate::player::PlaylistPlayer;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Highlighted playlist row.
    pub cursor: usize,
    /// Last index the cursor was moved to by playback, so it only follows changes.
    followed_index: Option<usize>,
    /// Seek bar position of the scrub gesture in progress.
    scrub_target: Option<f64>,
    last_scrub: Option<Instant>,
}

impl EventLoopState {
    /// Move the cursor to the playing track whenever playback switches tracks.
    fn follow_playback(&mut self, current: Option<usize>) {
        if current != self.followed_index {
            if let Some(i) = current {
                self.cursor = i;
            }
            self.followed_index = current;
        }
    }

    /// One scrub step; returns the new seek bar position.
    fn scrub(&mut self, from: f64, delta: f64, now: Instant) -> f64 {
        let base = self.scrub_target.unwrap_or(from);
        let target = (base + delta).clamp(0.0, 1.0);
        self.scrub_target = Some(target);
        self.last_scrub = Some(now);
        target
    }

    /// The gesture ends once no scrub key was pressed for `idle`.
    fn scrub_due_for_commit(&mut self, idle: Duration, now: Instant) -> bool {
        match self.last_scrub {
            Some(at) if now.duration_since(at) >= idle => {
                self.scrub_target = None;
                self.last_scrub = None;
                true
            }
            _ => false,
        }
    }

    fn move_cursor(&mut self, len: usize, down: bool) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
    }
}

/// Main terminal event loop: applies signals, handles input and draws.
/// Returns `Ok(())` when the user quits.
pub fn run<D: DecodePrimitive>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut PlaylistPlayer<D>,
    signals: &Receiver<Signal>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let commit_after = Duration::from_millis(settings.controls.scrub_commit_ms);

    loop {
        while let Ok(signal) = signals.try_recv() {
            player.handle_signal(signal);
        }
        player.poll_output();

        if state.scrub_due_for_commit(commit_after, Instant::now()) {
            player.commit_seek();
        }
        state.follow_playback(player.state().current_index);

        let now = player.now_playing();
        terminal.draw(|f| {
            ui::draw(
                f,
                &now,
                player.playlist(),
                state.cursor,
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, player, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<D: DecodePrimitive>(
    key: KeyEvent,
    settings: &config::Settings,
    player: &mut PlaylistPlayer<D>,
    state: &mut EventLoopState,
) -> bool {
    let step = settings.controls.scrub_percent / 100.0;

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle_pause(),
        KeyCode::Char('h') | KeyCode::Left => player.previous(),
        KeyCode::Char('l') | KeyCode::Right => player.next(),
        KeyCode::Char('H') => {
            let target = state.scrub(player.state().progress(), -step, Instant::now());
            player.seek_to(target);
        }
        KeyCode::Char('L') => {
            let target = state.scrub(player.state().progress(), step, Instant::now());
            player.seek_to(target);
        }
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor(player.playlist().len(), true),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor(player.playlist().len(), false),
        KeyCode::Char('g') => state.cursor = 0,
        KeyCode::Char('G') => state.cursor = player.playlist().len().saturating_sub(1),
        KeyCode::Enter => player.load_track(state.cursor),
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_steps_accumulate_from_gesture_start() {
        let mut state = EventLoopState::default();
        let t0 = Instant::now();

        assert!((state.scrub(0.5, 0.05, t0) - 0.55).abs() < 1e-9);
        // Later steps ignore the live position and build on the gesture.
        assert!((state.scrub(0.1, 0.05, t0) - 0.60).abs() < 1e-9);
        assert_eq!(state.scrub(0.0, 5.0, t0), 1.0);
    }

    #[test]
    fn scrub_commits_after_idle_period() {
        let mut state = EventLoopState::default();
        let t0 = Instant::now();
        let idle = Duration::from_millis(400);

        assert!(!state.scrub_due_for_commit(idle, t0));

        state.scrub(0.5, -0.05, t0);
        assert!(!state.scrub_due_for_commit(idle, t0 + Duration::from_millis(100)));
        assert!(state.scrub_due_for_commit(idle, t0 + Duration::from_millis(400)));
        // Committed once only.
        assert!(!state.scrub_due_for_commit(idle, t0 + Duration::from_millis(900)));

        // The next gesture starts from the live position again.
        assert!((state.scrub(0.2, 0.05, t0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn cursor_wraps_and_follows_track_changes() {
        let mut state = EventLoopState::default();
        state.move_cursor(3, false);
        assert_eq!(state.cursor, 2);
        state.move_cursor(3, true);
        assert_eq!(state.cursor, 0);

        state.follow_playback(Some(1));
        assert_eq!(state.cursor, 1);

        // Manual movement sticks until playback changes tracks again.
        state.move_cursor(3, true);
        state.follow_playback(Some(1));
        assert_eq!(state.cursor, 2);
        state.follow_playback(Some(0));
        assert_eq!(state.cursor, 0);
    }
}
