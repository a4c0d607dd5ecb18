use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, trace};

use crate::audio::{RodioOutput, Signal};
use crate::metadata::{self, LoftyResolver};
use crate::player::PlaylistPlayer;
use crate::selection;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("spindle: logging disabled: {e}");
    }

    let mut selected: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if selected.is_empty() {
        selected.push(env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    }
    let resources = selection::collect(&selected, &settings.library);
    info!(count = resources.len(), "selection collected");

    let (signal_tx, signal_rx) = mpsc::channel::<Signal>();
    let output = RodioOutput::open(signal_tx.clone(), &settings.audio)?;
    let worker = metadata::spawn_worker(LoftyResolver::new(&settings.metadata), signal_tx);

    let mut player = PlaylistPlayer::new(output, worker);
    player.subscribe(|event| trace!(?event, "player event"));
    player.load_playlist(resources);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut player, &signal_rx, &mut state)
    })();

    player.shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
