//! UI rendering helpers for the terminal user interface.
//!
//! Rendering is a pure function of the player's [`NowPlaying`] snapshot,
//! the playlist and the cursor position.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::metadata::CoverImage;
use crate::player::{NowPlaying, PlaybackStatus, Track};

/// Render the controls help text, incorporating the scrub step.
fn controls_text(scrub_percent: f64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{scrub_percent}%"),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn status_text(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Idle => "Idle",
        PlaybackStatus::Loading => "Loading",
        PlaybackStatus::Playing => "Playing",
        PlaybackStatus::Paused => "Paused",
    }
}

/// Describe the cover; a terminal cannot show the picture itself.
fn cover_text(cover: &CoverImage, default_cover: &str) -> String {
    match cover {
        CoverImage::Embedded { data, mime_type } => {
            format!("{mime_type}, {} bytes", data.len())
        }
        CoverImage::Default => format!("default ({})", cover.source(default_cover)),
    }
}

fn now_playing_lines(now: &NowPlaying, ui: &UiSettings) -> Vec<String> {
    if now.index.is_none() {
        return vec!["Nothing loaded".to_string()];
    }

    let title = if now.metadata_ready {
        now.title.clone()
    } else {
        format!("{} (reading tags...)", now.title)
    };

    vec![
        format!("Title:  {title}"),
        format!("Artist: {}", now.artist),
        format!("Cover:  {}", cover_text(&now.cover, &ui.default_cover)),
        format!("Status: {}", status_text(now.status)),
    ]
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    now: &NowPlaying,
    playlist: &[Track],
    cursor: usize,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" spindle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let info = Paragraph::new(now_playing_lines(now, ui_settings).join("\n")).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" now playing "),
    );
    frame.render_widget(info, chunks[1]);

    let seek_bar = Gauge::default()
        .block(Block::bordered().title(" position "))
        .ratio(now.progress.clamp(0.0, 1.0))
        .label(format!("{} / {}", now.elapsed, now.total));
    frame.render_widget(seek_bar, chunks[2]);

    // Playlist
    let items: Vec<ListItem> = playlist
        .iter()
        .map(|track| {
            let marker = if Some(track.index) == now.index {
                "▶ "
            } else {
                "  "
            };
            let line = format!("{marker}{}", track.resource.display_name());
            if Some(track.index) == now.index {
                ListItem::new(line).bold()
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(format!(" playlist ({}) ", playlist.len())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default();
    if !playlist.is_empty() {
        list_state.select(Some(cursor.min(playlist.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[3], &mut list_state);

    let controls = Paragraph::new(controls_text(controls_settings.scrub_percent))
        .block(Block::bordered().title(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(controls, chunks[4]);
}
