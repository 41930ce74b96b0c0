//! Transport view - tempo, play state, accent pattern, and key help

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use clicktrack::metronome::{AccentPattern, MetronomeSnapshot};

pub fn render(frame: &mut Frame, snapshot: &MetronomeSnapshot, sample_rate: f32) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // transport
            Constraint::Length(3), // pattern
            Constraint::Min(1),    // help
        ])
        .split(frame.area());

    render_transport(frame, chunks[0], snapshot, sample_rate);
    render_pattern(frame, chunks[1], snapshot);
    render_help(frame, chunks[2]);
}

fn render_transport(
    frame: &mut Frame,
    area: Rect,
    snapshot: &MetronomeSnapshot,
    sample_rate: f32,
) {
    let block = Block::default().title(" click ").borders(Borders::ALL);

    let play_symbol = if snapshot.playing { "▶" } else { "⏸" };
    let play_state_str = if snapshot.playing { "Playing" } else { "Paused" };
    let sample_rate_khz = sample_rate / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {}  ", snapshot.tempo),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if snapshot.playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("Beat {}  ", snapshot.beat_count),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz", sample_rate_khz),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_pattern(frame: &mut Frame, area: Rect, snapshot: &MetronomeSnapshot) {
    let block = Block::default().title(" pattern ").borders(Borders::ALL);

    let length_editable = snapshot.pattern == AccentPattern::NRepeat;
    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", snapshot.pattern.label()),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("length: {}", snapshot.pattern_length),
            Style::default().fg(if length_editable {
                Color::White
            } else {
                Color::DarkGray
            }),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        " space: start/stop   ↑/↓: tempo   p: pattern   [/]: length   q: quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
