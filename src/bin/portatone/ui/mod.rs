//! TUI for portatone
//!
//! Shows transmit progress and a scope view of the monitor audio.

mod progress;
mod waveform;

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use portatone::control::{Transmitter, TxEvent};

use progress::{render_progress, TxProgress};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;
/// Keep drawing after completion so the tail of the monitor audio plays out.
const LINGER: Duration = Duration::from_millis(500);

pub struct UiApp {
    tx: Transmitter,
    audio_rx: Consumer<f32>,
    audio_buffer: Vec<f32>,
    monitor_rate: u32,
    progress: TxProgress,
    done_at: Option<Instant>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        tx: Transmitter,
        audio_rx: Consumer<f32>,
        monitor_rate: u32,
        title: String,
        total_symbols: u32,
    ) -> Self {
        Self {
            tx,
            audio_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            monitor_rate,
            progress: TxProgress::new(title, total_symbols),
            done_at: None,
            should_quit: false,
        }
    }

    /// Run until the job is done or the user quits.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_tx();

            if self.done_at.is_some_and(|t| t.elapsed() >= LINGER) {
                break;
            }

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn poll_tx(&mut self) {
        while let Some(event) = self.tx.poll() {
            match event {
                TxEvent::Progress(index) => self.progress.symbol = index + 1,
                TxEvent::Done(_) => {
                    self.progress.done = true;
                    self.done_at = Some(Instant::now());
                }
            }
        }
        self.progress.stats = self.tx.stats();
    }

    fn handle_key(&mut self, key: KeyCode) {
        if let KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc = key {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress
                Constraint::Min(8),    // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_progress(frame, chunks[0], &self.progress);
        render_waveform(frame, chunks[1], &self.audio_buffer, self.monitor_rate);

        let help = Paragraph::new(" [Q] Quit").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
