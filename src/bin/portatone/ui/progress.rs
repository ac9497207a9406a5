//! Transmit progress gauge

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

use portatone::baseband::StatsSnapshot;

pub struct TxProgress {
    pub title: String,
    pub total: u32,
    /// Symbols started so far.
    pub symbol: u32,
    pub done: bool,
    pub stats: StatsSnapshot,
}

impl TxProgress {
    pub fn new(title: String, total: u32) -> Self {
        Self {
            title,
            total,
            symbol: 0,
            done: false,
            stats: StatsSnapshot::default(),
        }
    }

    fn ratio(&self) -> f64 {
        if self.done || self.total == 0 {
            return 1.0;
        }
        (self.symbol as f64 / self.total as f64).min(1.0)
    }
}

pub fn render_progress(frame: &mut Frame, area: Rect, progress: &TxProgress) {
    let block = Block::default()
        .title(format!(" {} ", progress.title))
        .borders(Borders::ALL);

    let (label, color) = if progress.done {
        ("done".to_string(), Color::Green)
    } else {
        (format!("{}/{}", progress.symbol, progress.total), Color::Cyan)
    };

    let label = if progress.stats.has_anomalies() {
        format!("{label}  dropped {}  rejected {}", progress.stats.dropped_reports, progress.stats.rejected_configures)
    } else {
        label
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color))
        .ratio(progress.ratio())
        .label(label);

    frame.render_widget(gauge, area);
}
