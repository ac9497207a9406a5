//! Monitor scope
//!
//! Plots the most recent monitor samples against time, scaled to the loudest
//! sample on screen so quiet tones stay readable.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Below this peak the trace is treated as silence and not magnified.
const NOISE_FLOOR: f32 = 1.0 / 256.0;

/// Loudest sample on screen, or `None` when the trace is silence.
fn audible_peak(samples: &[f32]) -> Option<f32> {
    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    (peak > NOISE_FLOOR).then_some(peak)
}

pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32], sample_rate: u32) {
    let peak = audible_peak(samples);
    let span = peak.map_or(1.0, |p| p as f64);

    let ms_per_sample = 1000.0 / sample_rate.max(1) as f64;
    let window_ms = samples.len() as f64 * ms_per_sample;
    let points: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| (i as f64 * ms_per_sample, s as f64))
        .collect();

    let (title, trace) = match peak {
        Some(p) => (format!(" Monitor  peak {:>3.0}% ", p * 100.0), Color::Green),
        None => (" Monitor  silent ".to_string(), Color::DarkGray),
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(trace))
        .data(&points);

    let axis_style = Style::default().fg(Color::DarkGray);
    let chart = Chart::new(vec![dataset])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, window_ms.max(ms_per_sample)])
                .labels([Span::raw("0"), Span::raw(format!("{window_ms:.0} ms"))])
                .style(axis_style),
        )
        .y_axis(Axis::default().bounds([-span, span]).style(axis_style));

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_ignores_noise_floor() {
        assert_eq!(audible_peak(&[]), None);
        assert_eq!(audible_peak(&[0.001, -0.002]), None);
        assert_eq!(audible_peak(&[0.1, -0.5, 0.25]), Some(0.5));
    }
}
