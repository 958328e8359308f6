//! Mini sparkline widget for inline metrics

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const BAR_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A compact inline sparkline (single line)
pub struct MiniSparkline<'a> {
    data: &'a [f64],
    style: Style,
}

impl<'a> MiniSparkline<'a> {
    pub fn new(data: &'a [f64]) -> Self {
        Self {
            data,
            style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Scale to 0-7; negative and non-finite values read as the lowest bar.
fn bar(value: f64, max: f64) -> char {
    if !value.is_finite() || value <= 0.0 || max <= 0.0 {
        return BAR_CHARS[0];
    }
    let scaled = ((value / max) * 7.0).round() as usize;
    BAR_CHARS[scaled.min(7)]
}

fn data_max(data: &[f64]) -> f64 {
    data.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

impl<'a> Widget for MiniSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let max = data_max(self.data);

        // Take the last N values that fit in the area
        let data_len = self.data.len().min(area.width as usize);
        let data_start = self.data.len().saturating_sub(data_len);

        for (i, &value) in self.data[data_start..].iter().enumerate() {
            let x = area.x + i as u16;
            buf.get_mut(x, area.y)
                .set_char(bar(value, max))
                .set_style(self.style);
        }
    }
}

/// Format sparkline data as inline text (for status and report output)
pub fn sparkline_text(data: &[f64], width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max = data_max(data);
    let data_len = data.len().min(width);
    let data_start = data.len().saturating_sub(data_len);

    data[data_start..].iter().map(|&value| bar(value, max)).collect()
}
