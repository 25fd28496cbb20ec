use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Bordered bar showing `done` of `total`, labelled with the count.
pub struct ProgressBar<'a> {
    pub label: String,
    pub done: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, done: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            done: done.min(total),
            total,
            theme,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.is_empty() {
            return;
        }

        let filled = ((self.ratio() * inner.width as f64).round() as u16).min(inner.width);
        let (done_area, rest_area) = (
            Rect { width: filled, height: 1, ..inner },
            Rect {
                x: inner.x + filled,
                width: inner.width - filled,
                height: 1,
                ..inner
            },
        );
        buf.set_style(done_area, Style::default().fg(colors.bg()).bg(colors.bar_filled()));
        buf.set_style(rest_area, Style::default().fg(colors.fg()).bg(colors.bar_empty()));

        let count = format!("{} of {}", self.done, self.total);
        let count_width = count.chars().count() as u16;
        if count_width <= inner.width {
            let x = inner.x + (inner.width - count_width) / 2;
            buf.set_stringn(x, inner.y, &count, inner.width as usize, Style::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn done_is_clamped_to_total() {
        let theme = Theme::default();
        let bar = ProgressBar::new("Lesson", 7, 4, &theme);
        assert_eq!(bar.done, 4);
        assert_eq!(bar.ratio(), 1.0);
        assert_eq!(ProgressBar::new("Empty", 0, 0, &theme).ratio(), 0.0);
    }

    #[test]
    fn renders_count_label() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new("Lesson", 1, 4, &theme).render(area, &mut buf);
        let row: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("1 of 4"));
    }
}
