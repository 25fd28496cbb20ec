use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use satzbau::session::result::LessonSummary;

use crate::ui::theme::Theme;

pub struct SummaryDashboard<'a> {
    pub summary: &'a LessonSummary,
    pub theme: &'a Theme,
}

impl<'a> SummaryDashboard<'a> {
    pub fn new(summary: &'a LessonSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for SummaryDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Lesson Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            &*self.summary.lesson_title,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let score_color = if self.summary.is_perfect() {
            colors.success()
        } else if self.summary.accuracy() >= 50.0 {
            colors.warning()
        } else {
            colors.error()
        };
        let score_text = format!(
            "{} / {} correct",
            self.summary.correct, self.summary.total
        );
        let score_line = Line::from(vec![
            Span::styled("  You got  ", Style::default().fg(colors.fg())),
            Span::styled(
                &*score_text,
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let attempts_text = format!("{}", self.summary.total_attempts);
        let attempts_line = Line::from(vec![
            Span::styled("  Checks:   ", Style::default().fg(colors.fg())),
            Span::styled(&*attempts_text, Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(attempts_line).render(layout[2], buf);

        let missed_text = format!("{}", self.summary.retried_out);
        let missed_line = Line::from(vec![
            Span::styled("  Missed:   ", Style::default().fg(colors.fg())),
            Span::styled(
                &*missed_text,
                Style::default().fg(if self.summary.retried_out == 0 {
                    colors.success()
                } else {
                    colors.error()
                }),
            ),
        ]);
        Paragraph::new(missed_line).render(layout[3], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [Enter/q] Back  ", Style::default().fg(colors.accent())),
            Span::styled("[r] Retry", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[5], buf);
    }
}
