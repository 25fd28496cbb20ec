use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use satzbau::lesson::Exercise;
use satzbau::session::answer::AttemptRecord;
use satzbau::session::scheduler::RETRY_LIMIT;

use crate::ui::theme::Theme;

pub struct AnswerArea<'a> {
    exercise: &'a Exercise,
    selection: &'a [String],
    outcome: Option<AttemptRecord>,
    theme: &'a Theme,
}

impl<'a> AnswerArea<'a> {
    pub fn new(
        exercise: &'a Exercise,
        selection: &'a [String],
        outcome: Option<AttemptRecord>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            exercise,
            selection,
            outcome,
            theme,
        }
    }
}

/// Feedback line shown once an answer has been checked.
pub fn feedback_text(exercise: &Exercise, outcome: AttemptRecord) -> String {
    if outcome.is_correct {
        "Correct!".to_string()
    } else if outcome.attempts >= RETRY_LIMIT {
        format!(
            "Incorrect. Correct answer: {} (out of retries)",
            exercise.solution_text()
        )
    } else {
        format!("Incorrect. Correct answer: {}", exercise.solution_text())
    }
}

impl Widget for AnswerArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Translate ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            format!("  {}", self.exercise.question_text),
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: false })
        .render(layout[0], buf);

        let answer_color = match self.outcome {
            Some(o) if o.is_correct => colors.text_correct(),
            Some(_) => colors.text_incorrect(),
            None => colors.accent(),
        };
        let answer = if self.selection.is_empty() {
            Span::styled("  (pick tokens below)", Style::default().fg(colors.text_pending()))
        } else {
            Span::styled(
                format!("  {}", self.selection.join(" ")),
                Style::default().fg(answer_color),
            )
        };
        Paragraph::new(Line::from(answer))
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);

        if let Some(outcome) = self.outcome {
            let color = if outcome.is_correct {
                colors.success()
            } else {
                colors.error()
            };
            Paragraph::new(Line::from(Span::styled(
                format!("  {}", feedback_text(self.exercise, outcome)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: false })
            .render(layout[2], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_shows_solution_when_wrong() {
        let ex = Exercise::new("e0", 0, "A coffee, please", &["Ein", "Kaffee", "bitte"], &[]);
        assert_eq!(
            feedback_text(&ex, AttemptRecord { is_correct: true, attempts: 1 }),
            "Correct!"
        );
        assert_eq!(
            feedback_text(&ex, AttemptRecord { is_correct: false, attempts: 1 }),
            "Incorrect. Correct answer: Ein Kaffee bitte"
        );
        assert!(
            feedback_text(&ex, AttemptRecord { is_correct: false, attempts: RETRY_LIMIT })
                .ends_with("(out of retries)")
        );
    }
}
