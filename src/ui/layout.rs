use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen frame shared by every screen: one header row, the body, and two
/// rows of key hints.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [header, main, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(2),
            ])
            .areas(area);

        Self {
            header,
            main,
            footer,
        }
    }
}

/// Body of the lesson screen.
pub struct LessonLayout {
    pub progress: Rect,
    pub answer: Rect,
    pub bank: Rect,
}

impl LessonLayout {
    /// The bank grows with the number of tokens so a full 20-token bank
    /// still fits on narrow terminals.
    pub fn new(main: Rect, bank_tokens: usize) -> Self {
        let bank_rows = if main.width >= 100 || bank_tokens <= 8 { 4 } else { 6 };
        let [progress, answer, bank] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(bank_rows),
            ])
            .areas(main);

        Self {
            progress,
            answer,
            bank,
        }
    }
}

/// Greedily pack key hints into as few lines as fit in `width`.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const INDENT: &str = "  ";
    const GAP: &str = "  ";

    let mut lines: Vec<String> = Vec::new();
    if width == 0 {
        return lines;
    }

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        match lines.last_mut() {
            Some(line) if line.chars().count() + GAP.len() + hint.chars().count() <= width => {
                line.push_str(GAP);
                line.push_str(hint);
            }
            _ => lines.push(format!("{INDENT}{hint}")),
        }
    }
    lines
}

/// A popup of the requested share of `area`, never smaller than 60x14 unless
/// the area itself is.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = (area.height as u32 * percent_y.min(100) as u32 / 100) as u16;
    let width = width.max(60).min(area.width);
    let height = height.max(14).min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_wrap_when_too_wide() {
        let lines = pack_hint_lines(&["[Enter] Check", "[Backspace] Clear", "[Esc] Leave"], 34);
        assert_eq!(lines, vec!["  [Enter] Check  [Backspace] Clear", "  [Esc] Leave"]);
        assert!(pack_hint_lines(&["[q] Quit"], 0).is_empty());
    }

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_rect(50, 50, area), area);

        let big = Rect::new(0, 0, 200, 50);
        let popup = centered_rect(50, 50, big);
        assert_eq!(popup, Rect::new(50, 12, 100, 25));
    }

    #[test]
    fn lesson_layout_fills_main_area() {
        let main = Rect::new(0, 1, 80, 21);
        let layout = LessonLayout::new(main, 20);
        assert_eq!(layout.progress.height, 3);
        assert_eq!(layout.bank.height, 6);
        assert_eq!(layout.answer.height, 12);
        assert_eq!(LessonLayout::new(main, 4).bank.height, 4);
    }
}
