use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Menu hotkeys are digits only; letters belong to navigation and commands.
const MENU_KEYS: &str = "1234567890";

pub fn menu_key(index: usize) -> Option<char> {
    MENU_KEYS.chars().nth(index)
}

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(items: Vec<MenuItem>, theme: &'a Theme) -> Self {
        Self {
            items,
            selected: 0,
            theme,
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn select_key(&mut self, key: char) -> bool {
        let mut buf = [0u8; 4];
        let key = key.encode_utf8(&mut buf);
        match self.items.iter().position(|item| item.key == *key) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let brand = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "satzbau",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Put the words in order",
                Style::default().fg(colors.fg()),
            )),
        ])
        .alignment(Alignment::Center);
        brand.render(layout[0], buf);

        let list_area = layout[2];
        if self.items.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "  No lessons found.",
                Style::default().fg(colors.text_pending()),
            )))
            .render(list_area, buf);
            return;
        }

        // Two rows per entry; scroll so the selection stays visible.
        let per_page = (list_area.height as usize / 2).max(1);
        let first = (self.selected + 1).saturating_sub(per_page);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .skip(first)
            .take(per_page)
            .flat_map(|(i, item)| {
                let label_style = if i == self.selected {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                let marker = if i == self.selected { '>' } else { ' ' };
                let key = if item.key.is_empty() {
                    "   ".to_string()
                } else {
                    format!("[{}]", item.key)
                };
                [
                    Line::from(Span::styled(
                        format!(" {marker} {key} {}", item.label),
                        label_style,
                    )),
                    Line::from(Span::styled(
                        format!("       {}", item.description),
                        Style::default().fg(colors.text_pending()),
                    )),
                ]
            })
            .collect();

        Paragraph::new(lines).render(list_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem {
                key: menu_key(i).map(|k| k.to_string()).unwrap_or_default(),
                label: format!("Lesson {i}"),
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new(items(3), &theme);
        menu.prev();
        assert_eq!(menu.selected, 2);
        menu.next();
        assert_eq!(menu.selected, 0);
        assert!(menu.select_key('2'));
        assert_eq!(menu.selected, 1);
        assert!(!menu.select_key('9'));
    }

    #[test]
    fn long_lists_scroll_to_the_selection() {
        let theme = Theme::default();
        let mut menu = Menu::new(items(12), &theme);
        menu.selected = 11;
        let area = Rect::new(0, 0, 40, 14);
        let mut buf = Buffer::empty(area);
        (&menu).render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Lesson 11"));
        assert!(!text.contains("Lesson 0 "));
    }

    #[test]
    fn hotkeys_stop_after_ten_entries() {
        assert_eq!(menu_key(0), Some('1'));
        assert_eq!(menu_key(9), Some('0'));
        assert_eq!(menu_key(10), None);

        let theme = Theme::default();
        let mut menu = Menu::new(items(20), &theme);
        assert!(menu.items[10..].iter().all(|item| item.key.is_empty()));
        for nav in ['j', 'k', 'q', 'r'] {
            assert!(!menu.select_key(nav));
        }
        assert!(menu.select_key('0'));
        assert_eq!(menu.selected, 9);
    }

    #[test]
    fn empty_menu_navigation_is_noop() {
        let theme = Theme::default();
        let mut menu = Menu::new(Vec::new(), &theme);
        menu.next();
        menu.prev();
        assert_eq!(menu.selected, 0);
    }
}
