use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use satzbau::session::token_bank::TokenBank;

use crate::ui::theme::Theme;

/// Keyboard shortcut for each bank slot, in slot order.
pub const SLOT_KEYS: &str = "1234567890abcdefghij";

pub fn slot_for_key(ch: char) -> Option<usize> {
    SLOT_KEYS.chars().position(|k| k == ch.to_ascii_lowercase())
}

pub fn key_for_slot(slot: usize) -> Option<char> {
    SLOT_KEYS.chars().nth(slot)
}

pub struct TokenBankView<'a> {
    bank: &'a TokenBank,
    used: &'a HashSet<usize>,
    locked: bool,
    theme: &'a Theme,
}

impl<'a> TokenBankView<'a> {
    pub fn new(bank: &'a TokenBank, used: &'a HashSet<usize>, locked: bool, theme: &'a Theme) -> Self {
        Self {
            bank,
            used,
            locked,
            theme,
        }
    }
}

impl Widget for TokenBankView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Tokens ")
            .border_style(Style::default().fg(if self.locked {
                colors.border()
            } else {
                colors.border_focused()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans: Vec<Span> = Vec::new();
        for (slot, token) in self.bank.tokens().iter().enumerate() {
            let key = key_for_slot(slot).map(|k| k.to_string()).unwrap_or_default();
            let disabled = self.locked || self.used.contains(&slot);
            let style = if disabled {
                Style::default()
                    .fg(colors.text_pending())
                    .bg(colors.token_used())
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.fg()).bg(colors.token_bg())
            };
            spans.push(Span::styled(key, Style::default().fg(colors.accent())));
            spans.push(Span::styled(format!(" {token} "), style));
            spans.push(Span::raw("  "));
        }

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
