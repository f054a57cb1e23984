use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::state::{CharStatus, Session};
use crate::ui::theme::Theme;

pub struct TypingArea<'a> {
    session: &'a Session,
    theme: &'a Theme,
    title: String,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self {
            session,
            theme,
            title: String::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// A mistyped space would be invisible, so it is drawn as a middle dot.
fn mistyped_display(typed: char) -> char {
    if typed.is_whitespace() { '\u{00b7}' } else { typed }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let cursor = self.session.input().len();
        let finished = self.session.is_finished();

        let spans: Vec<Span> = self
            .session
            .reference()
            .iter()
            .enumerate()
            .map(|(idx, &expected)| match self.session.char_status(idx) {
                CharStatus::Correct => Span::styled(
                    expected.to_string(),
                    Style::default().fg(colors.text_correct()),
                ),
                CharStatus::Incorrect(typed) => Span::styled(
                    mistyped_display(typed).to_string(),
                    Style::default()
                        .fg(colors.text_incorrect())
                        .bg(colors.text_incorrect_bg())
                        .add_modifier(Modifier::UNDERLINED),
                ),
                CharStatus::Pending if idx == cursor && !finished => Span::styled(
                    expected.to_string(),
                    Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                ),
                CharStatus::Pending => Span::styled(
                    expected.to_string(),
                    Style::default().fg(colors.text_pending()),
                ),
            })
            .collect();

        let border = if finished {
            colors.border()
        } else {
            colors.border_focused()
        };
        let mut block = Block::bordered()
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        if !self.title.is_empty() {
            block = block.title(format!(" {} ", self.title));
        }

        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
