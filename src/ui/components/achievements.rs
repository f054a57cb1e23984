use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::achievements::ACHIEVEMENTS;
use crate::ui::theme::Theme;

/// Lists every achievement, highlighting those in `unlocked`.
pub struct AchievementsPanel<'a> {
    unlocked: &'a BTreeSet<&'static str>,
    theme: &'a Theme,
}

impl<'a> AchievementsPanel<'a> {
    pub fn new(unlocked: &'a BTreeSet<&'static str>, theme: &'a Theme) -> Self {
        Self { unlocked, theme }
    }
}

impl Widget for AchievementsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let lines: Vec<Line> = ACHIEVEMENTS
            .iter()
            .map(|a| {
                if self.unlocked.contains(a.name) {
                    Line::from(vec![
                        Span::raw(format!(" {} ", a.icon)),
                        Span::styled(
                            a.name,
                            Style::default()
                                .fg(colors.success())
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled(" \u{00b7} ", Style::default().fg(colors.text_pending())),
                        Span::styled(
                            format!("{}: {}", a.name, a.description),
                            Style::default().fg(colors.text_pending()),
                        ),
                    ])
                }
            })
            .collect();

        let title = format!(" Achievements {}/{} ", self.unlocked.len(), ACHIEVEMENTS.len());
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(area, buf);
    }
}
