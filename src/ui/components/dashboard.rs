use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::best::Improvement;
use crate::session::mode::GameMode;
use crate::session::result::SessionResult;
use crate::session::state::Status;
use crate::ui::components::stats_sidebar::format_clock;
use crate::ui::theme::Theme;

pub struct Dashboard<'a> {
    pub result: &'a SessionResult,
    pub improvement: Improvement,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a SessionResult, improvement: Improvement, theme: &'a Theme) -> Self {
        Self {
            result,
            improvement,
            theme,
        }
    }

    fn title(&self) -> &'static str {
        match self.result.status {
            Status::TimedOut => " Time's Up ",
            _ => " Passage Complete ",
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let result = self.result;

        let block = Block::bordered()
            .title(self.title())
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(inner);

        let heading = match result.difficulty {
            Some(d) => format!("{} ({})", result.mode.label(), d.as_str()),
            None => result.mode.label().to_string(),
        };
        Paragraph::new(Line::from(Span::styled(
            heading,
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let new_best = |hit: bool| {
            if hit {
                Span::styled(
                    "  new best!",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("")
            }
        };

        let mut lines = Vec::new();
        if result.mode == GameMode::Challenge {
            lines.push(Line::from(vec![
                Span::styled("  Score:    ", Style::default().fg(colors.fg())),
                Span::styled(
                    result.score.to_string(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({} passages)", result.passages_cleared),
                    Style::default().fg(colors.text_pending()),
                ),
                new_best(self.improvement.score),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("  Speed:    ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{} WPM", result.wpm),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            new_best(self.improvement.wpm),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}%", result.accuracy),
                Style::default()
                    .fg(colors.accuracy(result.accuracy))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{} correct)", result.correct, result.typed),
                Style::default().fg(colors.text_pending()),
            ),
            new_best(self.improvement.accuracy),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  Time:     ", Style::default().fg(colors.fg())),
            Span::styled(format_clock(result.elapsed_secs), Style::default().fg(colors.fg())),
        ]));
        lines.push(Line::from(""));
        if result.achievements.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No achievements this time",
                Style::default().fg(colors.text_pending()),
            )));
        } else {
            lines.push(Line::from(vec![
                Span::styled("  Unlocked: ", Style::default().fg(colors.fg())),
                Span::styled(
                    result.achievements.join(", "),
                    Style::default().fg(colors.success()),
                ),
            ]));
        }
        Paragraph::new(lines).render(layout[1], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [Enter/Tab] Again  ", Style::default().fg(colors.accent())),
            Span::styled("[Esc] Menu  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]))
        .render(layout[2], buf);
    }
}
