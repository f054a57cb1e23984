use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::achievements::ACHIEVEMENTS;
use crate::engine::best::BestRecords;
use crate::session::metrics::MetricsSnapshot;
use crate::session::mode::GameMode;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    snapshot: MetricsSnapshot,
    mode: GameMode,
    best: &'a BestRecords,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        snapshot: MetricsSnapshot,
        mode: GameMode,
        best: &'a BestRecords,
        theme: &'a Theme,
    ) -> Self {
        Self {
            snapshot,
            mode,
            best,
            theme,
        }
    }
}

pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// One-line stats for layouts too narrow for the sidebar and achievements panel.
pub fn compact_stats(snap: &MetricsSnapshot, mode: GameMode, unlocked: usize) -> String {
    let mut info = format!(
        "| WPM: {} | Acc: {}% | {}",
        snap.wpm,
        snap.accuracy,
        format_clock(snap.elapsed_secs)
    );
    if mode == GameMode::Challenge {
        info.push_str(&format!(" | Score: {}", snap.score));
    }
    info.push_str(&format!(" | Ach: {unlocked}/{}", ACHIEVEMENTS.len()));
    info
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let snap = &self.snapshot;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(11), Constraint::Length(6)])
            .split(area);

        let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.fg()));

        let mut lines = vec![
            Line::from(vec![
                label("WPM:      "),
                Span::styled(
                    snap.wpm.to_string(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                label("Accuracy: "),
                Span::styled(
                    format!("{}%", snap.accuracy),
                    Style::default().fg(colors.accuracy(snap.accuracy)),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Correct:  "),
                Span::styled(snap.correct.to_string(), Style::default().fg(colors.success())),
            ]),
            Line::from(vec![
                label("Errors:   "),
                Span::styled(snap.errors().to_string(), Style::default().fg(colors.error())),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Time:     "),
                Span::styled(format_clock(snap.elapsed_secs), Style::default().fg(colors.fg())),
            ]),
        ];
        if self.mode == GameMode::Challenge {
            lines.push(Line::from(vec![
                label("Score:    "),
                Span::styled(
                    snap.score.to_string(),
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" Stats ")
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(sections[0], buf);

        let best_lines = match self.mode {
            GameMode::Practice => vec![
                Line::from(vec![
                    label("WPM:      "),
                    Span::styled(
                        self.best.practice.wpm.to_string(),
                        Style::default().fg(colors.accent()),
                    ),
                ]),
                Line::from(vec![
                    label("Accuracy: "),
                    Span::styled(
                        format!("{}%", self.best.practice.accuracy),
                        Style::default().fg(colors.accent()),
                    ),
                ]),
            ],
            GameMode::Challenge => vec![Line::from(vec![
                label("Score:    "),
                Span::styled(
                    self.best.challenge.score.to_string(),
                    Style::default().fg(colors.accent()),
                ),
            ])],
        };

        Paragraph::new(best_lines)
            .block(
                Block::bordered()
                    .title(" Best ")
                    .border_style(Style::default().fg(colors.border()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(sections[1], buf);
    }
}
