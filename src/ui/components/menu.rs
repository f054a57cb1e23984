use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::scoring::Difficulty;
use crate::session::mode::GameMode;
use crate::ui::theme::Theme;

pub struct MenuItem {
    pub key: &'static str,
    pub mode: GameMode,
    pub description: &'static str,
}

pub const MENU_ITEMS: [MenuItem; 2] = [
    MenuItem {
        key: "1",
        mode: GameMode::Practice,
        description: "Type a passage at your own pace",
    },
    MenuItem {
        key: "2",
        mode: GameMode::Challenge,
        description: "Clear as many passages as you can before time runs out",
    },
];

pub struct Menu<'a> {
    pub selected: usize,
    pub difficulty: Difficulty,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(selected: usize, difficulty: Difficulty, theme: &'a Theme) -> Self {
        Self {
            selected: selected.min(MENU_ITEMS.len() - 1),
            difficulty,
            theme,
        }
    }

    pub fn next(selected: usize) -> usize {
        (selected + 1) % MENU_ITEMS.len()
    }

    pub fn prev(selected: usize) -> usize {
        if selected > 0 {
            selected - 1
        } else {
            MENU_ITEMS.len() - 1
        }
    }

    pub fn mode_at(selected: usize) -> GameMode {
        MENU_ITEMS
            .get(selected)
            .map(|item| item.mode)
            .unwrap_or_default()
    }

    fn difficulty_line(&self) -> Line<'static> {
        let colors = &self.theme.colors;
        let mut spans = vec![Span::styled(
            "Difficulty: ",
            Style::default().fg(colors.fg()),
        )];
        for d in Difficulty::ALL {
            let label = format!(
                " {} {}s x{} ",
                d.as_str(),
                d.time_limit().as_secs(),
                d.multiplier()
            );
            let style = if d == self.difficulty {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_pending())
            };
            spans.push(Span::styled(label, style));
        }
        Line::from(spans)
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
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Length(MENU_ITEMS.len() as u16 * 3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "TypeMaster",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Typing practice and timed challenges",
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                MENU_ITEMS
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in MENU_ITEMS.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.mode.label());
            let desc_text = format!("     {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    desc_text,
                    Style::default().fg(colors.text_pending()),
                )),
            ];

            if i < item_layout.len() {
                Paragraph::new(lines).render(item_layout[i], buf);
            }
        }

        if Menu::mode_at(self.selected) == GameMode::Challenge {
            Paragraph::new(self.difficulty_line())
                .alignment(Alignment::Center)
                .render(layout[3], buf);
        }
    }
}
