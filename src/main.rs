use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use serde::Serialize;

use typemaster::app::{App, AppScreen};
use typemaster::config::Config;
use typemaster::engine::best::BestRecords;
use typemaster::engine::scoring::Difficulty;
use typemaster::event::{AppEvent, EventHandler};
use typemaster::generator::passage::{PassageGenerator, PassagePool};
use typemaster::generator::{RepeatText, TextSource};
use typemaster::session::mode::GameMode;
use typemaster::session::result::SessionResult;
use typemaster::ui;
use typemaster::ui::components::achievements::AchievementsPanel;
use typemaster::ui::components::dashboard::Dashboard;
use typemaster::ui::components::menu::Menu;
use typemaster::ui::components::progress_bar::ProgressBar;
use typemaster::ui::components::stats_sidebar::{StatsSidebar, compact_stats, format_clock};
use typemaster::ui::components::typing_area::TypingArea;
use typemaster::ui::layout::{AppLayout, pack_hint_lines};
use typemaster::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "typemaster", version, about = "Terminal typing practice and timed challenges")]
struct Cli {
    #[arg(short, long, value_enum, help = "Start in this mode")]
    mode: Option<GameMode>,

    #[arg(short, long, value_enum, help = "Challenge difficulty")]
    difficulty: Option<Difficulty>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "TOML file with a `passages` list to type from")]
    passages: Option<PathBuf>,

    #[arg(long, conflicts_with = "passages", help = "Type this exact text every round")]
    text: Option<String>,

    #[arg(long, help = "Seed for passage selection")]
    seed: Option<u64>,

    #[arg(long, help = "Print session history and best records as JSON on exit")]
    summary: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    best: &'a BestRecords,
    sessions: &'a VecDeque<SessionResult>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("warning: {err:#}; using default settings");
        Config::default()
    });
    if let Err(err) = config.validate() {
        eprintln!("warning: config: {err}; using default settings");
        config = Config::default();
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(path) = cli.passages {
        config.passages_file = Some(path.display().to_string());
    }

    let theme = Theme::load(&config.theme).unwrap_or_else(|| {
        eprintln!(
            "warning: theme `{}` not found (available: {}); using default",
            config.theme,
            Theme::available_themes().join(", ")
        );
        Theme::default()
    });

    let texts = build_text_source(&config, cli.text, cli.seed)?;
    let poll_rate = Duration::from_millis(config.practice_tick_ms.min(config.challenge_tick_ms));
    let mut app = App::new(config, texts);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(poll_rate);

    let result = run_app(&mut terminal, &mut app, &theme, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    if cli.summary {
        let summary = Summary {
            best: &app.best,
            sessions: &app.history,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn build_text_source(
    config: &Config,
    text: Option<String>,
    seed: Option<u64>,
) -> Result<Box<dyn TextSource>> {
    if let Some(text) = text {
        if !text.trim().is_empty() {
            return Ok(Box::new(RepeatText::new(text)));
        }
        eprintln!("warning: --text is blank; using passages instead");
    }

    let pool = match &config.passages_file {
        Some(path) => PassagePool::from_file(Path::new(path)).or_else(|err| {
            eprintln!("warning: passages file {path}: {err}; using bundled passages");
            PassagePool::bundled()
        }),
        None => PassagePool::bundled(),
    }
    .context("loading bundled passages")?;

    let rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    Ok(Box::new(PassageGenerator::new(pool, rng)))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    theme: &Theme,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app, theme))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(now) => app.on_tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Repeat and Release events would double-count keystrokes.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Menu => handle_menu_key(app, key),
        AppScreen::Session => handle_session_key(app, key),
        AppScreen::Results => handle_result_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start(GameMode::Practice, app.difficulty),
        KeyCode::Char('2') => app.start(GameMode::Challenge, app.difficulty),
        KeyCode::Up | KeyCode::Char('k') => app.menu_selected = Menu::prev(app.menu_selected),
        KeyCode::Down | KeyCode::Char('j') => app.menu_selected = Menu::next(app.menu_selected),
        KeyCode::Left | KeyCode::Char('h') => app.difficulty = app.difficulty.prev(),
        KeyCode::Right | KeyCode::Char('l') => app.difficulty = app.difficulty.next(),
        KeyCode::Enter => app.start(Menu::mode_at(app.menu_selected), app.difficulty),
        _ => {}
    }
}

fn handle_session_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Tab => app.reset(),
        KeyCode::Backspace => {
            app.backspace(now);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input(now);
        }
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
        KeyCode::Char(ch) => {
            app.type_char(ch, now);
        }
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Tab | KeyCode::Char('r') => app.reset(),
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let colors = &theme.colors;

    frame.render_widget(Block::default().style(Style::default().bg(colors.bg())), area);

    match app.screen {
        AppScreen::Menu => render_menu(frame, app, theme),
        AppScreen::Session => render_session(frame, app, theme),
        AppScreen::Results => render_result(frame, app, theme),
    }
}

fn header<'a>(title: &'a str, info: String, theme: &Theme) -> Paragraph<'a> {
    let colors = &theme.colors;
    Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()))
}

fn footer(hints: &[&str], width: u16, theme: &Theme) -> Paragraph<'static> {
    let lines: Vec<Line> = pack_hint_lines(hints, width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.colors.text_pending()))))
        .collect();
    Paragraph::new(lines)
}

fn render_menu(frame: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let best = &app.best;
    let info = format!(
        " Best: {} WPM | {}% accuracy | {} challenge points",
        best.practice.wpm, best.practice.accuracy, best.challenge.score
    );
    frame.render_widget(header(" TypeMaster ", info, theme), layout[0]);

    let menu = Menu::new(app.menu_selected, app.difficulty, theme);
    let menu_area = ui::layout::centered_rect(50, 70, layout[1]);
    frame.render_widget(&menu, menu_area);

    let hints = [
        "[1-2/Enter] Start",
        "[\u{2191}\u{2193}] Mode",
        "[\u{2190}\u{2192}] Difficulty",
        "[q] Quit",
    ];
    frame.render_widget(footer(&hints, area.width, theme), layout[2]);
}

fn render_session(frame: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;
    let snapshot = app.snapshot();
    let session = &app.session;

    let title = match app.mode {
        GameMode::Practice => " Practice ".to_string(),
        GameMode::Challenge => format!(" Challenge ({}) ", app.difficulty.as_str()),
    };
    let unlocked = app.achievements();
    let info = if tier.show_sidebar() {
        String::new()
    } else {
        compact_stats(&snapshot, app.mode, unlocked.len())
    };
    frame.render_widget(header(&title, info, theme), app_layout.header);

    let show_progress = tier.show_progress_bar(area.height);

    let mut constraints = vec![Constraint::Min(5)];
    if show_progress {
        constraints.push(Constraint::Length(3));
    }
    if app_layout.sidebar.is_some() {
        constraints.push(Constraint::Length(7));
    }
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(app_layout.main);

    let typing_title = if session.has_started() {
        ""
    } else {
        "start typing"
    };
    frame.render_widget(
        TypingArea::new(session, theme).title(typing_title),
        main_layout[0],
    );

    let mut idx = 1;
    if show_progress {
        let bar = match (session.mode().time_limit(), session.time_remaining()) {
            (Some(limit), Some(remaining)) => {
                ProgressBar::new("Time Left", remaining.as_secs_f64() / limit.as_secs_f64(), theme)
                    .caption(format_clock(remaining.as_secs()))
            }
            _ => ProgressBar::new("Progress", session.progress(), theme),
        };
        frame.render_widget(bar, main_layout[idx]);
        idx += 1;
    }

    if let Some(sidebar_area) = app_layout.sidebar {
        frame.render_widget(AchievementsPanel::new(&unlocked, theme), main_layout[idx]);
        frame.render_widget(
            StatsSidebar::new(snapshot, app.mode, &app.best, theme),
            sidebar_area,
        );
    }

    let hints = [
        "[Tab] New passage",
        "[Ctrl+U] Clear",
        "[Esc] Menu",
        "[Ctrl+C] Quit",
    ];
    frame.render_widget(footer(&hints, area.width, theme), app_layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App, theme: &Theme) {
    let area = frame.area();

    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 60, area);
        let dashboard = Dashboard::new(result, app.last_improvement, theme);
        frame.render_widget(dashboard, centered);
    }
}
