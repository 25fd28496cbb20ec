mod app;
mod event;
mod logging;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use satzbau::config::Config;
use satzbau::session::scheduler::Phase;

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use ui::components::answer_area::AnswerArea;
use ui::components::progress_bar::ProgressBar;
use ui::components::summary::SummaryDashboard;
use ui::components::token_bank::{TokenBankView, slot_for_key};
use ui::layout::{AppLayout, LessonLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "satzbau", version, about = "Terminal sentence-building drills")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Lesson file (JSON) to start immediately")]
    lesson: Option<PathBuf>,

    #[arg(short, long, help = "Bundled lesson to start immediately")]
    builtin: Option<String>,

    #[arg(short, long, help = "Generate a lesson from a topic prompt")]
    generate: Option<String>,

    #[arg(short, long, help = "Fixed seed for token bank shuffles")]
    seed: Option<u64>,

    #[arg(long, help = "Log level or filter directive (overridden by RUST_LOG)")]
    log_level: Option<String>,

    #[arg(long, help = "Write --theme and --seed back to the config file")]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|err| {
        eprintln!("Warning: ignoring unreadable config: {err:#}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(seed) = cli.seed {
        config.shuffle_seed = Some(seed);
    }
    if cli.save_config {
        let path = config.save()?;
        eprintln!("Saved config to {}", path.display());
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let _log_guard = logging::init_tracing(&config.log_level, &PathBuf::from(&config.log_dir));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let mut app = App::new(config);

    // Resolve the requested lesson before touching the terminal so errors
    // print normally.
    if let Some(path) = cli.lesson {
        app.start_file(&path)?;
    } else if let Some(name) = cli.builtin {
        app.start_named(&name)?;
    } else if let Some(prompt) = cli.generate {
        app.start_generated(&prompt)?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = %format!("{err:#}"), "exited with error");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick | AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::LessonSelect => handle_menu_key(app, key),
        AppScreen::Lesson => handle_lesson_key(app, key),
        AppScreen::Summary => handle_summary_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Char('r') => app.refresh_lessons(),
        KeyCode::Enter => app.start_selected(),
        KeyCode::Char(ch) => {
            if app.menu.select_key(ch) {
                app.start_selected();
            }
        }
        _ => {}
    }
}

fn handle_lesson_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_to_menu(),
        KeyCode::Backspace => app.clear_current(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Char(ch) => {
            if let Some(slot) = slot_for_key(ch) {
                app.select_slot(slot);
            }
        }
        _ => {}
    }
}

fn handle_summary_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_lesson(),
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => app.go_to_menu(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::LessonSelect => render_menu(frame, app),
        AppScreen::Lesson => render_lesson(frame, app),
        AppScreen::Summary => render_summary(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " satzbau ",
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
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.accent_dim()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    let info = match app.history.summaries.last() {
        Some(last) => format!(
            " {} lessons | last: {} {}/{}",
            app.choices.len(),
            last.lesson_title,
            last.correct,
            last.total
        ),
        None => format!(" {} lessons", app.choices.len()),
    };
    render_header(frame, app, layout.header, &info);

    let menu_area = ui::layout::centered_rect(50, 80, layout.main);
    frame.render_widget(&app.menu, menu_area);

    if let Some(ref status) = app.status {
        let colors = &app.theme.colors;
        let line = Paragraph::new(Line::from(Span::styled(
            format!("  {status}"),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(line, layout.footer);
    } else {
        render_footer(
            frame,
            app,
            layout.footer,
            &["[Enter/key] Start", "[j/k] Move", "[r] Rescan", "[q] Quit"],
        );
    }
}

fn render_lesson(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let (Some(lesson), Some(queue)) = (&app.lesson, &app.queue) else {
        return;
    };

    let phase_label = match queue.phase() {
        Phase::Initial => "first pass",
        Phase::Correction => "review",
    };
    render_header(frame, app, layout.header, &format!(" {} | {phase_label}", lesson.title));

    let body = LessonLayout::new(layout.main, queue.token_bank().len());

    let progress = queue.progress();
    let bar = match (queue.phase(), queue.correction_total()) {
        (Phase::Correction, Some(total)) => {
            ProgressBar::new("Review", total.saturating_sub(progress.len), total, app.theme)
        }
        _ => ProgressBar::new("Lesson", progress.position, progress.len, app.theme),
    };
    frame.render_widget(bar, body.progress);

    if let Some(exercise) = queue.active_exercise() {
        frame.render_widget(
            AnswerArea::new(
                exercise,
                queue.current_selection(),
                queue.last_outcome(),
                app.theme,
            ),
            body.answer,
        );
    }

    frame.render_widget(
        TokenBankView::new(
            queue.token_bank(),
            queue.used_slots(),
            queue.is_locked(),
            app.theme,
        ),
        body.bank,
    );

    let hints: &[&str] = if queue.is_locked() {
        &["[Enter] Next", "[Esc] Menu"]
    } else {
        &["[1-0,a-j] Pick token", "[Backspace] Clear", "[Enter] Check", "[Esc] Menu"]
    };
    render_footer(frame, app, layout.footer, hints);
}

fn render_summary(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    render_header(frame, app, layout.header, " lesson complete");

    if let Some(ref summary) = app.last_summary {
        let area = ui::layout::centered_rect(60, 70, layout.main);
        frame.render_widget(SummaryDashboard::new(summary, app.theme), area);
    }
}
