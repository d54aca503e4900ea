use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use outline_cursor_config::{Config, ViewportConfig};
use outline_cursor_engine::{
    ContentAbstraction, CursorNavigator, DomTree, LineLayout, MemorySelection, Move, NodeId, OutlineOptions,
    RenderTree, SelectionApi, ViewportPolicy, parse_outline,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::{
    env,
    fs::OpenOptions,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Caret {
    project: NodeId,
    offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Navigate(Move),
    ToggleOpen,
    Quit,
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::Navigate(Move::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::Navigate(Move::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Navigate(Move::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Navigate(Move::Down)),
        KeyCode::Home => Some(Action::Navigate(Move::Start)),
        KeyCode::End => Some(Action::Navigate(Move::End)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ToggleOpen),
        _ => None,
    }
}

/// Rows hidden behind the floating header, converted from layout units.
fn overlay_rows(viewport: &ViewportConfig) -> f64 {
    if viewport.line_height <= 0.0 {
        return 0.0;
    }
    (viewport.floating_overlay_height / viewport.line_height).ceil().max(0.0)
}

struct App {
    title: String,
    tree: DomTree,
    selection: MemorySelection,
    caret: Option<Caret>,
    /// Scroll position in terminal rows.
    scroll_top: f64,
    overlay_rows: f64,
    /// Height of the outline area as of the last draw.
    viewport_rows: u16,
    status: Option<String>,
}

impl App {
    fn new(title: String, tree: DomTree, overlay_rows: f64) -> Self {
        let mut app = Self {
            title,
            tree,
            selection: MemorySelection::new(),
            caret: None,
            scroll_top: 0.0,
            overlay_rows,
            viewport_rows: 0,
            status: None,
        };
        app.place_initial_caret();
        app
    }

    fn place_initial_caret(&mut self) {
        let Some(&(project, _)) = self.tree.visible_projects().first() else {
            return;
        };
        let Some(container) = self.tree.content(project) else {
            return;
        };
        ContentAbstraction::for_container(&self.tree, container).place_cursor_at(&mut self.selection, 0);
        self.caret = Some(Caret { project, offset: 0 });
    }

    fn layout(&self) -> LineLayout<'_> {
        LineLayout::new(&self.tree, 1.0, f64::from(self.viewport_rows))
            .with_padding_top(self.overlay_rows)
            .with_scroll_top(self.scroll_top)
    }

    fn navigate(&mut self, movement: Move) {
        let Some(start) = self.selection.anchor().map(|point| point.node) else {
            return;
        };

        let mut layout = LineLayout::new(&self.tree, 1.0, f64::from(self.viewport_rows))
            .with_padding_top(self.overlay_rows)
            .with_scroll_top(self.scroll_top);
        let result = CursorNavigator::new(&self.tree, &mut self.selection, &mut layout)
            .with_policy(ViewportPolicy::new(self.overlay_rows))
            .navigate(movement, start);
        self.scroll_top = layout.scroll_top();

        match result {
            Ok(moved) => {
                self.caret = Some(Caret {
                    project: moved.project,
                    offset: moved.offset,
                });
                self.status = None;
            }
            Err(e) => {
                log::warn!("{movement:?} from {start:?} failed: {e}");
                self.status = Some(e.to_string());
            }
        }
    }

    fn toggle_open(&mut self) {
        let Some(caret) = self.caret else {
            return;
        };
        if self.tree.child_projects(caret.project).is_empty() {
            return;
        }
        self.tree.toggle_open(caret.project);

        // The caret line can end up past the fold once the outline shrinks
        let mut layout = self.layout();
        if let Some(container) = self.tree.content(caret.project) {
            ViewportPolicy::new(self.overlay_rows).ensure_visible(&mut layout, container);
        }
        self.scroll_top = layout.scroll_top();
    }

    /// Applies `action`, returning false once the app should exit.
    fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::Navigate(movement) => self.navigate(movement),
            Action::ToggleOpen => self.toggle_open(),
        }
        true
    }

    fn outline_lines(&self, rows: u16) -> Vec<Line<'static>> {
        let mut lines = vec![Line::default(); usize::from(rows)];
        for (index, (project, depth)) in self.tree.visible_projects().into_iter().enumerate() {
            let top = self.overlay_rows + index as f64 - self.scroll_top;
            if top < 0.0 || top >= f64::from(rows) {
                continue;
            }
            lines[top as usize] = self.render_project(project, depth);
        }
        lines
    }

    fn render_project(&self, project: NodeId, depth: usize) -> Line<'static> {
        let bullet = match self.tree.project(project) {
            _ if self.tree.child_projects(project).is_empty() => "• ",
            Some(node) if node.is_open => "▾ ",
            _ => "▸ ",
        };
        let text = self
            .tree
            .content(project)
            .map(|container| self.tree.text(container))
            .unwrap_or_default();

        let mut spans = vec![Span::raw(format!("{}{}", "  ".repeat(depth), bullet))];
        match self.caret {
            Some(caret) if caret.project == project => {
                let before: String = text.chars().take(caret.offset).collect();
                let selected = text
                    .chars()
                    .nth(caret.offset)
                    .map(String::from)
                    .unwrap_or_else(|| " ".to_string());
                let after: String = text.chars().skip(caret.offset + 1).collect();
                spans.push(Span::raw(before));
                spans.push(Span::styled(
                    selected,
                    Style::default().bg(Color::Yellow).fg(Color::Black),
                ));
                spans.push(Span::raw(after));
            }
            _ => spans.push(Span::raw(text)),
        }
        Line::from(spans)
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let outline_path = match (args.len(), &config.outline_path) {
        (2, _) => PathBuf::from(&args[1]),
        (1, Some(path)) => path.clone(),
        (1, None) => {
            eprintln!("Error: No outline provided and no outline_path in config");
            eprintln!("Usage: {} <outline.md>", args[0]);
            eprintln!("Or set outline_path in {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [outline.md]", args[0]);
            process::exit(1);
        }
    };

    init_logging(config.log_file.as_deref())?;
    log::info!("outline-cursor starting with {}", outline_path.display());

    let markdown = std::fs::read_to_string(&outline_path)
        .with_context(|| format!("Failed to read outline '{}'", outline_path.display()))?;
    let tree = parse_outline(
        &markdown,
        OutlineOptions {
            open_by_default: config.open_by_default,
        },
    );
    let title = outline_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| outline_path.display().to_string());
    let mut app = App::new(title, tree, overlay_rows(&config.viewport));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = action_for(key.code)
            && !app.handle(action)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());
    let outline_area = chunks[0];
    app.viewport_rows = outline_area.height;

    f.render_widget(Paragraph::new(app.outline_lines(outline_area.height)), outline_area);

    // Header floats over the first rows of the outline
    let header_area = Rect {
        height: (app.overlay_rows as u16).min(outline_area.height),
        ..outline_area
    };
    let header = Paragraph::new(Line::from(Span::styled(
        app.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(Clear, header_area);
    f.render_widget(header, header_area);

    let help_text = match &app.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("←↑↓→: Move | "),
            Span::raw("Home/End: Line start/end | "),
            Span::raw("Enter/Space: Open/close"),
        ]),
    };
    f.render_widget(Paragraph::new(help_text), chunks[1]);
}
