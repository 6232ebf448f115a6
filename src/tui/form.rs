use crate::config::Config;
use crate::pipeline::{NoticeKind, Notifier};
use crate::tui::theme::Theme;
use crate::tui::widgets::{FormState, FormValues};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

/// Run the input form. Returns `None` if the user cancelled.
pub async fn run_form(
    config: &Config,
    company: &str,
    saved_api_key: &str,
) -> Result<Option<FormValues>> {
    let mut state = FormState::new(company, saved_api_key, config.ui.mask_credential);
    let theme = Theme::from_name(&config.ui.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_form_loop(&mut terminal, &mut state, &theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_form_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut FormState,
    theme: &Theme,
) -> Result<Option<FormValues>> {
    loop {
        terminal.draw(|f| draw_form(f, state, theme))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(state.values()));
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(None);
        }

        if state.editing {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => state.stop_editing(),
                KeyCode::Backspace => state.delete_char(),
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    state.clear_current()
                }
                KeyCode::Char(c) => state.insert_char(c),
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => state.move_up(),
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => state.move_down(),
                KeyCode::Enter => state.start_editing(),
                _ => {}
            }
        }
    }
}

fn draw_form(f: &mut Frame, state: &FormState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Fields
            Constraint::Min(3),    // Field description
            Constraint::Length(2), // Help
        ])
        .split(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled("riskbrief", theme.header)),
        Line::from("Company due-diligence brief, saved as JSON"),
    ])
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == state.selected;
            let style = if is_selected {
                theme.selected
            } else if field.sensitive {
                theme.sensitive
            } else {
                theme.normal
            };
            let cursor = if is_selected && state.editing { "_" } else { "" };

            ListItem::new(Line::from(Span::styled(
                format!("* {}: {}{}", field.label, field.display_value(), cursor),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Input").borders(Borders::ALL));
    f.render_widget(list, chunks[1]);

    if let Some(field) = state.current_field() {
        let desc = Paragraph::new(field.description)
            .style(theme.help)
            .wrap(Wrap { trim: true });
        f.render_widget(desc, chunks[2]);
    }

    let help_text = if state.editing {
        "ESC/Enter: finish editing | Backspace: delete | Ctrl+U: clear | Ctrl+S: analyze"
    } else {
        "↑/↓: navigate | Enter: edit | Ctrl+S: analyze | q/Esc: cancel"
    };
    let help = Paragraph::new(help_text).style(theme.help);
    f.render_widget(help, chunks[3]);
}

/// Show a blocking notice until a key is pressed
pub fn show_notice(theme: &Theme, message: &str, kind: NoticeKind) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_notice_dialog(&mut terminal, theme, message, kind);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_notice_dialog(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    theme: &Theme,
    message: &str,
    kind: NoticeKind,
) -> Result<()> {
    let (title, style) = match kind {
        NoticeKind::Info => ("Done", theme.success),
        NoticeKind::Error => ("Error", theme.error),
    };

    loop {
        terminal.draw(|f| {
            let area = centered_rect(70, 50, f.area());
            f.render_widget(Clear, area);

            let mut content: Vec<Line> = message
                .lines()
                .map(|line| Line::from(Span::styled(line.to_string(), style)))
                .collect();
            content.push(Line::from(""));
            content.push(Line::from(Span::styled("Press Enter to close", theme.help)));

            let paragraph = Paragraph::new(content)
                .block(Block::default().title(title).borders(Borders::ALL))
                .wrap(Wrap { trim: false });

            f.render_widget(paragraph, area);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press
                && matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
            {
                return Ok(());
            }
        }
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Notifier that shows each notice as a modal dialog
pub struct TuiNotifier {
    theme: Theme,
}

impl TuiNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            theme: Theme::from_name(&config.ui.theme),
        }
    }
}

impl Notifier for TuiNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        if let Err(e) = show_notice(&self.theme, message, kind) {
            tracing::warn!("Could not show dialog: {}", e);
            eprintln!("{}", message);
        }
    }
}
