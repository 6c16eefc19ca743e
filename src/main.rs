mod app;
mod calendar;
mod components;
mod theme;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};

fn main() -> Result<()> {
    color_eyre::install()?;

    let mut app = App::new();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            // Main layout: month grid + status bar
            let layout = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            components::MonthView::render(
                frame,
                layout[0],
                &app.days,
                app.reference,
                app.cursor,
                app.today,
                &app.store,
                app.selected,
            );

            // Render event form overlay
            if let Some(ref form) = app.form {
                components::EventForm::render(frame, area, form);
            }

            // Render help overlay
            if app.show_help {
                render_help(frame, area);
            }

            render_status_bar(frame, layout[1], app);
        })?;

        if let Some(key) = tui::next_key_event(Duration::from_millis(100))? {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode() {
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('n'), _) => app.open_form(),
        (KeyCode::Char('e'), _) => app.edit_selected(),
        (KeyCode::Char('d'), _) => app.delete_selected(),
        (KeyCode::Enter, _) => app.cycle_selection(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_cursor(-1),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.move_cursor(1),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.move_cursor(-7),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.move_cursor(7),
        (KeyCode::Char('['), _) => app.prev_month(),
        (KeyCode::Char(']'), _) => app.next_month(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn render_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Paragraph;

    let w = area.width as usize;

    let mode_str = match app.input_mode() {
        InputMode::Form if app.form.as_ref().is_some_and(|f| f.editing.is_some()) => {
            "[Edit Event]"
        }
        InputMode::Form => "[New Event]",
        InputMode::Normal => "[Month]",
    };

    // Show status message if present, otherwise context-aware hints
    let right_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.input_mode() == InputMode::Form {
        " Tab:Next Enter:Save Esc:Cancel".to_string()
    } else if app.selected.is_some() && w >= 80 {
        " hjkl:Nav Enter:Cycle e:Edit d:Del n:New t:Today ?:Help q:Quit".to_string()
    } else if w >= 80 {
        " hjkl:Nav [/]:Month t:Today Enter:Select n:New ?:Help q:Quit".to_string()
    } else if w >= 50 {
        " arrows:Nav n:New q:Quit".to_string()
    } else {
        " ?:Help q:Quit".to_string()
    };

    let left = format!(" {} ", mode_str);
    let padding_len = w.saturating_sub(left.len() + right_text.len());
    let padding = " ".repeat(padding_len);

    let line = Line::from(vec![
        Span::styled(left, theme::current().status),
        Span::styled(padding, theme::current().status),
        Span::styled(right_text, theme::current().status),
    ]);

    let bar = Paragraph::new(line).style(theme::current().status);
    frame.render_widget(bar, area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(46).max(30);
    let popup_h = area.height.min(18).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        Line::from(vec![
            Span::styled("  h/l ", key_style),
            Span::styled("or ", theme::current().dim),
            Span::styled("\u{2190}/\u{2192}  ", key_style),
            Span::styled("Previous/next day", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  j/k ", key_style),
            Span::styled("or ", theme::current().dim),
            Span::styled("\u{2191}/\u{2193}  ", key_style),
            Span::styled("Next/previous week", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::styled("Previous/next month", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key_style),
            Span::styled("Jump to today", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Events", section_style)),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Select next event on day", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  n         ", key_style),
            Span::styled("New event on cursor day", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  e         ", key_style),
            Span::styled("Edit selected event", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::styled("Delete selected event", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
