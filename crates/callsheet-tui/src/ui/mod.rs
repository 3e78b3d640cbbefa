use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use callsheet_core::domain::{region_for_country_code, ResponseStatus};
use callsheet_core::SelectionState;

use crate::app::{display_name, App, ConfirmState, HotelForm, Mode};

const ORANGE: Color = Color::Rgb(255, 165, 0);

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
        ])
        .split(size);

    render_header(frame, chunks[0], app);
    render_roster(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }

    match &app.mode {
        Mode::ModalAddHotel(form) => render_hotel_form(frame, size, "Add Hotel", form),
        Mode::ModalEditHotel(form) => render_hotel_form(frame, size, "Edit Hotel", form),
        Mode::Confirm(state) => render_confirm(frame, size, state),
        Mode::List => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let callable = app.hotels.iter().filter(|row| row.callable).count();
    let selected = match app.selection_state() {
        SelectionState::None => "none".to_string(),
        SelectionState::Some(count) => count.to_string(),
        SelectionState::All => "all".to_string(),
    };
    let cursor = app
        .cursor
        .current()
        .map(|index| format!("row {}", index + 1))
        .unwrap_or_else(|| "start".to_string());
    let mut title = format!(
        "hotels: {}  callable: {}  selected: {}  next call after: {}",
        app.hotels.len(),
        callable,
        selected,
        cursor
    );
    if !app.dial_queue.is_empty() {
        title.push_str(&format!("  queued: {}", app.dial_queue.len()));
    }

    let block = Block::default().borders(Borders::ALL).title("callsheet");
    let paragraph = Paragraph::new(Line::from(title)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::List => "j/k move  space select  A all  a add  e edit  d delete  r/R status  c call  n next  C call selected  ? help",
        Mode::Confirm(_) => "y confirm  n cancel",
        _ => "tab next  shift+tab prev  ←/→ cycle  enter select  esc cancel",
    };

    let mut legend = Vec::new();
    for status in ResponseStatus::ALL {
        let count = app
            .summary
            .as_ref()
            .map(|summary| summary.count(status))
            .unwrap_or(0);
        legend.push(Span::styled(
            format!("■ {} ({})", status.label(), count),
            status_style(status),
        ));
        legend.push(Span::raw("  "));
    }

    let mut lines = vec![
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        Line::from(legend),
    ];

    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_roster(frame: &mut Frame<'_>, area: Rect, app: &App) {
    if app.hotels.is_empty() {
        let paragraph = Paragraph::new(app.empty_hint())
            .block(Block::default().borders(Borders::ALL).title("Hotels"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let cursor = app.cursor.current();
    let rows: Vec<Row> = app
        .hotels
        .iter()
        .map(|row| {
            let mark = if app.selection.contains(row.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let phone = if row.phone_number.is_empty() {
                Span::styled("-", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(format!("{} {}", row.country_code, row.phone_number))
            };
            let cells = vec![
                Cell::from(mark),
                Cell::from(row.id.to_string()),
                Cell::from(Span::styled(
                    display_name(row).to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Cell::from(phone),
                Cell::from(row.address.clone()),
                Cell::from(Span::styled(
                    row.status_label.clone(),
                    status_style(row.response_status),
                )),
                Cell::from(row.conversation.clone()),
            ];
            let style = if cursor == Some(row.position) {
                Style::default().add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let header = Row::new(vec![
        "", "No.", "Hotel", "Phone", "Address", "Response", "Conversation",
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Percentage(20),
        Constraint::Length(18),
        Constraint::Percentage(20),
        Constraint::Length(25),
        Constraint::Min(10),
    ];

    let mut state = TableState::default();
    state.select(Some(app.selected));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Hotels"))
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_hotel_form(frame: &mut Frame<'_>, area: Rect, title: &str, form: &HotelForm) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let region = region_for_country_code(form.country_code.trim()).unwrap_or("custom");
    let block = Block::default().borders(Borders::ALL).title(title);
    let mut lines = vec![
        field_line("Name", &form.name, form.focus() == 0),
        field_line(
            "Country code",
            &format!("{} ({})", form.country_code, region),
            form.focus() == HotelForm::COUNTRY_CODE_FIELD,
        ),
        field_line("Phone number", &form.phone_number, form.focus() == 2),
        field_line("Address", &form.address, form.focus() == 3),
        field_line(
            "Response",
            form.response_status.label(),
            form.focus() == HotelForm::STATUS_FIELD,
        ),
        field_line("Conversation", &form.conversation, form.focus() == 5),
        Line::from(Span::styled(
            "←/→ cycles country codes and responses. 1-4 picks a response.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let save_style = if form.is_save_focus() {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let cancel_style = if form.is_cancel_focus() {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };

    lines.push(Line::from(vec![
        Span::styled("[Save]", save_style),
        Span::raw("  "),
        Span::styled("[Cancel]", cancel_style),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, state: &ConfirmState) {
    let modal = centered_rect(50, 30, area);
    frame.render_widget(Clear, modal);
    let paragraph = Paragraph::new(state.message.clone())
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 70, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: q quit, Ctrl+C quit, ? help"),
        Line::from("Move: j/k, PgUp/PgDn, g/G"),
        Line::from("Select: space toggle row, A select all / none"),
        Line::from("Edit: a add, e edit, d delete, r/R next/previous response, 1-4 set response"),
        Line::from("Call: c highlighted row, n next callable, N restart from the top"),
        Line::from("Call selected: C dials the first selected hotel, press again for each next one, esc drops the queue"),
        Line::from("Modals: tab/shift+tab move, ←/→ cycle, enter activate, esc cancel"),
        Line::from(""),
        Line::from("Rows without a phone number are skipped when calling. The underlined row was dialed last."),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn status_style(status: ResponseStatus) -> Style {
    match status {
        ResponseStatus::NoAnswer => Style::default().fg(Color::Red),
        ResponseStatus::Answered => Style::default().fg(Color::Green),
        ResponseStatus::CallBack => Style::default().fg(ORANGE),
        ResponseStatus::SwitchedOff => Style::default().fg(Color::DarkGray),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::draw;
    use crate::app::App;
    use callsheet_core::{sample_roster, RosterStore};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn draw_renders_roster_rows() {
        let store = RosterStore::from_seed("+234", sample_roster());
        let mut app = App::new("+234".to_string());
        app.apply_rows(store.rows(), store.summary());

        let mut terminal = Terminal::new(TestBackend::new(160, 24)).expect("terminal");
        terminal.draw(|frame| draw(frame, &app)).expect("draw");

        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Fine"));
        assert!(text.contains("+234 703040040"));
        assert!(text.contains("Call back in 2-3 minutes"));
    }
}
