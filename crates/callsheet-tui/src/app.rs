use std::collections::VecDeque;

use callsheet_core::domain::{
    cycle_country_code, normalize_country_code, HotelContactUpdate, HotelId, NewHotelContact,
    ResponseStatus,
};
use callsheet_core::dto::{HotelRowDto, RosterSummary};
use callsheet_core::rules::{validate_new_contact, validate_update};
use callsheet_core::{select_all, CallCursor, Selection, SelectionState};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::actions::Action;

const LIST_EMPTY: &str = "No hotels. Press 'a' to add one.";

#[derive(Debug, Clone)]
pub enum Mode {
    List,
    ModalAddHotel(HotelForm),
    ModalEditHotel(HotelForm),
    Confirm(ConfirmState),
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub hotels: Vec<HotelRowDto>,
    pub summary: Option<RosterSummary>,
    pub selected: usize,
    pub selection: Selection,
    pub cursor: CallCursor,
    pub dial_queue: VecDeque<HotelId>,
    pub status: Option<String>,
    pub error: Option<String>,
    pub default_country_code: String,
    actions: VecDeque<Action>,
    pub(crate) pending_select: Option<HotelId>,
}

impl App {
    pub fn new(default_country_code: String) -> Self {
        let mut app = Self {
            mode: Mode::List,
            show_help: false,
            should_quit: false,
            hotels: Vec::new(),
            summary: None,
            selected: 0,
            selection: Selection::new(),
            cursor: CallCursor::new(),
            dial_queue: VecDeque::new(),
            status: None,
            error: None,
            default_country_code,
            actions: VecDeque::new(),
            pending_select: None,
        };
        app.enqueue(Action::Refresh);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn empty_hint(&self) -> &'static str {
        LIST_EMPTY
    }

    pub fn selected_row(&self) -> Option<&HotelRowDto> {
        self.hotels.get(self.selected)
    }

    pub fn selected_hotel_id(&self) -> Option<HotelId> {
        self.selected_row().map(|row| row.id)
    }

    pub fn hotel_ids(&self) -> Vec<HotelId> {
        self.hotels.iter().map(|row| row.id).collect()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state(&self.hotel_ids())
    }

    pub fn apply_rows(&mut self, rows: Vec<HotelRowDto>, summary: RosterSummary) {
        self.hotels = rows;
        self.summary = Some(summary);
        if let Some(target) = self.pending_select.take() {
            if let Some(pos) = self.hotels.iter().position(|row| row.id == target) {
                self.selected = pos;
            }
        }
        if self.selected >= self.hotels.len() {
            self.selected = self.hotels.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::List);
        match &mut mode {
            Mode::List => {
                if let Some(next) = self.handle_list_key(key) {
                    mode = next;
                }
            }
            Mode::ModalAddHotel(form) | Mode::ModalEditHotel(form) => {
                if let Some(next) = self.handle_hotel_form_key(form, key) {
                    mode = next;
                }
            }
            Mode::Confirm(state) => {
                if let Some(next) = self.handle_confirm_key(state, key) {
                    mode = next;
                }
            }
        }
        self.mode = mode;
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(5),
            KeyCode::PageUp => self.move_selection(-5),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                if !self.hotels.is_empty() {
                    self.selected = self.hotels.len() - 1;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_hotel_id() {
                    self.selection.toggle(id);
                }
            }
            KeyCode::Char('A') => {
                self.selection = select_all(&self.selection, &self.hotel_ids());
            }
            KeyCode::Esc => {
                if !self.dial_queue.is_empty() {
                    self.dial_queue.clear();
                    self.set_status("Dial queue cleared");
                }
            }
            KeyCode::Char('a') => {
                return Some(Mode::ModalAddHotel(HotelForm::new(
                    &self.default_country_code,
                )));
            }
            KeyCode::Char('e') => {
                if let Some(row) = self.selected_row() {
                    return Some(Mode::ModalEditHotel(HotelForm::from_row(row)));
                }
            }
            KeyCode::Char('d') => {
                if let Some(row) = self.selected_row() {
                    let message = format!("Delete {}? (y/n)", display_name(row));
                    return Some(Mode::Confirm(ConfirmState::new(
                        message,
                        ConfirmAction::DeleteHotel(row.id),
                    )));
                }
            }
            KeyCode::Char('r') => {
                if let Some(row) = self.selected_row() {
                    let action = Action::SetStatus(row.id, row.response_status.next());
                    self.enqueue(action);
                }
            }
            KeyCode::Char('R') => {
                if let Some(row) = self.selected_row() {
                    let action = Action::SetStatus(row.id, row.response_status.prev());
                    self.enqueue(action);
                }
            }
            KeyCode::Char(digit @ '1'..='4') => {
                if let (Some(id), Some(status)) = (
                    self.selected_hotel_id(),
                    ResponseStatus::from_shortcut(digit),
                ) {
                    self.enqueue(Action::SetStatus(id, status));
                }
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.selected_hotel_id() {
                    self.enqueue(Action::CallHotel(id));
                }
            }
            KeyCode::Char('n') => self.enqueue(Action::CallNext),
            KeyCode::Char('N') => {
                self.cursor.reset();
                self.set_status("Call cursor reset");
            }
            KeyCode::Char('C') => self.enqueue(Action::CallSelected),
            _ => {}
        }
        None
    }

    fn handle_hotel_form_key(&mut self, form: &mut HotelForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(Mode::List),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Enter => {
                if form.is_save_focus() {
                    match form.to_action() {
                        Ok(action) => {
                            self.clear_error();
                            self.enqueue(action);
                            return Some(Mode::List);
                        }
                        Err(err) => self.set_error(err),
                    }
                } else if form.is_cancel_focus() {
                    return Some(Mode::List);
                } else {
                    form.focus_next();
                }
            }
            _ => {
                if form.is_status_focus() {
                    if let KeyCode::Char(digit) = key.code {
                        if let Some(status) = ResponseStatus::from_shortcut(digit) {
                            form.response_status = status;
                        }
                    }
                } else if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                }
            }
        }
        None
    }

    fn handle_confirm_key(&mut self, state: &mut ConfirmState, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.enqueue(state.to_action());
                Some(Mode::List)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Mode::List),
            _ => None,
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.hotels.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.hotels.len() as i32;
        let next = (self.selected as i32 + delta).clamp(0, len - 1);
        self.selected = next as usize;
    }
}

pub fn display_name(row: &HotelRowDto) -> &str {
    if row.name.trim().is_empty() {
        "(unnamed)"
    } else {
        &row.name
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

/// Add/edit modal. Focus runs over the six fields, then Save and Cancel.
#[derive(Debug, Clone)]
pub struct HotelForm {
    pub(crate) focus: usize,
    pub hotel_id: Option<HotelId>,
    pub name: String,
    pub country_code: String,
    pub phone_number: String,
    pub address: String,
    pub response_status: ResponseStatus,
    pub conversation: String,
}

impl HotelForm {
    const FIELD_COUNT: usize = 6;
    pub const COUNTRY_CODE_FIELD: usize = 1;
    pub const STATUS_FIELD: usize = 4;

    pub fn new(default_country_code: &str) -> Self {
        Self {
            focus: 0,
            hotel_id: None,
            name: String::new(),
            country_code: default_country_code.to_string(),
            phone_number: String::new(),
            address: String::new(),
            response_status: ResponseStatus::default(),
            conversation: String::new(),
        }
    }

    pub fn from_row(row: &HotelRowDto) -> Self {
        Self {
            focus: 0,
            hotel_id: Some(row.id),
            name: row.name.clone(),
            country_code: row.country_code.clone(),
            phone_number: row.phone_number.clone(),
            address: row.address.clone(),
            response_status: row.response_status,
            conversation: row.conversation.clone(),
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focus_next(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        self.focus = (self.focus + 1) % total;
    }

    pub fn focus_prev(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        if self.focus == 0 {
            self.focus = total - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn is_save_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 1
    }

    pub fn is_status_focus(&self) -> bool {
        self.focus == Self::STATUS_FIELD
    }

    /// Left/right picks from the country code catalogue or the status list,
    /// depending on focus. Other fields ignore it.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            Self::COUNTRY_CODE_FIELD => {
                self.country_code =
                    cycle_country_code(self.country_code.trim(), forward).to_string();
            }
            Self::STATUS_FIELD => {
                self.response_status = if forward {
                    self.response_status.next()
                } else {
                    self.response_status.prev()
                };
            }
            _ => {}
        }
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.name),
            1 => Some(&mut self.country_code),
            2 => Some(&mut self.phone_number),
            3 => Some(&mut self.address),
            5 => Some(&mut self.conversation),
            _ => None,
        }
    }

    pub fn to_action(&self) -> Result<Action, String> {
        let country_code = if self.country_code.trim().is_empty() {
            None
        } else {
            Some(normalize_country_code(&self.country_code).map_err(|err| err.to_string())?)
        };

        if let Some(id) = self.hotel_id {
            let update = HotelContactUpdate {
                name: Some(self.name.trim().to_string()),
                country_code,
                phone_number: Some(self.phone_number.trim().to_string()),
                address: Some(self.address.trim().to_string()),
                response_status: Some(self.response_status),
                conversation: Some(self.conversation.trim().to_string()),
            };
            validate_update(&update).map_err(|err| err.to_string())?;
            Ok(Action::UpdateHotel(id, update))
        } else {
            let fields = NewHotelContact {
                name: self.name.trim().to_string(),
                country_code,
                phone_number: self.phone_number.trim().to_string(),
                address: self.address.trim().to_string(),
                response_status: self.response_status,
                conversation: self.conversation.trim().to_string(),
            };
            validate_new_contact(&fields).map_err(|err| err.to_string())?;
            Ok(Action::AddHotel(fields))
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteHotel(HotelId),
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

impl ConfirmState {
    pub fn new(message: String, action: ConfirmAction) -> Self {
        Self { message, action }
    }

    pub fn to_action(&self) -> Action {
        match self.action {
            ConfirmAction::DeleteHotel(id) => Action::DeleteHotel(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, HotelForm, Mode};
    use crate::actions::Action;
    use callsheet_core::domain::{HotelId, ResponseStatus};
    use callsheet_core::{sample_roster, RosterStore, SelectionState};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn loaded_app() -> App {
        let mut store = RosterStore::from_seed("+234", sample_roster());
        store.add(callsheet_core::NewHotelContact {
            name: "Lagos Inn".to_string(),
            phone_number: "8031234567".to_string(),
            address: "Yaba".to_string(),
            ..Default::default()
        });
        let mut app = App::new("+234".to_string());
        app.next_action();
        app.apply_rows(store.rows(), store.summary());
        app
    }

    fn drain(app: &mut App) -> Vec<Action> {
        std::iter::from_fn(|| app.next_action()).collect()
    }

    #[test]
    fn new_app_requests_refresh() {
        let mut app = App::new("+234".to_string());
        assert!(matches!(app.next_action(), Some(Action::Refresh)));
        assert!(app.next_action().is_none());
    }

    #[test]
    fn movement_is_clamped() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn space_and_select_all_toggle_selection() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.selection_state(), SelectionState::Some(1));
        press(&mut app, KeyCode::Char('A'));
        assert_eq!(app.selection_state(), SelectionState::All);
        press(&mut app, KeyCode::Char('A'));
        assert_eq!(app.selection_state(), SelectionState::None);
    }

    #[test]
    fn status_keys_enqueue_status_changes() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('R'));
        press(&mut app, KeyCode::Char('4'));
        let actions = drain(&mut app);
        assert!(matches!(
            actions.as_slice(),
            [
                Action::SetStatus(HotelId(1), ResponseStatus::SwitchedOff),
                Action::SetStatus(HotelId(1), ResponseStatus::Answered),
                Action::SetStatus(HotelId(1), ResponseStatus::SwitchedOff),
            ]
        ));
    }

    #[test]
    fn call_keys_enqueue_calls() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Char('C'));
        let actions = drain(&mut app);
        assert!(matches!(
            actions.as_slice(),
            [
                Action::CallHotel(HotelId(1)),
                Action::CallNext,
                Action::CallSelected
            ]
        ));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.mode, Mode::Confirm(_)));
        press(&mut app, KeyCode::Char('n'));
        assert!(matches!(app.mode, Mode::List));
        assert!(app.next_action().is_none());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(matches!(app.next_action(), Some(Action::DeleteHotel(HotelId(1)))));
    }

    #[test]
    fn q_types_into_form_instead_of_quitting() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Quay");
        assert!(!app.should_quit);
        match &app.mode {
            Mode::ModalAddHotel(form) => assert_eq!(form.name, "Quay"),
            other => panic!("unexpected mode {:?}", other),
        }
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn add_form_validates_before_saving() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Eko Hotel");
        for _ in 0..6 {
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.error.as_deref(), Some("phone number is required"));
        assert!(matches!(app.mode, Mode::ModalAddHotel(_)));
    }

    #[test]
    fn add_form_builds_new_hotel() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Eko Hotel");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2125550100");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Victoria Island");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        assert!(matches!(app.mode, Mode::List));
        match app.next_action() {
            Some(Action::AddHotel(fields)) => {
                assert_eq!(fields.name, "Eko Hotel");
                assert_eq!(fields.country_code.as_deref(), Some("+1"));
                assert_eq!(fields.phone_number, "2125550100");
                assert_eq!(fields.response_status, ResponseStatus::Answered);
                assert!(fields.conversation.is_empty());
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn edit_form_starts_from_row() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('e'));
        let Mode::ModalEditHotel(form) = &app.mode else {
            panic!("expected edit modal");
        };
        assert_eq!(form.hotel_id, Some(HotelId(1)));
        assert_eq!(form.conversation, "kdkdkd");
        assert_eq!(form.response_status, ResponseStatus::CallBack);
    }

    #[test]
    fn form_rejects_bad_country_code() {
        let mut form = HotelForm::new("+234");
        form.name = "Eko".to_string();
        form.phone_number = "1".to_string();
        form.address = "VI".to_string();
        form.country_code = "+12345".to_string();
        assert!(form.to_action().is_err());
    }

    #[test]
    fn country_code_cycles_through_catalogue() {
        let mut form = HotelForm::new("+234");
        form.focus = HotelForm::COUNTRY_CODE_FIELD;
        form.cycle(false);
        assert_eq!(form.country_code, "+233");
        form.cycle(true);
        assert_eq!(form.country_code, "+234");
    }

    #[test]
    fn apply_rows_clamps_and_follows_pending_selection() {
        let mut app = loaded_app();
        app.selected = 1;
        let store = RosterStore::from_seed("+234", sample_roster());
        app.apply_rows(store.rows(), store.summary());
        assert_eq!(app.selected, 0);

        app.pending_select = Some(HotelId(1));
        app.apply_rows(store.rows(), store.summary());
        assert_eq!(app.selected, 0);
    }
}
