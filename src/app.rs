use std::env;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::{info, warn};

use crate::concept::{
    ConceptValues, build_prompt, cycle_example, default_selection, default_values, reroll, toggle,
};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{Concept, ConceptExample, Prompt, Variable};
use crate::parser::{prompts_for_role, roles};
use crate::system::{
    catalog_path, concepts_path, ensure_catalog_file, load_concept_examples, load_prompts,
    run_editor_command, set_clipboard,
};
use crate::template::{Overrides, extract_variables, render_plain, seed, set, value_for};

const DOUBLE_CLICK_MS: u128 = 400;
const COPIED: &str = "Copied!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum View {
    Library,
    Detail,
    Builder,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Roles,
    Prompts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuilderFocus {
    Concepts,
    Fields,
}

#[derive(Clone, Debug)]
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) since: Instant,
}

/// A prompt opened for customization. Dropped when the view closes.
#[derive(Clone, Debug)]
pub(crate) struct DetailState {
    pub(crate) prompt: Prompt,
    pub(crate) variables: Vec<Variable>,
    pub(crate) values: Overrides,
    pub(crate) active_field: usize,
    pub(crate) field_scroll: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct BuilderState {
    pub(crate) examples: Vec<ConceptExample>,
    pub(crate) selected: Vec<Concept>,
    pub(crate) values: ConceptValues,
    pub(crate) focus: BuilderFocus,
    pub(crate) concept_cursor: usize,
    pub(crate) active_field: usize,
    pub(crate) field_scroll: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct App {
    pub(crate) config: Config,
    pub(crate) prompts: Vec<Prompt>,
    pub(crate) roles: Vec<String>,
    pub(crate) role_state: ListState,
    pub(crate) prompt_state: ListState,
    pub(crate) focus: Focus,
    pub(crate) view: View,
    pub(crate) detail: Option<DetailState>,
    pub(crate) builder: BuilderState,
    pub(crate) error_message: Option<String>,
    pub(crate) status: Option<StatusMessage>,
    pub(crate) last_click: Option<(usize, Instant)>,
    pub(crate) roles_area: Rect,
    pub(crate) prompts_area: Rect,
    pub(crate) should_quit: bool,
    pub(crate) needs_redraw: bool,
}

impl App {
    pub(crate) fn load(config: Config, start_in_builder: bool) -> Self {
        let examples = match concepts_path(&config).and_then(|path| load_concept_examples(&path)) {
            Ok(examples) => examples,
            Err(err) => {
                warn!(error = %err, "concept examples unavailable");
                Vec::new()
            }
        };

        let prompts = catalog_path(&config).and_then(|path| load_prompts(&path));
        let mut app = match prompts {
            Ok(prompts) => Self::new(config, prompts, examples),
            Err(err) => {
                warn!(error = %err, "failed to load catalog");
                let mut app = Self::new(config, Vec::new(), examples);
                app.view = View::Error;
                app.error_message = Some(err.to_string());
                app
            }
        };
        if start_in_builder && app.view != View::Error {
            app.view = View::Builder;
        }
        app
    }

    pub(crate) fn new(config: Config, prompts: Vec<Prompt>, examples: Vec<ConceptExample>) -> Self {
        Self {
            config,
            roles: roles(&prompts),
            prompts,
            role_state: ListState::default(),
            prompt_state: ListState::default(),
            focus: Focus::Roles,
            view: View::Library,
            detail: None,
            builder: BuilderState::new(examples),
            error_message: None,
            status: None,
            last_click: None,
            roles_area: Rect::default(),
            prompts_area: Rect::default(),
            should_quit: false,
            needs_redraw: false,
        }
    }

    pub(crate) fn selected_role(&self) -> Option<&str> {
        self.role_state
            .selected()
            .and_then(|index| self.roles.get(index))
            .map(String::as_str)
    }

    pub(crate) fn visible_prompts(&self) -> Vec<&Prompt> {
        prompts_for_role(&self.prompts, self.selected_role())
    }

    pub(crate) fn selected_prompt(&self) -> Option<&Prompt> {
        let index = self.prompt_state.selected()?;
        self.visible_prompts().get(index).copied()
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.view {
            View::Library => self.on_key_library(key),
            View::Detail => self.on_key_detail(key),
            View::Builder => self.on_key_builder(key),
            View::Error => self.on_key_error(key),
        }
    }

    pub(crate) fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.view == View::Library {
            self.on_mouse_library(mouse);
        }
    }

    fn on_key_error(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
        }
    }

    fn on_key_library(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Left | KeyCode::Char('h') => self.focus = Focus::Roles,
            KeyCode::Right | KeyCode::Char('l') => self.focus_prompts(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Enter => match self.focus {
                Focus::Roles => self.focus_prompts(),
                Focus::Prompts => self.open_selected_prompt(),
            },
            KeyCode::Char('c') => self.copy_selected_raw(),
            KeyCode::Char('b') => self.view = View::Builder,
            KeyCode::Char('e') => self.open_catalog_in_editor(),
            _ => {}
        }
    }

    fn on_mouse_library(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(index) =
            index_from_mouse(self.roles_area, self.role_state.offset(), self.roles.len(), mouse)
        {
            self.focus = Focus::Roles;
            self.select_role(index);
            return;
        }

        let len = self.visible_prompts().len();
        if let Some(index) = index_from_mouse(self.prompts_area, self.prompt_state.offset(), len, mouse) {
            self.focus = Focus::Prompts;
            self.prompt_state.select(Some(index));
            let now = Instant::now();
            if let Some((last_index, last_time)) = self.last_click {
                if last_index == index && last_time.elapsed().as_millis() <= DOUBLE_CLICK_MS {
                    self.open_selected_prompt();
                }
            }
            self.last_click = Some((index, now));
        }
    }

    fn on_key_detail(&mut self, key: KeyEvent) {
        let detail = match self.detail.as_mut() {
            Some(detail) => detail,
            None => return,
        };

        match key.code {
            KeyCode::Esc => {
                self.detail = None;
                self.view = View::Library;
            }
            KeyCode::Tab | KeyCode::Down => detail.next_field(),
            KeyCode::BackTab | KeyCode::Up => detail.prev_field(),
            KeyCode::Backspace => detail.backspace(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let text = detail.rendered();
                self.copy(&text);
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                detail.push_char(ch)
            }
            KeyCode::Enter => detail.push_char('\n'),
            _ => {}
        }
    }

    fn on_key_builder(&mut self, key: KeyEvent) {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.view = View::Library;
                return;
            }
            KeyCode::Char('c') if control => {
                let text = self.builder.prompt();
                self.copy(&text);
                return;
            }
            KeyCode::Char('r') if control => {
                self.builder.reroll();
                return;
            }
            KeyCode::F(5) => {
                self.builder.reroll();
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.builder.switch_focus();
                return;
            }
            _ => {}
        }

        let builder = &mut self.builder;
        match builder.focus {
            BuilderFocus::Concepts => match key.code {
                KeyCode::Left | KeyCode::Char('h') => builder.move_concept_cursor(-1),
                KeyCode::Right | KeyCode::Char('l') => builder.move_concept_cursor(1),
                KeyCode::Char(' ') | KeyCode::Enter => builder.toggle_under_cursor(),
                _ => {}
            },
            BuilderFocus::Fields => match key.code {
                KeyCode::Down => builder.next_field(),
                KeyCode::Up => builder.prev_field(),
                KeyCode::Left => builder.cycle(-1),
                KeyCode::Right => builder.cycle(1),
                KeyCode::Backspace => builder.backspace(),
                KeyCode::Enter => builder.push_char('\n'),
                KeyCode::Char(ch) if !control => builder.push_char(ch),
                _ => {}
            },
        }
    }

    fn switch_focus(&mut self) {
        match self.focus {
            Focus::Roles => self.focus_prompts(),
            Focus::Prompts => self.focus = Focus::Roles,
        }
    }

    fn focus_prompts(&mut self) {
        if self.visible_prompts().is_empty() {
            return;
        }
        self.focus = Focus::Prompts;
        if self.prompt_state.selected().is_none() {
            self.prompt_state.select(Some(0));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Roles => {
                let len = self.roles.len();
                if len == 0 {
                    return;
                }
                let next = step(self.role_state.selected(), delta, len);
                self.select_role(next);
            }
            Focus::Prompts => {
                let len = self.visible_prompts().len();
                if len == 0 {
                    return;
                }
                let next = step(self.prompt_state.selected(), delta, len);
                self.prompt_state.select(Some(next));
            }
        }
    }

    fn select_role(&mut self, index: usize) {
        if self.role_state.selected() == Some(index) {
            return;
        }
        self.role_state.select(Some(index));
        self.prompt_state = ListState::default();
        if !self.visible_prompts().is_empty() {
            self.prompt_state.select(Some(0));
        }
    }

    fn open_selected_prompt(&mut self) {
        let prompt = match self.selected_prompt() {
            Some(prompt) => prompt.clone(),
            None => return,
        };
        info!(title = %prompt.title, role = %prompt.role, "opened prompt");
        self.detail = Some(DetailState::new(prompt));
        self.view = View::Detail;
    }

    fn copy_selected_raw(&mut self) {
        let text = match self.selected_prompt() {
            Some(prompt) => prompt.prompt.clone(),
            None => return,
        };
        self.copy(&text);
    }

    fn copy(&mut self, text: &str) {
        match set_clipboard(text) {
            Ok(()) => self.set_status(COPIED),
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                self.set_status(&err.to_string());
            }
        }
    }

    pub(crate) fn set_status(&mut self, text: &str) {
        self.status = Some(StatusMessage {
            text: text.to_string(),
            since: Instant::now(),
        });
    }

    pub(crate) fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|msg| msg.since.elapsed().as_millis() <= u128::from(self.config.status_ms))
            .map(|msg| msg.text.as_str())
    }

    fn open_catalog_in_editor(&mut self) {
        if let Err(err) = self.edit_and_reload() {
            warn!(error = %err, "catalog edit failed");
            if err.is_recoverable() {
                self.set_status(&err.to_string());
            } else {
                self.error_message = Some(err.to_string());
                self.view = View::Error;
            }
        }
    }

    fn edit_and_reload(&mut self) -> Result<(), AppError> {
        let editor = match env::var("EDITOR") {
            Ok(value) if !value.trim().is_empty() => value,
            _ => return Err(AppError::NoEditor),
        };
        let path = catalog_path(&self.config)?;
        ensure_catalog_file(&path)?;
        let result = run_editor_command(&editor, &path);
        self.needs_redraw = true;
        result?;

        let prompts = load_prompts(&path)?;
        self.replace_prompts(prompts);
        Ok(())
    }

    pub(crate) fn replace_prompts(&mut self, prompts: Vec<Prompt>) {
        let previous = self.selected_role().map(str::to_string);
        self.roles = roles(&prompts);
        self.prompts = prompts;
        self.role_state = ListState::default();
        self.prompt_state = ListState::default();
        self.focus = Focus::Roles;
        if let Some(index) = previous.and_then(|role| self.roles.iter().position(|r| *r == role)) {
            self.select_role(index);
        }
    }
}

impl DetailState {
    pub(crate) fn new(prompt: Prompt) -> Self {
        let variables = extract_variables(&prompt.prompt);
        let values = seed(&variables);
        Self {
            prompt,
            variables,
            values,
            active_field: 0,
            field_scroll: 0,
        }
    }

    pub(crate) fn is_customizable(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Plain text handed to the clipboard.
    pub(crate) fn rendered(&self) -> String {
        if self.is_customizable() {
            render_plain(&self.prompt.prompt, &self.values)
        } else {
            self.prompt.prompt.clone()
        }
    }

    pub(crate) fn field_value(&self, index: usize) -> &str {
        match self.variables.get(index) {
            Some(variable) => value_for(&self.values, variable),
            None => "",
        }
    }

    fn next_field(&mut self) {
        if self.variables.is_empty() {
            return;
        }
        self.active_field = (self.active_field + 1) % self.variables.len();
    }

    fn prev_field(&mut self) {
        if self.variables.is_empty() {
            return;
        }
        if self.active_field == 0 {
            self.active_field = self.variables.len() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    fn push_char(&mut self, ch: char) {
        self.edit_active(|value| value.push(ch));
    }

    fn backspace(&mut self) {
        self.edit_active(|value| {
            value.pop();
        });
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(variable) = self.variables.get(self.active_field) else {
            return;
        };
        let mut value = value_for(&self.values, variable).to_string();
        edit(&mut value);
        self.values = set(&self.values, &variable.key, &value);
    }
}

impl BuilderState {
    pub(crate) fn new(examples: Vec<ConceptExample>) -> Self {
        let values = default_values(&examples);
        Self {
            examples,
            selected: default_selection(),
            values,
            focus: BuilderFocus::Concepts,
            concept_cursor: 0,
            active_field: 0,
            field_scroll: 0,
        }
    }

    pub(crate) fn prompt(&self) -> String {
        build_prompt(&self.selected, &self.values)
    }

    pub(crate) fn value(&self, concept: Concept) -> &str {
        self.values.get(&concept).map(String::as_str).unwrap_or("")
    }

    /// Whether the concept's current value is one of its examples.
    pub(crate) fn is_custom(&self, concept: Concept) -> bool {
        let value = self.value(concept);
        !self
            .examples
            .iter()
            .any(|example| example.concept == concept && example.example == value)
    }

    fn active_concept(&self) -> Option<Concept> {
        self.selected.get(self.active_field).copied()
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            BuilderFocus::Concepts if !self.selected.is_empty() => BuilderFocus::Fields,
            _ => BuilderFocus::Concepts,
        };
    }

    fn move_concept_cursor(&mut self, delta: isize) {
        self.concept_cursor = step(Some(self.concept_cursor), delta, Concept::ALL.len());
    }

    fn toggle_under_cursor(&mut self) {
        let concept = Concept::ALL[self.concept_cursor];
        toggle(&mut self.selected, concept);
        if self.active_field >= self.selected.len() {
            self.active_field = self.selected.len().saturating_sub(1);
        }
    }

    fn next_field(&mut self) {
        if !self.selected.is_empty() {
            self.active_field = (self.active_field + 1) % self.selected.len();
        }
    }

    fn prev_field(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        if self.active_field == 0 {
            self.active_field = self.selected.len() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    fn cycle(&mut self, delta: isize) {
        let Some(concept) = self.active_concept() else {
            return;
        };
        if let Some(next) = cycle_example(&self.examples, concept, self.value(concept), delta) {
            self.values.insert(concept, next);
        }
    }

    fn reroll(&mut self) {
        reroll(&self.examples, &self.selected, &mut self.values);
    }

    fn push_char(&mut self, ch: char) {
        if let Some(concept) = self.active_concept() {
            self.values.entry(concept).or_default().push(ch);
        }
    }

    fn backspace(&mut self) {
        if let Some(concept) = self.active_concept() {
            if let Some(value) = self.values.get_mut(&concept) {
                value.pop();
            }
        }
    }
}

/// Clamped move; an empty selection lands on the first row.
fn step(current: Option<usize>, delta: isize, len: usize) -> usize {
    match current {
        Some(current) => (current as isize + delta).clamp(0, len as isize - 1) as usize,
        None => 0,
    }
}

fn index_from_mouse(area: Rect, offset: usize, len: usize, mouse: MouseEvent) -> Option<usize> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if mouse.column < area.x
        || mouse.column >= area.x + area.width
        || mouse.row < area.y
        || mouse.row >= area.y + area.height
    {
        return None;
    }
    let index = offset + (mouse.row - area.y) as usize;
    if index >= len {
        return None;
    }
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn prompt(role: &str, title: &str, body: &str) -> Prompt {
        Prompt {
            role: role.to_string(),
            title: title.to_string(),
            prompt: body.to_string(),
            author: None,
        }
    }

    fn sample_app() -> App {
        let prompts = vec![
            prompt("Writer", "Greeting", "${name:World}, say ${greeting:hello}!"),
            prompt("Developer", "Review", "Review this code."),
            prompt("Writer", "Twice", "${x:A}${x:B}"),
        ];
        let examples = vec![
            ConceptExample {
                concept: Concept::Persona,
                example: "You are a chef".to_string(),
            },
            ConceptExample {
                concept: Concept::Persona,
                example: "You are a pilot".to_string(),
            },
        ];
        App::new(Config::default(), prompts, examples)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.on_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_no_role_selected_shows_no_prompts() {
        let app = sample_app();
        assert_eq!(app.roles, vec!["Writer".to_string(), "Developer".to_string()]);
        assert!(app.selected_role().is_none());
        assert!(app.visible_prompts().is_empty());
    }

    #[test]
    fn test_selecting_role_filters_prompts() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_role(), Some("Writer"));
        assert_eq!(app.visible_prompts().len(), 2);
        assert_eq!(app.prompt_state.selected(), Some(0));

        app.on_key(key(KeyCode::Down));
        assert_eq!(app.selected_role(), Some("Developer"));
        assert_eq!(app.selected_prompt().map(|p| p.title.as_str()), Some("Review"));
    }

    #[test]
    fn test_open_detail_seeds_and_edits_values() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Prompts);
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.view, View::Detail);

        for _ in 0.."World".len() {
            app.on_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "Ada");
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.rendered(), "Ada, say hello!");
        assert_eq!(detail.field_value(0), "Ada");

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.view, View::Library);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_duplicate_key_fields_share_value() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Tab));
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Enter));

        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.variables.len(), 2);
        assert_eq!(detail.rendered(), "BB");

        app.on_key(key(KeyCode::Tab));
        type_text(&mut app, "!");
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.field_value(0), "B!");
        assert_eq!(detail.rendered(), "B!B!");
    }

    #[test]
    fn test_static_prompt_renders_raw() {
        let detail = DetailState::new(prompt("Dev", "Plain", "No ${markers here"));
        assert!(!detail.is_customizable());
        assert_eq!(detail.rendered(), "No ${markers here");
    }

    #[test]
    fn test_typing_q_in_detail_does_not_quit() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Enter));
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.detail.as_ref().unwrap().field_value(0), "Worldq");
    }

    #[test]
    fn test_builder_toggle_and_cycle() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('b')));
        assert_eq!(app.view, View::Builder);
        assert_eq!(app.builder.prompt(), "You are a chef.");

        app.on_key(key(KeyCode::Char(' ')));
        assert!(!app.builder.selected.contains(&Concept::Persona));
        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(app.builder.selected.last(), Some(&Concept::Persona));

        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.builder.focus, BuilderFocus::Fields);
        for _ in 0..3 {
            app.on_key(key(KeyCode::Down));
        }
        assert_eq!(app.builder.active_concept(), Some(Concept::Persona));
        app.on_key(key(KeyCode::Right));
        assert_eq!(app.builder.value(Concept::Persona), "You are a pilot");
        assert!(!app.builder.is_custom(Concept::Persona));

        type_text(&mut app, "!");
        assert!(app.builder.is_custom(Concept::Persona));
        assert_eq!(app.builder.prompt(), "You are a pilot!.");
    }

    #[test]
    fn test_control_chords_do_not_type() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Enter));
        for ch in ['r', 'v', 'z'] {
            app.on_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
        }
        assert_eq!(app.detail.as_ref().unwrap().field_value(0), "World");

        app.on_key(key(KeyCode::Esc));
        app.on_key(key(KeyCode::Char('b')));
        app.on_key(key(KeyCode::Tab));
        app.on_key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL));
        assert_eq!(app.builder.value(Concept::Persona), "You are a chef");
    }

    #[test]
    fn test_builder_typing_into_empty_concept() {
        let mut builder = BuilderState::new(Vec::new());
        builder.focus = BuilderFocus::Fields;
        builder.active_field = 1;
        builder.push_char('x');
        assert_eq!(builder.value(Concept::Task), "x");
        assert_eq!(builder.prompt(), ". x");
    }

    #[test]
    fn test_status_expires() {
        let mut app = sample_app();
        app.config.status_ms = 0;
        app.status = Some(StatusMessage {
            text: COPIED.to_string(),
            since: Instant::now() - std::time::Duration::from_millis(5),
        });
        assert!(app.status_text().is_none());

        app.config.status_ms = 60_000;
        assert_eq!(app.status_text(), Some(COPIED));
    }

    #[test]
    fn test_replace_prompts_keeps_role() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_role(), Some("Developer"));

        app.replace_prompts(vec![
            prompt("Analyst", "A", "a"),
            prompt("Developer", "D", "d"),
        ]);
        assert_eq!(app.selected_role(), Some("Developer"));
        assert_eq!(app.selected_prompt().map(|p| p.title.as_str()), Some("D"));
    }

    #[test]
    fn test_mouse_click_selects_role() {
        let mut app = sample_app();
        app.roles_area = Rect::new(1, 1, 20, 5);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        app.on_mouse(click);
        assert_eq!(app.selected_role(), Some("Developer"));
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(None, -1, 3), 0);
        assert_eq!(step(Some(0), -1, 3), 0);
        assert_eq!(step(Some(2), 1, 3), 2);
        assert_eq!(step(Some(1), 1, 3), 2);
    }
}
