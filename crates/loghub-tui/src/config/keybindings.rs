use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::app::Action;

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Input context determining which bindings apply
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    Table,
    FilterForm,
    Detail,
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        bindings.insert(KeyContext::Global, global);

        // Table / browsing bindings
        let mut table = HashMap::new();
        table.insert(KeyBinding::new(KeyCode::Char('j')), Action::RowDown);
        table.insert(KeyBinding::new(KeyCode::Down), Action::RowDown);
        table.insert(KeyBinding::new(KeyCode::Char('k')), Action::RowUp);
        table.insert(KeyBinding::new(KeyCode::Up), Action::RowUp);
        table.insert(KeyBinding::new(KeyCode::Char('g')), Action::RowTop);
        table.insert(KeyBinding::shift(KeyCode::Char('G')), Action::RowBottom);
        table.insert(KeyBinding::new(KeyCode::Home), Action::RowTop);
        table.insert(KeyBinding::new(KeyCode::End), Action::RowBottom);
        table.insert(KeyBinding::new(KeyCode::Enter), Action::SelectRow);
        table.insert(KeyBinding::new(KeyCode::Char('h')), Action::PrevPage);
        table.insert(KeyBinding::new(KeyCode::Left), Action::PrevPage);
        table.insert(KeyBinding::new(KeyCode::Char('l')), Action::NextPage);
        table.insert(KeyBinding::new(KeyCode::Right), Action::NextPage);
        table.insert(KeyBinding::new(KeyCode::PageDown), Action::NextPage);
        table.insert(KeyBinding::new(KeyCode::PageUp), Action::PrevPage);
        // Digits jump straight to a page (1-based, like the pagination bar).
        for (i, c) in ('1'..='9').enumerate() {
            table.insert(KeyBinding::new(KeyCode::Char(c)), Action::GotoPage(i as u64));
        }
        table.insert(KeyBinding::new(KeyCode::Char('f')), Action::FocusFilters);
        table.insert(KeyBinding::new(KeyCode::Char('/')), Action::FocusFilters);
        table.insert(KeyBinding::new(KeyCode::Char('r')), Action::Refresh);
        table.insert(KeyBinding::new(KeyCode::Char('c')), Action::ClearFilters);
        table.insert(KeyBinding::new(KeyCode::Esc), Action::DismissError);
        bindings.insert(KeyContext::Table, table);

        // Filter form bindings (character input handled in get_form_action)
        let mut form = HashMap::new();
        form.insert(KeyBinding::new(KeyCode::Tab), Action::NextField);
        form.insert(KeyBinding::shift(KeyCode::BackTab), Action::PrevField);
        form.insert(KeyBinding::new(KeyCode::BackTab), Action::PrevField);
        form.insert(KeyBinding::new(KeyCode::Down), Action::NextField);
        form.insert(KeyBinding::new(KeyCode::Up), Action::PrevField);
        form.insert(KeyBinding::new(KeyCode::Enter), Action::SubmitFilters);
        form.insert(KeyBinding::new(KeyCode::Backspace), Action::FieldBackspace);
        form.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::FieldClearInput);
        form.insert(KeyBinding::ctrl(KeyCode::Char('x')), Action::ClearFilters);
        form.insert(KeyBinding::new(KeyCode::Left), Action::CycleLevelBack);
        form.insert(KeyBinding::new(KeyCode::Right), Action::CycleLevel);
        form.insert(KeyBinding::new(KeyCode::Esc), Action::FocusTable);
        form.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyContext::FilterForm, form);

        // Detail overlay bindings
        let mut detail = HashMap::new();
        detail.insert(KeyBinding::new(KeyCode::Esc), Action::CloseDetail);
        detail.insert(KeyBinding::new(KeyCode::Enter), Action::CloseDetail);
        detail.insert(KeyBinding::new(KeyCode::Char('q')), Action::CloseDetail);
        bindings.insert(KeyContext::Detail, detail);

        Self { bindings }
    }

    /// Look up action for key event in given context, falling back to the
    /// global bindings.
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(context_bindings) = self.bindings.get(&context) {
            if let Some(action) = context_bindings.get(&binding) {
                return Some(action.clone());
            }
        }

        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Handle key event while the filter form is focused. Regular characters
    /// become field input; everything else goes through the form bindings
    /// only (no global fallback, so typing 'q' does not quit).
    pub fn get_form_action(&self, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        if let Some(form_bindings) = self.bindings.get(&KeyContext::FilterForm) {
            if let Some(action) = form_bindings.get(&binding) {
                return Some(action.clone());
            }
        }

        if let KeyCode::Char(c) = key.code {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                return Some(Action::FieldInput(c));
            }
        }

        None
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn table_context_falls_back_to_global() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::Table, &key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            bindings.get_action(KeyContext::Table, &key(KeyCode::Enter)),
            Some(Action::SelectRow)
        );
    }

    #[test]
    fn digits_jump_to_zero_based_pages() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::Table, &key(KeyCode::Char('1'))),
            Some(Action::GotoPage(0))
        );
        assert_eq!(
            bindings.get_action(KeyContext::Table, &key(KeyCode::Char('9'))),
            Some(Action::GotoPage(8))
        );
    }

    #[test]
    fn form_input_shadows_global_quit() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_form_action(&key(KeyCode::Char('q'))),
            Some(Action::FieldInput('q'))
        );
        assert_eq!(
            bindings.get_form_action(&key(KeyCode::Enter)),
            Some(Action::SubmitFilters)
        );
    }

    #[test]
    fn detail_context_reclaims_q_for_closing() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.get_action(KeyContext::Detail, &key(KeyCode::Char('q'))),
            Some(Action::CloseDetail)
        );
    }
}
