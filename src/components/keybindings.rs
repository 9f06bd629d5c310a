//! Keybinding registry
//!
//! Global shortcuts (tab switching, export, help, quit) are resolved here.
//! Anything not bound globally is passed on to the focused form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NextTab,
    PreviousTab,
    Calculate,
    ExportPdf,
    ExportJson,
    ClearSession,
    Help,
    Quit,
    /// Handled by the form itself; listed for help only
    FormEdit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self::with_modifiers(key, KeyModifiers::NONE, action, display, description)
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // BackTab arrives with SHIFT set on most terminals
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        self.key == event.code && self.modifiers == modifiers
    }
}

/// Titled group of `(key, description)` pairs for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

/// Keybinding registry
pub struct KeybindingContext {
    global_bindings: Vec<Keybinding>,
    form_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let ctrl = KeyModifiers::CONTROL;
        Self {
            global_bindings: vec![
                Keybinding::new(KeyCode::Tab, KeyAction::NextTab, "Tab", "Next tab"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PreviousTab, "Shift-Tab", "Previous tab"),
                Keybinding::new(KeyCode::Enter, KeyAction::Calculate, "Enter", "Calculate"),
                Keybinding::with_modifiers(KeyCode::Char('p'), ctrl, KeyAction::ExportPdf, "Ctrl-P", "Export PDF report"),
                Keybinding::with_modifiers(KeyCode::Char('j'), ctrl, KeyAction::ExportJson, "Ctrl-J", "Export JSON report"),
                Keybinding::with_modifiers(KeyCode::Char('r'), ctrl, KeyAction::ClearSession, "Ctrl-R", "Clear all results"),
                Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Toggle help"),
                Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
                Keybinding::with_modifiers(KeyCode::Char('c'), ctrl, KeyAction::Quit, "Ctrl-C", "Quit"),
            ],
            form_bindings: vec![
                Keybinding::new(KeyCode::Up, KeyAction::FormEdit, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::FormEdit, "Down", "Next field"),
                Keybinding::new(KeyCode::Left, KeyAction::FormEdit, "Left", "Previous option"),
                Keybinding::new(KeyCode::Right, KeyAction::FormEdit, "Right", "Next option"),
                Keybinding::new(KeyCode::Backspace, KeyAction::FormEdit, "Bksp", "Delete character"),
            ],
        }
    }

    /// Global action bound to `event`, if any.
    pub fn resolve(&self, event: &KeyEvent) -> Option<KeyAction> {
        self.global_bindings
            .iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Short `key: description` items for the status bar
    pub fn get_nav_items(&self) -> Vec<(String, String)> {
        [KeyAction::NextTab, KeyAction::Calculate, KeyAction::ExportPdf, KeyAction::Help, KeyAction::Quit]
            .iter()
            .filter_map(|action| self.global_bindings.iter().find(|b| b.action == *action))
            .map(|b| (b.display.clone(), b.description.clone()))
            .collect()
    }

    /// Sections shown in the help overlay
    pub fn get_help_content(&self) -> Vec<HelpSection> {
        let items = |bindings: &[Keybinding]| {
            bindings
                .iter()
                .map(|b| (b.display.clone(), b.description.clone()))
                .collect()
        };
        vec![
            HelpSection {
                title: "Global".to_string(),
                items: items(&self.global_bindings),
            },
            HelpSection {
                title: "Form".to_string(),
                items: items(&self.form_bindings),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_global_bindings() {
        let ctx = KeybindingContext::new();
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(ctx.resolve(&tab), Some(KeyAction::NextTab));

        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(ctx.resolve(&back_tab), Some(KeyAction::PreviousTab));

        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(ctx.resolve(&ctrl_p), Some(KeyAction::ExportPdf));
    }

    #[test]
    fn test_plain_characters_fall_through_to_form() {
        let ctx = KeybindingContext::new();
        let p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(ctx.resolve(&p), None);
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(ctx.resolve(&up), None);
    }

    #[test]
    fn test_help_content_lists_every_binding() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content();
        assert_eq!(sections.len(), 2);
        assert!(sections[0].items.iter().any(|(key, _)| key == "Ctrl-J"));
        assert_eq!(ctx.get_nav_items().len(), 5);
    }
}
