//! Reusable UI components: keybinding registry and help overlay.

pub mod help_overlay;
pub mod keybindings;
