use serde::{Deserialize, Serialize};

/// Which keymap is active. Keybindings are looked up per mode, so typing in
/// the search box or a form never collides with list shortcuts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    List,
    Search,
    Confirm,
    Form,
}
