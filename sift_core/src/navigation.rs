//! Keyboard focus controller shared by every editor
//!
//! A single cyclic state machine over `Option<usize>`: arrows move focus with
//! wrap-around, left pops back to the parent view, right opens the focused
//! item. One controller instance is passed explicitly into the active editor,
//! so there is never more than one key subscriber.

/// Arrow keys handled by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
}

/// What the owning view should do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavAction {
    /// Focus moved to the item at this index
    Focus(usize),
    /// Pop back to the parent view
    Back,
    /// Open the item at this index
    Open(usize),
    /// Nothing to do
    Ignored,
}

/// Cyclic focus state over a list of N focusable items.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRing {
    len: usize,
    focus: Option<usize>,
    submenu_open: bool,
}

impl FocusRing {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            focus: None,
            submenu_open: false,
        }
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Resize the ring, dropping focus when it falls off the end.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.focus.is_some_and(|i| i >= len) {
            self.focus = None;
        }
    }

    /// While a nested sub-widget (calendar, submenu) owns focus, left must
    /// not pop the whole view.
    pub fn set_submenu_open(&mut self, open: bool) {
        self.submenu_open = open;
    }

    pub fn reset(&mut self) {
        self.focus = None;
    }

    pub fn handle(&mut self, key: NavKey) -> NavAction {
        match key {
            NavKey::Down => {
                if self.len == 0 {
                    return NavAction::Ignored;
                }
                let next = match self.focus {
                    None => 0,
                    Some(i) => (i + 1) % self.len,
                };
                self.focus = Some(next);
                NavAction::Focus(next)
            }
            NavKey::Up => {
                if self.len == 0 {
                    return NavAction::Ignored;
                }
                let next = match self.focus {
                    None => self.len - 1,
                    Some(i) => (i + self.len - 1) % self.len,
                };
                self.focus = Some(next);
                NavAction::Focus(next)
            }
            NavKey::Left => {
                if self.submenu_open {
                    NavAction::Ignored
                } else {
                    NavAction::Back
                }
            }
            NavKey::Right => match self.focus {
                Some(i) => NavAction::Open(i),
                None => NavAction::Ignored,
            },
        }
    }
}
