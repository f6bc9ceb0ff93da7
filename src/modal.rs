//! Open/close lifecycle shared by every modal dialog of the site.
//!
//! The controller owns one [`ModalState`] per [`ModalId`] and drives the page through
//! a [`ModalHost`], which is the only part that touches the DOM. Keeping the state
//! here (instead of on the DOM nodes) is what lets the lifecycle be tested natively.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    Ticket,
    Application,
    Contact,
}

impl ModalId {
    /// Element id of the modal container in the page.
    pub fn dom_id(&self) -> &'static str {
        match self {
            ModalId::Ticket => "ticketModal",
            ModalId::Application => "applicationModal",
            ModalId::Contact => "contactModal",
        }
    }

    /// Whether Tab / Shift+Tab are kept inside the modal while it is open.
    pub fn traps_focus(&self) -> bool {
        matches!(self, ModalId::Application | ModalId::Contact)
    }
}

/// DOM id of the element that opened a modal, used to give focus back on close.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpenerRef(pub String);

impl OpenerRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Handle of a document-level key listener installed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab { shift: bool },
    Other,
}

impl Key {
    /// Maps a `KeyboardEvent.key` value.
    pub fn from_dom(key: &str, shift: bool) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab { shift },
            _ => Key::Other,
        }
    }
}

/// Focusable descendants of a modal and which of them currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusRing {
    pub count: usize,
    pub current: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Closed,
    FocusMoved(usize),
    Ignored,
}

impl KeyOutcome {
    /// The browser's default handling must be suppressed (focus was moved by us).
    pub fn prevents_default(&self) -> bool {
        matches!(self, KeyOutcome::FocusMoved(_))
    }
}

/// DOM side of the modal lifecycle.
pub trait ModalHost {
    /// `false` when the modal is not in the page.
    fn set_visible(&mut self, modal: ModalId, visible: bool) -> bool;
    fn set_page_scroll_locked(&mut self, locked: bool);
    /// Focuses the first input, select, textarea or button; `false` if there is none.
    fn focus_first_interactive(&mut self, modal: ModalId) -> bool;
    fn focus_opener(&mut self, opener: &OpenerRef);
    fn listen_for_keys(&mut self, modal: ModalId) -> ListenerHandle;
    fn unlisten(&mut self, handle: ListenerHandle);
    fn focus_ring(&self, modal: ModalId) -> FocusRing;
    fn focus_at(&mut self, modal: ModalId, index: usize);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub escape_listener: Option<ListenerHandle>,
    pub last_opener: Option<OpenerRef>,
}

#[derive(Debug, Default)]
pub struct ModalController {
    states: HashMap<ModalId, ModalState>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, modal: ModalId) -> Option<&ModalState> {
        self.states.get(&modal)
    }

    pub fn is_open(&self, modal: ModalId) -> bool {
        self.states.get(&modal).map_or(false, |s| s.is_open)
    }

    pub fn any_open(&self) -> bool {
        self.states.values().any(|s| s.is_open)
    }

    /// Returns `false` when the modal was already open or is missing from the page
    /// (nothing is done then).
    pub fn open<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        modal: ModalId,
        opener: Option<OpenerRef>,
    ) -> bool {
        let state = self.states.entry(modal).or_default();
        if state.is_open {
            return false;
        }
        if !host.set_visible(modal, true) {
            return false;
        }
        host.set_page_scroll_locked(true);
        if !host.focus_first_interactive(modal) {
            tracing::debug!(modal = modal.dom_id(), "Modal has no interactive element to focus");
        }
        state.escape_listener = Some(host.listen_for_keys(modal));
        state.last_opener = opener;
        state.is_open = true;
        true
    }

    /// Returns `false` when the modal was not open.
    pub fn close<H: ModalHost + ?Sized>(&mut self, host: &mut H, modal: ModalId) -> bool {
        let Some(state) = self.states.get_mut(&modal) else {
            return false;
        };
        if !state.is_open {
            return false;
        }
        state.is_open = false;
        host.set_visible(modal, false);
        if let Some(handle) = state.escape_listener.take() {
            host.unlisten(handle);
        }
        let opener = state.last_opener.take();
        if !self.any_open() {
            host.set_page_scroll_locked(false);
        }
        if let Some(opener) = opener {
            host.focus_opener(&opener);
        }
        true
    }

    pub fn handle_key<H: ModalHost + ?Sized>(
        &mut self,
        host: &mut H,
        modal: ModalId,
        key: Key,
    ) -> KeyOutcome {
        if !self.is_open(modal) {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Escape => {
                self.close(host, modal);
                KeyOutcome::Closed
            }
            Key::Tab { shift } if modal.traps_focus() => {
                let ring = host.focus_ring(modal);
                match next_focus_index(ring.current, ring.count, shift) {
                    Some(index) => {
                        host.focus_at(modal, index);
                        KeyOutcome::FocusMoved(index)
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }
}

/// Next focus position inside a ring of `count` elements, wrapping at both ends.
/// Focus outside the ring enters at the first (or, going backwards, the last) element.
pub fn next_focus_index(current: Option<usize>, count: usize, backwards: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let index = match (current, backwards) {
        (Some(i), false) if i < count => (i + 1) % count,
        (Some(i), true) if i < count => (i + count - 1) % count,
        (_, false) => 0,
        (_, true) => count - 1,
    };
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        visible: HashMap<ModalId, bool>,
        scroll_locked: bool,
        focused: Option<String>,
        listeners: Vec<(ListenerHandle, ModalId)>,
        next_handle: u32,
        focusables: usize,
        missing: Vec<ModalId>,
    }

    impl ModalHost for RecordingHost {
        fn set_visible(&mut self, modal: ModalId, visible: bool) -> bool {
            if self.missing.contains(&modal) {
                return false;
            }
            self.visible.insert(modal, visible);
            true
        }

        fn set_page_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }

        fn focus_first_interactive(&mut self, modal: ModalId) -> bool {
            if self.focusables == 0 {
                return false;
            }
            self.focused = Some(format!("{}#0", modal.dom_id()));
            true
        }

        fn focus_opener(&mut self, opener: &OpenerRef) {
            self.focused = Some(opener.as_str().to_string());
        }

        fn listen_for_keys(&mut self, modal: ModalId) -> ListenerHandle {
            self.next_handle += 1;
            let handle = ListenerHandle(self.next_handle);
            self.listeners.push((handle, modal));
            handle
        }

        fn unlisten(&mut self, handle: ListenerHandle) {
            self.listeners.retain(|(h, _)| *h != handle);
        }

        fn focus_ring(&self, modal: ModalId) -> FocusRing {
            let current = self.focused.as_deref().and_then(|f| {
                f.strip_prefix(&format!("{}#", modal.dom_id()))
                    .and_then(|i| i.parse().ok())
            });
            FocusRing {
                count: self.focusables,
                current,
            }
        }

        fn focus_at(&mut self, modal: ModalId, index: usize) {
            self.focused = Some(format!("{}#{}", modal.dom_id(), index));
        }
    }

    fn host_with(focusables: usize) -> RecordingHost {
        RecordingHost {
            focusables,
            focused: Some("openTicketModal".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_focuses_inside_and_registers_one_listener() {
        let mut host = host_with(3);
        let mut controller = ModalController::new();

        assert!(controller.open(&mut host, ModalId::Ticket, Some(OpenerRef::new("openTicketModal"))));
        assert_eq!(host.visible.get(&ModalId::Ticket), Some(&true));
        assert!(host.scroll_locked);
        assert_eq!(host.focused.as_deref(), Some("ticketModal#0"));
        assert_eq!(host.listeners.len(), 1);

        // Opening again does not stack a second listener.
        assert!(!controller.open(&mut host, ModalId::Ticket, None));
        assert_eq!(host.listeners.len(), 1);
        let state = controller.state(ModalId::Ticket).unwrap();
        assert!(state.is_open);
        assert!(state.escape_listener.is_some());
    }

    #[test]
    fn test_open_without_modal_in_page_does_nothing() {
        let mut host = RecordingHost {
            missing: vec![ModalId::Contact],
            ..host_with(2)
        };
        let mut controller = ModalController::new();

        assert!(!controller.open(&mut host, ModalId::Contact, Some(OpenerRef::new("vipContactButton"))));
        assert!(!host.scroll_locked);
        assert!(host.listeners.is_empty());
        assert_eq!(host.focused.as_deref(), Some("openTicketModal"));
        assert!(!controller.is_open(ModalId::Contact));
        assert!(!controller.any_open());
    }

    #[test]
    fn test_close_removes_listener_and_restores_focus() {
        let mut host = host_with(2);
        let mut controller = ModalController::new();
        controller.open(&mut host, ModalId::Ticket, Some(OpenerRef::new("openTicketModal")));

        assert!(controller.close(&mut host, ModalId::Ticket));
        assert_eq!(host.visible.get(&ModalId::Ticket), Some(&false));
        assert!(!host.scroll_locked);
        assert!(host.listeners.is_empty());
        assert_eq!(host.focused.as_deref(), Some("openTicketModal"));

        let state = controller.state(ModalId::Ticket).unwrap();
        assert_eq!(state, &ModalState::default());
        assert!(!controller.close(&mut host, ModalId::Ticket));
    }

    #[test]
    fn test_escape_closes() {
        let mut host = host_with(2);
        let mut controller = ModalController::new();
        controller.open(&mut host, ModalId::Contact, None);

        assert_eq!(controller.handle_key(&mut host, ModalId::Contact, Key::Escape), KeyOutcome::Closed);
        assert!(!controller.is_open(ModalId::Contact));
        assert!(host.listeners.is_empty());
        // Handler is gone: a late key event is ignored.
        assert_eq!(controller.handle_key(&mut host, ModalId::Contact, Key::Escape), KeyOutcome::Ignored);
    }

    #[test]
    fn test_focus_trap_wraps_both_ways() {
        let mut host = host_with(3);
        let mut controller = ModalController::new();
        controller.open(&mut host, ModalId::Application, None);

        let tab = Key::Tab { shift: false };
        let back = Key::Tab { shift: true };
        assert_eq!(controller.handle_key(&mut host, ModalId::Application, tab), KeyOutcome::FocusMoved(1));
        assert_eq!(controller.handle_key(&mut host, ModalId::Application, tab), KeyOutcome::FocusMoved(2));
        assert_eq!(controller.handle_key(&mut host, ModalId::Application, tab), KeyOutcome::FocusMoved(0));
        assert_eq!(controller.handle_key(&mut host, ModalId::Application, back), KeyOutcome::FocusMoved(2));
        assert!(KeyOutcome::FocusMoved(2).prevents_default());
    }

    #[test]
    fn test_ticket_modal_does_not_trap_tab() {
        let mut host = host_with(3);
        let mut controller = ModalController::new();
        controller.open(&mut host, ModalId::Ticket, None);
        assert_eq!(
            controller.handle_key(&mut host, ModalId::Ticket, Key::Tab { shift: false }),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn test_scroll_stays_locked_while_another_modal_is_open() {
        let mut host = host_with(1);
        let mut controller = ModalController::new();
        controller.open(&mut host, ModalId::Application, None);
        controller.open(&mut host, ModalId::Contact, None);
        assert_eq!(host.listeners.len(), 2);

        controller.close(&mut host, ModalId::Contact);
        assert!(host.scroll_locked);
        controller.close(&mut host, ModalId::Application);
        assert!(!host.scroll_locked);
    }

    #[test]
    fn test_next_focus_index() {
        assert_eq!(next_focus_index(None, 0, false), None);
        assert_eq!(next_focus_index(None, 4, false), Some(0));
        assert_eq!(next_focus_index(None, 4, true), Some(3));
        assert_eq!(next_focus_index(Some(3), 4, false), Some(0));
        assert_eq!(next_focus_index(Some(0), 4, true), Some(3));
        assert_eq!(next_focus_index(Some(9), 4, false), Some(0));
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("Escape", false), Key::Escape);
        assert_eq!(Key::from_dom("Tab", true), Key::Tab { shift: true });
        assert_eq!(Key::from_dom("a", false), Key::Other);
    }
}
