use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_timers::future::TimeoutFuture;
use taurus_funnel::flow::FollowUp;
use taurus_funnel::modal::{
    FocusRing, Key, ListenerHandle, ModalController, ModalHost, ModalId, OpenerRef,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};
use yew::prelude::*;

const SHOW_CLASS: &str = "show";
const FIRST_INTERACTIVE: &str = "input, select, textarea, button";
const FOCUSABLE: &str = "a[href], button:not([disabled]), input:not([disabled]), \
    select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"])";

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn modal_element(modal: ModalId) -> Option<Element> {
    document()?.get_element_by_id(modal.dom_id())
}

fn focus(element: Option<Element>) -> bool {
    match element.and_then(|e| e.dyn_into::<HtmlElement>().ok()) {
        Some(element) => element.focus().is_ok(),
        None => false,
    }
}

/// Modal state for the whole app, shared through [`crate::context::FunnelContext`].
pub struct ModalRuntime {
    controller: RefCell<ModalController>,
    host: RefCell<DomModalHost>,
    generations: RefCell<HashMap<ModalId, u32>>,
}

impl ModalRuntime {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|runtime| ModalRuntime {
            controller: RefCell::new(ModalController::new()),
            host: RefCell::new(DomModalHost {
                runtime: runtime.clone(),
                listeners: HashMap::new(),
                next_handle: Cell::new(0),
            }),
            generations: RefCell::new(HashMap::new()),
        })
    }

    pub fn open(&self, modal: ModalId, opener: Option<OpenerRef>) {
        if self.is_open(modal) {
            return;
        }
        let mut host = self.host.borrow_mut();
        if self.controller.borrow_mut().open(&mut *host, modal, opener) {
            *self.generations.borrow_mut().entry(modal).or_insert(0) += 1;
            log::debug!("Opened {}", modal.dom_id());
        }
    }

    pub fn close(&self, modal: ModalId) {
        let mut host = self.host.borrow_mut();
        if self.controller.borrow_mut().close(&mut *host, modal) {
            log::debug!("Closed {}", modal.dom_id());
        }
    }

    pub fn is_open(&self, modal: ModalId) -> bool {
        self.controller.borrow().is_open(modal)
    }

    /// Incremented on every open; lets delayed work tell whether it still targets the same session.
    pub fn generation(&self, modal: ModalId) -> u32 {
        self.generations.borrow().get(&modal).copied().unwrap_or(0)
    }

    fn on_key(&self, modal: ModalId, event: &KeyboardEvent) {
        let key = Key::from_dom(&event.key(), event.shift_key());
        let outcome = {
            let mut host = self.host.borrow_mut();
            self.controller.borrow_mut().handle_key(&mut *host, modal, key)
        };
        if outcome.prevents_default() {
            event.prevent_default();
        }
    }
}

impl PartialEq for ModalRuntime {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// Runs what a form asked for after submitting, unless the modal was closed or reopened meanwhile.
pub async fn run_follow_up(modals: Rc<ModalRuntime>, modal: ModalId, follow_up: FollowUp) {
    let generation = modals.generation(modal);
    match follow_up {
        FollowUp::StayOpen => {}
        FollowUp::CloseAfter { delay_ms } => {
            TimeoutFuture::new(delay_ms).await;
            if modals.is_open(modal) && modals.generation(modal) == generation {
                modals.close(modal);
            }
        }
        FollowUp::RedirectAfter { url, delay_ms } => {
            TimeoutFuture::new(delay_ms).await;
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(&url);
            }
        }
    }
}

pub struct DomModalHost {
    runtime: Weak<ModalRuntime>,
    listeners: HashMap<ListenerHandle, EventListener>,
    next_handle: Cell<u32>,
}

impl ModalHost for DomModalHost {
    fn set_visible(&mut self, modal: ModalId, visible: bool) -> bool {
        let Some(element) = modal_element(modal) else {
            log::debug!("Modal #{} is not in the page", modal.dom_id());
            return false;
        };
        let classes = element.class_list();
        let _ = if visible {
            classes.add_1(SHOW_CLASS)
        } else {
            classes.remove_1(SHOW_CLASS)
        };
        let _ = element.set_attribute("aria-hidden", if visible { "false" } else { "true" });
        true
    }

    fn set_page_scroll_locked(&mut self, locked: bool) {
        let Some(body) = document().and_then(|d| d.body()) else {
            return;
        };
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }

    fn focus_first_interactive(&mut self, modal: ModalId) -> bool {
        let first = modal_element(modal).and_then(|m| m.query_selector(FIRST_INTERACTIVE).ok().flatten());
        focus(first)
    }

    fn focus_opener(&mut self, opener: &OpenerRef) {
        focus(document().and_then(|d| d.get_element_by_id(opener.as_str())));
    }

    fn listen_for_keys(&mut self, modal: ModalId) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle.get());
        self.next_handle.set(handle.0.wrapping_add(1));

        if let Some(document) = document() {
            let runtime = self.runtime.clone();
            let listener = EventListener::new(&document, "keydown", move |event| {
                let (Some(runtime), Some(event)) =
                    (runtime.upgrade(), event.dyn_ref::<KeyboardEvent>())
                else {
                    return;
                };
                runtime.on_key(modal, event);
            });
            self.listeners.insert(handle, listener);
        }
        handle
    }

    fn unlisten(&mut self, handle: ListenerHandle) {
        // Escape closes from inside the listener itself, so drop it once the event is done.
        if let Some(listener) = self.listeners.remove(&handle) {
            spawn_local(async move { drop(listener) });
        }
    }

    fn focus_ring(&self, modal: ModalId) -> FocusRing {
        let Some(nodes) = modal_element(modal).and_then(|m| m.query_selector_all(FOCUSABLE).ok()) else {
            return FocusRing::default();
        };
        let active = document().and_then(|d| d.active_element());
        let current = active.and_then(|active| {
            (0..nodes.length()).position(|i| {
                nodes
                    .get(i)
                    .map_or(false, |node| node.is_same_node(Some(active.as_ref())))
            })
        });
        FocusRing {
            count: nodes.length() as usize,
            current,
        }
    }

    fn focus_at(&mut self, modal: ModalId, index: usize) {
        let target = modal_element(modal)
            .and_then(|m| m.query_selector_all(FOCUSABLE).ok())
            .and_then(|nodes| nodes.get(index as u32))
            .and_then(|node| node.dyn_into::<Element>().ok());
        focus(target);
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalShellProps {
    pub modal: ModalId,
    pub modals: Rc<ModalRuntime>,
    #[prop_or_default]
    pub children: Children,
}

/// Overlay, container and close button shared by every modal.
#[function_component(ModalShell)]
pub fn modal_shell(props: &ModalShellProps) -> Html {
    let close = {
        let modals = props.modals.clone();
        let modal = props.modal;
        Callback::from(move |_: MouseEvent| modals.close(modal))
    };

    html! {
        <div class="modal" id={props.modal.dom_id()} aria-hidden="true" role="dialog" aria-modal="true">
            <div class="modal-overlay" onclick={close.clone()}></div>
            <div class="modal-content">
                <button type="button" class="modal-close" aria-label="Fermer" onclick={close}>
                    {"×"}
                </button>
                { for props.children.iter() }
            </div>
        </div>
    }
}
