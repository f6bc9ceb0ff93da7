use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use taurus_funnel::reveal::{
    RevealAction, RevealTracker, REVEALED_CLASS, REVEAL_TARGET_CLASS, REVEAL_THRESHOLD,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

const REVEAL_KEY_ATTR: &str = "data-reveal-key";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Adds `visible` to every `.fade-in` element of the page the first time it scrolls into view.
#[hook]
pub fn use_scroll_reveal() {
    use_effect_with_deps(
        |_| {
            let attached = observe_reveal_targets();
            move || {
                if let Some((observer, _callback)) = attached {
                    observer.disconnect();
                }
            }
        },
        (),
    );
}

fn observe_reveal_targets() -> Option<(IntersectionObserver, ObserverCallback)> {
    let document = web_sys::window()?.document()?;
    let targets = document
        .query_selector_all(&format!(".{}", REVEAL_TARGET_CLASS))
        .ok()?;
    if targets.length() == 0 {
        return None;
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::<u32>::new()));
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = target
                    .get_attribute(REVEAL_KEY_ATTR)
                    .and_then(|k| k.parse::<u32>().ok())
                else {
                    continue;
                };
                let action = tracker
                    .borrow_mut()
                    .on_intersection(key, entry.is_intersecting());
                if action == RevealAction::Reveal {
                    let _ = target.class_list().add_1(REVEALED_CLASS);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;

    for index in 0..targets.length() {
        let Some(element) = targets.get(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let _ = element.set_attribute(REVEAL_KEY_ATTR, &index.to_string());
        observer.observe(&element);
    }
    log::debug!("Observing {} reveal targets", targets.length());

    Some((observer, callback))
}
