use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::controllers::reveal::{RevealTracker, REVEAL_THRESHOLD};

pub const REVEAL_CLASS: &str = "reveal";
pub const VISIBLE_CLASS: &str = "visible";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Fades in every `.reveal` element under `root` the first time it scrolls
/// into view, one after another.
#[hook]
pub fn use_scroll_reveal(root: NodeRef) {
    use_effect_with_deps(
        move |_| {
            let observer = root.cast::<Element>().and_then(|root| observe(&root));
            move || {
                if let Some((observer, _callback)) = observer {
                    observer.disconnect();
                }
            }
        },
        (),
    );
}

fn observe(root: &Element) -> Option<(IntersectionObserver, ObserverCallback)> {
    let nodes = root.query_selector_all(&format!(".{}", REVEAL_CLASS)).ok()?;
    let elements: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.item(i)?.dyn_into::<Element>().ok())
        .collect();
    if elements.is_empty() {
        return None;
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new(elements.len())));
    let observed = Rc::new(elements);
    let callback: ObserverCallback = {
        let observed = Rc::clone(&observed);
        Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let Some(index) = observed.iter().position(|el| *el == target) else {
                    continue;
                };
                let Some(delay) = tracker.borrow_mut().observe(index, entry.is_intersecting()) else {
                    continue;
                };
                observer.unobserve(&target);
                Timeout::new(delay, move || {
                    let _ = target.class_list().add_1(VISIBLE_CLASS);
                })
                .forget();
            }
        })
    };

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(e) => {
                log::warn!("IntersectionObserver unavailable, showing content directly: {:?}", e);
                for el in observed.iter() {
                    let _ = el.class_list().add_1(VISIBLE_CLASS);
                }
                return None;
            }
        };
    for el in observed.iter() {
        observer.observe(el);
    }
    Some((observer, callback))
}
