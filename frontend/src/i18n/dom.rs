use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::{NodeRole, PreferenceStore, TranslatableNode, TranslationRegistry, STORAGE_KEY};

pub const KEY_ATTR: &str = "data-i18n";
pub const MARKUP_ATTR: &str = "data-i18n-html";

/// Browser `localStorage`. Failures (private mode, quota) are logged and ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl PreferenceStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        window()?
            .local_storage()
            .ok()??
            .get_item(STORAGE_KEY)
            .ok()?
    }

    fn save(&self, code: &str) {
        let storage = window().and_then(|w| w.local_storage().ok().flatten());
        match storage {
            Some(storage) => {
                if storage.set_item(STORAGE_KEY, code).is_err() {
                    log::warn!("Could not persist language preference");
                }
            }
            None => log::warn!("localStorage unavailable, language preference not saved"),
        }
    }
}

impl TranslatableNode for Element {
    fn role(&self) -> NodeRole {
        match self.tag_name().to_ascii_lowercase().as_str() {
            "input" | "textarea" | "select" => NodeRole::FormControl {
                has_placeholder: self.has_attribute("placeholder"),
            },
            "title" => NodeRole::Title,
            _ => NodeRole::Text {
                allow_markup: self.has_attribute(MARKUP_ATTR),
            },
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_markup(&self, markup: &str) {
        self.set_inner_html(markup);
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = self.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = self.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn set_placeholder(&self, text: &str) {
        let _ = self.set_attribute("placeholder", text);
    }

    fn set_document_title(&self, title: &str) {
        if let Some(document) = self.owner_document() {
            document.set_title(title);
        }
    }
}

/// Collects every tagged element under `root`, including `root` itself.
pub fn scan(root: &Element) -> TranslationRegistry<Element> {
    let mut registry = TranslationRegistry::new();
    if let Some(key) = root.get_attribute(KEY_ATTR) {
        registry.register(root.clone(), key);
    }
    let Ok(nodes) = root.query_selector_all(&format!("[{}]", KEY_ATTR)) else {
        return registry;
    };
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if let Some(key) = element.get_attribute(KEY_ATTR) {
            registry.register(element, key);
        }
    }
    registry
}
