use std::rc::Rc;

use yew::prelude::*;

use crate::i18n::dom::LocalStorageStore;
use crate::i18n::{Language, LanguageController};

pub type SiteLanguage = LanguageController<LocalStorageStore>;

/// Shared through a `ContextProvider` from the app root. Consumers re-render
/// whenever `language` changes.
#[derive(Clone)]
pub struct LanguageContext {
    pub controller: Rc<SiteLanguage>,
    pub language: Language,
    pub toggle: Callback<()>,
}

impl PartialEq for LanguageContext {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language && Rc::ptr_eq(&self.controller, &other.controller)
    }
}

impl LanguageContext {
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.controller.translate(key)
    }
}

#[function_component(LanguageToggle)]
pub fn language_toggle() -> Html {
    let ctx = use_context::<LanguageContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };

    let onclick = {
        let toggle = ctx.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    html! {
        <button
            type="button"
            class="lang-toggle"
            aria-label={format!("Switch language to {}", ctx.controller.toggle_label())}
            {onclick}
        >
            { ctx.controller.toggle_label() }
        </button>
    }
}
