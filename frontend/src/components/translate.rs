use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;

use super::language_toggle::LanguageContext;
use crate::i18n::dom;
use crate::i18n::TranslationRegistry;

/// Translates every `data-i18n` element under `root`. The registry is
/// collected once, on the first render after mount, and reused on each
/// language change.
#[hook]
pub fn use_translations(root: NodeRef) {
    let ctx = use_context::<LanguageContext>();
    let registry: Rc<RefCell<Option<TranslationRegistry<Element>>>> = use_mut_ref(|| None);
    let language = ctx.as_ref().map(|ctx| ctx.language);

    use_effect_with_deps(
        move |language| {
            if let (Some(ctx), Some(language)) = (ctx, *language) {
                let mut registry = registry.borrow_mut();
                if registry.is_none() {
                    *registry = root.cast::<Element>().map(|el| dom::scan(&el));
                }
                if let Some(registry) = registry.as_ref() {
                    let updated = ctx.controller.render(registry, language);
                    log::debug!("Rendered {} of {} tagged elements", updated, registry.len());
                }
            }
            || ()
        },
        language,
    );
}
