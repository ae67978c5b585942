use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::language_toggle::{LanguageContext, SiteLanguage};
use super::notification::Notifier;
use crate::controllers::contact::{ContactController, ContactFields, FormView, Notice};
use crate::utils::api::GlooContactApi;

#[derive(Clone, Default)]
struct FieldRefs {
    name: NodeRef,
    email: NodeRef,
    service: NodeRef,
    message: NodeRef,
    website: NodeRef,
}

impl FieldRefs {
    fn input_value(node: &NodeRef) -> String {
        node.cast::<HtmlInputElement>()
            .map(|el| el.value())
            .unwrap_or_default()
    }

    fn read(&self) -> ContactFields {
        ContactFields {
            name: Self::input_value(&self.name),
            email: Self::input_value(&self.email),
            service: self
                .service
                .cast::<HtmlSelectElement>()
                .map(|el| el.value())
                .unwrap_or_default(),
            message: self
                .message
                .cast::<HtmlTextAreaElement>()
                .map(|el| el.value())
                .unwrap_or_default(),
            website: Self::input_value(&self.website),
        }
    }

    fn clear(&self) {
        for node in [&self.name, &self.email, &self.website] {
            if let Some(el) = node.cast::<HtmlInputElement>() {
                el.set_value("");
            }
        }
        if let Some(el) = self.service.cast::<HtmlSelectElement>() {
            el.set_selected_index(0);
        }
        if let Some(el) = self.message.cast::<HtmlTextAreaElement>() {
            el.set_value("");
        }
    }
}

/// Connects the contact controller to this form's DOM and to the page-wide
/// notification slot.
struct FormBinding {
    fields: FieldRefs,
    submitting: UseStateHandle<bool>,
    notifier: Option<Notifier>,
    language: Option<Rc<SiteLanguage>>,
}

impl FormView for FormBinding {
    fn set_submitting(&self, submitting: bool) {
        self.submitting.set(submitting);
    }

    fn clear_fields(&self) {
        self.fields.clear();
    }

    fn notify(&self, notice: Notice) {
        let text = match &self.language {
            Some(language) => notice.text(|key| language.translate(key)).to_string(),
            None => notice.text(|key| key).to_string(),
        };
        match &self.notifier {
            Some(notifier) => notifier.show(text, notice.severity()),
            None => log::warn!("No notification host mounted: {}", text),
        }
    }
}

#[function_component(ContactForm)]
pub fn contact_form() -> Html {
    let controller = use_memo(|_| ContactController::new(GlooContactApi), ());
    let fields = use_memo(|_| FieldRefs::default(), ());
    let submitting = use_state(|| false);
    let notifier = use_context::<Notifier>();
    let language = use_context::<LanguageContext>();

    // The token is fetched once per page load. A failure only surfaces when
    // the visitor actually submits.
    {
        let controller = Rc::clone(&controller);
        use_effect_with_deps(
            move |_| {
                spawn_local(async move { controller.refresh_token().await });
                || ()
            },
            (),
        );
    }

    let onsubmit = {
        let controller = Rc::clone(&controller);
        let fields = Rc::clone(&fields);
        let submitting = submitting.clone();
        let language = language.as_ref().map(|ctx| Rc::clone(&ctx.controller));
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = Rc::clone(&controller);
            let binding = FormBinding {
                fields: (*fields).clone(),
                submitting: submitting.clone(),
                notifier: notifier.clone(),
                language: language.clone(),
            };
            spawn_local(async move {
                let values = binding.fields.read();
                controller.submit(&values, &binding).await;
            });
        })
    };

    let t = |key: &'static str| -> String {
        match &language {
            Some(ctx) => ctx.t(key).to_string(),
            None => key.to_string(),
        }
    };
    let button_label = if *submitting { t("contact.sending") } else { t("contact.submit") };

    html! {
        <form class="contact-form" novalidate=true {onsubmit}>
            <div class="form-group">
                <input ref={fields.name.clone()} type="text" name="name" required=true
                    maxlength="100" data-i18n="contact.name" placeholder="Your name" />
            </div>
            <div class="form-group">
                <input ref={fields.email.clone()} type="email" name="email" required=true
                    maxlength="255" data-i18n="contact.email" placeholder="Your email" />
            </div>
            <div class="form-group">
                <select ref={fields.service.clone()} name="service">
                    <option value="" data-i18n="contact.service.placeholder">{"Select a service"}</option>
                    <option value="logistics" data-i18n="contact.service.logistics">{"Logistics"}</option>
                    <option value="warehousing" data-i18n="contact.service.warehousing">{"Warehousing"}</option>
                    <option value="software" data-i18n="contact.service.software">{"Software development"}</option>
                </select>
            </div>
            <div class="form-group">
                <textarea ref={fields.message.clone()} name="message" rows="5"
                    maxlength="2000" data-i18n="contact.message" placeholder="Your message"></textarea>
            </div>
            // Honeypot. People never see or fill it.
            <div class="form-group hp-field" aria-hidden="true">
                <input ref={fields.website.clone()} type="text" name="website"
                    tabindex="-1" autocomplete="off" />
            </div>
            <button type="submit" class="btn btn-primary" disabled={*submitting}>
                { button_label }
            </button>
        </form>
    }
}
