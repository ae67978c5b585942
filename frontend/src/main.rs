use std::rc::Rc;

use web_sys::Element;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod config;
mod controllers;
mod i18n;
mod pages;
mod utils;

use components::footer::Footer;
use components::language_toggle::{LanguageContext, SiteLanguage};
use components::nav_bar::NavBar;
use components::notification::NotificationHost;
use i18n::dom::{self, LocalStorageStore};
use i18n::{TranslationRegistry, TRANSLATIONS};
use pages::{about::About, home::Home, not_found::NotFound, technologies::Technologies};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/about")]
    About,
    #[at("/technologies")]
    Technologies,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::About => html! { <About /> },
        Route::Technologies => html! { <Technologies /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

/// Elements outside the Yew root that still take part in translation,
/// which in practice is the `<title>` in `index.html`.
fn head_registry() -> TranslationRegistry<Element> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.head())
        .map(|head| dom::scan(&head))
        .unwrap_or_default()
}

#[function_component(App)]
pub fn app() -> Html {
    let controller: Rc<SiteLanguage> =
        use_memo(|_| SiteLanguage::load(&TRANSLATIONS, LocalStorageStore), ());
    let head = use_memo(|_| head_registry(), ());
    let language = use_state(|| controller.current());

    // The stored preference may differ from the markup's English defaults.
    {
        let controller = Rc::clone(&controller);
        let head = Rc::clone(&head);
        use_effect_with_deps(
            move |_| {
                controller.render(&*head, controller.current());
                if let Some(html) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.document_element())
                {
                    let _ = html.set_attribute("lang", controller.current().code());
                }
                || ()
            },
            *language,
        );
    }

    let toggle = {
        let controller = Rc::clone(&controller);
        let head = Rc::clone(&head);
        let language = language.clone();
        Callback::from(move |_| {
            let next = controller.toggle(&*head);
            log::info!("Language switched to {}", next.code());
            language.set(next);
        })
    };

    let context = LanguageContext {
        controller,
        language: *language,
        toggle,
    };

    html! {
        <ContextProvider<LanguageContext> {context}>
            <NotificationHost>
                <BrowserRouter>
                    <NavBar />
                    <Switch<Route> render={switch} />
                    <Footer />
                </BrowserRouter>
            </NotificationHost>
        </ContextProvider<LanguageContext>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    yew::Renderer::<App>::new().render();
}
