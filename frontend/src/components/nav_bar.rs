use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use super::language_toggle::{LanguageContext, LanguageToggle};
use super::translate::use_translations;
use crate::controllers::navigation::{NavMenu, NavState};
use crate::Route;

fn lock_page_scroll(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let value = if locked { "hidden" } else { "" };
    let _ = body.style().set_property("overflow", value);
}

#[function_component(NavBar)]
pub fn nav_bar() -> Html {
    let menu = use_state(NavMenu::default);
    let root = use_node_ref();
    let menu_label = use_context::<LanguageContext>()
        .map(|ctx| ctx.t("nav.menu").to_string())
        .unwrap_or_else(|| "Menu".to_string());
    use_translations(root.clone());

    let state: NavState = menu.state();

    // Keep body scrolling in sync with the menu, and never leave it locked.
    use_effect_with_deps(
        |locked: &bool| {
            lock_page_scroll(*locked);
            || lock_page_scroll(false)
        },
        state.scroll_locked,
    );

    // Escape closes the menu.
    {
        let menu = menu.clone();
        use_effect_with_deps(
            move |_| {
                let document = web_sys::window().and_then(|w| w.document());
                let listener = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                    if e.key() == "Escape" {
                        let mut next = *menu;
                        next.close();
                        menu.set(next);
                    }
                });
                if let Some(document) = &document {
                    let _ = document
                        .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
                }
                move || {
                    if let Some(document) = document {
                        let _ = document.remove_event_listener_with_callback(
                            "keydown",
                            listener.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *menu;
            next.toggle();
            menu.set(next);
        })
    };
    let close = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *menu;
            next.close();
            menu.set(next);
        })
    };

    html! {
        <header class="site-header" ref={root}>
            <nav class="navbar">
                <Link<Route> to={Route::Home} classes="brand">{"Estada"}</Link<Route>>
                <button
                    type="button"
                    class={classes!("menu-toggle", state.menu_open.then_some("active"))}
                    aria-controls="primary-menu"
                    aria-expanded={state.aria_expanded()}
                    aria-label={menu_label}
                    onclick={toggle}
                >
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </button>
                <ul id="primary-menu" class={classes!("nav-links", state.menu_open.then_some("active"))}>
                    <li onclick={close.clone()}>
                        <Link<Route> to={Route::Home}><span data-i18n="nav.home">{"Home"}</span></Link<Route>>
                    </li>
                    <li onclick={close.clone()}>
                        <Link<Route> to={Route::About}><span data-i18n="nav.about">{"About"}</span></Link<Route>>
                    </li>
                    <li onclick={close.clone()}>
                        <Link<Route> to={Route::Technologies}><span data-i18n="nav.technologies">{"Technologies"}</span></Link<Route>>
                    </li>
                    <li onclick={close.clone()}>
                        <a href="/#contact" data-i18n="nav.contact">{"Contact"}</a>
                    </li>
                    <li><LanguageToggle /></li>
                </ul>
            </nav>
            <div
                class={classes!("nav-backdrop", state.backdrop_visible.then_some("active"))}
                onclick={close}
            ></div>
        </header>
    }
}
