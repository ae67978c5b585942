use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::translate::use_translations;
use crate::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    let root = use_node_ref();
    use_translations(root.clone());

    html! {
        <main class="page not-found" ref={root}>
            <div class="container">
                <h1>{"404"}</h1>
                <p data-i18n="notfound.title">{"Page not found"}</p>
                <Link<Route> to={Route::Home} classes="btn btn-primary">
                    <span data-i18n="notfound.back">{"Back to home"}</span>
                </Link<Route>>
            </div>
        </main>
    }
}
