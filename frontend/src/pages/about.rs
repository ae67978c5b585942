use yew::prelude::*;

use crate::components::reveal::use_scroll_reveal;
use crate::components::translate::use_translations;

#[function_component(About)]
pub fn about() -> Html {
    let root = use_node_ref();
    use_translations(root.clone());
    use_scroll_reveal(root.clone());

    use_effect_with_deps(
        |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <main class="page about" ref={root}>
            <section class="page-header">
                <div class="container">
                    <h1 class="reveal" data-i18n="about.title">{"About Estada"}</h1>
                    <p class="lead reveal" data-i18n="about.lead">
                        {"A small team of logistics planners and engineers based in Skopje."}
                    </p>
                </div>
            </section>
            <section class="container card-grid two">
                <article class="card reveal">
                    <h2 data-i18n="about.mission.title">{"Our mission"}</h2>
                    <p data-i18n="about.mission.text">
                        {"Make moving goods as predictable as sending an email, for companies of every size."}
                    </p>
                </article>
                <article class="card reveal">
                    <h2 data-i18n="about.values.title">{"How we work"}</h2>
                    <p data-i18n="about.values.text">
                        {"Clear pricing, one point of contact and honest updates when plans change."}
                    </p>
                </article>
            </section>
        </main>
    }
}
