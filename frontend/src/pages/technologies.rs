use yew::prelude::*;

use crate::components::reveal::use_scroll_reveal;
use crate::components::translate::use_translations;

const TOPICS: &[(&str, &str, &str, &str)] = &[
    (
        "tech.tracking.title",
        "Shipment tracking",
        "tech.tracking.text",
        "Live status for every consignment, from pickup to proof of delivery.",
    ),
    (
        "tech.platforms.title",
        "Web platforms",
        "tech.platforms.text",
        "Fast, secure sites and portals built with modern, type-safe tooling.",
    ),
    (
        "tech.integration.title",
        "Integrations",
        "tech.integration.text",
        "Connections to ERPs, carriers and customs systems so data only gets entered once.",
    ),
];

#[function_component(Technologies)]
pub fn technologies() -> Html {
    let root = use_node_ref();
    use_translations(root.clone());
    use_scroll_reveal(root.clone());

    html! {
        <main class="page technologies" ref={root}>
            <section class="page-header">
                <div class="container">
                    <h1 class="reveal" data-i18n="tech.title">{"Technologies"}</h1>
                    <p class="lead reveal" data-i18n="tech.lead">
                        {"The tools behind our operations and the products we build for clients."}
                    </p>
                </div>
            </section>
            <section class="container card-grid">
                { for TOPICS.iter().map(|(title_key, title, text_key, text)| html! {
                    <article class="card reveal">
                        <h2 data-i18n={*title_key}>{ *title }</h2>
                        <p data-i18n={*text_key}>{ *text }</p>
                    </article>
                }) }
            </section>
        </main>
    }
}
