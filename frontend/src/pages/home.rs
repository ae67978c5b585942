use yew::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::components::reveal::use_scroll_reveal;
use crate::components::translate::use_translations;

struct Service {
    icon: &'static str,
    title_key: &'static str,
    title: &'static str,
    text_key: &'static str,
    text: &'static str,
}

const SERVICES: &[Service] = &[
    Service {
        icon: "🚚",
        title_key: "services.freight.title",
        title: "Freight & Transport",
        text_key: "services.freight.text",
        text: "Road and intermodal shipments across the Balkans and the EU, planned and tracked end to end.",
    },
    Service {
        icon: "🏭",
        title_key: "services.warehousing.title",
        title: "Warehousing",
        text_key: "services.warehousing.text",
        text: "Flexible storage, picking and cross-docking close to the main regional corridors.",
    },
    Service {
        icon: "💻",
        title_key: "services.digital.title",
        title: "Digital Services",
        text_key: "services.digital.text",
        text: "Custom web platforms, integrations and dashboards that give you visibility over every order.",
    },
];

#[function_component(Home)]
pub fn home() -> Html {
    let root = use_node_ref();
    use_translations(root.clone());
    use_scroll_reveal(root.clone());

    html! {
        <main class="home" ref={root}>
            <section class="hero">
                <div class="container">
                    <h1 class="reveal" data-i18n="hero.title">{"Logistics that moves your business forward"}</h1>
                    <p class="reveal" data-i18n="hero.subtitle">
                        {"Freight coordination, warehousing and the software that ties it all together."}
                    </p>
                    <a href="#contact" class="btn btn-primary reveal" data-i18n="hero.cta">{"Get in touch"}</a>
                </div>
            </section>

            <section id="services" class="services">
                <div class="container">
                    <h2 class="section-title reveal" data-i18n="services.title">{"What we do"}</h2>
                    <div class="card-grid">
                        { for SERVICES.iter().map(|s| html! {
                            <article class="card reveal">
                                <div class="card-icon">{ s.icon }</div>
                                <h3 data-i18n={s.title_key}>{ s.title }</h3>
                                <p data-i18n={s.text_key}>{ s.text }</p>
                            </article>
                        }) }
                    </div>
                </div>
            </section>

            <section id="contact" class="contact">
                <div class="container narrow">
                    <h2 class="section-title reveal" data-i18n="contact.title">{"Contact us"}</h2>
                    <p class="reveal" data-i18n="contact.intro" data-i18n-html="true">
                        {"Tell us about your project and we will reply within "}
                        <strong>{"one business day"}</strong>
                        {"."}
                    </p>
                    <ContactForm />
                </div>
            </section>
        </main>
    }
}
