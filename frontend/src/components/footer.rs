use yew::prelude::*;

use super::translate::use_translations;

#[function_component(Footer)]
pub fn footer() -> Html {
    let root = use_node_ref();
    use_translations(root.clone());
    let year = js_sys::Date::new_0().get_full_year();

    html! {
        <footer class="site-footer" ref={root}>
            <p>
                {format!("© {} Estada. ", year)}
                <span data-i18n="footer.rights">{"All rights reserved."}</span>
            </p>
        </footer>
    }
}
