//! Top navigation bar with auth-aware links and the cart badge.

use leptos::prelude::*;

use crate::state::session::SessionContext;

#[component]
pub fn BaseHeader() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let state = session.state;
    let cart_count = RwSignal::new(0_usize);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let cart_id = crate::util::cart_id::cart_id();
        if let Some(count) = crate::net::api::fetch_cart_count(&cart_id).await {
            cart_count.set(count);
        }
    });

    let greeting = move || state.get().user.map(|u| u.display_name().to_owned());

    view! {
        <nav class="base-header">
            <a href="/" class="base-header__brand">"LearnMart"</a>
            <span class="base-header__cart">"Cart (" {move || cart_count.get()} ")"</span>
            <Show
                when=move || state.get().is_logged_in()
                fallback=|| {
                    view! {
                        <a href="/login" class="base-header__link">"Login"</a>
                        <a href="/register" class="base-header__link">"Register"</a>
                    }
                }
            >
                <span class="base-header__user">{greeting}</span>
                <a href="/student/dashboard" class="base-header__link">"Dashboard"</a>
                <a href="/logout" class="base-header__link">"Logout"</a>
            </Show>
        </nav>
    }
}
