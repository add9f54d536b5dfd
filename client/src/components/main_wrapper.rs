//! Application-wide wrapper that reconciles the session on mount.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the session initializer exactly once per page load (browser only) and
//! holds rendering behind a loading screen until it finishes, so every route
//! below sees a settled session.

use leptos::prelude::*;

use crate::state::session::SessionContext;

#[component]
pub fn MainWrapper(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let ready = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let handle = session.handle.clone();
        leptos::task::spawn_local(async move {
            let outcome = crate::util::session_init::initialize_session(
                &handle,
                &crate::util::credentials::CookieCredentials,
                &crate::net::api::HttpRefresher,
                crate::util::jwt::unix_now(),
            )
            .await;
            leptos::logging::log!("session initialized: {outcome:?}");
            ready.set(true);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! {
        <Show
            when=move || ready.get()
            fallback=|| view! { <div class="loading-screen">"Loading..."</div> }
        >
            {children()}
        </Show>
    }
}
