//! Logout page: drops credentials on mount and offers ways back in.

use leptos::prelude::*;

use crate::state::session::SessionContext;
use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::{ToastKind, notify};

#[component]
pub fn LogoutPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    #[cfg(feature = "hydrate")]
    {
        crate::util::session_init::sign_out(&session.handle, &crate::util::credentials::CookieCredentials);
        notify(toasts, ToastKind::Success, "You have successfully logged out");
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = (session, toasts);

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"You have been logged out"</h1>
                <p class="auth-card__subtitle">"Thanks for visiting. See you next time!"</p>
                <a href="/login" class="auth-button">"Login"</a>
                <a href="/" class="auth-button auth-button--secondary">"Homepage"</a>
            </div>
        </div>
    }
}
