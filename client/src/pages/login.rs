//! Login page with email + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! A successful sign-in writes the credential cookies and the session store
//! in one step (`apply_credentials`); a rejected sign-in leaves the session
//! untouched so the user can retry.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionContext;
use crate::state::toast::{ToastKind, ToastState, notify};

/// Trim the email and require both fields.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Sign in against the API and apply the returned credentials.
///
/// # Errors
///
/// Returns a user-presentable message when the API rejects the credentials or
/// returns an undecodable token.
#[cfg(feature = "hydrate")]
pub(crate) async fn sign_in(
    session: &SessionContext,
    email: &str,
    password: &str,
) -> Result<crate::net::types::UserIdentity, String> {
    let pair = crate::net::api::login(email, password).await.map_err(|e| e.to_string())?;
    crate::util::session_init::apply_credentials(&session.handle, &crate::util::credentials::CookieCredentials, &pair)
        .map_err(|e| format!("Login failed: {e}"))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                notify(toasts, ToastKind::Warning, msg);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match sign_in(&session, &email_value, &password_value).await {
                    Ok(_) => {
                        notify(toasts, ToastKind::Success, "Login successful!");
                        navigate("/", NavigateOptions::default());
                    }
                    Err(msg) => {
                        notify(toasts, ToastKind::Error, msg);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&session, &navigate, email_value, password_value);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <p class="auth-card__subtitle">
                    "Don't have an account? " <a href="/register">"Sign up"</a>
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <label for="email">"Email Address"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        placeholder="johndoe@gmail.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        placeholder="**************"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <a href="/forgot-password" class="auth-form__aside">"Forgot your password?"</a>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Processing..." } else { "Sign In" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
