//! Forgot-password page: requests a reset link by email.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState, notify};

/// Trim the address and require a plausible email shape.
pub fn validate_reset_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    let plausible = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !plausible {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let address = match validate_reset_email(&email.get()) {
            Ok(address) => address,
            Err(msg) => {
                notify(toasts, ToastKind::Warning, msg);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_password_reset(&address).await {
                Ok(()) => notify(toasts, ToastKind::Success, "Password reset email sent"),
                Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = address;
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Forgot Password"</h1>
                <p class="auth-card__subtitle">"Let's help you get back into your account"</p>
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
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Processing..." } else { "Reset Password" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
