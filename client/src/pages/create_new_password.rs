//! Create-new-password page reached from the emailed reset link.
//!
//! The link carries `otp` and `uuidb64` query parameters; both are sent back
//! with the new password.

#[cfg(test)]
#[path = "create_new_password_test.rs"]
mod create_new_password_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::types::NewPasswordRequest;
use crate::state::toast::{ToastKind, ToastState, notify};

/// Build the reset confirmation from the form and the link parameters.
pub fn validate_new_password(
    password: &str,
    confirm: &str,
    otp: Option<String>,
    uuidb64: Option<String>,
) -> Result<NewPasswordRequest, &'static str> {
    if password.is_empty() {
        return Err("Enter a new password.");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    let otp = otp.filter(|v| !v.is_empty());
    let uuidb64 = uuidb64.filter(|v| !v.is_empty());
    let (Some(otp), Some(uuidb64)) = (otp, uuidb64) else {
        return Err("This reset link is invalid or incomplete.");
    };
    Ok(NewPasswordRequest { password: password.to_owned(), otp, uuidb64 })
}

#[component]
pub fn CreateNewPasswordPage() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();
    let query = use_query_map();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let params = query.get();
        let request = match validate_new_password(&password.get(), &confirm.get(), params.get("otp"), params.get("uuidb64")) {
            Ok(request) => request,
            Err(msg) => {
                notify(toasts, ToastKind::Error, msg);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::create_new_password(&request).await {
                    Ok(message) => {
                        navigate("/login", NavigateOptions::default());
                        let message = if message.is_empty() { "Password changed successfully".to_owned() } else { message };
                        notify(toasts, ToastKind::Success, message);
                    }
                    Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&navigate, request);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create New Password"</h1>
                <p class="auth-card__subtitle">"Choose a new password for your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label for="password">"Enter New Password"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label for="confirm_password">"Confirm New Password"</label>
                    <input
                        id="confirm_password"
                        class="auth-input"
                        type="password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Processing..." } else { "Save New Password" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
