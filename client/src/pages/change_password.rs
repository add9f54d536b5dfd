//! Change-password page for signed-in students.

#[cfg(test)]
#[path = "change_password_test.rs"]
mod change_password_test;

use leptos::prelude::*;

use crate::net::types::ChangePasswordRequest;
use crate::state::session::SessionContext;
use crate::state::toast::{ToastKind, ToastState, notify};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Raw form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Check the form and attach the signed-in user's id.
pub fn validate_change_password(form: &ChangePasswordForm, user_id: &str) -> Result<ChangePasswordRequest, &'static str> {
    if form.old_password.is_empty() {
        return Err("Old password is required");
    }
    if form.new_password.is_empty() {
        return Err("New password is required");
    }
    if form.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters");
    }
    if form.new_password != form.confirm_new_password {
        return Err("Passwords do not match");
    }
    Ok(ChangePasswordRequest {
        user_id: user_id.to_owned(),
        old_password: form.old_password.clone(),
        new_password: form.new_password.clone(),
    })
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let form = RwSignal::new(ChangePasswordForm::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(user) = session.state.get().user else {
            notify(toasts, ToastKind::Error, "You need to be logged in to change your password");
            return;
        };
        let request = match validate_change_password(&form.get(), &user.user_id) {
            Ok(request) => request,
            Err(msg) => {
                notify(toasts, ToastKind::Error, msg);
                return;
            }
        };
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                let token = match crate::util::session_init::browser_access_token(&session).await {
                    Ok(token) => token,
                    Err(e) => {
                        notify(toasts, ToastKind::Error, e.to_string());
                        busy.set(false);
                        return;
                    }
                };
                match crate::net::api::change_password(&token, &request).await {
                    Ok(message) => {
                        let message = if message.is_empty() { "Password changed successfully".to_owned() } else { message };
                        notify(toasts, ToastKind::Success, message);
                        form.set(ChangePasswordForm::default());
                    }
                    Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let field = move |label: &'static str, id: &'static str, get: fn(&ChangePasswordForm) -> String, set: fn(&mut ChangePasswordForm, String)| {
        view! {
            <label for=id>{label}</label>
            <input
                id=id
                class="auth-input"
                type="password"
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <section class="dashboard-page">
            <h1>"Change Password"</h1>
            <form class="auth-form" on:submit=on_submit>
                {field("Old Password", "old_password", |f| f.old_password.clone(), |f, v| f.old_password = v)}
                {field("New Password", "new_password", |f| f.new_password.clone(), |f, v| f.new_password = v)}
                {field("Confirm New Password", "confirm_new_password", |f| f.confirm_new_password.clone(), |f, v| f.confirm_new_password = v)}
                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Saving..." } else { "Save New Password" }}
                </button>
            </form>
        </section>
    }
}
