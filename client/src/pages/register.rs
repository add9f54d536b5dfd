//! Registration page.
//!
//! The password confirmation is checked locally before any request; after the
//! account is created the user is signed in with the same credentials.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterRequest;
use crate::state::session::SessionContext;
use crate::state::toast::{ToastKind, ToastState, notify};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match!";

/// Check a registration form and normalize it for submission.
pub fn validate_register_input(form: &RegisterRequest) -> Result<RegisterRequest, &'static str> {
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();
    let email = form.email.trim();
    if first_name.is_empty() || last_name.is_empty() || email.is_empty() {
        return Err("Fill in your name and email.");
    }
    if form.password.is_empty() {
        return Err("Choose a password.");
    }
    if form.password != form.confirm_password {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(RegisterRequest {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
        confirm_password: form.confirm_password.clone(),
    })
}

type FieldGetter = fn(&RegisterRequest) -> String;
type FieldSetter = fn(&mut RegisterRequest, String);

fn form_field(
    form: RwSignal<RegisterRequest>,
    label: &'static str,
    id: &'static str,
    kind: &'static str,
    get: FieldGetter,
    set: FieldSetter,
) -> impl IntoView {
    view! {
        <label for=id>{label}</label>
        <input
            id=id
            class="auth-input"
            type=kind
            prop:value=move || form.with(get)
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| set(f, value));
            }
        />
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterRequest::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_register_input(&form.get()) {
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
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::net::api::register(&request).await {
                    notify(toasts, ToastKind::Error, e.to_string());
                    busy.set(false);
                    return;
                }
                match crate::pages::login::sign_in(&session, &request.email, &request.password).await {
                    Ok(_) => {
                        notify(toasts, ToastKind::Success, "Registration successful!");
                        navigate("/", NavigateOptions::default());
                    }
                    Err(msg) => {
                        // Account exists; let the user sign in by hand.
                        notify(toasts, ToastKind::Warning, msg);
                        navigate("/login", NavigateOptions::default());
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (&session, &navigate, request);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign up"</h1>
                <p class="auth-card__subtitle">
                    "Already have an account? " <a href="/login">"Sign In"</a>
                </p>
                <form class="auth-form" on:submit=on_submit>
                    {form_field(form, "First Name", "first_name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
                    {form_field(form, "Last Name", "last_name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
                    {form_field(form, "Email Address", "email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {form_field(form, "Password", "password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    {form_field(form, "Confirm Password", "password2", "password", |f| f.confirm_password.clone(), |f, v| f.confirm_password = v)}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Processing..." } else { "Sign Up" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
