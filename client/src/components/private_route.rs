//! Route guard wrapper for authenticated pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps a protected route's view and re-evaluates `guard_decision` on every
//! session change: placeholder while loading, children when signed in, and a
//! history-replacing redirect to `/login` otherwise.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::components::Redirect;

use crate::config::LOGIN_PATH;
use crate::state::session::SessionContext;
use crate::util::auth::{GuardDecision, guard_decision};

#[component]
pub fn PrivateRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let state = session.state;

    move || match guard_decision(&state.get()) {
        GuardDecision::Loading => view! {
            <div class="loading-screen">"Checking authentication..."</div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::RedirectToLogin => view! {
            <Redirect path=LOGIN_PATH options=NavigateOptions { replace: true, ..NavigateOptions::default() }/>
        }
        .into_any(),
    }
}
