//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{base_header::BaseHeader, main_wrapper::MainWrapper, private_route::PrivateRoute, toast_host::ToastHost};
use crate::pages::{
    change_password::ChangePasswordPage, create_new_password::CreateNewPasswordPage, dashboard::DashboardPage,
    forgot_password::ForgotPasswordPage, index::IndexPage, login::LoginPage, logout::LogoutPage,
    register::RegisterPage,
};
use crate::state::{session::SessionContext, toast::ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session store and toast queue, then sets up client-side
/// routing. Student routes sit behind `PrivateRoute`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(SessionContext::install());
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/learnmart.css"/>
        <Title text="LearnMart"/>

        <Router>
            <MainWrapper>
                <BaseHeader/>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=IndexPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("logout") view=LogoutPage/>
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("create-new-password") view=CreateNewPasswordPage/>
                    <Route
                        path=(StaticSegment("student"), StaticSegment("dashboard"))
                        view=|| view! { <PrivateRoute><DashboardPage/></PrivateRoute> }
                    />
                    <Route
                        path=(StaticSegment("student"), StaticSegment("change-password"))
                        view=|| view! { <PrivateRoute><ChangePasswordPage/></PrivateRoute> }
                    />
                </Routes>
            </MainWrapper>
            <ToastHost/>
        </Router>
    }
}
