//! Student dashboard, the landing route for signed-in users.
//!
//! Shows the learning totals, then the enrolled courses filtered by status
//! tab and title search, eight per page.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::pager::Pager;
use crate::net::types::{EnrolledCourse, StudentSummary, UserProfile};
use crate::state::session::SessionContext;
use crate::util::paging::{page_count, page_slice};

pub const ENROLLED_PER_PAGE: usize = 8;

/// Status filter over the enrolled courses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CourseTab {
    #[default]
    All,
    InProgress,
    Completed,
}

impl CourseTab {
    pub const ALL: [CourseTab; 3] = [CourseTab::All, CourseTab::InProgress, CourseTab::Completed];

    pub fn label(self) -> &'static str {
        match self {
            CourseTab::All => "All Courses",
            CourseTab::InProgress => "In Progress",
            CourseTab::Completed => "Completed",
        }
    }

    pub fn matches(self, course: &EnrolledCourse) -> bool {
        match self {
            CourseTab::All => true,
            CourseTab::InProgress => course.is_in_progress(),
            CourseTab::Completed => course.is_completed(),
        }
    }
}

/// Courses in `tab` whose title contains `query`, ignoring case.
pub fn filter_enrolled(courses: &[EnrolledCourse], tab: CourseTab, query: &str) -> Vec<EnrolledCourse> {
    let needle = query.trim().to_lowercase();
    courses
        .iter()
        .filter(|c| tab.matches(c))
        .filter(|c| needle.is_empty() || c.course.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[component]
fn StatCard(label: &'static str, value: Signal<u32>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__value">{move || value.get()}</span>
            <span class="stat-card__label">{label}</span>
        </div>
    }
}

#[component]
fn EnrolledRow(enrollment: EnrolledCourse) -> impl IntoView {
    let progress = enrollment.progress_percent();
    let course = enrollment.course;

    view! {
        <li class="enrolled-course">
            {course.image.clone().map(|src| view! { <img class="enrolled-course__image" src=src alt="" /> })}
            <div class="enrolled-course__body">
                <h3>{course.title.clone()}</h3>
                <span class="enrolled-course__level">{course.level.clone()}</span>
                <span class="enrolled-course__lessons">
                    {format!("{} of {} lessons", enrollment.completed_count, enrollment.lecture_count)}
                </span>
                <div class="progress" role="progressbar" aria-valuenow=progress.to_string() aria-valuemin="0" aria-valuemax="100">
                    <div class="progress__bar" style=format!("width: {progress}%")></div>
                </div>
                <span class="enrolled-course__percent">{format!("{progress}%")}</span>
            </div>
        </li>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let profile = RwSignal::new(None::<UserProfile>);
    let summary = RwSignal::new(StudentSummary::default());
    let enrolled = RwSignal::new(Vec::<EnrolledCourse>::new());
    let loading = RwSignal::new(true);
    let tab = RwSignal::new(CourseTab::All);
    let query = RwSignal::new(String::new());
    let page = RwSignal::new(1_usize);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::{fetch_enrolled_courses, fetch_profile, fetch_student_summary};
        use crate::state::toast::{ToastKind, ToastState, notify};

        let toasts = expect_context::<RwSignal<ToastState>>();
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let Some(user_id) = session.state.get_untracked().user.map(|u| u.user_id) else {
                loading.set(false);
                return;
            };
            let token = match crate::util::session_init::browser_access_token(&session).await {
                Ok(token) => token,
                Err(e) => {
                    notify(toasts, ToastKind::Error, e.to_string());
                    loading.set(false);
                    return;
                }
            };
            let (summary_res, enrolled_res, profile_res) = futures::join!(
                fetch_student_summary(&token, &user_id),
                fetch_enrolled_courses(&token, &user_id),
                fetch_profile(&token, &user_id),
            );
            match summary_res {
                Ok(totals) => summary.set(totals),
                Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
            }
            match enrolled_res {
                Ok(list) => enrolled.set(list),
                Err(e) => notify(toasts, ToastKind::Error, e.to_string()),
            }
            match profile_res {
                Ok(p) => profile.set(Some(p)),
                Err(e) => leptos::logging::warn!("profile fetch failed: {e}"),
            }
            loading.set(false);
        });
    }

    let greeting = move || {
        let from_profile = profile.with(|p| p.as_ref().map(|p| p.full_name.clone()).filter(|n| !n.trim().is_empty()));
        let name = from_profile
            .or_else(|| session.state.with(|s| s.user.as_ref().map(|u| u.display_name().to_owned())))
            .unwrap_or_default();
        format!("Welcome back, {name}")
    };
    let avatar = move || {
        profile
            .with(|p| p.as_ref().and_then(|p| p.image.clone()))
            .map(|src| view! { <img class="dashboard-page__avatar" src=src alt="" /> })
    };

    let filtered = Memo::new(move |_| enrolled.with(|list| query.with(|q| filter_enrolled(list, tab.get(), q))));
    let pages = Signal::derive(move || filtered.with(|list| page_count(list.len(), ENROLLED_PER_PAGE)));
    let visible = move || {
        filtered.with(|list| {
            page_slice(list, page.get(), ENROLLED_PER_PAGE)
                .iter()
                .cloned()
                .map(|enrollment| view! { <EnrolledRow enrollment=enrollment /> })
                .collect_view()
        })
    };

    let tabs = CourseTab::ALL
        .into_iter()
        .map(|t| {
            view! {
                <button
                    class="dashboard-tabs__tab"
                    class:dashboard-tabs__tab--active=move || tab.get() == t
                    on:click=move |_| {
                        tab.set(t);
                        page.set(1);
                    }
                >
                    {t.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="dashboard-page">
            <header class="dashboard-page__header">
                {avatar}
                <h1>{greeting}</h1>
            </header>
            <div class="dashboard-page__stats">
                <StatCard label="Total Courses" value=Signal::derive(move || summary.get().total_courses) />
                <StatCard label="Completed Lessons" value=Signal::derive(move || summary.get().completed_lessons) />
                <StatCard
                    label="Achieved Certificates"
                    value=Signal::derive(move || summary.get().achieved_certificates)
                />
            </div>
            <nav class="dashboard-page__nav">
                <a href="/student/change-password">"Change Password"</a>
                <a href="/logout">"Logout"</a>
            </nav>
            <div class="dashboard-tabs">{tabs}</div>
            <input
                class="auth-input dashboard-page__search"
                type="search"
                placeholder="Search your courses"
                prop:value=move || query.get()
                on:input=move |ev| {
                    query.set(event_target_value(&ev));
                    page.set(1);
                }
            />
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading..."</p> }>
                <Show
                    when=move || filtered.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="dashboard-page__empty">"No courses found."</p> }
                >
                    <ul class="enrolled-courses">{visible}</ul>
                    <Pager page=page pages=pages />
                </Show>
            </Show>
        </section>
    }
}
