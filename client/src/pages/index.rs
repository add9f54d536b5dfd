//! Public landing page with the paginated course catalog.

use leptos::prelude::*;

use crate::components::pager::Pager;
use crate::net::types::Course;
use crate::state::session::SessionContext;
use crate::util::paging::{page_count, page_slice};

pub const COURSES_PER_PAGE: usize = 4;

#[component]
fn CourseCard(course: Course) -> impl IntoView {
    let rating = course.average_rating.map_or_else(|| "No ratings".to_owned(), |r| format!("{r:.1}"));

    view! {
        <article class="course-card">
            {course.image.clone().map(|src| view! { <img class="course-card__image" src=src alt=course.title.clone() /> })}
            <div class="course-card__meta">
                <span class="course-card__category">{course.category_title().to_owned()}</span>
                <span class="course-card__level">{course.level.clone()}</span>
                <span class="course-card__language">{course.language.clone()}</span>
            </div>
            <h3 class="course-card__title">{course.title.clone()}</h3>
            <p class="course-card__teacher">{format!("By: {}", course.teacher_name())}</p>
            <p class="course-card__students">{format!("{} Students", course.student_count)}</p>
            <p class="course-card__rating">{format!("{rating} ({} Reviews)", course.review_count)}</p>
            <p class="course-card__price">{format!("BDT {}", course.price)}</p>
        </article>
    }
}

#[component]
pub fn IndexPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let signed_in = move || session.state.with(crate::state::session::Session::is_logged_in);

    let courses = RwSignal::new(Vec::<Course>::new());
    let loading = RwSignal::new(true);
    let page = RwSignal::new(1_usize);
    let pages = Signal::derive(move || courses.with(|c| page_count(c.len(), COURSES_PER_PAGE)));

    #[cfg(feature = "hydrate")]
    {
        let toasts = expect_context::<RwSignal<crate::state::toast::ToastState>>();
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_courses().await {
                Ok(list) => courses.set(list),
                Err(e) => {
                    leptos::logging::warn!("course catalog fetch failed: {e}");
                    crate::state::toast::notify(toasts, crate::state::toast::ToastKind::Error, e.to_string());
                }
            }
            loading.set(false);
        });
    }

    let visible = move || {
        courses.with(|c| {
            page_slice(c, page.get(), COURSES_PER_PAGE)
                .iter()
                .cloned()
                .map(|course| view! { <CourseCard course=course /> })
                .collect_view()
        })
    };

    view! {
        <section class="index-page">
            <h1>"Learn something new today"</h1>
            <p>"Courses taught by working instructors, at your own pace."</p>
            <Show
                when=signed_in
                fallback=|| view! {
                    <div class="index-page__actions">
                        <a href="/register" class="auth-button">"Get Started"</a>
                        <a href="/login" class="auth-button auth-button--secondary">"Login"</a>
                    </div>
                }
            >
                <a href="/student/dashboard" class="auth-button">"Go to Dashboard"</a>
            </Show>
            <h2>"Most Popular Courses"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <p class="index-page__loading">"Loading..."</p> }>
                <Show
                    when=move || courses.with(|c| !c.is_empty())
                    fallback=|| view! { <p class="index-page__empty">"No courses available yet."</p> }
                >
                    <div class="course-grid">{visible}</div>
                    <Pager page=page pages=pages />
                </Show>
            </Show>
        </section>
    }
}
