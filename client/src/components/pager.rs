//! Previous/next pagination controls.

use leptos::prelude::*;

#[component]
pub fn Pager(page: RwSignal<usize>, #[prop(into)] pages: Signal<usize>) -> impl IntoView {
    view! {
        <Show when=move || { pages.get() > 1 }>
            <nav class="pager">
                <button
                    class="pager__button"
                    disabled=move || page.get() <= 1
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span class="pager__status">{move || format!("Page {} of {}", page.get(), pages.get())}</span>
                <button
                    class="pager__button"
                    disabled=move || page.get() >= pages.get()
                    on:click=move |_| page.update(|p| *p = (*p + 1).min(pages.get_untracked()))
                >
                    "Next"
                </button>
            </nav>
        </Show>
    }
}
