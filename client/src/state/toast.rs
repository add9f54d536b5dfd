//! Transient notification queue.
//!
//! DESIGN
//! ======
//! Pages push toasts for outcomes (login succeeded, reset email sent, request
//! failed); `components::toast_host` renders them and dismisses each one after
//! its timer elapses.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Display time for a toast before auto-dismissal.
pub const TOAST_DURATION_MS: u32 = 1_500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
            Self::Warning => "toast toast--warning",
            Self::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, title: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast { id, kind, title: title.into() });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Push a toast into the context signal and schedule its dismissal.
pub fn notify(toasts: leptos::prelude::RwSignal<ToastState>, kind: ToastKind, title: impl Into<String>) {
    use leptos::prelude::Update;

    let mut id = 0;
    let title = title.into();
    toasts.update(|t| id = t.push(kind, title));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
        toasts.update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}
