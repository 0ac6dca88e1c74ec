use crate::shared::error::ConsoleError;
use leptos::prelude::*;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL_MS: u32 = 4_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    /// Carries the error class ("Load error", "Save error", "Check input")
    Error(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Очередь уведомлений (без реактивности, чтобы её можно было тестировать)
#[derive(Clone, Debug, Default)]
pub struct NotificationQueue {
    next_id: u64,
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    pub fn push_error(&mut self, error: &ConsoleError) -> u64 {
        self.push(NotificationKind::Error(error.class()), error.to_string())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

/// Сервис для централизованного показа уведомлений
#[derive(Clone, Copy)]
pub struct NotificationService {
    queue: RwSignal<NotificationQueue>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::default()),
        }
    }

    /// Показать сообщение об успехе
    pub fn success(&self, message: impl Into<String>) {
        let id = self
            .queue
            .try_update(|q| q.push(NotificationKind::Success, message))
            .unwrap_or_default();
        self.dismiss_later(id);
    }

    /// Показать ошибку; класс ошибки виден пользователю
    pub fn error(&self, error: &ConsoleError) {
        log::warn!("{}", error);
        let id = self
            .queue
            .try_update(|q| q.push_error(error))
            .unwrap_or_default();
        self.dismiss_later(id);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    fn dismiss_later(&self, id: u64) {
        let this = *self;
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(NOTIFICATION_TTL_MS).await;
            this.dismiss(id);
        });
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Стек уведомлений в правом нижнем углу
/// Использование:
/// ```rust,ignore
/// provide_context(NotificationService::new());
/// view! { <NotificationStack /> }
/// ```
#[component]
pub fn NotificationStack() -> impl IntoView {
    let service =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    view! {
        <div class="notification-stack">
            <For
                each=move || service.queue.with(|q| q.items().to_vec())
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    let (class, title) = match n.kind {
                        NotificationKind::Success => ("notification notification--success", None),
                        NotificationKind::Error(class) => ("notification notification--error", Some(class)),
                    };
                    view! {
                        <div class=class role="status">
                            {title.map(|t| view! { <strong class="notification__title">{t}</strong> })}
                            <span class="notification__text">{n.message}</span>
                            <button
                                class="notification__close"
                                on:click=move |_| service.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
