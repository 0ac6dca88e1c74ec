use crate::layout::global_context::ConsoleContext;
use crate::layout::notification_service::NotificationService;
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Notifications first: the console reports fetch and save errors through it.
    let notifications = NotificationService::new();
    provide_context(notifications);

    let console = ConsoleContext::new(notifications);
    provide_context(console);
    console.init();

    view! {
        <Shell />
    }
}
