pub mod global_context;
pub mod notification_service;

use crate::domain::a001_factory::ui::list::FactoryList;
use crate::domain::a002_factory_section::ui::list::FactorySectionList;
use crate::domain::a003_machine::ui::list::MachineList;
use crate::domain::a004_machine_part::ui::list::MachinePartList;
use crate::domain::a005_ordered_part::ui::list::LinkedOrdersList;
use crate::shared::icons::icon;
use leptos::prelude::*;
use notification_service::NotificationStack;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleView {
    Management,
    PartOrders,
}

impl ConsoleView {
    fn title(self) -> &'static str {
        match self {
            ConsoleView::Management => "Management",
            ConsoleView::PartOrders => "Part orders",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ConsoleView::Management => "factory",
            ConsoleView::PartOrders => "orders",
        }
    }
}

/// Main application shell.
///
/// ```text
/// +------------------------------------------+
/// |  Title        [Management] [Part orders] |
/// +------------------------------------------+
/// |  cards of the active view                |
/// +------------------------------------------+
/// ```
/// Selection is shared, so switching views keeps factory/section/machine/part.
#[component]
pub fn Shell() -> impl IntoView {
    let active = RwSignal::new(ConsoleView::Management);

    let tab = move |v: ConsoleView| {
        view! {
            <button
                class="top-header__tab"
                class:top-header__tab--active=move || active.get() == v
                on:click=move |_| active.set(v)
            >
                {icon(v.icon())}
                <span>{v.title()}</span>
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <header class="top-header">
                <div class="top-header__title">"Factory console"</div>
                <nav class="top-header__tabs">
                    {tab(ConsoleView::Management)}
                    {tab(ConsoleView::PartOrders)}
                </nav>
            </header>

            <main class="app-main">
                {move || match active.get() {
                    ConsoleView::Management => view! {
                        <div class="card-grid">
                            <FactoryList />
                            <FactorySectionList />
                            <MachineList />
                            <MachinePartList />
                        </div>
                    }
                    .into_any(),
                    ConsoleView::PartOrders => view! { <LinkedOrdersList /> }.into_any(),
                }}
            </main>

            <NotificationStack />
        </div>
    }
}
