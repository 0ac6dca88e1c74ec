use crate::layout::notification_service::NotificationService;
use crate::shared::api_utils::FETCH_TIMEOUT_MS;
use crate::shared::cascade::controller::Cascade;
use crate::shared::cascade::mutator::{execute_confirmed, Mutation, MutationEffect};
use crate::shared::cascade::option_loader::{FetchTicket, Resolution};
use crate::shared::cascade::query_sync::QuerySync;
use crate::shared::cascade::selection::{Level, Selection};
use crate::shared::inventory_api::{HttpInventoryApi, InventoryApi};
use contracts::domain::common::EntityId;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;

/// Current `location.search`, including the leading `?` when present.
pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Replace the query string without adding a history entry.
pub fn replace_search(query: &str) {
    let Some(w) = window() else {
        return;
    };
    let url = if query.is_empty() {
        w.location().pathname().unwrap_or_else(|_| "/".to_string())
    } else {
        format!("?{}", query)
    };
    if let Ok(history) = w.history() {
        if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url)) {
            log::warn!("replaceState failed: {:?}", e);
        }
    }
}

/// Browser confirmation dialog. No window means no consent.
pub fn confirm_dialog(question: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(question).ok())
        .unwrap_or(false)
}

/// Shared state of the management console: the cascade, the URL mirror and
/// the API client. Provided once in `App`.
#[derive(Clone, Copy)]
pub struct ConsoleContext {
    pub cascade: RwSignal<Cascade>,
    /// Mirror of `location.search`; pages that read extra keys track this.
    pub search: RwSignal<String>,
    pub notifications: NotificationService,
    sync: StoredValue<QuerySync>,
    api: HttpInventoryApi,
}

impl ConsoleContext {
    pub fn new(notifications: NotificationService) -> Self {
        let search = current_search();
        Self {
            cascade: RwSignal::new(Cascade::new(Selection::from_query(&search))),
            search: RwSignal::new(search),
            notifications,
            sync: StoredValue::new(QuerySync::new()),
            api: HttpInventoryApi,
        }
    }

    pub fn api(&self) -> HttpInventoryApi {
        self.api
    }

    /// Start the first fetches and wire the selection to the URL in both
    /// directions.
    pub fn init(&self) {
        let tickets = self.cascade.try_update(|c| c.start()).unwrap_or_default();
        self.dispatch(tickets);

        let this = *self;
        let selection = Memo::new(move |_| this.cascade.with(|c| c.selection()));
        Effect::new(move |_| {
            let state = selection.get();
            let search = current_search();
            let next = this
                .sync
                .try_update_value(|s| s.on_state_change(&state, &search))
                .flatten();
            if let Some(query) = next {
                replace_search(&query);
                this.search.set(current_search());
            }
        });

        let _ = window_event_listener(leptos::ev::popstate, move |_| {
            let search = current_search();
            this.search.set(search.clone());
            let current = this.cascade.with_untracked(|c| c.selection());
            let adopted = this
                .sync
                .try_update_value(|s| s.on_url_change(&search, &current))
                .flatten();
            if let Some(selection) = adopted {
                log::debug!("URL changed, adopting selection {:?}", selection);
                let tickets = this
                    .cascade
                    .try_update(|c| c.replace_selection(selection))
                    .unwrap_or_default();
                this.dispatch(tickets);
            }
        });
    }

    pub fn selection(&self) -> Selection {
        self.cascade.with(|c| c.selection())
    }

    pub fn select(&self, level: Level, id: Option<EntityId>) {
        let tickets = self.cascade.try_update(|c| c.select(level, id)).unwrap_or_default();
        self.dispatch(tickets);
    }

    pub fn reload(&self, level: Level) {
        let ticket = self.cascade.try_update(|c| c.reload(level)).flatten();
        self.dispatch(ticket.into_iter().collect());
    }

    /// Write extra query keys (filters) while keeping everything else.
    pub fn update_query(&self, f: impl FnOnce(&mut crate::shared::cascade::query_sync::QueryMap)) {
        use crate::shared::cascade::query_sync::{parse_query, to_query};
        let mut map = parse_query(&current_search());
        f(&mut map);
        replace_search(&to_query(&map));
        self.search.set(current_search());
    }

    /// Run `mutation` (asking first for deletes). `on_done` runs only after
    /// the server accepted it, e.g. to reset a form.
    pub fn mutate(&self, mutation: Mutation, on_done: impl FnOnce() + 'static) {
        let this = *self;
        spawn_local(async move {
            let outcome = execute_confirmed(&this.api, &mutation, confirm_dialog).await;
            match outcome {
                None => log::debug!("{} cancelled", mutation.action()),
                Some(Ok(effect)) => {
                    this.notifications.success(mutation.success_message());
                    this.apply_effect(effect);
                    on_done();
                }
                Some(Err(e)) => this.notifications.error(&e),
            }
        });
    }

    fn apply_effect(&self, effect: MutationEffect) {
        match effect {
            MutationEffect::Reload(level) => self.reload(level),
            MutationEffect::PatchFactory { id, dto } => {
                let patched = self
                    .cascade
                    .try_update(|c| c.patch_factory(id, &dto))
                    .unwrap_or(false);
                if !patched {
                    self.reload(Level::Factory);
                }
            }
        }
    }

    /// Start the fetch for each ticket together with its timeout.
    pub fn dispatch(&self, tickets: Vec<FetchTicket>) {
        for ticket in tickets {
            self.fetch(ticket);
            self.arm_timeout(ticket);
        }
    }

    fn fetch(&self, ticket: FetchTicket) {
        let this = *self;
        spawn_local(async move {
            let api = this.api;
            let resolution = match (ticket.level, ticket.parent) {
                (Level::Factory, _) => {
                    let result = api.fetch_factories().await;
                    this.cascade.try_update(|c| c.apply_factories(ticket, result))
                }
                (Level::FactorySection, Some(factory_id)) => {
                    let result = api.fetch_factory_sections(factory_id).await;
                    this.cascade.try_update(|c| c.apply_sections(ticket, result))
                }
                (Level::Machine, Some(section_id)) => {
                    let result = api.fetch_machines(section_id).await;
                    this.cascade.try_update(|c| c.apply_machines(ticket, result))
                }
                (Level::Part, Some(machine_id)) => {
                    let result = api.fetch_machine_parts(machine_id).await;
                    this.cascade.try_update(|c| c.apply_machine_parts(ticket, result))
                }
                (_, None) => None,
            };
            if let Some(Resolution::Failed(e)) = resolution {
                this.notifications.error(&e);
            }
        });
    }

    fn arm_timeout(&self, ticket: FetchTicket) {
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(FETCH_TIMEOUT_MS).await;
            let pending = this
                .cascade
                .try_with_untracked(|c| c.is_pending(ticket))
                .unwrap_or(false);
            if !pending {
                return;
            }
            if let Some(Some(e)) = this.cascade.try_update(|c| c.time_out(ticket, FETCH_TIMEOUT_MS)) {
                this.notifications.error(&e);
            }
        });
    }
}
