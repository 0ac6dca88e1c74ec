use crate::domain::a005_ordered_part::filter::{
    clear_filters, location_ids, set_location, OrderFilter, DATE_KEY, FACTORY_KEY, MACHINE_KEY,
    QUERY_KEY, REQ_NUM_KEY, SECTION_KEY,
};
use crate::layout::global_context::ConsoleContext;
use crate::shared::api_utils::FETCH_TIMEOUT_MS;
use crate::shared::cascade::controller::{selected_label, status_note, Cascade};
use crate::shared::cascade::option_loader::{FetchTicket, OptionLevel, Resolution};
use crate::shared::cascade::query_sync::{parse_query, set_param};
use crate::shared::cascade::Level;
use crate::shared::components::ui::EntitySelect;
use crate::shared::components::{CardHeader, FilterPanel, FilterTag, StatusNote};
use crate::shared::date_utils::{format_local_datetime, format_local_day};
use crate::shared::inventory_api::InventoryApi;
use crate::shared::list_utils::{filter_list, RecordFilter};
use contracts::domain::a005_ordered_part::aggregate::{OrderInfo, OrderedPart};
use contracts::domain::common::EntityId;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Text filter keys owned by this card, with their chip labels
const TEXT_FILTERS: [(&str, &str); 3] = [
    (QUERY_KEY, "Order"),
    (REQ_NUM_KEY, "Req. number"),
    (DATE_KEY, "Date"),
];

type PickLocation = fn(&OrderInfo) -> Option<EntityId>;

/// Location filter keys, with their labels and the order field they match
const LOCATION_FILTERS: [(&str, &str, PickLocation); 3] = [
    (FACTORY_KEY, "Factory", |o| o.factory_id),
    (SECTION_KEY, "Section", |o| o.factory_section_id),
    (MACHINE_KEY, "Machine", |o| o.machine_id),
];

fn location_value(filter: &OrderFilter, key: &str) -> Option<EntityId> {
    match key {
        FACTORY_KEY => filter.factory,
        SECTION_KEY => filter.factory_section,
        _ => filter.machine,
    }
}

/// Name from the management lists when they hold the id, `#id` otherwise.
fn location_label(cascade: &Cascade, key: &str, id: Option<EntityId>) -> String {
    let label = match key {
        FACTORY_KEY => selected_label(cascade.factories(), id),
        SECTION_KEY => selected_label(cascade.sections(), id),
        _ => selected_label(cascade.machines(), id),
    };
    id_cell(id, label)
}

fn optional_day(value: Option<String>) -> String {
    value.as_deref().map(format_local_day).unwrap_or_default()
}

fn load(ctx: ConsoleContext, orders: RwSignal<OptionLevel<OrderedPart>>, ticket: FetchTicket) {
    let Some(part_id) = ticket.parent else {
        return;
    };
    spawn_local(async move {
        let result = ctx.api().fetch_ordered_parts(part_id).await;
        if let Some(Resolution::Failed(e)) = orders.try_update(|o| o.resolve(ticket, result)) {
            ctx.notifications.error(&e);
        }
    });
    spawn_local(async move {
        TimeoutFuture::new(FETCH_TIMEOUT_MS).await;
        let pending = orders
            .try_with_untracked(|o| o.is_current(ticket))
            .unwrap_or(false);
        if !pending {
            return;
        }
        if let Some(Some(e)) = orders.try_update(|o| o.time_out(ticket, FETCH_TIMEOUT_MS)) {
            ctx.notifications.error(&e);
        }
    });
}

fn id_cell(id: Option<EntityId>, label: Option<String>) -> String {
    match (label, id) {
        (Some(label), _) => label,
        (None, Some(id)) => format!("#{}", id),
        (None, None) => "-".to_string(),
    }
}

/// Past orders of the selected part, filtered by the URL.
#[component]
#[allow(non_snake_case)]
pub fn LinkedOrdersList() -> impl IntoView {
    let ctx = use_context::<ConsoleContext>().expect("ConsoleContext not found in context");

    let orders = RwSignal::new(OptionLevel::<OrderedPart>::dependent(Level::Part));
    let is_filter_expanded = RwSignal::new(true);
    let part = Memo::new(move |_| ctx.selection().part());

    Effect::new(move |_| {
        let part = part.get();
        if let Some(ticket) = orders.try_update(|o| o.set_parent(part)).flatten() {
            load(ctx, orders, ticket);
        }
    });

    let filter = Signal::derive(move || OrderFilter::from_query(&ctx.search.get()));
    let raw_param = move |key: &'static str| {
        Signal::derive(move || {
            ctx.search
                .with(|s| parse_query(s).get(key).cloned())
                .unwrap_or_default()
        })
    };
    let set_filter = move |key: &'static str, value: String| {
        ctx.update_query(|map| set_param(map, key, &value));
    };
    let set_location_filter = move |key: &'static str, id: Option<EntityId>| {
        ctx.update_query(|map| set_location(map, key, id));
    };
    let reset_filters = Callback::new(move |_| ctx.update_query(clear_filters));

    let rows = Memo::new(move |_| {
        let filter = filter.get();
        orders.with(|o| filter_list(o.options(), &filter))
    });
    let note = Signal::derive(move || orders.with(|o| status_note(o)));
    let active_count = Signal::derive(move || filter.with(|f| f.active_count()));
    let subtitle = Signal::derive(move || {
        let part = part.get()?;
        let name = ctx
            .cascade
            .with(|c| selected_label(c.machine_parts(), Some(part)))
            .unwrap_or_else(|| format!("#{}", part));
        Some(format!("Part: {}", name))
    });

    let query = raw_param(QUERY_KEY);
    let req_num = raw_param(REQ_NUM_KEY);
    let date = raw_param(DATE_KEY);

    let location_select = move |(key, label, pick): (&'static str, &'static str, PickLocation)| {
        let options = Signal::derive(move || {
            let ids = orders.with(|o| location_ids(o.options(), pick));
            ctx.cascade.with(|c| {
                ids.into_iter()
                    .map(|id| (id, location_label(c, key, Some(id))))
                    .collect::<Vec<_>>()
            })
        });
        view! {
            <EntitySelect
                value=Signal::derive(move || filter.with(|f| location_value(f, key)))
                on_change=Callback::new(move |id| set_location_filter(key, id))
                options=options
                placeholder=format!("Any {}", label.to_lowercase())
                loading=Signal::derive(move || orders.with(|o| o.is_loading()))
            />
        }
    };

    let render_row = move |line: OrderedPart| {
        let order = line.order;
        let (factory, section, machine) = ctx.cascade.with_untracked(|c| {
            (
                location_label(c, FACTORY_KEY, order.factory_id),
                location_label(c, SECTION_KEY, order.factory_section_id),
                location_label(c, MACHINE_KEY, order.machine_id),
            )
        });
        view! {
            <tr class="table__row">
                <td class="table__cell">{line.order_id}</td>
                <td class="table__cell">{format_local_datetime(&order.created_at)}</td>
                <td class="table__cell">{order.req_num.unwrap_or_default()}</td>
                <td class="table__cell">{factory}</td>
                <td class="table__cell">{section}</td>
                <td class="table__cell">{machine}</td>
                <td class="table__cell table__cell--number">
                    {line.qty.map(|q| q.to_string()).unwrap_or_default()}
                </td>
                <td class="table__cell">{optional_day(line.purchased_date)}</td>
                <td class="table__cell">{optional_day(line.sent_to_factory_date)}</td>
                <td class="table__cell">{optional_day(line.received_by_factory_date)}</td>
            </tr>
        }
    };

    view! {
        <section class="card">
            <CardHeader title="Past orders" subtitle=subtitle />

            <FilterPanel
                is_expanded=is_filter_expanded
                active_filters_count=active_count
                on_reset=reset_filters
            >
                <div class="filter-panel__fields">
                    <input
                        class="form__input"
                        placeholder="Order id"
                        prop:value=move || query.get()
                        on:change=move |ev| set_filter(QUERY_KEY, event_target_value(&ev))
                    />
                    <input
                        class="form__input"
                        placeholder="Requester number"
                        prop:value=move || req_num.get()
                        on:change=move |ev| set_filter(REQ_NUM_KEY, event_target_value(&ev))
                    />
                    <input
                        class="form__input"
                        type="date"
                        prop:value=move || date.get()
                        on:change=move |ev| set_filter(DATE_KEY, event_target_value(&ev))
                    />
                    {LOCATION_FILTERS.into_iter().map(location_select).collect_view()}
                </div>
                <div class="filter-panel__tags">
                    {move || {
                        TEXT_FILTERS
                            .into_iter()
                            .filter_map(|(key, label)| {
                                let value = ctx
                                    .search
                                    .with(|s| parse_query(s).get(key).cloned())
                                    .unwrap_or_default();
                                (!value.is_empty()).then(|| view! {
                                    <FilterTag
                                        label=format!("{}: {}", label, value)
                                        on_remove=Callback::new(move |_| set_filter(key, String::new()))
                                    />
                                })
                            })
                            .collect_view()
                    }}
                    {move || {
                        LOCATION_FILTERS
                            .into_iter()
                            .filter_map(|(key, label, _)| {
                                let id = filter.with(|f| location_value(f, key))?;
                                let name = ctx.cascade.with(|c| location_label(c, key, Some(id)));
                                Some(view! {
                                    <FilterTag
                                        label=format!("{}: {}", label, name)
                                        on_remove=Callback::new(move |_| set_location_filter(key, None))
                                    />
                                })
                            })
                            .collect_view()
                    }}
                </div>
            </FilterPanel>

            <Show
                when=move || part.get().is_some()
                fallback=|| view! { <div class="card__note">"Select a machine part to see its past orders."</div> }
            >
                <StatusNote note=note />
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Order"</th>
                                <th class="table__header-cell">"Date"</th>
                                <th class="table__header-cell">"Req. number"</th>
                                <th class="table__header-cell">"Factory"</th>
                                <th class="table__header-cell">"Section"</th>
                                <th class="table__header-cell">"Machine"</th>
                                <th class="table__header-cell">"Qty"</th>
                                <th class="table__header-cell">"Purchased"</th>
                                <th class="table__header-cell">"Sent to factory"</th>
                                <th class="table__header-cell">"Received by factory"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || rows.get()
                                key=|line| line.id
                                children=render_row
                            />
                        </tbody>
                    </table>
                </div>
                {move || {
                    let shown = rows.with(|r| r.len());
                    let total = orders.with(|o| o.options().len());
                    (shown != total).then(|| view! {
                        <div class="card__note">{format!("{} of {} orders match the filters.", shown, total)}</div>
                    })
                }}
            </Show>
        </section>
    }
}
