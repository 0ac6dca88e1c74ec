use crate::layout::global_context::ConsoleContext;
use crate::shared::cascade::option_loader::OptionLevel;
use crate::shared::cascade::{Cascade, Level};
use crate::shared::components::ui::EntitySelect;
use contracts::domain::common::{Entity, EntityId};
use leptos::prelude::*;

fn pairs<T: Entity + Clone>(level: &OptionLevel<T>) -> Vec<(EntityId, String)> {
    level
        .options()
        .iter()
        .map(|item| (item.id(), item.display_name()))
        .collect()
}

fn level_options(c: &Cascade, level: Level) -> Vec<(EntityId, String)> {
    match level {
        Level::Factory => pairs(c.factories()),
        Level::FactorySection => pairs(c.sections()),
        Level::Machine => pairs(c.machines()),
        Level::Part => pairs(c.machine_parts()),
    }
}

fn level_loading(c: &Cascade, level: Level) -> bool {
    match level {
        Level::Factory => c.factories().is_loading(),
        Level::FactorySection => c.sections().is_loading(),
        Level::Machine => c.machines().is_loading(),
        Level::Part => c.machine_parts().is_loading(),
    }
}

/// Select bound to one level of the shared selection. Disabled until the
/// parent level has a value.
#[component]
pub fn LevelSelect(level: Level) -> impl IntoView {
    let ctx = use_context::<ConsoleContext>().expect("ConsoleContext not found in context");

    let options = Memo::new(move |_| ctx.cascade.with(|c| level_options(c, level)));
    let loading = Signal::derive(move || ctx.cascade.with(|c| level_loading(c, level)));
    let value = Signal::derive(move || ctx.selection().get(level));
    let disabled = Signal::derive(move || {
        level
            .parent()
            .is_some_and(|parent| ctx.selection().get(parent).is_none())
    });
    let label = level.label();

    view! {
        <EntitySelect
            label=format!("{}{}", label[..1].to_uppercase(), &label[1..])
            id=format!("select-{}", level.query_key())
            value=value
            options=options
            loading=loading
            disabled=disabled
            placeholder=format!("Select a {}", label)
            on_change=Callback::new(move |id| ctx.select(level, id))
        />
    }
}
