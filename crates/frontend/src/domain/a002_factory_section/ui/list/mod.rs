use crate::layout::global_context::ConsoleContext;
use crate::shared::cascade::controller::{selected_label, status_note};
use crate::shared::cascade::mutator::Mutation;
use crate::shared::cascade::Level;
use crate::shared::components::{CardHeader, LevelSelect, StatusNote};
use crate::shared::icons::icon;
use contracts::domain::a002_factory_section::aggregate::FactorySection;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, Input};

#[component]
#[allow(non_snake_case)]
pub fn FactorySectionList() -> impl IntoView {
    let ctx = use_context::<ConsoleContext>().expect("ConsoleContext not found in context");

    let name = RwSignal::new(String::new());

    let sections = Memo::new(move |_| ctx.cascade.with(|c| c.sections().options().to_vec()));
    let note = Signal::derive(move || ctx.cascade.with(|c| status_note(c.sections())));
    let factory = Memo::new(move |_| ctx.selection().factory());
    let selected = Memo::new(move |_| ctx.selection().factory_section());
    let subtitle = Signal::derive(move || {
        ctx.cascade.with(|c| {
            selected_label(c.factories(), c.selection().factory()).map(|f| format!("Factory: {}", f))
        })
    });

    let add = move |_: leptos::ev::MouseEvent| {
        let mutation = Mutation::AddFactorySection {
            factory_id: factory.get_untracked(),
            name: name.get_untracked(),
        };
        ctx.mutate(mutation, move || name.set(String::new()));
    };

    let render_row = move |section: FactorySection| {
        let id = section.id;
        view! {
            <tr
                class="table__row"
                class:table__row--selected=move || selected.get() == Some(id)
            >
                <td
                    class="table__cell table__cell--link"
                    on:click=move |_| ctx.select(Level::FactorySection, Some(id))
                >
                    {section.name}
                </td>
                <td class="table__cell table__cell--actions">
                    <button
                        class="button button--ghost"
                        title="Delete"
                        on:click=move |_| ctx.mutate(Mutation::DeleteFactorySection { id }, || ())
                    >
                        {icon("delete")}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <section class="card">
            <CardHeader title="Factory sections" subtitle=subtitle />

            <div class="card__form">
                <LevelSelect level=Level::Factory />
                <Input
                    value=name
                    placeholder="New section name"
                    disabled=Signal::derive(move || factory.get().is_none())
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || factory.get().is_none())
                    on_click=add
                >
                    {icon("plus")}
                    "Add section"
                </Button>
            </div>

            <StatusNote note=note />

            <Show when=move || !sections.with(|s| s.is_empty())>
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Name"</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || sections.get()
                                key=|s| (s.id, s.name.clone())
                                children=render_row
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </section>
    }
}
