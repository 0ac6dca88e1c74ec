use crate::layout::global_context::ConsoleContext;
use crate::shared::cascade::controller::{selected_label, status_note};
use crate::shared::cascade::mutator::Mutation;
use crate::shared::cascade::Level;
use crate::shared::components::{CardHeader, LevelSelect, StatusNote};
use crate::shared::icons::icon;
use contracts::domain::a003_machine::aggregate::Machine;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, Input};

#[component]
#[allow(non_snake_case)]
pub fn MachineList() -> impl IntoView {
    let ctx = use_context::<ConsoleContext>().expect("ConsoleContext not found in context");

    let name = RwSignal::new(String::new());

    let machines = Memo::new(move |_| ctx.cascade.with(|c| c.machines().options().to_vec()));
    let note = Signal::derive(move || ctx.cascade.with(|c| status_note(c.machines())));
    let section = Memo::new(move |_| ctx.selection().factory_section());
    let selected = Memo::new(move |_| ctx.selection().machine());
    let subtitle = Signal::derive(move || {
        ctx.cascade.with(|c| {
            let selection = c.selection();
            match (
                selected_label(c.factories(), selection.factory()),
                selected_label(c.sections(), selection.factory_section()),
            ) {
                (Some(f), Some(s)) => Some(format!("{} / {}", f, s)),
                (Some(f), None) => Some(f),
                _ => None,
            }
        })
    });

    let add = move |_: leptos::ev::MouseEvent| {
        let mutation = Mutation::AddMachine {
            factory_section_id: section.get_untracked(),
            name: name.get_untracked(),
        };
        ctx.mutate(mutation, move || name.set(String::new()));
    };

    let render_row = move |machine: Machine| {
        let id = machine.id;
        view! {
            <tr
                class="table__row"
                class:table__row--selected=move || selected.get() == Some(id)
            >
                <td
                    class="table__cell table__cell--link"
                    on:click=move |_| ctx.select(Level::Machine, Some(id))
                >
                    {machine.name}
                </td>
                <td class="table__cell table__cell--actions">
                    <button
                        class="button button--ghost"
                        title="Delete"
                        on:click=move |_| ctx.mutate(Mutation::DeleteMachine { id }, || ())
                    >
                        {icon("delete")}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <section class="card">
            <CardHeader title="Machines" subtitle=subtitle />

            <div class="card__form">
                <LevelSelect level=Level::Factory />
                <LevelSelect level=Level::FactorySection />
                <Input
                    value=name
                    placeholder="New machine name"
                    disabled=Signal::derive(move || section.get().is_none())
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || section.get().is_none())
                    on_click=add
                >
                    {icon("plus")}
                    "Add machine"
                </Button>
            </div>

            <StatusNote note=note />

            <Show when=move || !machines.with(|m| m.is_empty())>
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
                                each=move || machines.get()
                                key=|m| (m.id, m.name.clone())
                                children=render_row
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </section>
    }
}
