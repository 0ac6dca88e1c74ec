pub mod draft;

use self::draft::{QuantityDraft, UpsertDraft};
use crate::layout::global_context::ConsoleContext;
use crate::shared::cascade::controller::{selected_label, status_note};
use crate::shared::cascade::mutator::Mutation;
use crate::shared::cascade::Level;
use crate::shared::components::{CardHeader, LevelSelect, StatusNote};
use crate::shared::icons::icon;
use crate::shared::row_mode::{RowMode, RowModes};
use contracts::domain::a004_machine_part::aggregate::MachinePart;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, Input, InputType};

#[component]
#[allow(non_snake_case)]
pub fn MachinePartList() -> impl IntoView {
    let ctx = use_context::<ConsoleContext>().expect("ConsoleContext not found in context");

    let part_id = RwSignal::new(String::new());
    let qty = RwSignal::new(String::new());
    let rows = RwSignal::new(RowModes::<QuantityDraft>::default());

    let parts = Memo::new(move |_| ctx.cascade.with(|c| c.machine_parts().options().to_vec()));
    let note = Signal::derive(move || ctx.cascade.with(|c| status_note(c.machine_parts())));
    let machine = Memo::new(move |_| ctx.selection().machine());
    let selected_part = Memo::new(move |_| ctx.selection().part());
    let subtitle = Signal::derive(move || {
        ctx.cascade
            .with(|c| selected_label(c.machines(), c.selection().machine()))
            .map(|m| format!("Machine: {}", m))
    });

    let upsert = move |_: leptos::ev::MouseEvent| {
        let draft = UpsertDraft {
            part_id: part_id.get_untracked(),
            qty: qty.get_untracked(),
        };
        match draft.to_mutation(machine.get_untracked()) {
            Ok(mutation) => ctx.mutate(mutation, move || {
                part_id.set(String::new());
                qty.set(String::new());
            }),
            Err(e) => ctx.notifications.error(&e),
        }
    };

    let save_row = move |id: EntityId| {
        let Some(draft) = rows.with_untracked(|r| r.draft(id)) else {
            return;
        };
        match draft.to_mutation(id) {
            Ok(mutation) => ctx.mutate(mutation, move || rows.update(|r| r.finish(id))),
            Err(e) => ctx.notifications.error(&e),
        }
    };

    let render_row = move |mp: MachinePart| {
        // edits and deletes address the association row, selection the part
        let id = mp.id;
        let part = mp.part.id;
        let editing = Memo::new(move |_| rows.with(|r| matches!(r.mode(id), RowMode::Editing(_))));
        let draft = QuantityDraft::from_part(&mp);
        let begin_edit = move |_: leptos::ev::MouseEvent| {
            let draft = draft.clone();
            rows.update(|r| r.begin_edit(id, draft));
        };
        let shown_qty = mp.qty;
        let shown_req_qty = mp.req_qty.map(|r| r.to_string()).unwrap_or_default();

        view! {
            <tr
                class="table__row"
                class:table__row--selected=move || selected_part.get() == Some(part)
            >
                <td
                    class="table__cell table__cell--link"
                    title="Show past orders of this part"
                    on:click=move |_| ctx.select(Level::Part, Some(part))
                >
                    {mp.part.name}
                </td>
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        let shown_req_qty = shown_req_qty.clone();
                        view! {
                            <td class="table__cell table__cell--number">{shown_qty}</td>
                            <td class="table__cell table__cell--number">{shown_req_qty}</td>
                        }
                    }
                >
                    <td class="table__cell">
                        <input
                            class="form__input"
                            type="number"
                            min="0"
                            prop:value=move || rows.with_untracked(|r| r.draft(id).map(|d| d.qty).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                rows.update(|r| r.update_draft(id, |d| d.qty = value));
                            }
                        />
                    </td>
                    <td class="table__cell">
                        <input
                            class="form__input"
                            type="number"
                            min="0"
                            placeholder="none"
                            prop:value=move || rows.with_untracked(|r| r.draft(id).map(|d| d.req_qty).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                rows.update(|r| r.update_draft(id, |d| d.req_qty = value));
                            }
                        />
                    </td>
                </Show>
                <td class="table__cell table__cell--actions">
                    <Show
                        when=move || editing.get()
                        fallback=move || {
                            let begin_edit = begin_edit.clone();
                            view! {
                                <button class="button button--ghost" title="Edit" on:click=begin_edit>
                                    {icon("edit")}
                                </button>
                                <button
                                    class="button button--ghost"
                                    title="Delete"
                                    on:click=move |_| ctx.mutate(Mutation::DeleteMachinePart { id }, || ())
                                >
                                    {icon("delete")}
                                </button>
                            }
                        }
                    >
                        <button class="button button--primary" title="Save" on:click=move |_| save_row(id)>
                            {icon("check")}
                        </button>
                        <button
                            class="button button--ghost"
                            title="Cancel"
                            on:click=move |_| rows.update(|r| r.finish(id))
                        >
                            {icon("close")}
                        </button>
                    </Show>
                </td>
            </tr>
        }
    };

    view! {
        <section class="card">
            <CardHeader title="Machine parts" subtitle=subtitle />

            <div class="card__form">
                <LevelSelect level=Level::Factory />
                <LevelSelect level=Level::FactorySection />
                <LevelSelect level=Level::Machine />
            </div>

            <div class="card__form">
                <Input
                    value=part_id
                    input_type=InputType::Number
                    placeholder="Part id"
                    disabled=Signal::derive(move || machine.get().is_none())
                />
                <Input
                    value=qty
                    input_type=InputType::Number
                    placeholder="Quantity"
                    disabled=Signal::derive(move || machine.get().is_none())
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || machine.get().is_none())
                    on_click=upsert
                >
                    {icon("plus")}
                    "Add / update part"
                </Button>
            </div>

            <StatusNote note=note />

            <Show when=move || !parts.with(|p| p.is_empty())>
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"Part"</th>
                                <th class="table__header-cell">"Qty"</th>
                                <th class="table__header-cell">"Required qty"</th>
                                <th class="table__header-cell table__header-cell--actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || parts.get()
                                key=|mp| (mp.id, mp.qty, mp.req_qty)
                                children=render_row
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </section>
    }
}
