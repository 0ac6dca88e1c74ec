use crate::layout::global_context::ConsoleContext;
use crate::shared::cascade::controller::status_note;
use crate::shared::cascade::mutator::Mutation;
use crate::shared::cascade::selection::Level;
use crate::shared::components::{CardHeader, StatusNote};
use crate::shared::icons::icon;
use crate::shared::row_mode::{RowMode, RowModes};
use contracts::domain::a001_factory::aggregate::{Factory, FactoryDto};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use thaw::{Button, ButtonAppearance, ButtonSize, Input};

#[component]
#[allow(non_snake_case)]
pub fn FactoryList() -> impl IntoView {
    let ctx = use_context::<ConsoleContext>().expect("ConsoleContext not found in context");

    let show_form = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let abbreviation = RwSignal::new(String::new());
    let rows = RwSignal::new(RowModes::<FactoryDto>::default());

    let factories = Memo::new(move |_| ctx.cascade.with(|c| c.factories().options().to_vec()));
    let note = Signal::derive(move || ctx.cascade.with(|c| status_note(c.factories())));
    let selected = Memo::new(move |_| ctx.selection().factory());

    let reset_form = move || {
        name.set(String::new());
        abbreviation.set(String::new());
        show_form.set(false);
    };

    let add = move |_: leptos::ev::MouseEvent| {
        let dto = FactoryDto {
            name: name.get_untracked(),
            abbreviation: abbreviation.get_untracked(),
        };
        ctx.mutate(Mutation::AddFactory(dto), reset_form);
    };

    let save_row = move |id: EntityId| {
        let Some(dto) = rows.with_untracked(|r| r.draft(id)) else {
            return;
        };
        ctx.mutate(Mutation::EditFactory { id, dto }, move || {
            rows.update(|r| r.finish(id));
        });
    };

    let render_row = move |factory: Factory| {
        let id = factory.id;
        let editing = Memo::new(move |_| rows.with(|r| matches!(r.mode(id), RowMode::Editing(_))));
        let draft_name = factory.name.clone();
        let draft_abbreviation = factory.abbreviation.clone();
        let begin_edit = move |_: leptos::ev::MouseEvent| {
            rows.update(|r| {
                r.begin_edit(
                    id,
                    FactoryDto {
                        name: draft_name.clone(),
                        abbreviation: draft_abbreviation.clone(),
                    },
                )
            })
        };
        let Factory {
            name: shown_name,
            abbreviation: shown_abbreviation,
            ..
        } = factory;

        view! {
            <tr
                class="table__row"
                class:table__row--selected=move || selected.get() == Some(id)
            >
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        let shown_name = shown_name.clone();
                        let shown_abbreviation = shown_abbreviation.clone();
                        view! {
                            <td
                                class="table__cell table__cell--link"
                                on:click=move |_| ctx.select(Level::Factory, Some(id))
                            >
                                {shown_name}
                            </td>
                            <td class="table__cell">{shown_abbreviation}</td>
                        }
                    }
                >
                    <td class="table__cell">
                        <input
                            class="form__input"
                            prop:value=move || rows.with_untracked(|r| r.draft(id).map(|d| d.name).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                rows.update(|r| r.update_draft(id, |d| d.name = value));
                            }
                        />
                    </td>
                    <td class="table__cell">
                        <input
                            class="form__input"
                            prop:value=move || rows.with_untracked(|r| r.draft(id).map(|d| d.abbreviation).unwrap_or_default())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                rows.update(|r| r.update_draft(id, |d| d.abbreviation = value));
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
            <CardHeader title="Factories">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    on_click=move |_| show_form.update(|v| *v = !*v)
                >
                    {icon("plus")}
                    "Add factory"
                </Button>
            </CardHeader>

            <Show when=move || show_form.get()>
                <div class="card__form">
                    <Input value=name placeholder="Factory name" />
                    <Input value=abbreviation placeholder="Abbreviation" />
                    <Button appearance=ButtonAppearance::Primary on_click=add>
                        "Save"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| reset_form()>
                        "Cancel"
                    </Button>
                </div>
            </Show>

            <StatusNote note=note />

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Name"</th>
                            <th class="table__header-cell">"Abbreviation"</th>
                            <th class="table__header-cell table__header-cell--actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || factories.get()
                            key=|f| (f.id, f.name.clone(), f.abbreviation.clone())
                            children=render_row
                        />
                    </tbody>
                </table>
            </div>
        </section>
    }
}
