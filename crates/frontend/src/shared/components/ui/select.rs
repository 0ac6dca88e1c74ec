use contracts::domain::common::EntityId;
use leptos::prelude::*;

/// Value of the "nothing selected" option
const NONE_VALUE: &str = "";

/// Select over entity ids with label support.
///
/// The first option is always the placeholder and maps to `None`. While
/// `loading` is set the select is disabled and shows `loading_text`.
#[component]
pub fn EntitySelect(
    /// Label text (optional)
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Currently selected id
    #[prop(into)]
    value: Signal<Option<EntityId>>,
    /// Called with the new id (or `None` for the placeholder)
    on_change: Callback<Option<EntityId>>,
    /// Options: Vec of (id, label) tuples
    #[prop(into)]
    options: Signal<Vec<(EntityId, String)>>,
    /// Placeholder shown as the first option
    #[prop(into)]
    placeholder: String,
    #[prop(optional, into)]
    loading: Signal<bool>,
    /// Parent missing: select stays disabled
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// ID for the select element
    #[prop(optional, into)]
    id: MaybeProp<String>,
) -> impl IntoView {
    let select_id = move || id.get().unwrap_or_default();
    let placeholder_text = move || {
        if loading.get() {
            "Loading...".to_string()
        } else {
            placeholder.clone()
        }
    };

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! {
                <label class="form__label" for=select_id>
                    {l}
                </label>
            })}
            <select
                id=select_id
                class="form__select"
                disabled=move || disabled.get() || loading.get()
                on:change=move |ev| {
                    let raw = event_target_value(&ev);
                    on_change.run(raw.parse::<EntityId>().ok());
                }
            >
                <option value=NONE_VALUE selected=move || value.get().is_none()>
                    {placeholder_text}
                </option>
                <For
                    each=move || options.get()
                    key=|(id, label)| (*id, label.clone())
                    children=move |(id, label)| {
                        let is_selected = move || value.get() == Some(id);
                        view! {
                            <option value=id.to_string() selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
