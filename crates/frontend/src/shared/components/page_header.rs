use leptos::prelude::*;

/// Header of a console card: title, optional hint line, action buttons.
#[component]
pub fn CardHeader(
    /// Card title (required)
    #[prop(into)]
    title: String,

    /// Grey line under the title, e.g. what is currently selected
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Action buttons
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="card__header">
            <div class="card__header-text">
                <h2 class="card__title">{title}</h2>
                {move || subtitle.get().map(|s| view! {
                    <div class="card__subtitle">{s}</div>
                })}
            </div>
            {children.map(|children| view! {
                <div class="card__actions">{children()}</div>
            })}
        </div>
    }
}

/// Muted line shown instead of an empty table or select.
#[component]
pub fn StatusNote(#[prop(into)] note: Signal<Option<String>>) -> impl IntoView {
    move || {
        note.get()
            .map(|text| view! { <div class="card__note">{text}</div> })
    }
}
