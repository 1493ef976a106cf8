use contracts::shared::form::{flag_input, FieldKind, FormField, FormValues};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

/// `type` attribute of the `<input>` rendering a field kind.
fn input_type(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::DateTime => "datetime-local",
        _ => "text",
    }
}

/// Generic create/edit form body: one input per field, inline error under each.
#[component]
pub fn FormFields(
    fields: &'static [FormField],
    values: RwSignal<FormValues>,
    #[prop(into)] errors: Signal<FieldErrors>,
) -> impl IntoView {
    fields
        .iter()
        .map(|field| {
            let key = field.key;
            let value = move || values.with(|v| v.get(key).to_string());
            let set = move |new_value: String| values.update(|v| v.set(key, new_value));
            let error = move || errors.with(|e| e.get(key).map(str::to_string));
            let input_class = move || {
                if error().is_some() {
                    "form__input form__input--invalid"
                } else {
                    "form__input"
                }
            };

            let input = match field.kind {
                FieldKind::TextArea => view! {
                    <textarea
                        class=input_class
                        id=key
                        rows="3"
                        prop:value=value
                        on:input=move |ev| set(event_target_value(&ev))
                    ></textarea>
                }
                .into_any(),
                FieldKind::Checkbox => view! {
                    <input
                        type="checkbox"
                        id=key
                        prop:checked=move || values.with(|v| v.flag(key))
                        on:change=move |ev| set(flag_input(event_target_checked(&ev)))
                    />
                }
                .into_any(),
                FieldKind::Select(options) => view! {
                    <select
                        class=input_class
                        id=key
                        prop:value=value
                        on:change=move |ev| set(event_target_value(&ev))
                    >
                        <option value="">"Seleccione..."</option>
                        {options
                            .iter()
                            .map(|(code, label)| {
                                view! {
                                    <option value=*code selected=move || value() == *code>
                                        {*label}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                }
                .into_any(),
                kind => view! {
                    <input
                        type=input_type(&kind)
                        step=if kind == FieldKind::Number { Some("any") } else { None }
                        class=input_class
                        id=key
                        prop:value=value
                        on:input=move |ev| set(event_target_value(&ev))
                    />
                }
                .into_any(),
            };

            view! {
                <div class="form__group">
                    <label class="form__label" for=key>{field.label}</label>
                    {input}
                    {move || error().map(|msg| view! { <div class="form__error">{msg}</div> })}
                </div>
            }
        })
        .collect_view()
}
