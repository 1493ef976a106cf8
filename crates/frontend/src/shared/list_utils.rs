/// Search input with debounce, shared by every entity list
use contracts::shared::debounce::Debouncer;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Arms a browser timer for the debouncer's deadline. A timer that fires
/// before the deadline (clock rounding) re-arms itself.
fn arm_timer(
    debouncer: StoredValue<Debouncer<String>>,
    timer: StoredValue<Option<i32>>,
    on_change: Callback<String>,
) {
    let Some(deadline) = debouncer.with_value(|d| d.deadline()) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        if let Some(Some(value)) = debouncer.try_update_value(|d| d.poll(u64::MAX)) {
            on_change.run(value);
        }
        return;
    };
    let wait = deadline.saturating_sub(now_ms());
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        timer.set_value(None);
        match debouncer.try_update_value(|d| d.poll(now_ms())) {
            Some(Some(value)) => on_change.run(value),
            Some(None) => arm_timer(debouncer, timer, on_change),
            None => {}
        }
    }) as Box<dyn Fn()>);

    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref::<js_sys::Function>(),
        wait.min(i32::MAX as u64) as i32,
    ) {
        Ok(timeout_id) => {
            closure.forget();
            timer.set_value(Some(timeout_id));
        }
        Err(e) => log::error!("setTimeout failed: {:?}", e),
    }
}

/// Text input that reports its value once typing pauses for `delay_ms`.
///
/// Keystrokes go into a `Debouncer`; only the last value of a burst reaches
/// `on_change`. Clearing with the button reports the empty string immediately.
#[component]
pub fn SearchInput(
    /// Current applied filter (used for highlighting)
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    /// Pause in milliseconds before `on_change` fires
    #[prop(default = 400)]
    delay_ms: u32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(String::new());
    let debouncer = StoredValue::new(Debouncer::<String>::new(delay_ms as u64));
    let timer = StoredValue::new(None::<i32>);

    let clear_timer = move || {
        if let Some(timeout_id) = timer.get_value() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timeout_id);
            }
            timer.set_value(None);
        }
    };

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        debouncer.update_value(|d| d.push(new_value, now_ms()));
        clear_timer();
        arm_timer(debouncer, timer, on_change);
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        debouncer.update_value(|d| d.cancel());
        clear_timer();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder={placeholder}
                style=move || format!(
                    "width: 260px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    handle_input_change(val);
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                        on:click=clear_filter
                        title="Limpiar"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}
