use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Задержка перед применением поиска
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Учёт отложенного поиска без таймера.
///
/// Каждое нажатие получает новый номер; срабатывает только последний
/// запланированный номер. Очистка и сброс отменяют ожидание.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
    pending: Option<String>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запланировать значение; предыдущее ожидание отменяется
    pub fn schedule(&mut self, value: String) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Таймер с номером `ticket` истёк: значение для применения, если он ещё актуален
    pub fn fire(&mut self, ticket: u64) -> Option<String> {
        if ticket != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Очистка поля: ожидание отменяется, пустой запрос применяется сразу
    pub fn clear(&mut self) -> String {
        self.cancel();
        String::new()
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Строка поиска с debounce и кнопкой очистки.
///
/// Ввод применяется через 300 мс после последнего нажатия; каждое новое
/// нажатие отменяет предыдущий таймер. Очистка применяется сразу.
#[component]
pub fn SearchInput(
    /// Callback для применения строки поиска
    #[prop(into)]
    on_change: Callback<String>,
    /// Каждое изменение счётчика отменяет ожидающий поиск и очищает поле
    #[prop(into)]
    reset_on: Signal<u32>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar en el catálogo...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(String::new());
    let debouncer = StoredValue::new_local(Debouncer::new());
    // drop отменяет таймер
    let timer = StoredValue::new_local(None::<Timeout>);

    let cancel_pending = move || {
        debouncer.update_value(Debouncer::cancel);
        timer.set_value(None);
    };

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let Some(ticket) = debouncer.try_update_value(|d| d.schedule(new_value)) else {
            return;
        };
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            if let Some(query) = debouncer.try_update_value(|d| d.fire(ticket)).flatten() {
                on_change.run(query);
            }
        });
        timer.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        let cleared = debouncer
            .try_update_value(Debouncer::clear)
            .unwrap_or_default();
        timer.set_value(None);
        set_input_value.set(String::new());
        on_change.run(cleared);
    };

    Effect::new(move |prev: Option<u32>| {
        let current = reset_on.get();
        if prev.is_some_and(|p| p != current) {
            cancel_pending();
            set_input_value.set(String::new());
        }
        current
    });

    on_cleanup(move || {
        debouncer.try_update_value(Debouncer::cancel);
        timer.try_set_value(None);
    });

    view! {
        <div class="search-bar">
            <span class="search-bar__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-bar__input"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-bar__clear" on:click=clear_filter title="Limpiar">
                    {icon("x")}
                </button>
                <div class="search-bar__hint">
                    <span class="search-bar__hint-label">"Buscando:"</span>
                    {move || format!(" \"{}\"", input_value.get())}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_keystroke_wins() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule("wi".into());
        let second = debouncer.schedule("witcher".into());

        assert_eq!(debouncer.fire(first), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(second), Some("witcher".to_string()));
        // Второй раз тот же таймер ничего не применяет
        assert_eq!(debouncer.fire(second), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_clear_applies_immediately_and_drops_pending() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule("halo".into());

        assert_eq!(debouncer.clear(), "");
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.fire(ticket), None);
    }

    #[test]
    fn test_reset_cancels_pending_search() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule("forza".into());
        debouncer.cancel();
        assert_eq!(debouncer.fire(ticket), None);

        // После сброса новый ввод работает как обычно
        let next = debouncer.schedule("halo".into());
        assert_eq!(debouncer.fire(next), Some("halo".to_string()));
    }
}
