use crate::components::{AudioController, Player};
use crate::db::load_settings_or_default;
use crate::playback::PlayerController;
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let settings = use_signal(load_settings_or_default);
    let controller = use_signal(|| PlayerController::from_settings(&settings.peek()));

    // Provide state via context
    use_context_provider(|| settings);
    use_context_provider(|| controller);

    rsx! {
        div { class: "app-shell",
            AudioController {}
            Player {}
        }
    }
}
