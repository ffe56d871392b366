use crate::components::{send_player_event, Icon, IconKind};
use crate::playback::{PlayerController, PlayerEvent, ToggleVisual};
use dioxus::prelude::*;

/// Play/Pause button - the icon follows what the media element reports
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let controller = use_context::<Signal<PlayerController>>();
    let view = controller.read().view();
    let enabled = view.toggle_enabled;

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            disabled: !enabled,
            class: if enabled { "toggle-btn" } else { "toggle-btn disabled" },
            onclick: move |_| send_player_event(controller, PlayerEvent::TogglePlayback),
            if view.toggle == ToggleVisual::Pause {
                Icon { kind: IconKind::Pause, class: "icon".to_string() }
            } else {
                Icon { kind: IconKind::Play, class: "icon play-icon".to_string() }
            }
        }
    }
}

/// Previous button - wraps to the last track
#[component]
pub(super) fn PrevButton() -> Element {
    let controller = use_context::<Signal<PlayerController>>();
    let enabled = controller.read().view().can_switch_tracks;

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            disabled: !enabled,
            class: if enabled { "skip-btn" } else { "skip-btn disabled" },
            onclick: move |_| send_player_event(controller, PlayerEvent::Previous),
            Icon { kind: IconKind::Previous, class: "icon".to_string() }
        }
    }
}

/// Next button - wraps to the first track
#[component]
pub(super) fn NextButton() -> Element {
    let controller = use_context::<Signal<PlayerController>>();
    let enabled = controller.read().view().can_switch_tracks;

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            disabled: !enabled,
            class: if enabled { "skip-btn" } else { "skip-btn disabled" },
            onclick: move |_| send_player_event(controller, PlayerEvent::Next),
            Icon { kind: IconKind::Next, class: "icon".to_string() }
        }
    }
}
