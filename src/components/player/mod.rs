use crate::components::{send_player_event, Icon, IconKind};
use crate::db::{save_settings, PlayerSettings};
use crate::playback::{PlayerController, PlayerEvent, SeekControlEvent};
use dioxus::prelude::*;

mod controls;

use controls::{NextButton, PlayPauseButton, PrevButton};

#[component]
pub fn Player() -> Element {
    let controller = use_context::<Signal<PlayerController>>();
    let mut settings = use_context::<Signal<PlayerSettings>>();

    let view = controller.read().view();

    // `input` fires for every knob movement, `change` once on release.
    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<f64>() {
            send_player_event(controller, SeekControlEvent::DragStart { value });
        }
    };

    let on_seek_commit = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<f64>() {
            send_player_event(controller, SeekControlEvent::DragCommit { value });
        }
    };

    // Dispatch on every tick, persist once the slider is released.
    let on_volume_input = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            send_player_event(controller, PlayerEvent::SetVolume(percent / 100.0));
        }
    };

    let on_volume_commit = move |_: Event<FormData>| {
        let volume = controller.peek().volume();
        if !settings.write().set_volume(volume) {
            return;
        }
        if let Err(err) = save_settings(&settings.peek()) {
            tracing::warn!("[Settings] Failed to save volume: {}", err);
        }
    };

    let volume_percent = (view.volume * 100.0).round() as i32;
    let volume_icon = if view.volume <= 0.0 {
        IconKind::VolumeMuted
    } else {
        IconKind::Volume
    };

    rsx! {
        if let Some(message) = view.error.clone() {
            div { class: "player-error",
                "{message}"
            }
        }
        div { class: "player-shell",
            // Track title
            div { class: "now-playing",
                div { class: "cover",
                    Icon { kind: IconKind::Music, class: "icon".to_string() }
                }
                p { id: "track-title", class: "track-title",
                    {view.title.clone().unwrap_or_else(|| "No track loaded".to_string())}
                }
            }
            // Control buttons
            div { class: "controls",
                PrevButton {}
                PlayPauseButton {}
                NextButton {}
            }
            // Progress bar
            div { class: "progress",
                span { id: "current-time", class: "time-label current",
                    "{view.current_time_label}"
                }
                input {
                    id: "seek-bar",
                    r#type: "range",
                    min: "0",
                    max: "{view.seek_max}",
                    step: "1",
                    disabled: !view.seek_enabled,
                    value: "{view.seek_value}",
                    class: "seek-bar",
                    oninput: on_seek_input,
                    onchange: on_seek_commit,
                }
                span { id: "total-time", class: "time-label total",
                    "{view.total_time_label}"
                }
            }
            // Volume
            div { class: "volume",
                Icon { kind: volume_icon, class: "icon small".to_string() }
                input {
                    id: "volume",
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: "{volume_percent}",
                    class: "volume-bar",
                    oninput: on_volume_input,
                    onchange: on_volume_commit,
                }
            }
        }
    }
}
