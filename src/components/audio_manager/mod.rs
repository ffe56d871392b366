//! Audio Manager - binds the page's `<audio>` element to the player controller.
//! DOM media events become controller notifications; the commands the controller hands
//! back are applied to the element. Nothing here decides playback behavior.

use crate::playback::PlayerController;
use dioxus::prelude::*;

mod playback_api;
#[cfg(target_arch = "wasm32")]
mod web_helpers;

pub use playback_api::*;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_helpers::{
    apply_media_commands, get_or_create_audio_element, media_notification, MEDIA_EVENTS,
};

#[cfg(target_arch = "wasm32")]
const BOUND_ATTRIBUTE: &str = "data-player-bound";

#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let controller = use_context::<Signal<PlayerController>>();

    // One-time setup: create the audio element, wire listeners, load the first track.
    use_effect(move || {
        let Some(audio) = get_or_create_audio_element() else {
            tracing::error!("[Audio] Unable to create the audio element");
            return;
        };
        if audio.has_attribute(BOUND_ATTRIBUTE) {
            return;
        }

        let runtime = Runtime::current();
        for event_name in MEDIA_EVENTS {
            let runtime = runtime.clone();
            let element = audio.clone();
            let mut controller = controller;
            let callback = Closure::wrap(Box::new(move || {
                let _guard = RuntimeGuard::new(runtime.clone());
                let Some(notification) = media_notification(event_name, &element) else {
                    return;
                };
                let commands = controller.write().dispatch(notification);
                apply_media_commands(&element, &commands);
            }) as Box<dyn FnMut()>);

            if let Err(err) = audio
                .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            {
                tracing::warn!("[Audio] Failed to listen for {}: {:?}", event_name, err);
            }
            callback.forget();
        }
        let _ = audio.set_attribute(BOUND_ATTRIBUTE, "true");

        let commands = controller.peek().startup_commands();
        apply_media_commands(&audio, &commands);
        tracing::info!("[Audio] Audio element ready");
    });

    rsx! {}
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    let controller = use_context::<Signal<PlayerController>>();

    use_hook(move || {
        tracing::warn!("[Audio] No media backend on this target, playback is disabled");
        run_media_commands(&controller.peek().startup_commands());
    });

    rsx! {}
}
