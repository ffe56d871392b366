// Browser-only helpers around the page's <audio> element.
use crate::playback::events::MediaNotification;
use crate::playback::MediaCommand;
use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlAudioElement};

const AUDIO_ELEMENT_ID: &str = "simpleplayer-audio";

/// Media element events forwarded to the player controller.
pub(super) const MEDIA_EVENTS: [&str; 7] = [
    "loadedmetadata",
    "timeupdate",
    "canplaythrough",
    "play",
    "pause",
    "ended",
    "error",
];

/// Initialize the audio element once.
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// Translate a DOM media event into a controller notification.
pub(super) fn media_notification(
    event_name: &str,
    audio: &HtmlAudioElement,
) -> Option<MediaNotification> {
    let notification = match event_name {
        "loadedmetadata" => MediaNotification::MetadataLoaded {
            duration: audio.duration(),
        },
        "timeupdate" => MediaNotification::TimeUpdate {
            current_time: audio.current_time(),
        },
        "canplaythrough" => MediaNotification::CanPlayThrough,
        "play" => MediaNotification::Started,
        "pause" => MediaNotification::Paused,
        "ended" => MediaNotification::Ended,
        "error" => MediaNotification::SourceFailed {
            message: web_playback_error_message(audio),
        },
        _ => return None,
    };
    Some(notification)
}

fn web_playback_error_message(audio: &HtmlAudioElement) -> String {
    let audio_js = wasm_bindgen::JsValue::from(audio.clone());
    let code = js_sys::Reflect::get(&audio_js, &"error".into())
        .ok()
        .filter(|error_js| !error_js.is_null() && !error_js.is_undefined())
        .and_then(|error_js| js_sys::Reflect::get(&error_js, &"code".into()).ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0) as u16;

    match code {
        1 => "Playback was aborted before the track loaded.",
        2 => "Network error while loading this track.",
        3 => "Audio playback failed due to a decode error.",
        4 => "Failed to load audio because no supported source was found.",
        _ => "Unable to load this audio source.",
    }
    .to_string()
}

fn web_try_play(audio: &HtmlAudioElement) {
    match audio.play() {
        Ok(promise) => {
            spawn(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    tracing::warn!("[Audio] play() was rejected: {:?}", err);
                }
            });
        }
        Err(err) => tracing::warn!("[Audio] play() failed: {:?}", err),
    }
}

/// Execute controller commands against the media element, in order.
pub(super) fn apply_media_commands(audio: &HtmlAudioElement, commands: &[MediaCommand]) {
    for command in commands {
        match command {
            MediaCommand::Play => web_try_play(audio),
            MediaCommand::Pause => {
                if let Err(err) = audio.pause() {
                    tracing::warn!("[Audio] pause() failed: {:?}", err);
                }
            }
            MediaCommand::SetPosition(position) => audio.set_current_time(*position),
            MediaCommand::SetSource(locator) => {
                tracing::info!("[Audio] Loading {}", locator);
                audio.set_src(locator);
            }
            MediaCommand::SetVolume(volume) => audio.set_volume(volume.clamp(0.0, 1.0)),
        }
    }
}
