// Public playback API consumed by UI components.
use crate::playback::{MediaCommand, PlayerController, PlayerEvent};
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::web_helpers::{apply_media_commands, get_or_create_audio_element};

/// Dispatch a user action to the controller and apply the resulting media commands.
pub fn send_player_event(mut controller: Signal<PlayerController>, event: impl Into<PlayerEvent>) {
    let commands = controller.write().dispatch(event);
    run_media_commands(&commands);
}

#[cfg(target_arch = "wasm32")]
pub fn run_media_commands(commands: &[MediaCommand]) {
    if commands.is_empty() {
        return;
    }
    match get_or_create_audio_element() {
        Some(audio) => apply_media_commands(&audio, commands),
        None => tracing::error!("[Audio] No audio element, dropping {:?}", commands),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_media_commands(commands: &[MediaCommand]) {
    for command in commands {
        tracing::debug!("[Audio] No media backend on this target, dropping {:?}", command);
    }
}
