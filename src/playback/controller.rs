//! Player controller: owns the playback clock and the seek bar, and routes every event
//! through a single dispatcher.

use super::error::PlayerError;
use super::events::{MediaCommand, MediaNotification, PlayerEvent, SeekControlEvent};
use super::playlist::PlaylistCursor;
use super::seek_sync::SeekSynchronizer;
use super::state::PlaybackClock;
#[cfg(test)]
use super::seek_sync::DragState;
#[cfg(test)]
use super::state::PlaybackState;
use super::time_format::{format_total_time, format_track_time};
use crate::db::{normalize_volume, PlayerSettings, ResumePolicy};
use crate::models::Track;

/// Icon shown on the play/pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleVisual {
    /// Not playing: clicking starts playback.
    Play,
    /// Playing: clicking pauses.
    Pause,
}

/// Everything the widget renders, as of the last dispatched event.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub current_time_label: String,
    pub total_time_label: String,
    pub seek_value: u64,
    pub seek_max: u64,
    pub seek_enabled: bool,
    pub toggle_enabled: bool,
    pub toggle: ToggleVisual,
    pub title: Option<String>,
    pub can_switch_tracks: bool,
    pub volume: f64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Previous,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    clock: PlaybackClock,
    seek: SeekSynchronizer,
    playlist: Option<PlaylistCursor>,
    resume_policy: ResumePolicy,
    autoplay_on_track_change: bool,
    volume: f64,
    current_label: String,
    total_label: String,
    controls_enabled: bool,
    source_error: Option<PlayerError>,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(ResumePolicy::default())
    }
}

impl PlayerController {
    /// Single-source player. Call `load_source` to give it something to play.
    pub fn new(resume_policy: ResumePolicy) -> Self {
        Self {
            clock: PlaybackClock::new(),
            seek: SeekSynchronizer::new(),
            playlist: None,
            resume_policy,
            autoplay_on_track_change: false,
            volume: 1.0,
            current_label: format_track_time(0.0),
            total_label: format_track_time(0.0),
            controls_enabled: false,
            source_error: None,
        }
    }

    pub fn from_settings(settings: &PlayerSettings) -> Self {
        let mut controller = Self::new(settings.resume_on_seek_commit);
        controller.autoplay_on_track_change = settings.autoplay_on_track_change;
        controller.volume = normalize_volume(settings.volume);

        match PlaylistCursor::new(settings.playlist.clone()) {
            Ok(cursor) => controller.with_playlist(cursor),
            Err(err) => {
                tracing::warn!("[Player] {}, starting without a playlist", err);
                controller
            }
        }
    }

    pub fn with_playlist(mut self, playlist: PlaylistCursor) -> Self {
        self.playlist = Some(playlist);
        self
    }

    #[cfg(test)]
    pub fn with_autoplay_on_track_change(mut self, enabled: bool) -> Self {
        self.autoplay_on_track_change = enabled;
        self
    }

    /// Commands that bring a fresh media element in line with this controller.
    pub fn startup_commands(&self) -> Vec<MediaCommand> {
        let mut commands = vec![MediaCommand::SetVolume(self.volume)];
        if let Some(track) = self.current_track() {
            commands.push(MediaCommand::SetSource(track.source.clone()));
        }
        commands
    }

    /// Switch to a new source outside the playlist. Treated as a fresh load.
    pub fn load_source(&mut self, locator: impl Into<String>) -> Vec<MediaCommand> {
        self.reset_for_new_source();
        vec![MediaCommand::SetSource(locator.into())]
    }

    #[cfg(test)]
    pub fn playback_state(&self) -> &PlaybackState {
        self.clock.state()
    }

    #[cfg(test)]
    pub fn drag_state(&self) -> DragState {
        self.seek.drag_state()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.as_ref().map(PlaylistCursor::current)
    }

    #[cfg(test)]
    pub fn playlist(&self) -> Option<&PlaylistCursor> {
        self.playlist.as_ref()
    }

    #[cfg(test)]
    pub fn resume_policy(&self) -> ResumePolicy {
        self.resume_policy
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    fn seek_enabled(&self) -> bool {
        self.controls_enabled && self.source_error.is_none() && self.clock.duration().is_some()
    }

    pub fn view(&self) -> WidgetView {
        WidgetView {
            current_time_label: self.current_label.clone(),
            total_time_label: self.total_label.clone(),
            seek_value: self.seek.value(),
            seek_max: self.seek.max(),
            seek_enabled: self.seek_enabled(),
            toggle_enabled: self.controls_enabled && self.source_error.is_none(),
            toggle: if self.clock.is_playing() {
                ToggleVisual::Pause
            } else {
                ToggleVisual::Play
            },
            title: self.current_track().map(Track::display_title),
            can_switch_tracks: self.playlist.as_ref().is_some_and(|p| p.len() > 1),
            volume: self.volume,
            error: self.source_error.as_ref().map(ToString::to_string),
        }
    }

    /// Route one event. Returns the commands the media element must execute, in order.
    pub fn dispatch(&mut self, event: impl Into<PlayerEvent>) -> Vec<MediaCommand> {
        match event.into() {
            PlayerEvent::Media(notification) => {
                self.on_media(notification);
                Vec::new()
            }
            PlayerEvent::Seek(SeekControlEvent::DragStart { value }) => {
                self.on_drag_start(value);
                Vec::new()
            }
            PlayerEvent::Seek(SeekControlEvent::DragCommit { value }) => {
                self.on_drag_commit(value)
            }
            PlayerEvent::TogglePlayback => self.on_toggle(),
            PlayerEvent::Next => self.step_track(Step::Next),
            PlayerEvent::Previous => self.step_track(Step::Previous),
            PlayerEvent::SetVolume(volume) => self.on_volume(volume),
        }
    }

    fn on_media(&mut self, notification: MediaNotification) {
        match notification {
            MediaNotification::MetadataLoaded { duration } => {
                let duration = self.clock.set_duration(duration);
                self.clock.seek(0.0);
                self.seek.set_max(duration);
                self.seek.follow_clock(0.0);
                self.current_label = format_track_time(0.0);
                self.total_label = format_total_time(duration);
                self.controls_enabled = true;
                self.source_error = None;
                tracing::debug!("[Player] Metadata loaded, duration {:?}", duration);
            }
            MediaNotification::TimeUpdate { current_time } => {
                if self.source_error.is_some() {
                    return;
                }
                let position = self.clock.observe_position(current_time);
                self.current_label = format_track_time(position);
                self.seek.follow_clock(position);
            }
            MediaNotification::CanPlayThrough => {
                if self.source_error.is_none() {
                    self.controls_enabled = true;
                }
            }
            MediaNotification::Started => self.clock.set_playing(true),
            MediaNotification::Paused => self.clock.set_playing(false),
            MediaNotification::Ended => {
                self.clock.finish();
                self.current_label = format_track_time(0.0);
                self.seek.rewind();
            }
            MediaNotification::SourceFailed { message } => {
                tracing::warn!("[Player] Source unavailable: {}", message);
                self.reset_for_new_source();
                self.source_error = Some(PlayerError::SourceUnavailable(message));
            }
        }
    }

    fn on_drag_start(&mut self, value: f64) {
        if !self.seek_enabled() {
            tracing::debug!("[Seek] Ignoring drag while the seek bar is disabled");
            return;
        }
        self.seek.begin_drag(value);
    }

    fn on_drag_commit(&mut self, value: f64) -> Vec<MediaCommand> {
        if !self.seek_enabled() {
            tracing::debug!("[Seek] Ignoring commit while the seek bar is disabled");
            return Vec::new();
        }

        let was_playing = self.clock.is_playing();
        let commit = self.seek.commit(&mut self.clock, value);
        if let Some(err) = &commit.out_of_range {
            tracing::warn!("[Seek] {}", err);
        }
        self.current_label = format_track_time(commit.position);

        let mut commands = vec![MediaCommand::SetPosition(commit.position)];
        let resume = match self.resume_policy {
            ResumePolicy::Always => true,
            ResumePolicy::OnlyIfWasPlaying => was_playing,
        };
        if resume {
            commands.push(MediaCommand::Play);
        }
        commands
    }

    fn on_toggle(&mut self) -> Vec<MediaCommand> {
        if !self.controls_enabled || self.source_error.is_some() {
            return Vec::new();
        }
        if self.clock.is_playing() {
            vec![MediaCommand::Pause]
        } else {
            vec![MediaCommand::Play]
        }
    }

    fn step_track(&mut self, step: Step) -> Vec<MediaCommand> {
        let Some(playlist) = self.playlist.as_mut() else {
            return Vec::new();
        };
        let track = match step {
            Step::Next => playlist.next(),
            Step::Previous => playlist.previous(),
        }
        .clone();
        tracing::info!(
            "[Playlist] Switching to #{} \"{}\"",
            playlist.index(),
            track.display_title()
        );

        let mut commands = self.load_source(track.source);
        if self.autoplay_on_track_change {
            commands.push(MediaCommand::Play);
        }
        commands
    }

    fn on_volume(&mut self, volume: f64) -> Vec<MediaCommand> {
        if !volume.is_finite() {
            return Vec::new();
        }
        self.volume = volume.clamp(0.0, 1.0);
        vec![MediaCommand::SetVolume(self.volume)]
    }

    fn reset_for_new_source(&mut self) {
        self.clock.reset();
        self.seek.reset();
        self.current_label = format_track_time(0.0);
        self.total_label = format_track_time(0.0);
        self.controls_enabled = false;
        self.source_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::seek_sync::DragState;
    use crate::playback::state::PlaybackState;
    use crate::playback::time_format::whole_seconds;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tracks(count: usize) -> Vec<Track> {
        (0..count)
            .map(|n| Track::new(format!("audio/{n}.webm"), format!("Song {n}")))
            .collect()
    }

    fn loaded_player(duration: f64, policy: ResumePolicy) -> PlayerController {
        let mut player = PlayerController::new(policy);
        player.load_source("audio/test.webm");
        player.dispatch(MediaNotification::MetadataLoaded { duration });
        player
    }

    fn time_update(current_time: f64) -> MediaNotification {
        MediaNotification::TimeUpdate { current_time }
    }

    #[test]
    fn controls_stay_disabled_until_metadata() {
        let mut player = PlayerController::default();
        player.load_source("audio/a.webm");
        let view = player.view();
        assert!(!view.seek_enabled);
        assert!(!view.toggle_enabled);
        assert!(player.dispatch(PlayerEvent::TogglePlayback).is_empty());

        player.dispatch(MediaNotification::MetadataLoaded { duration: 184.6 });
        let view = player.view();
        assert!(view.seek_enabled);
        assert!(view.toggle_enabled);
        assert_eq!(view.seek_max, 184);
        assert_eq!(view.total_time_label, "3:04");
        assert_eq!(view.current_time_label, "0:00");
        assert_eq!(view.seek_value, 0);
    }

    #[test]
    fn metadata_rewinds_progress_already_shown() {
        let mut player = loaded_player(300.0, ResumePolicy::default());
        player.dispatch(time_update(125.0));
        let view = player.view();
        assert_eq!(view.current_time_label, "2:05");
        assert_eq!(view.seek_value, 125);

        player.dispatch(MediaNotification::MetadataLoaded { duration: 300.0 });
        let view = player.view();
        assert_eq!(view.current_time_label, "0:00");
        assert_eq!(view.seek_value, 0);
        assert_eq!(view.total_time_label, "5:00");
        assert_eq!(player.playback_state().position, 0.0);
    }

    #[test]
    fn time_updates_before_metadata_keep_the_view_consistent() {
        let mut player = PlayerController::default();
        player.load_source("audio/a.webm");
        player.dispatch(time_update(500.0));
        let view = player.view();
        assert_eq!(view.seek_max, 0);
        assert_eq!(view.seek_value, 0);
        assert!(!view.seek_enabled);
    }

    #[test]
    fn can_play_through_enables_controls() {
        let mut player = PlayerController::default();
        player.load_source("audio/a.webm");
        player.dispatch(MediaNotification::CanPlayThrough);
        assert!(player.view().toggle_enabled);
        assert!(!player.view().seek_enabled);
    }

    #[test]
    fn live_stream_duration_keeps_seek_disabled() {
        let player = loaded_player(f64::INFINITY, ResumePolicy::default());
        let view = player.view();
        assert_eq!(view.total_time_label, "--:--");
        assert!(!view.seek_enabled);
        assert!(view.toggle_enabled);
    }

    #[test]
    fn time_updates_drive_label_and_knob() {
        let mut player = loaded_player(4000.0, ResumePolicy::default());
        player.dispatch(time_update(3661.7));
        let view = player.view();
        assert_eq!(view.current_time_label, "01:01:01");
        assert_eq!(view.seek_value, 3661);
    }

    #[test]
    fn label_keeps_following_playback_while_dragging() {
        let mut player = loaded_player(300.0, ResumePolicy::default());
        player.dispatch(time_update(10.0));
        player.dispatch(SeekControlEvent::DragStart { value: 200.0 });
        player.dispatch(time_update(12.0));

        let view = player.view();
        assert_eq!(view.seek_value, 200);
        assert_eq!(view.current_time_label, "0:12");
        assert_eq!(player.drag_state(), DragState::Dragging);
    }

    #[test]
    fn commit_seeks_and_resumes_only_if_playing() {
        let mut player = loaded_player(300.0, ResumePolicy::OnlyIfWasPlaying);
        player.dispatch(SeekControlEvent::DragStart { value: 90.0 });
        let commands = player.dispatch(SeekControlEvent::DragCommit { value: 90.0 });
        assert_eq!(commands, vec![MediaCommand::SetPosition(90.0)]);

        player.dispatch(MediaNotification::Started);
        player.dispatch(SeekControlEvent::DragStart { value: 30.0 });
        let commands = player.dispatch(SeekControlEvent::DragCommit { value: 30.0 });
        assert_eq!(
            commands,
            vec![MediaCommand::SetPosition(30.0), MediaCommand::Play]
        );
        assert_eq!(player.view().current_time_label, "0:30");
    }

    #[test]
    fn always_policy_resumes_paused_track() {
        let mut player = loaded_player(300.0, ResumePolicy::Always);
        player.dispatch(SeekControlEvent::DragStart { value: 45.0 });
        let commands = player.dispatch(SeekControlEvent::DragCommit { value: 45.0 });
        assert_eq!(
            commands,
            vec![MediaCommand::SetPosition(45.0), MediaCommand::Play]
        );
    }

    #[test]
    fn committing_twice_is_idempotent() {
        let mut player = loaded_player(300.0, ResumePolicy::default());
        player.dispatch(MediaNotification::Started);

        player.dispatch(SeekControlEvent::DragCommit { value: 120.5 });
        let once = player.playback_state().clone();
        let first_view = player.view();

        player.dispatch(SeekControlEvent::DragCommit { value: 120.5 });
        assert_eq!(player.playback_state(), &once);
        assert_eq!(player.view(), first_view);
        assert_eq!(once.position, 120.5);
    }

    #[test]
    fn out_of_range_commit_is_clamped() {
        let mut player = loaded_player(100.0, ResumePolicy::default());
        let commands = player.dispatch(SeekControlEvent::DragCommit { value: 999.0 });
        assert_eq!(commands, vec![MediaCommand::SetPosition(100.0)]);
        assert_eq!(player.view().seek_value, 100);

        let commands = player.dispatch(SeekControlEvent::DragCommit { value: -8.0 });
        assert_eq!(commands, vec![MediaCommand::SetPosition(0.0)]);
    }

    #[test]
    fn knob_never_fights_the_user() {
        let mut rng = StdRng::seed_from_u64(0x5eec);
        let duration = 600.0;

        for _ in 0..250 {
            let mut player = loaded_player(duration, ResumePolicy::default());
            let mut clock = 0.0f64;

            for _ in 0..rng.gen_range(0..6) {
                clock = (clock + rng.gen_range(0.05..2.0)).min(duration);
                player.dispatch(time_update(clock));
            }

            let grab = rng.gen_range(0.0..duration);
            player.dispatch(SeekControlEvent::DragStart { value: grab });
            let mut expected = whole_seconds(grab);
            assert_eq!(player.view().seek_value, expected);

            for _ in 0..rng.gen_range(0..25) {
                if rng.gen_bool(0.7) {
                    clock = (clock + rng.gen_range(0.05..2.0)).min(duration);
                    player.dispatch(time_update(clock));
                } else {
                    let moved = rng.gen_range(0.0..duration);
                    player.dispatch(SeekControlEvent::DragStart { value: moved });
                    expected = whole_seconds(moved);
                }
                assert_eq!(player.view().seek_value, expected);
            }

            let target = rng.gen_range(-50.0..duration + 50.0);
            let commands = player.dispatch(SeekControlEvent::DragCommit { value: target });
            let applied = target.clamp(0.0, duration);
            assert_eq!(commands.first(), Some(&MediaCommand::SetPosition(applied)));
            assert_eq!(player.view().seek_value, whole_seconds(applied));
            assert_eq!(player.drag_state(), DragState::Idle);

            player.dispatch(time_update(applied));
            assert_eq!(player.view().seek_value, whole_seconds(applied));
        }
    }

    #[test]
    fn ended_resets_labels_and_knob() {
        let mut player = loaded_player(200.0, ResumePolicy::default());
        player.dispatch(MediaNotification::Started);
        player.dispatch(time_update(199.4));

        player.dispatch(MediaNotification::Ended);
        let view = player.view();
        assert_eq!(view.current_time_label, format_track_time(0.0));
        assert_eq!(view.seek_value, 0);
        assert_eq!(view.toggle, ToggleVisual::Play);
        assert_eq!(player.playback_state().position, 0.0);
        assert_eq!(view.total_time_label, "3:20");
    }

    #[test]
    fn ended_during_drag_leaves_knob_to_user() {
        let mut player = loaded_player(200.0, ResumePolicy::default());
        player.dispatch(SeekControlEvent::DragStart { value: 150.0 });
        player.dispatch(MediaNotification::Ended);
        assert_eq!(player.view().seek_value, 150);
        assert_eq!(player.view().current_time_label, "0:00");
    }

    #[test]
    fn toggle_follows_media_state() {
        let mut player = loaded_player(60.0, ResumePolicy::default());
        assert_eq!(
            player.dispatch(PlayerEvent::TogglePlayback),
            vec![MediaCommand::Play]
        );
        // The icon only flips once the media element confirms.
        assert_eq!(player.view().toggle, ToggleVisual::Play);

        player.dispatch(MediaNotification::Started);
        assert_eq!(player.view().toggle, ToggleVisual::Pause);
        assert_eq!(
            player.dispatch(PlayerEvent::TogglePlayback),
            vec![MediaCommand::Pause]
        );

        player.dispatch(MediaNotification::Paused);
        assert_eq!(player.view().toggle, ToggleVisual::Play);
    }

    #[test]
    fn source_failure_keeps_widget_inert_but_alive() {
        let mut player = PlayerController::default();
        player.load_source("audio/missing.webm");
        player.dispatch(MediaNotification::SourceFailed {
            message: "Network error while loading this track.".to_string(),
        });
        player.dispatch(time_update(12.0));

        let view = player.view();
        assert_eq!(view.current_time_label, "0:00");
        assert!(!view.seek_enabled);
        assert!(!view.toggle_enabled);
        assert_eq!(
            view.error.as_deref(),
            Some("Network error while loading this track.")
        );

        player.dispatch(MediaNotification::CanPlayThrough);
        assert!(!player.view().toggle_enabled);

        player.load_source("audio/other.webm");
        player.dispatch(MediaNotification::MetadataLoaded { duration: 10.0 });
        assert!(player.view().error.is_none());
        assert!(player.view().seek_enabled);
    }

    #[test]
    fn playlist_steps_reset_the_source() {
        let cursor = PlaylistCursor::starting_at(tracks(3), 2).unwrap();
        let mut player = PlayerController::default().with_playlist(cursor);
        player.dispatch(MediaNotification::MetadataLoaded { duration: 90.0 });
        player.dispatch(MediaNotification::Started);
        player.dispatch(time_update(42.0));
        player.dispatch(SeekControlEvent::DragStart { value: 70.0 });

        let commands = player.dispatch(PlayerEvent::Next);
        assert_eq!(
            commands,
            vec![MediaCommand::SetSource("audio/0.webm".to_string())]
        );
        assert_eq!(player.playlist().map(PlaylistCursor::index), Some(0));
        assert_eq!(player.playback_state(), &PlaybackState::default());
        assert_eq!(player.drag_state(), DragState::Idle);

        let view = player.view();
        assert_eq!(view.title.as_deref(), Some("Song 0"));
        assert_eq!(view.current_time_label, "0:00");
        assert_eq!(view.total_time_label, "0:00");
        assert_eq!(view.seek_value, 0);
        assert_eq!(view.seek_max, 0);
        assert!(!view.seek_enabled);
        assert_eq!(view.toggle, ToggleVisual::Play);

        player.dispatch(PlayerEvent::Previous);
        assert_eq!(player.playlist().map(PlaylistCursor::index), Some(2));
    }

    #[test]
    fn autoplay_appends_play_after_source_change() {
        let cursor = PlaylistCursor::new(tracks(2)).unwrap();
        let mut player = PlayerController::default()
            .with_playlist(cursor)
            .with_autoplay_on_track_change(true);
        assert_eq!(
            player.dispatch(PlayerEvent::Next),
            vec![
                MediaCommand::SetSource("audio/1.webm".to_string()),
                MediaCommand::Play
            ]
        );
    }

    #[test]
    fn track_switching_without_playlist_is_a_no_op() {
        let mut player = loaded_player(30.0, ResumePolicy::default());
        assert!(player.dispatch(PlayerEvent::Next).is_empty());
        assert!(player.dispatch(PlayerEvent::Previous).is_empty());
        assert!(!player.view().can_switch_tracks);
        assert!(player.view().seek_enabled);
    }

    #[test]
    fn volume_is_clamped() {
        let mut player = PlayerController::default();
        assert_eq!(
            player.dispatch(PlayerEvent::SetVolume(1.7)),
            vec![MediaCommand::SetVolume(1.0)]
        );
        assert!(player.dispatch(PlayerEvent::SetVolume(f64::NAN)).is_empty());
        assert_eq!(player.view().volume, 1.0);
    }

    #[test]
    fn settings_seed_startup_commands() {
        let settings = PlayerSettings {
            volume: 0.4,
            playlist: tracks(2),
            ..PlayerSettings::default()
        };
        let player = PlayerController::from_settings(&settings);
        assert_eq!(
            player.startup_commands(),
            vec![
                MediaCommand::SetVolume(0.4),
                MediaCommand::SetSource("audio/0.webm".to_string())
            ]
        );
        assert!(player.view().can_switch_tracks);
        assert_eq!(player.resume_policy(), ResumePolicy::OnlyIfWasPlaying);
    }
}
