//! Audio cue routing
//!
//! The engine never plays sound itself. Game events are mapped to cues and
//! handed to whatever sink the host provides; playback lifetime belongs to
//! the sink. Mute flags come from the player's settings.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Donut eaten
    Pickup,
    /// Whale hit a tree
    Damage,
}

/// Everything the audio collaborator can be asked to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    Effect { effect: SoundEffect, volume: f32 },
    MusicStart { volume: f32 },
    MusicStop,
}

/// Fire-and-forget playback backend
pub trait AudioSink: Send {
    /// Play a cue. Failures (missing asset, no device) stay inside the sink.
    fn play(&mut self, cue: AudioCue);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("audio: {:?}", cue);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    settings: Settings,
    music_playing: bool,
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>, settings: Settings) -> Self {
        Self {
            sink,
            settings,
            music_playing: false,
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Map a game event to a cue, if it has one
    pub fn cue_for(&self, event: &GameEvent) -> Option<AudioCue> {
        match event {
            GameEvent::Pickup { .. } => self.effect(SoundEffect::Pickup),
            GameEvent::Damage => self.effect(SoundEffect::Damage),
            GameEvent::BackgroundMusicStart => {
                let volume = self.settings.effective_music_volume();
                (volume > 0.0).then_some(AudioCue::MusicStart { volume })
            }
            GameEvent::BackgroundMusicStop => Some(AudioCue::MusicStop),
            GameEvent::Ramp { .. } | GameEvent::GameOver { .. } => None,
        }
    }

    fn effect(&self, effect: SoundEffect) -> Option<AudioCue> {
        let volume = self.settings.effective_sfx_volume();
        (volume > 0.0).then_some(AudioCue::Effect { effect, volume })
    }

    /// Forward the cue for `event` to the sink
    pub fn handle(&mut self, event: &GameEvent) {
        let Some(cue) = self.cue_for(event) else {
            return;
        };
        match cue {
            AudioCue::MusicStart { .. } => self.music_playing = true,
            AudioCue::MusicStop => {
                if !self.music_playing {
                    return;
                }
                self.music_playing = false;
            }
            AudioCue::Effect { .. } => {}
        }
        self.sink.play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct SharedSink(Arc<Mutex<Vec<AudioCue>>>);

    impl AudioSink for SharedSink {
        fn play(&mut self, cue: AudioCue) {
            self.0.lock().unwrap().push(cue);
        }
    }

    fn manager(settings: Settings) -> (AudioManager, Arc<Mutex<Vec<AudioCue>>>) {
        let cues = Arc::new(Mutex::new(Vec::new()));
        (
            AudioManager::new(Box::new(SharedSink(cues.clone())), settings),
            cues,
        )
    }

    #[test]
    fn test_effects_follow_events() {
        let (mut audio, cues) = manager(Settings::default());
        audio.handle(&GameEvent::Pickup { points: 30 });
        audio.handle(&GameEvent::Damage);
        audio.handle(&GameEvent::Ramp {
            level: 1,
            scroll_velocity: 11.0,
        });
        let cues = cues.lock().unwrap();
        assert_eq!(cues.len(), 2);
        assert!(matches!(
            cues[0],
            AudioCue::Effect {
                effect: SoundEffect::Pickup,
                ..
            }
        ));
    }

    #[test]
    fn test_sound_mute_silences_effects_only() {
        let (mut audio, cues) = manager(Settings {
            sound_muted: true,
            ..Default::default()
        });
        audio.handle(&GameEvent::Damage);
        audio.handle(&GameEvent::BackgroundMusicStart);
        let cues = cues.lock().unwrap();
        assert_eq!(cues.len(), 1);
        assert!(matches!(cues[0], AudioCue::MusicStart { .. }));
    }

    #[test]
    fn test_music_stop_only_when_playing() {
        let (mut audio, cues) = manager(Settings {
            music_muted: true,
            ..Default::default()
        });
        audio.handle(&GameEvent::BackgroundMusicStart);
        audio.handle(&GameEvent::BackgroundMusicStop);
        assert!(cues.lock().unwrap().is_empty());
        assert!(!audio.music_playing());
    }
}
