//! Outgoing notification buffer for one frame.

use citydrive_core::events::SimEvent;

/// Collects the events raised during a frame.
///
/// Audio notifications are dropped at emission while the audio
/// collaborator is not ready; they are never queued for later.
#[derive(Debug, Default)]
pub struct EventBus {
    audio_ready: bool,
    pending: Vec<SimEvent>,
}

impl EventBus {
    pub fn new(audio_ready: bool) -> Self {
        Self {
            audio_ready,
            pending: Vec::new(),
        }
    }

    pub fn set_audio_ready(&mut self, ready: bool) {
        self.audio_ready = ready;
    }

    pub fn audio_ready(&self) -> bool {
        self.audio_ready
    }

    pub fn emit(&mut self, event: SimEvent) {
        if event.is_audio() && !self.audio_ready {
            return;
        }
        self.pending.push(event);
    }

    /// Take everything emitted since the last drain.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.pending)
    }
}
