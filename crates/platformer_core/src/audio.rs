//! Cross-thread sound cue.
//!
//! Physics never shares geometry with the audio thread. It only raises a
//! flag, which the audio side consumes when it is ready to play.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Clonable handle to a single pending/not-pending flag.
///
/// Cues do not queue: signalling twice before the audio side takes the
/// flag plays the sound once.
#[derive(Debug, Clone, Default)]
pub struct SoundCue {
    pending: Arc<AtomicBool>,
}

impl SoundCue {
    /// Create a cue with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the sound.
    pub fn signal(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Consume a pending request, returning whether there was one.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Whether a request is waiting, without consuming it.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}
