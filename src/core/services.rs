//=========================================================================
// Services
//=========================================================================
//
// Asset and audio collaborators reachable through the engine context.
//
// The scene graph only needs to load things by identifier and to start
// or stop sounds. Real backends implement these traits; the in-memory
// defaults keep headless runs and tests free of any I/O.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

//=== Asset Types =========================================================

/// Kind of resource requested from the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Atlas,
    Sound,
    Music,
    Font,
    Data,
}

/// Opaque handle to a loaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub u64);

/// Errors raised by asset loaders. The core never retries them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset '{0}' was not found")]
    NotFound(String),

    #[error("asset '{0}' is not loaded")]
    NotLoaded(String),

    #[error("asset backend failure: {0}")]
    Backend(String),
}

//=== AssetLoader =========================================================

/// Loads resources synchronously or through a queue flushed in one go.
pub trait AssetLoader {
    /// Loads a resource immediately.
    fn load_now(&mut self, kind: AssetKind, id: &str) -> Result<AssetHandle, AssetError>;

    /// Queues a resource for the next [`flush`](Self::flush).
    fn enqueue(&mut self, kind: AssetKind, id: &str);

    /// Loads everything queued, returning the new handles in queue order.
    fn flush(&mut self) -> Result<Vec<AssetHandle>, AssetError>;

    fn get(&self, id: &str) -> Option<AssetHandle>;

    fn unload(&mut self, id: &str) -> Result<(), AssetError>;
}

//=== MemoryAssets ========================================================

/// Asset loader that hands out sequential handles without touching disk.
#[derive(Debug, Default)]
pub struct MemoryAssets {
    loaded: HashMap<String, (AssetKind, AssetHandle)>,
    queue: Vec<(AssetKind, String)>,
    next_handle: u64,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn kind_of(&self, id: &str) -> Option<AssetKind> {
        self.loaded.get(id).map(|(kind, _)| *kind)
    }
}

impl AssetLoader for MemoryAssets {
    fn load_now(&mut self, kind: AssetKind, id: &str) -> Result<AssetHandle, AssetError> {
        if let Some((_, handle)) = self.loaded.get(id) {
            return Ok(*handle);
        }
        self.next_handle += 1;
        let handle = AssetHandle(self.next_handle);
        self.loaded.insert(id.to_owned(), (kind, handle));
        debug!("Loaded {:?} '{}' as {:?}", kind, id, handle);
        Ok(handle)
    }

    fn enqueue(&mut self, kind: AssetKind, id: &str) {
        self.queue.push((kind, id.to_owned()));
    }

    fn flush(&mut self) -> Result<Vec<AssetHandle>, AssetError> {
        std::mem::take(&mut self.queue)
            .into_iter()
            .map(|(kind, id)| self.load_now(kind, &id))
            .collect()
    }

    fn get(&self, id: &str) -> Option<AssetHandle> {
        self.loaded.get(id).map(|(_, handle)| *handle)
    }

    fn unload(&mut self, id: &str) -> Result<(), AssetError> {
        self.loaded
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AssetError::NotLoaded(id.to_owned()))
    }
}

//=== AudioPlayer =========================================================

/// Plays sounds and music.
pub trait AudioPlayer {
    fn play_sound(&mut self, sound: AssetHandle, volume: f32);

    fn play_music(&mut self, music: AssetHandle, looping: bool);

    fn stop_music(&mut self);

    /// Called when the host application loses focus.
    fn pause_all(&mut self);

    fn resume_all(&mut self);
}

//=== SilentAudio =========================================================

/// Audio player that only keeps track of what it was asked to do.
#[derive(Debug, Default)]
pub struct SilentAudio {
    sounds_played: usize,
    music: Option<AssetHandle>,
    paused: bool,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounds_played(&self) -> usize {
        self.sounds_played
    }

    pub fn current_music(&self) -> Option<AssetHandle> {
        self.music
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl AudioPlayer for SilentAudio {
    fn play_sound(&mut self, _sound: AssetHandle, _volume: f32) {
        self.sounds_played += 1;
    }

    fn play_music(&mut self, music: AssetHandle, _looping: bool) {
        self.music = Some(music);
    }

    fn stop_music(&mut self) {
        self.music = None;
    }

    fn pause_all(&mut self) {
        self.paused = true;
    }

    fn resume_all(&mut self) {
        self.paused = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Asset Tests ------------------------------------------------------

    #[test]
    fn load_now_is_idempotent_per_id() {
        let mut assets = MemoryAssets::new();
        let a = assets.load_now(AssetKind::Texture, "hero.png").unwrap();
        let b = assets.load_now(AssetKind::Texture, "hero.png").unwrap();
        assert_eq!(a, b);
        assert_eq!(assets.loaded_count(), 1);
    }

    #[test]
    fn flush_loads_queue_in_order() {
        let mut assets = MemoryAssets::new();
        assets.enqueue(AssetKind::Sound, "jump.wav");
        assets.enqueue(AssetKind::Music, "theme.ogg");
        assert_eq!(assets.queued_count(), 2);

        let handles = assets.flush().unwrap();
        assert_eq!(handles.len(), 2);
        assert_eq!(assets.queued_count(), 0);
        assert_eq!(assets.get("theme.ogg"), Some(handles[1]));
        assert_eq!(assets.kind_of("jump.wav"), Some(AssetKind::Sound));
    }

    #[test]
    fn unloading_unknown_asset_fails() {
        let mut assets = MemoryAssets::new();
        assert_eq!(
            assets.unload("ghost.png"),
            Err(AssetError::NotLoaded("ghost.png".into()))
        );
    }

    //--- Audio Tests ------------------------------------------------------

    #[test]
    fn silent_audio_tracks_requests() {
        let mut audio = SilentAudio::new();
        audio.play_sound(AssetHandle(1), 1.0);
        audio.play_music(AssetHandle(2), true);
        audio.pause_all();

        assert_eq!(audio.sounds_played(), 1);
        assert_eq!(audio.current_music(), Some(AssetHandle(2)));
        assert!(audio.is_paused());

        audio.stop_music();
        audio.resume_all();
        assert_eq!(audio.current_music(), None);
        assert!(!audio.is_paused());
    }
}
