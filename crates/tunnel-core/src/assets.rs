//! Readiness tracking for asynchronously loaded assets.
//!
//! Loaders run off the frame path and report back through [`AssetRegistry`];
//! the frame path only ever asks whether something is ready. A failed asset
//! is simply absent from the scene.

use crate::effects::TrackSource;
use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Audio,
    Font,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetId {
    pub kind: AssetKind,
    pub index: usize,
}

impl AssetId {
    pub const fn texture(index: usize) -> Self {
        Self {
            kind: AssetKind::Texture,
            index,
        }
    }
    pub const fn audio(index: usize) -> Self {
        Self {
            kind: AssetKind::Audio,
            index,
        }
    }
    pub const fn font(index: usize) -> Self {
        Self {
            kind: AssetKind::Font,
            index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset {0:?} was never registered")]
    UnknownAsset(AssetId),
    #[error("asset {0:?} is already registered")]
    AlreadyRegistered(AssetId),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub failed: usize,
    pub total: usize,
}

impl LoadProgress {
    #[inline]
    pub fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.settled() == self.total
    }
}

#[derive(Clone, Debug)]
struct AssetEntry {
    url: String,
    state: AssetState,
}

#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    entries: FnvHashMap<AssetId, AssetEntry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: AssetId, url: impl Into<String>) -> Result<(), AssetError> {
        if self.entries.contains_key(&id) {
            return Err(AssetError::AlreadyRegistered(id));
        }
        self.entries.insert(
            id,
            AssetEntry {
                url: url.into(),
                state: AssetState::Pending,
            },
        );
        Ok(())
    }

    pub fn mark_ready(&mut self, id: AssetId) -> Result<LoadProgress, AssetError> {
        self.settle(id, AssetState::Ready)
    }

    pub fn mark_failed(
        &mut self,
        id: AssetId,
        reason: impl Into<String>,
    ) -> Result<LoadProgress, AssetError> {
        self.settle(id, AssetState::Failed(reason.into()))
    }

    // First signal wins; a settled asset ignores later ones.
    fn settle(&mut self, id: AssetId, state: AssetState) -> Result<LoadProgress, AssetError> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(AssetError::UnknownAsset(id))?;
        if entry.state == AssetState::Pending {
            entry.state = state;
        } else {
            log::debug!("[assets] {:?} already settled; ignoring", id);
        }
        Ok(self.progress())
    }

    pub fn state(&self, id: AssetId) -> Option<&AssetState> {
        self.entries.get(&id).map(|e| &e.state)
    }

    pub fn url(&self, id: AssetId) -> Option<&str> {
        self.entries.get(&id).map(|e| e.url.as_str())
    }

    #[inline]
    pub fn is_ready(&self, id: AssetId) -> bool {
        matches!(self.state(id), Some(AssetState::Ready))
    }

    pub fn progress(&self) -> LoadProgress {
        tally(self.entries.values())
    }

    pub fn progress_of(&self, kind: AssetKind) -> LoadProgress {
        tally(
            self.entries
                .iter()
                .filter(|(id, _)| id.kind == kind)
                .map(|(_, e)| e),
        )
    }

    pub fn is_settled(&self) -> bool {
        self.progress().is_complete()
    }
}

fn tally<'a>(entries: impl Iterator<Item = &'a AssetEntry>) -> LoadProgress {
    entries.fold(LoadProgress::default(), |mut p, e| {
        p.total += 1;
        match e.state {
            AssetState::Ready => p.loaded += 1,
            AssetState::Failed(_) => p.failed += 1,
            AssetState::Pending => {}
        }
        p
    })
}

impl TrackSource for AssetRegistry {
    fn is_track_ready(&self, track: usize) -> bool {
        self.is_ready(AssetId::audio(track))
    }
}
