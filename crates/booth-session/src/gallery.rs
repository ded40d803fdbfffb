//! Captured photos, newest first.

use booth_render::{Filter, Frame, Overlay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, SessionError};

/// A captured photo and the look chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    /// Image reference: data URI or file path.
    pub url: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlays: Vec<Overlay>,
}

impl Photo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            url: url.into(),
            timestamp: Utc::now(),
            filter: Filter::None,
            frame: Frame::None,
            overlays: Vec::new(),
        }
    }

    pub fn with_look(mut self, filter: Filter, frame: Frame) -> Self {
        self.filter = filter;
        self.frame = frame;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhotoGallery {
    photos: Vec<Photo>,
}

impl PhotoGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a photo at the front. Returns its id.
    pub fn add(&mut self, photo: Photo) -> String {
        let id = photo.id.clone();
        debug!(id = %id, total = self.photos.len() + 1, "Photo added to gallery");
        self.photos.insert(0, photo);
        id
    }

    pub fn remove(&mut self, id: &str) -> Result<Photo> {
        let index = self
            .photos
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SessionError::UnknownPhoto(id.to_string()))?;
        Ok(self.photos.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.photos.iter()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Image references for `ids`, in the order given.
    pub fn urls(&self, ids: &[String]) -> Result<Vec<String>> {
        ids.iter()
            .map(|id| {
                self.get(id)
                    .map(|p| p.url.clone())
                    .ok_or_else(|| SessionError::UnknownPhoto(id.clone()))
            })
            .collect()
    }
}
