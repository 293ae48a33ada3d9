//! Annotation model: label rects, per-image collections, and the store port.
//!
//! The engine never owns annotation data. It reads and writes it through the
//! [`AnnotationStore`] trait, which a host implements over whatever state
//! container it already has. [`MemoryStore`] is the in-process implementation
//! used by tests and the replay tool; it doubles as the scene file format.
//!
//! All rect geometry stored here is in content space.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Rect;

/// Unique identifier for a label rect.
pub type RectId = Uuid;

/// Unique identifier for an image.
pub type ImageId = Uuid;

/// Unique identifier for a label name (the class a rect is tagged with).
pub type LabelNameId = Uuid;

/// Review status of a label rect. Only accepted rects expose their handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelStatus {
    /// Suggested but not yet confirmed; can be moved but not resized or rotated.
    Draft,
    #[default]
    Accepted,
}

/// A rectangle annotation on one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRect {
    pub id: RectId,
    /// The label name this rect is tagged with, if any.
    #[serde(default)]
    pub label_id: Option<LabelNameId>,
    /// Geometry in content space.
    pub rect: Rect,
    #[serde(default)]
    pub status: LabelStatus,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl LabelRect {
    /// A fresh, visible, accepted rect with a new id.
    #[must_use]
    pub fn new(rect: Rect, label_id: Option<LabelNameId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label_id,
            rect,
            status: LabelStatus::Accepted,
            is_visible: true,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == LabelStatus::Accepted
    }
}

/// A label class that rects can be tagged with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelName {
    pub id: LabelNameId,
    pub name: String,
    /// Explicit outline color. Falls back to the settings palette when absent.
    #[serde(default)]
    pub color: Option<String>,
}

/// One loaded image and its rect annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnnotations {
    pub id: ImageId,
    /// Native width in content pixels.
    pub width: f64,
    /// Native height in content pixels.
    pub height: f64,
    /// Ordered, id-unique. Order is draw order and hit-test order.
    #[serde(default)]
    pub label_rects: Vec<LabelRect>,
}

impl ImageAnnotations {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { id: Uuid::new_v4(), width, height, label_rects: Vec::new() }
    }

    #[must_use]
    pub fn rect(&self, id: &RectId) -> Option<&LabelRect> {
        self.label_rects.iter().find(|r| r.id == *id)
    }

    fn rect_mut(&mut self, id: &RectId) -> Option<&mut LabelRect> {
        self.label_rects.iter_mut().find(|r| r.id == *id)
    }
}

/// Errors returned by store writes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no active image")]
    NoActiveImage,
    #[error("image {0} is not the active image")]
    ImageMismatch(ImageId),
    #[error("rect {0} not found in the active image")]
    UnknownRect(RectId),
    #[error("rect {0} already exists in the active image")]
    DuplicateRect(RectId),
    #[error("image index {index} out of range ({len} images)")]
    ImageIndexOutOfRange { index: usize, len: usize },
}

/// Read/write port between the engine and the host's annotation state.
///
/// Writes address the image explicitly so a commit that races an image switch
/// fails with [`StoreError::ImageMismatch`] instead of landing on the wrong
/// image.
pub trait AnnotationStore {
    /// The image currently being annotated.
    fn active_image(&self) -> Option<&ImageAnnotations>;

    /// Known label names, in palette order.
    fn label_names(&self) -> &[LabelName];

    /// Label name that new rects are tagged with.
    fn active_label_name_id(&self) -> Option<LabelNameId>;

    fn active_rect_id(&self) -> Option<RectId>;

    fn highlighted_rect_id(&self) -> Option<RectId>;

    /// Append `rect` to the collection of `image_id`.
    ///
    /// # Errors
    ///
    /// Fails if `image_id` is not the active image or the id is taken.
    fn create_rect(&mut self, image_id: ImageId, rect: LabelRect) -> Result<(), StoreError>;

    /// Replace the geometry of rect `id` on image `image_id`.
    ///
    /// # Errors
    ///
    /// Fails if `image_id` is not the active image or the rect is gone.
    fn commit_rect(&mut self, image_id: ImageId, id: RectId, rect: Rect) -> Result<(), StoreError>;

    fn set_active(&mut self, id: Option<RectId>);

    fn set_highlighted(&mut self, id: Option<RectId>);

    /// The active rect, resolved against the active image.
    fn active_rect(&self) -> Option<&LabelRect> {
        let id = self.active_rect_id()?;
        self.active_image()?.rect(&id)
    }
}

/// In-memory annotation state. Serializes as the replay tool's scene format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    pub images: Vec<ImageAnnotations>,
    pub label_names: Vec<LabelName>,
    pub active_image_index: Option<usize>,
    pub active_label_name_id: Option<LabelNameId>,
    pub active_rect_id: Option<RectId>,
    pub highlighted_rect_id: Option<RectId>,
    /// Set once the first rect is created in this session.
    pub first_label_created: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one image, already active.
    #[must_use]
    pub fn with_image(image: ImageAnnotations) -> Self {
        Self { images: vec![image], active_image_index: Some(0), ..Self::default() }
    }

    /// Append images to the end of the list.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = ImageAnnotations>) {
        self.images.extend(images);
    }

    /// Switch the active image. Clears the active and highlighted rect.
    ///
    /// # Errors
    ///
    /// Fails if `index` is past the end of the image list.
    pub fn set_active_image(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.images.len() {
            return Err(StoreError::ImageIndexOutOfRange { index, len: self.images.len() });
        }
        self.active_image_index = Some(index);
        self.active_rect_id = None;
        self.highlighted_rect_id = None;
        Ok(())
    }

    pub fn set_active_label_name_id(&mut self, id: Option<LabelNameId>) {
        self.active_label_name_id = id;
    }

    /// Replace the image with the same id. Returns whether one was found.
    pub fn update_image_by_id(&mut self, image: ImageAnnotations) -> bool {
        match self.images.iter_mut().find(|i| i.id == image.id) {
            Some(slot) => {
                *slot = image;
                true
            }
            None => false,
        }
    }

    fn active_image_mut(&mut self, image_id: ImageId) -> Result<&mut ImageAnnotations, StoreError> {
        let index = self.active_image_index.ok_or(StoreError::NoActiveImage)?;
        let image = self.images.get_mut(index).ok_or(StoreError::NoActiveImage)?;
        if image.id != image_id {
            return Err(StoreError::ImageMismatch(image_id));
        }
        Ok(image)
    }
}

impl AnnotationStore for MemoryStore {
    fn active_image(&self) -> Option<&ImageAnnotations> {
        self.images.get(self.active_image_index?)
    }

    fn label_names(&self) -> &[LabelName] {
        &self.label_names
    }

    fn active_label_name_id(&self) -> Option<LabelNameId> {
        self.active_label_name_id
    }

    fn active_rect_id(&self) -> Option<RectId> {
        self.active_rect_id
    }

    fn highlighted_rect_id(&self) -> Option<RectId> {
        self.highlighted_rect_id
    }

    fn create_rect(&mut self, image_id: ImageId, rect: LabelRect) -> Result<(), StoreError> {
        let image = self.active_image_mut(image_id)?;
        if image.rect(&rect.id).is_some() {
            return Err(StoreError::DuplicateRect(rect.id));
        }
        image.label_rects.push(rect);
        self.first_label_created = true;
        Ok(())
    }

    fn commit_rect(&mut self, image_id: ImageId, id: RectId, rect: Rect) -> Result<(), StoreError> {
        let image = self.active_image_mut(image_id)?;
        let target = image.rect_mut(&id).ok_or(StoreError::UnknownRect(id))?;
        target.rect = rect;
        Ok(())
    }

    fn set_active(&mut self, id: Option<RectId>) {
        self.active_rect_id = id;
    }

    fn set_highlighted(&mut self, id: Option<RectId>) {
        self.highlighted_rect_id = id;
    }
}
