//! Scene files: the annotation state plus where the image is drawn.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use rect_canvas::doc::{AnnotationStore, MemoryStore};
use rect_canvas::geom::Rect;
use rect_canvas::viewport::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub store: MemoryStore,
    /// Displayed image placement. Defaults to the active image at 1:1 at the origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl SceneFile {
    #[must_use]
    pub fn viewport_or_identity(&self) -> Option<Viewport> {
        self.viewport.or_else(|| {
            let image = self.store.active_image()?;
            Some(Viewport::new(Rect::new(0.0, 0.0, image.width, image.height), image.width, image.height))
        })
    }
}
