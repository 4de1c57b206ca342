//! World-space text labels

use crate::foundation::math::{Color, Vec3};
use crate::render::dynamic::{DrawHandle, DrawablePool, PooledDrawable};

/// One pooled label
#[derive(Debug, Clone)]
pub struct TextObject {
    /// Label content
    pub text: String,
    /// Anchor in world space
    pub position: Vec3,
    /// Glyph scale
    pub scale: Vec3,
    /// Text color
    pub color: Color,
    visible: bool,
}

impl Default for TextObject {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            visible: false,
        }
    }
}

impl PooledDrawable for TextObject {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Draws text labels
#[derive(Debug)]
pub struct TextDrawer {
    pool: DrawablePool<TextObject>,
}

impl TextDrawer {
    /// Create a drawer with `capacity` labels ready
    pub fn new(capacity: usize, min_growth: usize) -> Self {
        Self {
            pool: DrawablePool::new("text", capacity).with_min_growth(min_growth),
        }
    }

    /// Label anchored `y_offset` units above `position`
    pub fn draw_text(
        &mut self,
        text: &str,
        position: Vec3,
        scale: Vec3,
        color: Color,
        y_offset: f32,
        duration: f32,
    ) -> Option<DrawHandle> {
        let (handle, label) = self.pool.spawn(duration)?;
        label.text.clear();
        label.text.push_str(text);
        label.position = position + Vec3::y() * y_offset;
        label.scale = scale;
        label.color = color;
        Some(handle)
    }

    /// Advance label countdowns; returns how many expired
    pub fn tick(&mut self, delta_time: f32) -> usize {
        self.pool.tick(delta_time)
    }

    /// Remove a label before it expires
    pub fn release(&mut self, handle: DrawHandle) -> bool {
        self.pool.release(handle)
    }

    /// Active labels
    pub fn labels(&self) -> impl Iterator<Item = &TextObject> + '_ {
        self.pool.active()
    }

    /// Label by handle
    pub fn get(&self, handle: DrawHandle) -> Option<&TextObject> {
        self.pool.get(handle)
    }

    /// Number of active labels
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    /// Suspend or resume drawing
    pub fn set_enabled(&mut self, enabled: bool) {
        self.pool.set_enabled(enabled);
    }
}
