//! Fire-and-forget point markers
//!
//! Points are not pooled and hand out no handles. Each particle carries the
//! lifetime it was given at emission and is aged by [`PointEmitter::advance`].
//! A lifetime of zero keeps the point for exactly one frame, the same as the
//! pooled drawables.

use crate::foundation::math::{Color, Vec3};

/// One live point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointParticle {
    /// Center in world space
    pub position: Vec3,
    /// Point color
    pub color: Color,
    /// Radius in world units
    pub radius: f32,
    /// Seconds since emission
    pub age: f32,
    /// Seconds the point stays alive
    pub lifetime: f32,
}

/// Emits and ages point particles
#[derive(Debug)]
pub struct PointEmitter {
    particles: Vec<PointParticle>,
    enabled: bool,
}

impl Default for PointEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl PointEmitter {
    /// Create an empty emitter
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            enabled: true,
        }
    }

    /// Emit one point; returns `false` while the emitter is disabled
    pub fn emit(&mut self, position: Vec3, color: Color, radius: f32, duration: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.particles.push(PointParticle {
            position,
            color,
            radius,
            age: 0.0,
            lifetime: duration.max(0.0),
        });
        true
    }

    /// Age every particle; returns how many died
    pub fn advance(&mut self, delta_time: f32) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|particle| {
            particle.age += delta_time;
            particle.age < particle.lifetime
        });
        before - self.particles.len()
    }

    /// Live particles
    pub fn particles(&self) -> &[PointParticle] {
        &self.particles
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particle is alive
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop all particles
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Whether [`emit`](Self::emit) accepts points
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume emission; live particles keep aging
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
