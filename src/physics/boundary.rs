//! Axis-aligned boundary region and its four edges.
//!
//! Coordinates use the screen convention: y grows downward, so the
//! bottom edge sits at `max.y` and the top edge at `min.y`.

use glam::Vec2;

use crate::error::PhysicsError;

/// Enclosing rectangle that circular bodies bounce inside.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundaryRegion {
    /// Create a region, rejecting degenerate or non-finite extents.
    pub fn new(min: Vec2, max: Vec2) -> Result<Self, PhysicsError> {
        let region = Self { min, max };
        region.validate()?;
        Ok(region)
    }

    /// Region spanning `(0, 0)` to `(width, height)`.
    pub fn from_size(width: f32, height: f32) -> Result<Self, PhysicsError> {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    /// Check that `min < max` componentwise and both corners are finite.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.min.is_finite() && self.max.is_finite() && self.min.cmplt(self.max).all() {
            Ok(())
        } else {
            Err(PhysicsError::InvalidBounds {
                min: self.min,
                max: self.max,
            })
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Whether a point lies inside or on the region.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// One side of a [`BoundaryRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    /// `max.x`
    Right,
    /// `min.x`
    Left,
    /// `max.y`
    Bottom,
    /// `min.y`
    Top,
}

impl Edge {
    /// Resolution order. Corner contacts are resolved one edge at a time in
    /// this order, each seeing the state left by the previous one.
    pub const ORDER: [Edge; 4] = [Edge::Right, Edge::Left, Edge::Bottom, Edge::Top];

    /// Unit normal pointing from the edge back into the region.
    #[inline]
    pub fn normal(self) -> Vec2 {
        match self {
            Edge::Right => Vec2::NEG_X,
            Edge::Left => Vec2::X,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Top => Vec2::Y,
        }
    }

    /// Offset from a circle's center to its contact point on this edge.
    #[inline]
    pub fn contact_offset(self, radius: f32) -> Vec2 {
        -self.normal() * radius
    }

    /// Coordinate of the edge line on its axis.
    #[inline]
    pub fn surface(self, bounds: &BoundaryRegion) -> f32 {
        match self {
            Edge::Right => bounds.max.x,
            Edge::Left => bounds.min.x,
            Edge::Bottom => bounds.max.y,
            Edge::Top => bounds.min.y,
        }
    }

    /// Whether a circle at `center` touches or crosses this edge.
    #[inline]
    pub fn penetrates(self, center: Vec2, radius: f32, bounds: &BoundaryRegion) -> bool {
        match self {
            Edge::Right => center.x + radius >= bounds.max.x,
            Edge::Left => center.x - radius <= bounds.min.x,
            Edge::Bottom => center.y + radius >= bounds.max.y,
            Edge::Top => center.y - radius <= bounds.min.y,
        }
    }

    /// Snap the penetrating coordinate so the circle rests on the edge.
    ///
    /// The other coordinate is left untouched.
    #[inline]
    pub fn clamp(self, center: &mut Vec2, radius: f32, bounds: &BoundaryRegion) {
        match self {
            Edge::Right => center.x = bounds.max.x - radius,
            Edge::Left => center.x = bounds.min.x + radius,
            Edge::Bottom => center.y = bounds.max.y - radius,
            Edge::Top => center.y = bounds.min.y + radius,
        }
    }

    /// Point of contact: the edge coordinate on the clamped axis and the
    /// body's coordinate on the other.
    #[inline]
    pub fn contact_point(self, center: Vec2, bounds: &BoundaryRegion) -> Vec2 {
        match self {
            Edge::Right | Edge::Left => Vec2::new(self.surface(bounds), center.y),
            Edge::Bottom | Edge::Top => Vec2::new(center.x, self.surface(bounds)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Edge::Right => "right",
            Edge::Left => "left",
            Edge::Bottom => "bottom",
            Edge::Top => "top",
        }
    }
}
