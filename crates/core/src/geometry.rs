//! Canvas geometry primitives
//!
//! Positions and sizes here are the pixel values the host canvas reports
//! after a drag or resize gesture. The behavior enforcer's position-sync
//! callback receives a [`Geometry`] and writes it back into the component's
//! style map.

use serde::{Deserialize, Serialize};

// ============================================================================
// Position
// ============================================================================

/// Absolute position of a component on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub left: f32,
    pub top: f32,
}

impl Position {
    /// Create a new position
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }

    /// Create a position at the canvas origin
    pub fn zero() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
        }
    }

    /// Add an offset to this position
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Size
// ============================================================================

/// Size of a component on the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Create a zero size
    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Combined position and size reported by a drag/resize gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
}

impl Geometry {
    /// Create a new geometry
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a geometry from raw pixel values
    pub fn from_values(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            position: Position::new(left, top),
            size: Size::new(width, height),
        }
    }

    /// Render a pixel value the way the canvas style map stores it
    pub fn px(value: f32) -> String {
        // Whole pixels stay integral ("120px", not "120.0px").
        if value.fract() == 0.0 {
            format!("{}px", value as i64)
        } else {
            format!("{value}px")
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
