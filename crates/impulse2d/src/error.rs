use thiserror::Error;

use crate::math::FloatNum;

/// Geometry that can not be turned into a valid collision shape.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Degeneracy {
    #[error("edge {index} has zero length")]
    ZeroLengthEdge { index: usize },

    #[error("polygon area is zero")]
    ZeroArea,

    #[error("convex hull collapsed to {count} vertices")]
    CollapsedHull { count: usize },
}

/// Rejected at shape creation, the step loop itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShapeError {
    #[error("circle radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: FloatNum },

    #[error("box extents must be positive and finite, got {half_width} x {half_height}")]
    InvalidExtents {
        half_width: FloatNum,
        half_height: FloatNum,
    },

    #[error("density must be non-negative and finite, got {density}")]
    InvalidDensity { density: FloatNum },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("polygon needs at least 3 points, got {count}")]
    TooFewVertices { count: usize },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] Degeneracy),
}

pub type ShapeResult<T> = Result<T, ShapeError>;
