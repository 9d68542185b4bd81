//! Cut points extracted from a drawing.

use cutquote_core::{Drawing, EntityKind, EntityType, Point2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a cut point represents on its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointRole {
    /// Line start.
    Start,
    /// Line end.
    End,
    /// Circle or arc center.
    Center,
    /// Polyline vertex.
    Vertex,
}

/// A point on the cutting path, linked back to its entity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathPoint {
    /// Position.
    pub position: Point2,
    /// Index of the owning entity in the drawing.
    pub entity_index: usize,
    /// Type of the owning entity.
    pub entity_type: EntityType,
    /// Role of the point on its entity.
    pub role: PointRole,
}

impl PathPoint {
    /// Distance to another path point.
    pub fn distance_to(&self, other: &PathPoint) -> f64 {
        self.position.distance_to(&other.position)
    }
}

/// Extracts cut points in source order.
///
/// Lines contribute both endpoints, circles and arcs their center, polylines
/// every vertex. Other entity kinds contribute nothing.
pub fn extract_points(drawing: &Drawing) -> Vec<PathPoint> {
    let mut points = Vec::new();
    for (entity_index, entity) in drawing.entities().iter().enumerate() {
        let entity_type = entity.entity_type();
        let mut push = |position: Point2, role: PointRole| {
            points.push(PathPoint {
                position,
                entity_index,
                entity_type,
                role,
            })
        };
        match entity.kind() {
            EntityKind::Line { start, end } => {
                push(*start, PointRole::Start);
                push(*end, PointRole::End);
            }
            EntityKind::Circle { center, .. } | EntityKind::Arc { center, .. } => {
                push(*center, PointRole::Center);
            }
            EntityKind::Polyline { vertices, .. } => {
                for v in vertices {
                    push(*v, PointRole::Vertex);
                }
            }
            _ => {}
        }
    }
    points
}
