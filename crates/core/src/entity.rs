//! Canonical drawing entities and their length formulas.
//!
//! An [`Entity`] is a closed tagged variant ([`EntityKind`]) plus the shared
//! fields every entity carries: its layer and its derived length. The length is
//! computed exactly once in [`Entity::new`] and cannot be changed afterwards.
//!
//! | Kind | Length |
//! |------|--------|
//! | Line | Euclidean distance between endpoints |
//! | Arc | `radius * sweep`, sweep normalized into `[0, 2π)` |
//! | Circle | `2π * radius` |
//! | Polyline | sum of segment lengths, closing segment included when closed |
//! | Spline | polyline through 51 samples of the curve |
//! | Ellipse | Ramanujan's perimeter approximation |
//! | Text, BlockRef | zero |

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::geometry::{BoundingBox, Point2};
use crate::spline;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry of a single drawing entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum EntityKind {
    /// Straight segment.
    Line {
        /// Start point.
        start: Point2,
        /// End point.
        end: Point2,
    },
    /// Circular arc, counter-clockwise from `start_angle` to `end_angle` (radians).
    Arc {
        /// Arc center.
        center: Point2,
        /// Arc radius.
        radius: f64,
        /// Start angle in radians.
        start_angle: f64,
        /// End angle in radians.
        end_angle: f64,
    },
    /// Full circle.
    Circle {
        /// Circle center.
        center: Point2,
        /// Circle radius.
        radius: f64,
    },
    /// Open or closed polyline.
    Polyline {
        /// Vertices in order.
        vertices: Vec<Point2>,
        /// Whether the last vertex connects back to the first.
        closed: bool,
    },
    /// B-spline or NURBS curve.
    Spline {
        /// Control polygon.
        control_points: Vec<Point2>,
        /// Curve degree (already clamped to what the control polygon supports).
        degree: usize,
        /// Knot vector (`control_points.len() + degree + 1` entries).
        knots: Vec<f64>,
        /// Rational weights; empty for a non-rational spline.
        weights: Vec<f64>,
    },
    /// Full ellipse.
    Ellipse {
        /// Ellipse center.
        center: Point2,
        /// Full length of the major axis.
        major_axis: f64,
        /// Full length of the minor axis.
        minor_axis: f64,
        /// Rotation of the major axis from +X, in radians.
        rotation: f64,
    },
    /// Text annotation (not cut).
    Text {
        /// Insertion point, if known.
        insert: Option<Point2>,
        /// Text content.
        content: String,
    },
    /// Block reference (not expanded, not cut).
    BlockRef {
        /// Insertion point.
        insert: Point2,
        /// Referenced block name.
        name: String,
    },
}

/// Fieldless discriminant of [`EntityKind`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntityType {
    /// Line.
    Line,
    /// Arc.
    Arc,
    /// Circle.
    Circle,
    /// Polyline.
    Polyline,
    /// Spline.
    Spline,
    /// Ellipse.
    Ellipse,
    /// Text.
    Text,
    /// Block reference.
    BlockRef,
}

impl EntityType {
    /// All entity types in declaration order.
    pub const ALL: [EntityType; 8] = [
        EntityType::Line,
        EntityType::Arc,
        EntityType::Circle,
        EntityType::Polyline,
        EntityType::Spline,
        EntityType::Ellipse,
        EntityType::Text,
        EntityType::BlockRef,
    ];

    /// Types that produce cutting length.
    pub const CUTTING: [EntityType; 6] = [
        EntityType::Line,
        EntityType::Arc,
        EntityType::Circle,
        EntityType::Polyline,
        EntityType::Spline,
        EntityType::Ellipse,
    ];

    /// Returns true if the entity is cut (everything except text and block references).
    pub fn is_cutting(self) -> bool {
        !matches!(self, EntityType::Text | EntityType::BlockRef)
    }

    /// Returns true for curved entity types (arcs, splines, ellipses).
    pub fn is_curve(self) -> bool {
        matches!(self, EntityType::Arc | EntityType::Spline | EntityType::Ellipse)
    }

    /// DXF-style upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Line => "LINE",
            EntityType::Arc => "ARC",
            EntityType::Circle => "CIRCLE",
            EntityType::Polyline => "POLYLINE",
            EntityType::Spline => "SPLINE",
            EntityType::Ellipse => "ELLIPSE",
            EntityType::Text => "TEXT",
            EntityType::BlockRef => "BLOCK_REFERENCE",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EntityKind {
    /// Returns the fieldless type of this entity.
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityKind::Line { .. } => EntityType::Line,
            EntityKind::Arc { .. } => EntityType::Arc,
            EntityKind::Circle { .. } => EntityType::Circle,
            EntityKind::Polyline { .. } => EntityType::Polyline,
            EntityKind::Spline { .. } => EntityType::Spline,
            EntityKind::Ellipse { .. } => EntityType::Ellipse,
            EntityKind::Text { .. } => EntityType::Text,
            EntityKind::BlockRef { .. } => EntityType::BlockRef,
        }
    }

    /// Computes the cutting length of this geometry. Never negative.
    pub fn length(&self) -> f64 {
        let length = match self {
            EntityKind::Line { start, end } => start.distance_to(end),
            EntityKind::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => radius * arc_sweep(*start_angle, *end_angle),
            EntityKind::Circle { radius, .. } => TAU * radius,
            EntityKind::Polyline { vertices, closed } => polyline_length(vertices, *closed),
            EntityKind::Spline {
                control_points,
                degree,
                knots,
                weights,
            } => {
                let samples = spline::sample(control_points, *degree, knots, weights);
                polyline_length(&samples, false)
            }
            EntityKind::Ellipse {
                major_axis,
                minor_axis,
                ..
            } => ramanujan_perimeter(*major_axis, *minor_axis),
            EntityKind::Text { .. } | EntityKind::BlockRef { .. } => 0.0,
        };

        if length.is_finite() {
            length.max(0.0)
        } else {
            0.0
        }
    }

    /// Axis-aligned extent of the entity, or `None` if it has no position.
    pub fn extent(&self) -> Option<BoundingBox> {
        match self {
            EntityKind::Line { start, end } => {
                let mut bbox = BoundingBox::from_point(*start);
                bbox.include(*end);
                Some(bbox)
            }
            EntityKind::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => Some(arc_extent(*center, *radius, *start_angle, *end_angle)),
            EntityKind::Circle { center, radius } => Some(BoundingBox::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            )),
            EntityKind::Polyline { vertices, .. } => points_extent(vertices),
            // A B-spline lies within the convex hull of its control polygon.
            EntityKind::Spline { control_points, .. } => points_extent(control_points),
            EntityKind::Ellipse {
                center,
                major_axis,
                minor_axis,
                rotation,
            } => {
                let a = major_axis / 2.0;
                let b = minor_axis / 2.0;
                let (sin, cos) = rotation.sin_cos();
                let half_w = ((a * cos).powi(2) + (b * sin).powi(2)).sqrt();
                let half_h = ((a * sin).powi(2) + (b * cos).powi(2)).sqrt();
                Some(BoundingBox::new(
                    center.x - half_w,
                    center.y - half_h,
                    center.x + half_w,
                    center.y + half_h,
                ))
            }
            EntityKind::Text { insert, .. } => insert.map(BoundingBox::from_point),
            EntityKind::BlockRef { insert, .. } => Some(BoundingBox::from_point(*insert)),
        }
    }
}

/// A canonical drawing entity.
///
/// Fields are private so the derived length stays consistent with the geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Entity {
    #[cfg_attr(feature = "serde", serde(flatten))]
    kind: EntityKind,
    layer: String,
    length: f64,
}

impl Entity {
    /// Creates an entity and computes its length.
    pub fn new(kind: EntityKind, layer: impl Into<String>) -> Self {
        let length = kind.length();
        Self {
            kind,
            layer: layer.into(),
            length,
        }
    }

    /// Line from `start` to `end` on layer "0".
    pub fn line(start: impl Into<Point2>, end: impl Into<Point2>) -> Self {
        Self::new(
            EntityKind::Line {
                start: start.into(),
                end: end.into(),
            },
            DEFAULT_LAYER,
        )
    }

    /// Arc on layer "0", angles in degrees.
    pub fn arc_deg(center: impl Into<Point2>, radius: f64, start_deg: f64, end_deg: f64) -> Self {
        Self::new(
            EntityKind::Arc {
                center: center.into(),
                radius,
                start_angle: start_deg.to_radians(),
                end_angle: end_deg.to_radians(),
            },
            DEFAULT_LAYER,
        )
    }

    /// Circle on layer "0".
    pub fn circle(center: impl Into<Point2>, radius: f64) -> Self {
        Self::new(
            EntityKind::Circle {
                center: center.into(),
                radius,
            },
            DEFAULT_LAYER,
        )
    }

    /// Polyline on layer "0".
    pub fn polyline(vertices: Vec<(f64, f64)>, closed: bool) -> Self {
        Self::new(
            EntityKind::Polyline {
                vertices: vertices.into_iter().map(Point2::from).collect(),
                closed,
            },
            DEFAULT_LAYER,
        )
    }

    /// Non-rational spline on layer "0" with a clamped uniform knot vector.
    pub fn spline(control_points: Vec<(f64, f64)>, degree: usize) -> Self {
        let control_points: Vec<Point2> = control_points.into_iter().map(Point2::from).collect();
        let degree = spline::effective_degree(degree, control_points.len());
        let knots = spline::clamped_uniform_knots(control_points.len(), degree);
        Self::new(
            EntityKind::Spline {
                control_points,
                degree,
                knots,
                weights: Vec::new(),
            },
            DEFAULT_LAYER,
        )
    }

    /// Axis-aligned ellipse on layer "0" (full axis lengths).
    pub fn ellipse(center: impl Into<Point2>, major_axis: f64, minor_axis: f64) -> Self {
        Self::new(
            EntityKind::Ellipse {
                center: center.into(),
                major_axis,
                minor_axis,
                rotation: 0.0,
            },
            DEFAULT_LAYER,
        )
    }

    /// Text on layer "0".
    pub fn text(insert: impl Into<Point2>, content: impl Into<String>) -> Self {
        Self::new(
            EntityKind::Text {
                insert: Some(insert.into()),
                content: content.into(),
            },
            DEFAULT_LAYER,
        )
    }

    /// Block reference on layer "0".
    pub fn block_ref(insert: impl Into<Point2>, name: impl Into<String>) -> Self {
        Self::new(
            EntityKind::BlockRef {
                insert: insert.into(),
                name: name.into(),
            },
            DEFAULT_LAYER,
        )
    }

    /// Returns a copy of this entity moved to another layer.
    pub fn on_layer(self, layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            ..self
        }
    }

    /// Entity geometry.
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Fieldless entity type.
    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    /// Layer name.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Derived cutting length (zero for text and block references).
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Axis-aligned extent.
    pub fn extent(&self) -> Option<BoundingBox> {
        self.kind.extent()
    }
}

/// Layer used when a record does not name one.
pub const DEFAULT_LAYER: &str = "0";

/// Counter-clockwise sweep from `start` to `end`, normalized into `[0, 2π)`.
pub fn arc_sweep(start: f64, end: f64) -> f64 {
    let sweep = (end - start).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if sweep >= TAU {
        0.0
    } else {
        sweep
    }
}

/// Sum of consecutive distances, plus the closing segment when `closed`.
pub fn polyline_length(vertices: &[Point2], closed: bool) -> f64 {
    let open: f64 = vertices.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    match (closed, vertices.first(), vertices.last()) {
        (true, Some(first), Some(last)) if vertices.len() > 1 => open + last.distance_to(first),
        _ => open,
    }
}

/// Ramanujan's ellipse perimeter for full axis lengths `major` and `minor`.
pub fn ramanujan_perimeter(major: f64, minor: f64) -> f64 {
    let a = major / 2.0;
    let b = minor / 2.0;
    if a + b <= 0.0 {
        return 0.0;
    }
    let h = ((a - b) / (a + b)).powi(2);
    PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

fn points_extent(points: &[Point2]) -> Option<BoundingBox> {
    let (first, rest) = points.split_first()?;
    let mut bbox = BoundingBox::from_point(*first);
    for p in rest {
        bbox.include(*p);
    }
    Some(bbox)
}

fn arc_extent(center: Point2, radius: f64, start: f64, end: f64) -> BoundingBox {
    let point_at = |angle: f64| Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin());
    let sweep = arc_sweep(start, end);
    let mut bbox = BoundingBox::from_point(point_at(start));
    bbox.include(point_at(start + sweep));

    // Axis crossings (0, 90, 180, 270 degrees) inside the sweep.
    for quadrant in 0..4 {
        let axis = quadrant as f64 * FRAC_PI_2;
        if arc_sweep(start, axis) <= sweep {
            bbox.include(point_at(axis));
        }
    }
    bbox
}
