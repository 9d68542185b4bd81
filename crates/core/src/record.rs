//! Raw entity records as produced by the drawing parser, and their normalization.
//!
//! A [`RawRecord`] is deliberately loose: every geometric field is optional and
//! coordinates may arrive as `[x, y]`, `[x, y, z]` or `{ "x": .., "y": .. }`.
//! [`Entity::try_from`] checks that the fields required by the record's type are
//! present and finite, and produces a canonical [`Entity`].

use crate::entity::{Entity, EntityKind, DEFAULT_LAYER};
use crate::geometry::Point2;
use crate::spline;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate in any of the accepted encodings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawPoint {
    /// `[x, y]` or `[x, y, z]`.
    Seq(Vec<f64>),
    /// `{ "x": .., "y": .., "z": .. }`; `z` is optional and ignored.
    Named {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Z coordinate (ignored).
        #[cfg_attr(feature = "serde", serde(default))]
        z: f64,
    },
}

impl RawPoint {
    /// Converts to a finite 2D point, dropping any Z component.
    pub fn to_point(&self) -> Result<Point2> {
        let point = match self {
            RawPoint::Seq(coords) if coords.len() == 2 || coords.len() == 3 => {
                Point2::new(coords[0], coords[1])
            }
            RawPoint::Seq(coords) => {
                return Err(Error::ParseError(format!(
                    "point must have 2 or 3 coordinates, got {}",
                    coords.len()
                )))
            }
            RawPoint::Named { x, y, .. } => Point2::new(*x, *y),
        };
        if point.is_finite() {
            Ok(point)
        } else {
            Err(Error::ParseError("point coordinate is not finite".into()))
        }
    }
}

impl From<(f64, f64)> for RawPoint {
    fn from((x, y): (f64, f64)) -> Self {
        RawPoint::Seq(vec![x, y])
    }
}

/// Ellipse major axis: either the DXF endpoint vector (relative to the center) or a
/// plain full length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawAxis {
    /// Plain full axis length.
    Length(f64),
    /// Vector from the center to the end of the major axis.
    Vector(RawPoint),
}

/// One entity record from the parser.
///
/// `kind` carries the DXF type name (`LINE`, `ARC`, `CIRCLE`, `LWPOLYLINE`,
/// `POLYLINE`, `SPLINE`, `ELLIPSE`, `TEXT`, `MTEXT`, `INSERT`/`BLOCK_REFERENCE`).
/// Angles are in degrees.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawRecord {
    /// DXF type name.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Layer name; "0" when absent.
    pub layer: Option<String>,

    /// Line start.
    pub start: Option<RawPoint>,
    /// Line end.
    pub end: Option<RawPoint>,
    /// Arc, circle or ellipse center.
    pub center: Option<RawPoint>,
    /// Arc or circle radius.
    pub radius: Option<f64>,
    /// Arc start angle (degrees).
    pub start_angle: Option<f64>,
    /// Arc end angle (degrees).
    pub end_angle: Option<f64>,

    /// Polyline vertices.
    #[cfg_attr(feature = "serde", serde(alias = "vertices"))]
    pub points: Option<Vec<RawPoint>>,
    /// Polyline closed flag.
    #[cfg_attr(feature = "serde", serde(alias = "is_closed"))]
    pub closed: Option<bool>,

    /// Spline control polygon.
    pub control_points: Option<Vec<RawPoint>>,
    /// Spline degree (default 3).
    pub degree: Option<usize>,
    /// Spline knot vector.
    pub knots: Option<Vec<f64>>,
    /// Spline weights.
    pub weights: Option<Vec<f64>>,

    /// Ellipse major axis (vector or full length).
    pub major_axis: Option<RawAxis>,
    /// Ellipse minor axis full length.
    pub minor_axis: Option<f64>,
    /// Ellipse minor/major ratio.
    pub ratio: Option<f64>,
    /// Ellipse rotation (degrees), used when the major axis is a plain length.
    pub rotation: Option<f64>,

    /// Text or block insertion point.
    pub insert: Option<RawPoint>,
    /// Text content.
    #[cfg_attr(feature = "serde", serde(alias = "content"))]
    pub text: Option<String>,
    /// Block name.
    pub name: Option<String>,
}

impl RawRecord {
    /// Creates an empty record of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }
}

fn required<'a, T>(field: &'a Option<T>, name: &str, kind: &str) -> Result<&'a T> {
    field
        .as_ref()
        .ok_or_else(|| Error::ParseError(format!("{} record is missing '{}'", kind, name)))
}

fn finite(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::ParseError(format!("'{}' is not finite", name)))
    }
}

fn non_negative(value: f64, name: &str) -> Result<f64> {
    let value = finite(value, name)?;
    if value < 0.0 {
        Err(Error::ParseError(format!("'{}' must not be negative, got {}", name, value)))
    } else {
        Ok(value)
    }
}

fn points(raw: &[RawPoint]) -> Result<Vec<Point2>> {
    raw.iter().map(RawPoint::to_point).collect()
}

impl TryFrom<RawRecord> for Entity {
    type Error = Error;

    fn try_from(record: RawRecord) -> Result<Entity> {
        let type_name = record.kind.trim().to_ascii_uppercase();
        let kind = match type_name.as_str() {
            "LINE" => EntityKind::Line {
                start: required(&record.start, "start", &type_name)?.to_point()?,
                end: required(&record.end, "end", &type_name)?.to_point()?,
            },
            "ARC" => EntityKind::Arc {
                center: required(&record.center, "center", &type_name)?.to_point()?,
                radius: non_negative(*required(&record.radius, "radius", &type_name)?, "radius")?,
                start_angle: finite(*required(&record.start_angle, "start_angle", &type_name)?, "start_angle")?
                    .to_radians(),
                end_angle: finite(*required(&record.end_angle, "end_angle", &type_name)?, "end_angle")?
                    .to_radians(),
            },
            "CIRCLE" => EntityKind::Circle {
                center: required(&record.center, "center", &type_name)?.to_point()?,
                radius: non_negative(*required(&record.radius, "radius", &type_name)?, "radius")?,
            },
            "LWPOLYLINE" | "POLYLINE" => EntityKind::Polyline {
                vertices: points(required(&record.points, "points", &type_name)?)?,
                closed: record.closed.unwrap_or(false),
            },
            "SPLINE" => spline_kind(&record, &type_name)?,
            "ELLIPSE" => ellipse_kind(&record, &type_name)?,
            "TEXT" | "MTEXT" => EntityKind::Text {
                insert: record.insert.as_ref().map(RawPoint::to_point).transpose()?,
                content: record.text.clone().unwrap_or_default(),
            },
            "INSERT" | "BLOCK_REFERENCE" => EntityKind::BlockRef {
                insert: required(&record.insert, "insert", &type_name)?.to_point()?,
                name: record.name.clone().unwrap_or_default(),
            },
            other => {
                return Err(Error::ParseError(format!("unsupported entity type '{}'", other)));
            }
        };

        let layer = record
            .layer
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LAYER.to_string());
        Ok(Entity::new(kind, layer))
    }
}

fn spline_kind(record: &RawRecord, type_name: &str) -> Result<EntityKind> {
    let control_points = points(required(&record.control_points, "control_points", type_name)?)?;
    let n = control_points.len();
    let degree = spline::effective_degree(record.degree.unwrap_or(spline::DEFAULT_SPLINE_DEGREE), n);

    let knots = match &record.knots {
        Some(knots) if n >= 2 => {
            spline::validate_knots(knots, n, degree)?;
            knots.clone()
        }
        _ => spline::clamped_uniform_knots(n, degree),
    };

    let weights = match &record.weights {
        Some(weights) if !weights.is_empty() => {
            if weights.len() != n {
                return Err(Error::ParseError(format!(
                    "spline has {} control points but {} weights",
                    n,
                    weights.len()
                )));
            }
            if weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
                return Err(Error::ParseError("spline weights must be finite and positive".into()));
            }
            weights.clone()
        }
        _ => Vec::new(),
    };

    Ok(EntityKind::Spline {
        control_points,
        degree,
        knots,
        weights,
    })
}

fn ellipse_kind(record: &RawRecord, type_name: &str) -> Result<EntityKind> {
    let center = required(&record.center, "center", type_name)?.to_point()?;
    let explicit_rotation = finite(record.rotation.unwrap_or(0.0), "rotation")?.to_radians();

    let (major_axis, rotation) = match required(&record.major_axis, "major_axis", type_name)? {
        RawAxis::Length(length) => (non_negative(*length, "major_axis")?, explicit_rotation),
        RawAxis::Vector(v) => {
            // The DXF vector runs from the center to one end of the major axis.
            let v = v.to_point()?;
            (2.0 * v.x.hypot(v.y), v.y.atan2(v.x))
        }
    };

    let minor_axis = match (record.minor_axis, record.ratio) {
        (Some(minor), _) => non_negative(minor, "minor_axis")?,
        (None, Some(ratio)) => major_axis * non_negative(ratio, "ratio")?,
        (None, None) => {
            return Err(Error::ParseError(format!(
                "{} record needs 'minor_axis' or 'ratio'",
                type_name
            )));
        }
    };

    Ok(EntityKind::Ellipse {
        center,
        major_axis,
        minor_axis,
        rotation,
    })
}
