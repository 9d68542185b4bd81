//! The canonical drawing: an ordered, immutable list of entities plus aggregates.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use crate::entity::{Entity, EntityKind, EntityType};
use crate::geometry::{BoundingBox, Point2};
use crate::metrics::{ComplexityInputs, ComplexityMetrics};
use crate::record::RawRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A record that could not be normalized and was left out of the drawing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkippedRecord {
    /// Position of the record in the input.
    pub index: usize,
    /// Type name as given in the record ("" when absent).
    pub entity_type: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Count and cutting length for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerStats {
    pub count: usize,
    pub length: f64,
}

/// Number of entities per type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntityCounts(BTreeMap<EntityType, usize>);

impl EntityCounts {
    fn add(&mut self, ty: EntityType) {
        *self.0.entry(ty).or_insert(0) += 1;
    }

    /// Count for one type.
    pub fn get(&self, ty: EntityType) -> usize {
        self.0.get(&ty).copied().unwrap_or(0)
    }

    /// Total number of entities.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Entities that produce cutting length.
    pub fn cutting(&self) -> usize {
        self.iter().filter(|(ty, _)| ty.is_cutting()).map(|(_, n)| n).sum()
    }

    /// Arcs, splines and ellipses.
    pub fn curved(&self) -> usize {
        self.iter().filter(|(ty, _)| ty.is_curve()).map(|(_, n)| n).sum()
    }

    /// Number of distinct cutting types present.
    pub fn distinct_cutting_types(&self) -> usize {
        self.iter().filter(|(ty, n)| ty.is_cutting() && *n > 0).count()
    }

    /// Iterates `(type, count)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityType, usize)> + '_ {
        self.0.iter().map(|(ty, n)| (*ty, *n))
    }
}

/// An immutable snapshot of one uploaded drawing.
///
/// Entity order is the source order and doubles as the initial cutting path.
/// All aggregates are computed once on construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Drawing {
    entities: Vec<Entity>,
    skipped: Vec<SkippedRecord>,
    bounding_box: BoundingBox,
    total_length: f64,
    counts: EntityCounts,
    layers: BTreeMap<String, LayerStats>,
    metrics: ComplexityMetrics,
}

impl Drawing {
    /// Builds a drawing from already-normalized entities.
    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self::build(entities, Vec::new())
    }

    /// Normalizes raw records, skipping (and logging) the ones that fail.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut entities = Vec::new();
        let mut skipped = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            let entity_type = record.kind.clone();
            match Entity::try_from(record) {
                Ok(entity) => entities.push(entity),
                Err(e) => skipped.push(skip(index, entity_type, e.to_string())),
            }
        }
        Self::build(entities, skipped)
    }

    /// Normalizes loosely-typed JSON records. Values that do not even deserialize
    /// into a [`RawRecord`] are skipped like any other malformed record.
    #[cfg(feature = "serde")]
    pub fn from_json_values(values: &[serde_json::Value]) -> Self {
        let mut entities = Vec::new();
        let mut skipped = Vec::new();
        for (index, value) in values.iter().enumerate() {
            let entity_type = value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            let parsed = serde_json::from_value::<RawRecord>(value.clone())
                .map_err(|e| crate::Error::ParseError(e.to_string()))
                .and_then(Entity::try_from);
            match parsed {
                Ok(entity) => entities.push(entity),
                Err(e) => skipped.push(skip(index, entity_type, e.to_string())),
            }
        }
        Self::build(entities, skipped)
    }

    /// Parses a JSON document holding either an array of records or an object
    /// with an `entities` array.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| crate::Error::ParseError(e.to_string()))?;
        let records = match &value {
            serde_json::Value::Array(items) => items.as_slice(),
            serde_json::Value::Object(map) => map
                .get("entities")
                .and_then(serde_json::Value::as_array)
                .map(Vec::as_slice)
                .ok_or_else(|| crate::Error::ParseError("expected an 'entities' array".into()))?,
            _ => {
                return Err(crate::Error::ParseError(
                    "expected an array of entity records".into(),
                ))
            }
        };
        Ok(Self::from_json_values(records))
    }

    fn build(entities: Vec<Entity>, skipped: Vec<SkippedRecord>) -> Self {
        let mut bounding_box: Option<BoundingBox> = None;
        let mut counts = EntityCounts::default();
        let mut layers: BTreeMap<String, LayerStats> = BTreeMap::new();
        let mut total_length = 0.0;
        let mut peak_density: f64 = 0.0;

        for entity in &entities {
            counts.add(entity.entity_type());
            total_length += entity.length();

            let stats = layers.entry(entity.layer().to_string()).or_default();
            stats.count += 1;
            stats.length += entity.length();

            if let Some(extent) = entity.extent() {
                bounding_box = Some(match bounding_box {
                    Some(bbox) => bbox.union(&extent),
                    None => extent,
                });
            }
            if let Some(bbox) = bounding_box {
                let area = bbox.area();
                if area > 0.0 {
                    peak_density = peak_density.max(counts.cutting() as f64 / area);
                }
            }
        }
        let bounding_box = bounding_box.unwrap_or_default();

        let inputs = ComplexityInputs {
            cutting_entities: counts.cutting(),
            distinct_cutting_types: counts.distinct_cutting_types(),
            layers: layers.len(),
            curved_entities: counts.curved(),
            area: bounding_box.area(),
            peak_density,
        };
        let metrics = ComplexityMetrics::compute(&entities, &inputs);

        log::debug!(
            "drawing built: {} entities, {} skipped, length {:.2} mm, complexity {:.1}",
            entities.len(),
            skipped.len(),
            total_length,
            metrics.complexity_score
        );

        Self {
            entities,
            skipped,
            bounding_box,
            total_length,
            counts,
            layers,
            metrics,
        }
    }

    /// Entities in source order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Records that were skipped during normalization.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the drawing has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bounding box over all entity extents (all zeros when empty).
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Sum of entity lengths in mm.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Per-type entity counts.
    pub fn counts(&self) -> &EntityCounts {
        &self.counts
    }

    /// Per-layer statistics, ordered by layer name.
    pub fn layer_stats(&self) -> &BTreeMap<String, LayerStats> {
        &self.layers
    }

    /// Distinct layer names.
    pub fn layers(&self) -> BTreeSet<&str> {
        self.layers.keys().map(String::as_str).collect()
    }

    /// Summary metrics.
    pub fn metrics(&self) -> &ComplexityMetrics {
        &self.metrics
    }

    /// Complexity score in `[0, 100]`.
    pub fn complexity_score(&self) -> f64 {
        self.metrics.complexity_score
    }

    /// Stable 64-bit hash of the drawing content: entity geometry, layers, and
    /// the skipped records.
    ///
    /// Two drawings built from the same records in the same order share a digest.
    /// The value is only stable within one build of the library.
    pub fn content_digest(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.entities.len().hash(&mut hasher);
        for entity in &self.entities {
            hash_entity(entity, &mut hasher);
        }
        for skipped in &self.skipped {
            skipped.index.hash(&mut hasher);
            skipped.entity_type.hash(&mut hasher);
            skipped.reason.hash(&mut hasher);
        }
        hasher.finish()
    }
}

fn skip(index: usize, entity_type: String, reason: String) -> SkippedRecord {
    log::warn!("skipping record {} ({}): {}", index, entity_type, reason);
    SkippedRecord {
        index,
        entity_type,
        reason,
    }
}

fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    // Normalize -0.0 so equal geometry hashes equally.
    let value = if value == 0.0 { 0.0 } else { value };
    value.to_bits().hash(state);
}

fn hash_point<H: Hasher>(p: &Point2, state: &mut H) {
    hash_f64(p.x, state);
    hash_f64(p.y, state);
}

fn hash_points<H: Hasher>(points: &[Point2], state: &mut H) {
    points.len().hash(state);
    for p in points {
        hash_point(p, state);
    }
}

fn hash_entity<H: Hasher>(entity: &Entity, state: &mut H) {
    entity.entity_type().hash(state);
    entity.layer().hash(state);
    match entity.kind() {
        EntityKind::Line { start, end } => {
            hash_point(start, state);
            hash_point(end, state);
        }
        EntityKind::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => {
            hash_point(center, state);
            hash_f64(*radius, state);
            hash_f64(*start_angle, state);
            hash_f64(*end_angle, state);
        }
        EntityKind::Circle { center, radius } => {
            hash_point(center, state);
            hash_f64(*radius, state);
        }
        EntityKind::Polyline { vertices, closed } => {
            hash_points(vertices, state);
            closed.hash(state);
        }
        EntityKind::Spline {
            control_points,
            degree,
            knots,
            weights,
        } => {
            hash_points(control_points, state);
            degree.hash(state);
            knots.len().hash(state);
            knots.iter().for_each(|k| hash_f64(*k, state));
            weights.len().hash(state);
            weights.iter().for_each(|w| hash_f64(*w, state));
        }
        EntityKind::Ellipse {
            center,
            major_axis,
            minor_axis,
            rotation,
        } => {
            hash_point(center, state);
            hash_f64(*major_axis, state);
            hash_f64(*minor_axis, state);
            hash_f64(*rotation, state);
        }
        EntityKind::Text { insert, content } => {
            insert.is_some().hash(state);
            if let Some(p) = insert {
                hash_point(p, state);
            }
            content.hash(state);
        }
        EntityKind::BlockRef { insert, name } => {
            hash_point(insert, state);
            name.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn rectangle() -> Vec<Entity> {
        vec![
            Entity::line((0.0, 0.0), (100.0, 0.0)),
            Entity::line((100.0, 0.0), (100.0, 50.0)),
            Entity::line((100.0, 50.0), (0.0, 50.0)),
            Entity::line((0.0, 50.0), (0.0, 0.0)),
        ]
    }

    #[test]
    fn test_rectangle_aggregates() {
        let drawing = Drawing::from_entities(rectangle());
        assert_relative_eq!(drawing.total_length(), 300.0);
        assert_eq!(drawing.counts().get(EntityType::Line), 4);
        assert_relative_eq!(drawing.bounding_box().width(), 100.0);
        assert_relative_eq!(drawing.bounding_box().height(), 50.0);
        assert_relative_eq!(drawing.bounding_box().area(), 5000.0);
        assert!(drawing.complexity_score() < 25.0);
        assert_eq!(drawing.layers().len(), 1);
    }

    #[test]
    fn test_empty_drawing() {
        let drawing = Drawing::from_entities(Vec::new());
        assert!(drawing.is_empty());
        assert!(drawing.bounding_box().is_empty());
        assert_eq!(drawing.total_length(), 0.0);
        assert_eq!(drawing.complexity_score(), 0.0);
    }

    #[test]
    fn test_circle_extent_in_bbox() {
        let drawing = Drawing::from_entities(vec![
            Entity::line((0.0, 0.0), (10.0, 0.0)),
            Entity::circle((50.0, 50.0), 20.0),
        ]);
        let bbox = drawing.bounding_box();
        assert_relative_eq!(bbox.max_x, 70.0);
        assert_relative_eq!(bbox.max_y, 70.0);
        assert_relative_eq!(bbox.min_y, 0.0);
    }

    #[test]
    fn test_layer_stats() {
        let drawing = Drawing::from_entities(vec![
            Entity::line((0.0, 0.0), (10.0, 0.0)).on_layer("CUT"),
            Entity::line((0.0, 0.0), (5.0, 0.0)).on_layer("CUT"),
            Entity::text((0.0, 0.0), "PART-1").on_layer("NOTES"),
        ]);
        let stats = drawing.layer_stats();
        assert_eq!(stats["CUT"].count, 2);
        assert_relative_eq!(stats["CUT"].length, 15.0);
        assert_eq!(stats["NOTES"].count, 1);
        assert_eq!(drawing.counts().cutting(), 2);
        assert_eq!(drawing.counts().total(), 3);
    }

    #[test]
    fn test_from_records_skips_malformed() {
        let good = RawRecord {
            start: Some((0.0, 0.0).into()),
            end: Some((10.0, 0.0).into()),
            ..RawRecord::new("LINE")
        };
        let missing_end = RawRecord {
            start: Some((0.0, 0.0).into()),
            ..RawRecord::new("LINE")
        };
        let unknown = RawRecord::new("HATCH");

        let drawing = Drawing::from_records(vec![good, missing_end, unknown]);
        assert_eq!(drawing.len(), 1);
        assert_eq!(drawing.skipped().len(), 2);
        assert_eq!(drawing.skipped()[0].index, 1);
        assert_eq!(drawing.skipped()[1].entity_type, "HATCH");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_str() {
        let json = r#"{"entities": [
            {"type": "LINE", "start": [0, 0], "end": [10, 0]},
            {"type": "CIRCLE", "center": [0, 0], "radius": "big"},
            42
        ]}"#;
        let drawing = Drawing::from_json_str(json).unwrap();
        assert_eq!(drawing.len(), 1);
        assert_eq!(drawing.skipped().len(), 2);
        assert_eq!(drawing.skipped()[1].entity_type, "CIRCLE");
        assert!(Drawing::from_json_str("\"nope\"").is_err());
    }

    #[test]
    fn test_content_digest() {
        let a = Drawing::from_entities(rectangle());
        let b = Drawing::from_entities(rectangle());
        assert_eq!(a.content_digest(), b.content_digest());

        let mut reordered = rectangle();
        reordered.swap(0, 1);
        let c = Drawing::from_entities(reordered);
        assert_ne!(a.content_digest(), c.content_digest());

        let with_skip = Drawing::from_records(vec![RawRecord::new("HATCH")]);
        let empty = Drawing::from_entities(Vec::new());
        assert_ne!(with_skip.content_digest(), empty.content_digest());
    }

    fn random_entity(rng: &mut StdRng) -> Entity {
        // Spans up to 5000 mm so some additions grow the bounding box.
        let x = rng.gen_range(-2500.0..2500.0);
        let y = rng.gen_range(-2500.0..2500.0);
        let layer = format!("L{}", rng.gen_range(0..10));
        let entity = match rng.gen_range(0..6) {
            0 => Entity::line((x, y), (x + rng.gen_range(0.0..10.0), y + rng.gen_range(0.0..10.0))),
            1 => Entity::circle((x, y), rng.gen_range(0.0..5.0)),
            2 => Entity::arc_deg((x, y), rng.gen_range(0.1..20.0), 0.0, rng.gen_range(1.0..360.0)),
            3 => Entity::ellipse((x, y), rng.gen_range(1.0..30.0), rng.gen_range(0.5..10.0)),
            4 => Entity::polyline(vec![(x, y), (x + 1.0, y), (x + 1.0, y + 1.0)], true),
            _ => Entity::text((x, y), "NOTE"),
        };
        entity.on_layer(layer)
    }

    #[test]
    fn test_appending_entities_never_lowers_score() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut entities: Vec<Entity> = (0..rng.gen_range(0..30))
                .map(|_| Entity::line((0.0, 0.0), (1.0, 1.0)))
                .collect();
            let mut previous = Drawing::from_entities(entities.clone()).complexity_score();
            for _ in 0..60 {
                entities.push(random_entity(&mut rng));
                let score = Drawing::from_entities(entities.clone()).complexity_score();
                assert!(
                    score >= previous,
                    "seed {}: score fell from {} to {} after {} entities",
                    seed,
                    previous,
                    score,
                    entities.len()
                );
                assert!((0.0..=100.0).contains(&score));
                previous = score;
            }
        }
    }

    #[test]
    fn test_long_line_after_dense_cluster() {
        let mut entities: Vec<Entity> = (0..10)
            .map(|i| Entity::line((0.0, i as f64 * 0.1), (1.0, i as f64 * 0.1)))
            .collect();
        entities.push(Entity::line((0.0, 0.0), (0.0, 1.0)));
        let base = Drawing::from_entities(entities.clone());

        entities.push(Entity::line((0.0, 0.0), (100.0, 0.0)));
        let extended = Drawing::from_entities(entities);
        assert!(extended.bounding_box().area() > base.bounding_box().area());
        assert!(extended.complexity_score() >= base.complexity_score());
    }

    #[test]
    fn test_digest_covers_skip_reason() {
        let missing = RawRecord {
            center: Some((0.0, 0.0).into()),
            ..RawRecord::new("CIRCLE")
        };
        let negative = RawRecord {
            radius: Some(-1.0),
            ..missing.clone()
        };
        let a = Drawing::from_records(vec![missing]);
        let b = Drawing::from_records(vec![negative]);
        assert_eq!(a.skipped()[0].entity_type, b.skipped()[0].entity_type);
        assert_ne!(a.content_digest(), b.content_digest());
    }
}
