//! Plain-text summaries for terminal output.

use std::fmt::Write;

use cutquote_core::Drawing;
use cutquote_cost::{CostAdvice, CostConfig, CostEstimate, Material, MaterialAlternative};
use cutquote_cutting::PathResult;
use cutquote_nesting::NestingResult;

const RULE_WIDTH: usize = 60;

fn rule(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{:=<width$}", "", width = RULE_WIDTH);
}

/// Entity counts, layers, length, and complexity of a drawing.
pub fn drawing_summary(drawing: &Drawing) -> String {
    let mut out = String::new();
    rule(&mut out, "Drawing");

    let bbox = drawing.bounding_box();
    let _ = writeln!(out, "  Entities:       {}", drawing.len());
    for (ty, count) in drawing.counts().iter() {
        let _ = writeln!(out, "    {:<14} {}", ty, count);
    }
    let _ = writeln!(out, "  Cutting length: {:.2} mm", drawing.total_length());
    let _ = writeln!(out, "  Extents:        {:.2} x {:.2} mm", bbox.width(), bbox.height());
    let _ = writeln!(out, "  Layers:         {}", drawing.layers().into_iter().collect::<Vec<_>>().join(", "));

    let metrics = drawing.metrics();
    let _ = writeln!(out, "  Complexity:     {:.1} / 100", metrics.complexity_score);
    if metrics.max_line_length > 0.0 {
        let _ = writeln!(
            out,
            "  Lines:          avg {:.2}, min {:.2}, max {:.2} mm",
            metrics.avg_line_length, metrics.min_line_length, metrics.max_line_length
        );
    }

    if !drawing.skipped().is_empty() {
        let _ = writeln!(out, "  Skipped records:");
        for skipped in drawing.skipped() {
            let _ = writeln!(
                out,
                "    #{} {}: {}",
                skipped.index, skipped.entity_type, skipped.reason
            );
        }
    }
    out
}

/// Cost breakdown, material comparison, and advice.
pub fn estimate_summary(
    estimate: &CostEstimate,
    alternatives: &[MaterialAlternative],
    advice: &CostAdvice,
    currency: &str,
) -> String {
    let mut out = String::new();
    rule(
        &mut out,
        &format!("Quote: {} {:.1} mm", estimate.material, estimate.thickness),
    );
    let _ = writeln!(out, "  Machining time: {:.2} min", estimate.machining_time);
    let _ = writeln!(out, "  Material:       {:>12.2} {}", estimate.material_cost, currency);
    let _ = writeln!(out, "  Labor:          {:>12.2} {}", estimate.labor_cost, currency);
    let _ = writeln!(out, "  Setup:          {:>12.2} {}", estimate.setup_cost, currency);
    let _ = writeln!(out, "  Tax:            {:>12.2} {}", estimate.tax_amount, currency);
    let _ = writeln!(out, "  Total:          {:>12.2} {}", estimate.total, currency);

    if !alternatives.is_empty() {
        let _ = writeln!(out, "\n  Materials (cheapest first):");
        for alt in alternatives {
            let marker = if alt.is_current { "*" } else { " " };
            let _ = writeln!(
                out,
                "   {} {:<10} {:>12.2} {}  time {:+.1}%",
                marker, alt.estimate.material, alt.estimate.total, currency, alt.time_change_pct
            );
        }
    }

    if !advice.suggestions.is_empty() {
        let _ = writeln!(out, "\n  Suggestions:");
        for s in &advice.suggestions {
            let _ = writeln!(out, "    [{:?}] {} ({})", s.priority, s.suggestion, s.reason);
        }
    }
    if let Some(cheapest) = &advice.cheapest_alternative {
        let _ = writeln!(
            out,
            "\n  Switching to {} saves {:.1}%",
            cheapest.estimate.material, advice.potential_savings_pct
        );
    }
    out
}

/// Path optimization outcome, optionally with every numbered step.
pub fn path_summary(path: &PathResult, with_steps: bool) -> String {
    let mut out = String::new();
    rule(&mut out, "Cutting path");
    let _ = writeln!(out, "  Points:           {}", path.len());
    let _ = writeln!(out, "  Original travel:  {:.2} mm", path.original_distance);
    let _ = writeln!(out, "  Optimized travel: {:.2} mm", path.optimized_distance);
    let _ = writeln!(
        out,
        "  Savings:          {:.2} mm ({:.1}%), ~{:.2} min",
        path.savings, path.savings_pct, path.estimated_time_saved_min
    );
    let _ = writeln!(
        out,
        "  2-opt:            {} passes, {} reversals",
        path.two_opt_passes, path.reversals
    );
    if path.status.is_capped() {
        let _ = writeln!(out, "  Status:           {:?}", path.status);
    }
    if with_steps {
        for step in path.steps() {
            let _ = writeln!(
                out,
                "  {:>5}  ({:>10.3}, {:>10.3})  {} #{} {:?}",
                step.step, step.x, step.y, step.entity_type, step.entity_index, step.role
            );
        }
    }
    out
}

/// Sheet candidates and the selected layout.
pub fn nesting_summary(nesting: &NestingResult) -> String {
    let mut out = String::new();
    rule(
        &mut out,
        &format!("Nesting: {:.2} x {:.2} mm part", nesting.part_width, nesting.part_height),
    );
    for (i, c) in nesting.candidates.iter().enumerate() {
        let marker = if nesting.best == Some(i) { "*" } else { " " };
        let cost = c
            .cost_per_part
            .map_or_else(|| "does not fit".to_string(), |cost| format!("{:.2}/part", cost));
        let _ = writeln!(
            out,
            " {} {:<14} {:>3} x {:<3} = {:>5} parts  {:>5.1}%  {}",
            marker,
            c.sheet_name,
            c.parts_per_row,
            c.parts_per_col,
            c.total_parts,
            c.utilization * 100.0,
            cost
        );
    }
    let _ = writeln!(out, "  Status: {:?}", nesting.status);
    for rec in &nesting.recommendations {
        let _ = writeln!(out, "  - {}", rec);
    }
    out
}

/// Machining parameters of every material under a cost profile.
pub fn materials_table(config: &CostConfig) -> String {
    let mut out = String::new();
    rule(&mut out, "Materials");
    let _ = writeln!(
        out,
        "  {:<10} {:>14} {:>14} {:>14}",
        "material", "feed mm/min", "cost/cm3", "rate/hour"
    );
    for material in Material::ALL {
        let props = config.properties(material);
        let _ = writeln!(
            out,
            "  {:<10} {:>14.1} {:>14.4} {:>14.1}",
            material, props.feed_rate, props.cost_per_cm3, props.hourly_rate
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutquote_core::Entity;
    use cutquote_nesting::Nester;

    #[test]
    fn test_drawing_summary_lists_counts() {
        let drawing = Drawing::from_entities(vec![
            Entity::line((0.0, 0.0), (10.0, 0.0)),
            Entity::circle((5.0, 5.0), 2.0),
        ]);
        let text = drawing_summary(&drawing);
        assert!(text.contains("Entities:       2"));
        assert!(text.contains("LINE"));
        assert!(text.contains("CIRCLE"));
    }

    #[test]
    fn test_nesting_summary_marks_best() {
        let nesting = Nester::default_config().nest(200.0, 100.0).unwrap();
        let text = nesting_summary(&nesting);
        assert!(text.contains("* 1250x2500mm"));
        assert!(text.contains("Good for batch production"));
    }

    #[test]
    fn test_materials_table() {
        let text = materials_table(&CostConfig::default());
        assert_eq!(text.lines().count(), 3 + Material::ALL.len());
        assert!(text.contains("steel"));
    }
}
