//! Calculated-series synthesis.
//!
//! At most one derived series is produced per render pass from the panel's
//! `calcul` configuration: the expression is compiled once, then evaluated
//! per sample index with each referenced series' value substituted in.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::api::config::CalculConfig;
use crate::core::{CompiledExpression, Series};

/// Builds or replaces the derived series described by `calcul`.
///
/// No-op when the expression references no series, when more source series
/// match than distinct placeholders exist (ambiguous match), or when no
/// source series matches at all. With `calcul.show == false` the consumed
/// source series are removed afterwards, which makes repeated application
/// idempotent: the second pass finds no sources and does nothing.
pub fn synthesize_calculated_series(series: &mut Vec<Series>, calcul: &CalculConfig) {
    let expression = CompiledExpression::compile(&calcul.operation);
    if expression.is_inert() {
        return;
    }

    let mut source_indices: Vec<usize> = Vec::new();
    let mut target_index: Option<usize> = None;
    for (index, entry) in series.iter().enumerate() {
        let key = format!("{{{}}}", entry.alias);
        if expression.placeholders().contains(key.as_str()) {
            source_indices.push(index);
        }
        if entry.alias == calcul.name {
            target_index = Some(index);
        }
    }

    if source_indices.is_empty() {
        debug!(
            operation = %calcul.operation,
            "no series match calculated-series placeholders; skipping synthesis"
        );
        return;
    }
    if source_indices.len() > expression.placeholders().len() {
        warn!(
            matched = source_indices.len(),
            placeholders = expression.placeholders().len(),
            "ambiguous calculated-series match; skipping synthesis"
        );
        return;
    }

    // Clone the last matched source as the template when no series already
    // carries the target alias.
    let appended = target_index.is_none();
    let mut target = match target_index {
        Some(index) => series[index].clone(),
        None => series[source_indices[source_indices.len() - 1]].clone(),
    };

    target.alias = calcul.name.clone();
    target.id = calcul.name.clone();
    target.label = calcul.name.clone();
    target.color = format!("#{}", calcul.color);

    target.data.clear();
    for sample in 0..target.datapoints.len() {
        let mut values: HashMap<&str, Option<f64>> =
            HashMap::with_capacity(source_indices.len());
        for &source in &source_indices {
            let entry = &series[source];
            let key = expression
                .placeholders()
                .get(format!("{{{}}}", entry.alias).as_str())
                .map(|stored| stored.as_str());
            if let Some(key) = key {
                values.insert(key, entry.datapoints.get(sample).and_then(|point| point.value));
            }
        }

        let result = expression.evaluate(&values);
        let time = target.datapoints[sample].time;
        target.datapoints[sample].value = Some(result);
        target.data.push((time, result));
    }

    match target_index {
        Some(index) => series[index] = target,
        None => series.push(target),
    }
    debug!(
        name = %calcul.name,
        appended,
        sources = source_indices.len(),
        "synthesized calculated series"
    );

    if !calcul.show {
        // Descending order keeps the remaining removal indices valid.
        for &source in source_indices.iter().rev() {
            series.remove(source);
        }
    }
}
