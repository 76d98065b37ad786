use super::{table::Table, value::Value};
use crate::constants::COL_POS;
use std::collections::HashSet;

/// Upper-cases every column name.
///
/// When two names collide after upper-casing, the first column wins and the
/// later one is dropped.
pub fn uppercase_columns(table: Table) -> Table {
    let sample_name = table.sample_name().to_string();
    let upper: Vec<String> = table.columns().iter().map(|c| c.to_uppercase()).collect();

    let mut seen = HashSet::with_capacity(upper.len());
    let keep: Vec<bool> = upper.iter().map(|name| seen.insert(name.clone())).collect();
    let collisions: Vec<&str> = table
        .columns()
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| !**kept)
        .map(|(name, _)| name.as_str())
        .collect();
    if !collisions.is_empty() {
        log::warn!(
            "Dropping columns that collide once upper-cased: {}",
            collisions.join(", ")
        );
    }

    let columns: Vec<String> = upper
        .into_iter()
        .zip(&keep)
        .filter_map(|(name, kept)| kept.then_some(name))
        .collect();
    let mut output = Table::new(columns).with_sample_name(sample_name);
    for row in table.rows() {
        output.push_row(
            row.iter()
                .zip(&keep)
                .filter_map(|(value, kept)| kept.then(|| value.clone()))
                .collect(),
        );
    }
    output
}

/// Renders every cell as output text with `.` for missing, empty or null
/// values. POS stays an integer.
pub fn finalize(mut table: Table) -> Table {
    table.map_values(|column, value| {
        if column == COL_POS {
            return match value {
                Value::Integer(_) => value,
                other => other
                    .as_f64()
                    .filter(|p| p.is_finite())
                    .map_or_else(|| Value::text(other.to_output_text()), |p| {
                        Value::Integer(p as i64)
                    }),
            };
        }
        Value::Text(value.to_output_text())
    });
    table
}
