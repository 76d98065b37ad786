use super::{
    record::VariantKey,
    table::{KeyIndices, Row, Table},
    value::Value,
};
use crate::{
    constants::{SplitPolicy, ALLELE_INDEXED_COLUMNS, ALLELE_SPLIT_POLICY, COL_POS, MULTI_VALUE_PREFIXES},
    utils::util::Result,
};
use std::{
    borrow::Cow,
    collections::{hash_map::Entry, HashMap},
};

/// Comma segments of an allele-indexed value under `policy`.
pub fn allele_segments(value: &str, policy: SplitPolicy) -> Vec<&str> {
    match policy {
        SplitPolicy::Binary => value.splitn(2, ',').collect(),
    }
}

/// Columns whose values are realigned when an ALT is split.
pub fn allele_indexed_columns(table: &Table) -> Vec<usize> {
    let mut indices: Vec<usize> = ALLELE_INDEXED_COLUMNS
        .iter()
        .filter_map(|name| table.column_index(name))
        .collect();
    for (idx, name) in table.columns().iter().enumerate() {
        if MULTI_VALUE_PREFIXES.iter().any(|p| name.starts_with(p)) && !indices.contains(&idx) {
            indices.push(idx);
        }
    }
    indices
}

/// Replaces every multi-allelic row by one row per ALT segment.
///
/// Rows without a comma in ALT pass through untouched. A split allele that
/// repeats the key of another row is collapsed into a single row.
pub fn split_alleles(table: Table) -> Result<Table> {
    split_alleles_with(table, ALLELE_SPLIT_POLICY)
}

pub fn split_alleles_with(mut table: Table, policy: SplitPolicy) -> Result<Table> {
    let keys = table.key_indices()?;
    let split_columns = allele_indexed_columns(&table);

    let mut rows: Vec<Row> = Vec::with_capacity(table.len());
    let mut n_split = 0usize;
    for row in table.rows() {
        let alt = row[keys.alt].to_text().unwrap_or(Cow::Borrowed(""));
        if !alt.contains(',') {
            rows.push(row.clone());
            continue;
        }
        n_split += 1;

        let alleles = allele_segments(&alt, policy);
        for (allele_idx, allele) in alleles.iter().enumerate() {
            let mut split_row = row.clone();
            split_row[keys.alt] = Value::text(strip_parentheses(allele));
            for &col in &split_columns {
                split_row[col] = realign(&row[col], allele_idx, policy);
            }
            rows.push(split_row);
        }
    }

    if n_split > 0 {
        log::debug!(
            "Split {} multi-allelic rows, {} rows after splitting",
            n_split,
            rows.len()
        );
    }

    let rows = collapse_repeated_keys(rows, &keys);
    table.replace_rows(rows);
    table.map_column(COL_POS, coerce_position);
    Ok(table)
}

/// One row per (CHROM, POS, REF, ALT); a later row replaces an earlier one
/// in place.
fn collapse_repeated_keys(rows: Vec<Row>, keys: &KeyIndices) -> Vec<Row> {
    let mut position: HashMap<VariantKey, usize> = HashMap::with_capacity(rows.len());
    let mut collapsed: Vec<Row> = Vec::with_capacity(rows.len());
    let mut replaced = 0usize;
    for row in rows {
        match position.entry(keys.key(&row)) {
            Entry::Occupied(entry) => {
                collapsed[*entry.get()] = row;
                replaced += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(collapsed.len());
                collapsed.push(row);
            }
        }
    }
    if replaced > 0 {
        log::warn!("{replaced} split alleles repeated an existing CHROM/POS/REF/ALT and replaced it");
    }
    collapsed
}

fn realign(value: &Value, allele_idx: usize, policy: SplitPolicy) -> Value {
    let Some(text) = value.to_text() else {
        return Value::Missing;
    };
    let segments = allele_segments(&text, policy);
    if segments.len() <= 1 {
        return match value {
            Value::Text(s) => Value::text(strip_parentheses(s)),
            other => other.clone(),
        };
    }
    segments
        .get(allele_idx)
        .map_or(Value::Missing, |segment| Value::text(strip_parentheses(segment)))
}

fn strip_parentheses(value: &str) -> String {
    value.chars().filter(|c| *c != '(' && *c != ')').collect()
}

fn coerce_position(value: Value) -> Value {
    match value {
        Value::Integer(_) => value,
        Value::Number(n) if n.is_finite() => Value::Integer(n as i64),
        Value::Text(ref s) => s.trim().parse::<i64>().map_or(value, Value::Integer),
        other => other,
    }
}
