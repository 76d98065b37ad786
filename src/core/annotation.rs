use super::{
    record::HeaderDescriptor,
    table::{KeyIndices, Row, Table},
    value::Value,
};
use crate::{
    constants::{
        ANN_ALLELE, ANN_COLUMN, ANN_DESCRIPTION_PREFIX, ANN_EFFECT, ANN_HGVS_C, ANN_NULL_VALUE,
        DEFAULT_SEVERITY,
    },
    utils::util::Result,
};
use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

/// Sort position of an effect term; ranked terms come before raw ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rank {
    Ranked(u32),
    /// Term absent from the ranking, compared lexically.
    Unranked(String),
    /// No effect term at all.
    Missing,
}

/// Ordering policy over effect terms, lower ranks being more severe.
pub trait SeverityRanking: Send + Sync {
    fn rank(&self, term: &str) -> Rank;
}

/// The built-in SnpEff effect ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSeverity;

impl SeverityRanking for DefaultSeverity {
    fn rank(&self, term: &str) -> Rank {
        DEFAULT_SEVERITY
            .get(term)
            .map_or_else(|| Rank::Unranked(term.to_string()), |&r| Rank::Ranked(r))
    }
}

/// Caller supplied effect ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityTable {
    ranks: HashMap<String, u32>,
}

impl SeverityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: impl Into<String>, rank: u32) {
        self.ranks.insert(term.into(), rank);
    }

    pub fn get(&self, term: &str) -> Option<u32> {
        self.ranks.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SeverityTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        SeverityTable {
            ranks: iter.into_iter().map(|(t, r)| (t.into(), r)).collect(),
        }
    }
}

impl SeverityRanking for SeverityTable {
    fn rank(&self, term: &str) -> Rank {
        self.get(term)
            .map_or_else(|| Rank::Unranked(term.to_string()), Rank::Ranked)
    }
}

/// Ranks the first `&`-joined term of an effect cell.
pub fn effect_rank(effect: &Value, ranking: &dyn SeverityRanking) -> Rank {
    match effect.to_text() {
        Some(text) => {
            let term = text.split('&').next().unwrap_or_default();
            ranking.rank(term)
        }
        None => Rank::Missing,
    }
}

/// Sub-field names of the ANN field as declared in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSchema {
    fields: Vec<String>,
}

impl AnnotationSchema {
    /// Parses `Functional annotations: 'Allele | Annotation | ...'`.
    pub fn from_description(description: &str) -> Self {
        let body = description.trim().trim_matches(['"', '\'', ' ']);
        let body = body.strip_prefix(ANN_DESCRIPTION_PREFIX).unwrap_or(body);
        let body = body.trim_matches(['"', '\'', ' ']);
        AnnotationSchema {
            fields: body.split('|').map(|f| f.trim().to_string()).collect(),
        }
    }

    pub fn from_header(header: &HeaderDescriptor) -> Option<Self> {
        header
            .definition(ANN_COLUMN)
            .map(|def| Self::from_description(&def.description))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Splits one annotation group on `|`, padding or truncating to the schema.
    pub fn parse_entry(&self, group: &str) -> (Vec<Value>, bool) {
        let mut values: Vec<Value> = group.split('|').map(Value::text).collect();
        let overflow = values.len() > self.fields.len();
        values.resize(self.fields.len(), Value::Missing);
        (values, overflow)
    }
}

struct Candidate {
    row: Row,
    allele_match: bool,
    rank: Rank,
}

/// Flattens ANN into one row per annotation and keeps the best one per variant.
///
/// Rows are ordered by (CHROM, POS, allele match first, rank) and the first
/// row of every (CHROM, POS, REF, ALT) survives. Rows without ANN are dropped.
/// Tables without an ANN column are returned unchanged.
pub fn prioritize_annotations(
    table: Table,
    schema: &AnnotationSchema,
    ranking: &dyn SeverityRanking,
) -> Result<Table> {
    let Some(ann_idx) = table.column_index(ANN_COLUMN) else {
        return Ok(table);
    };
    let keys = table.key_indices()?;
    let sample_name = table.sample_name().to_string();

    let mut columns: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| c.as_str() != ANN_COLUMN)
        .cloned()
        .collect();
    let base_width = columns.len();
    let mut field_targets = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        match columns.iter().position(|c| c == field) {
            Some(idx) => field_targets.push(idx),
            None => {
                field_targets.push(columns.len());
                columns.push(field.clone());
            }
        }
    }

    let allele_field = schema.position(ANN_ALLELE);
    let effect_field = schema.position(ANN_EFFECT);
    let hgvs_c_field = schema.position(ANN_HGVS_C);

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut dropped = 0usize;
    let mut overflowing = 0usize;
    for row in table.rows() {
        let Some(annotation) = row[ann_idx].to_text() else {
            dropped += 1;
            continue;
        };
        let alt = row[keys.alt].to_text();
        let base: Row = row
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != ann_idx)
            .map(|(_, v)| v.clone())
            .collect();

        for group in annotation.split(',') {
            let (mut entry, overflow) = schema.parse_entry(group);
            if overflow {
                overflowing += 1;
            }
            if let Some(idx) = hgvs_c_field {
                if entry[idx].as_text() == Some(ANN_NULL_VALUE) {
                    entry[idx] = Value::Missing;
                }
            }
            let allele_match = match (allele_field, alt.as_deref()) {
                (Some(idx), Some(alt)) => entry[idx].as_text() == Some(alt),
                _ => false,
            };
            let rank = effect_field.map_or(Rank::Missing, |idx| effect_rank(&entry[idx], ranking));

            let mut candidate_row = base.clone();
            candidate_row.resize(columns.len(), Value::Missing);
            for (value, &target) in entry.into_iter().zip(&field_targets) {
                candidate_row[target] = value;
            }
            candidates.push(Candidate {
                row: candidate_row,
                allele_match,
                rank,
            });
        }
    }

    if dropped > 0 {
        log::warn!("{dropped} variants without an {ANN_COLUMN} value were dropped");
    }
    if overflowing > 0 {
        log::warn!(
            "{overflowing} annotations had more sub-fields than the {} declared by the header",
            schema.fields().len()
        );
    }
    log::debug!(
        "Flattened {} annotations over {} columns ({} carried over)",
        candidates.len(),
        columns.len(),
        base_width
    );

    // Column positions before ANN keep their index, later ones shift left.
    let shift = |idx: usize| if idx > ann_idx { idx - 1 } else { idx };
    let identity = KeyIndices {
        chrom: shift(keys.chrom),
        pos: shift(keys.pos),
        reference: shift(keys.reference),
        alt: shift(keys.alt),
    };
    candidates.sort_by_cached_key(|c| {
        let key = identity.key(&c.row);
        (key.chrom, key.pos, Reverse(c.allele_match), c.rank.clone())
    });

    let mut seen = HashSet::with_capacity(candidates.len());
    let mut output = Table::new(columns).with_sample_name(sample_name);
    for candidate in candidates {
        if seen.insert(identity.key(&candidate.row)) {
            output.push_row(candidate.row);
        }
    }
    log::debug!("Kept {} prioritized annotations", output.len());
    Ok(output)
}
