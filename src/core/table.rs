use super::{record::VariantKey, value::Value};
use crate::{
    constants::{COL_ALT, COL_CHROM, COL_POS, COL_REF},
    utils::util::Result,
};

pub type Row = Vec<Value>;

/// Row-oriented variant table with a shared column set.
///
/// Pipeline stages consume a `Table` and hand back a new one, so a stage
/// never observes another stage's partial edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
    sample_name: String,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
            sample_name: String::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(crate::vcfframe_error!(
                "Row {} has {} cells, expected {}",
                idx,
                row.len(),
                columns.len()
            ));
        }
        Ok(Table {
            columns,
            rows,
            sample_name: String::new(),
        })
    }

    pub fn with_sample_name(mut self, sample_name: impl Into<String>) -> Self {
        self.sample_name = sample_name.into();
        self
    }

    pub fn sample_name(&self) -> &str {
        &self.sample_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    pub fn column_values(&self, column: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| &r[col]))
    }

    /// Column index, appending an all-missing column when absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Value::Missing);
        }
        self.columns.len() - 1
    }

    pub fn push_row(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Sets or replaces `name` with one value per row, computed from the row.
    pub fn set_column_with<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&Row) -> Value,
    {
        let values: Vec<Value> = self.rows.iter().map(&mut f).collect();
        let idx = self.ensure_column(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }

    /// Rewrites every cell of `name`; returns false when the column is absent.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> bool
    where
        F: FnMut(Value) -> Value,
    {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            let value = std::mem::take(&mut row[idx]);
            row[idx] = f(value);
        }
        true
    }

    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, Value) -> Value,
    {
        for row in &mut self.rows {
            for (name, cell) in self.columns.iter().zip(row.iter_mut()) {
                let value = std::mem::take(cell);
                *cell = f(name, value);
            }
        }
    }

    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Renames `from` in place; a pre-existing `to` column is replaced.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if !self.has_column(from) {
            return false;
        }
        if from != to {
            self.drop_column(to);
        }
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
        true
    }

    /// Resolves the (CHROM, POS, REF, ALT) column positions.
    pub fn key_indices(&self) -> Result<KeyIndices> {
        let find = |name: &str| {
            self.column_index(name)
                .ok_or_else(|| crate::error::VcfFrameError::MissingColumn(name.to_string()))
        };
        Ok(KeyIndices {
            chrom: find(COL_CHROM)?,
            pos: find(COL_POS)?,
            reference: find(COL_REF)?,
            alt: find(COL_ALT)?,
        })
    }

    pub fn keys(&self) -> Result<Vec<VariantKey>> {
        let idx = self.key_indices()?;
        Ok(self.rows.iter().map(|row| idx.key(row)).collect())
    }

    pub(crate) fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeyIndices {
    pub chrom: usize,
    pub pos: usize,
    pub reference: usize,
    pub alt: usize,
}

impl KeyIndices {
    pub fn key(&self, row: &Row) -> VariantKey {
        let text = |idx: usize| {
            row[idx]
                .to_text()
                .map(|s| s.into_owned())
                .unwrap_or_default()
        };
        let pos = match &row[self.pos] {
            Value::Integer(p) => *p,
            other => other.as_f64().map_or(0, |p| p as i64),
        };
        VariantKey {
            chrom: text(self.chrom),
            pos,
            reference: text(self.reference),
            alt: text(self.alt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> Table {
        Table::from_rows(
            vec!["CHROM".into(), "POS".into(), "REF".into(), "ALT".into(), "AF".into()],
            vec![
                vec!["1".into(), 10i64.into(), "A".into(), "G".into(), 0.5.into()],
                vec!["2".into(), 20i64.into(), "C".into(), "T".into(), Value::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let result = Table::from_rows(vec!["A".into(), "B".into()], vec![vec!["x".into()]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_column_edits() {
        let mut table = small_table();
        assert!(table.has_column("AF"));
        assert!(table.rename_column("AF", "FREQ"));
        assert!(!table.has_column("AF"));
        assert_eq!(table.get(0, "FREQ"), Some(&Value::Number(0.5)));

        table.set_column_with("FLAG", |row| Value::from(row[3] == Value::text("G")));
        assert_eq!(table.get(0, "FLAG"), Some(&Value::Flag(true)));
        assert_eq!(table.get(1, "FLAG"), Some(&Value::Flag(false)));

        assert!(table.drop_column("FLAG"));
        assert!(!table.drop_column("FLAG"));
        assert_eq!(table.columns().len(), 5);
    }

    #[test]
    fn test_rename_replaces_existing_target() {
        let mut table = small_table();
        table.set_column_with("FREQ", |_| Value::text("old"));
        assert!(table.rename_column("AF", "FREQ"));
        assert_eq!(table.columns().iter().filter(|c| *c == "FREQ").count(), 1);
        assert_eq!(table.get(0, "FREQ"), Some(&Value::Number(0.5)));
        assert_eq!(table.columns().len(), 5);
    }

    #[test]
    fn test_map_column_and_keys() {
        let mut table = small_table();
        assert!(table.map_column("REF", |v| match v {
            Value::Text(s) => Value::Text(s.to_lowercase()),
            other => other,
        }));
        assert!(!table.map_column("NOPE", |v| v));

        let keys = table.keys().unwrap();
        assert_eq!(keys[0], VariantKey::new("1", 10, "a", "G"));
        assert_eq!(keys[1], VariantKey::new("2", 20, "c", "T"));
    }

    #[test]
    fn test_keys_require_key_columns() {
        let table = Table::new(vec!["CHROM".into()]);
        assert!(table.keys().is_err());
    }
}
