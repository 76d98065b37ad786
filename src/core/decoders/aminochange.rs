use crate::{
    constants::{AMINOCHANGE_COLUMN, AMINOCHANGE_FLAG, HGVS_P_COLUMN, HGVS_P_PREFIX},
    core::{table::Table, value::Value},
};

const RESIDUE_CODE_LEN: usize = 3;

/// Flags a protein change whose first and last residue codes differ.
pub fn aminochange(hgvs_p: &Value) -> Value {
    let Some(text) = hgvs_p.to_text() else {
        return Value::Missing;
    };
    let change = text.replace(HGVS_P_PREFIX, "");
    let residues: Vec<char> = change.chars().collect();
    if residues.len() < RESIDUE_CODE_LEN {
        return Value::Missing;
    }
    let first = &residues[..RESIDUE_CODE_LEN];
    let last = &residues[residues.len() - RESIDUE_CODE_LEN..];
    if first != last {
        Value::text(AMINOCHANGE_FLAG)
    } else {
        Value::Missing
    }
}

/// Adds AMINOCHANGE from HGVS.P; no-op without HGVS.P.
pub fn compute_aminochange(mut table: Table) -> Table {
    let Some(idx) = table.column_index(HGVS_P_COLUMN) else {
        return table;
    };
    table.set_column_with(AMINOCHANGE_COLUMN, |row| aminochange(&row[idx]));
    table
}
