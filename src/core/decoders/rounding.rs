use crate::{
    constants::ESP6500_MAF_POPULATIONS,
    core::{
        record::{HeaderDescriptor, InfoType},
        table::Table,
        value::Value,
    },
    utils::util::round_to,
};

/// Columns holding numbers with their declared type: header Integer/Float
/// keys plus the derived ESP6500 frequencies, matched on upper-cased names.
pub fn numeric_columns(table: &Table, header: &HeaderDescriptor) -> Vec<(String, InfoType)> {
    let mut wanted: Vec<(String, InfoType)> = header
        .numeric_keys()
        .map(|(key, info_type)| (key.to_uppercase(), info_type))
        .collect();
    wanted.extend(
        ESP6500_MAF_POPULATIONS
            .iter()
            .map(|c| (c.to_string(), InfoType::Float)),
    );
    table
        .columns()
        .iter()
        .filter_map(|column| wanted.iter().find(|(name, _)| name == column).cloned())
        .collect()
}

/// Coerces the numeric columns and rounds every number in the table.
///
/// Unparsable text in a numeric column becomes missing.
pub fn round_numeric_columns(mut table: Table, header: &HeaderDescriptor, precision: u32) -> Table {
    let columns = numeric_columns(&table, header);
    log::trace!("Numeric columns: {:?}", columns);
    for (column, info_type) in &columns {
        match info_type {
            InfoType::Float => table.map_column(column, Value::coerce_float),
            _ => table.map_column(column, Value::coerce_numeric),
        };
    }
    table.map_values(|_, value| match value {
        Value::Number(n) => Value::Number(round_to(n, precision)),
        other => other,
    });
    table
}
