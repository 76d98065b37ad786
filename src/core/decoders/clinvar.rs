use crate::{
    constants::{CLINVAR_SIGNIFICANCE, CLINVAR_SIG_COLUMN},
    core::{table::Table, value::Value},
};

/// Replaces every significance code substring with its label.
pub fn clinvar_significance(value: Value) -> Value {
    if value.is_missing() {
        return value;
    }
    let decoded = CLINVAR_SIGNIFICANCE
        .iter()
        .fold(value.to_string(), |acc, &(code, label)| acc.replace(code, label));
    Value::Text(decoded)
}

pub fn decode_clinvar(mut table: Table) -> Table {
    table.map_column(CLINVAR_SIG_COLUMN, clinvar_significance);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::make_table;

    #[test]
    fn test_clinvar_significance() {
        assert_eq!(clinvar_significance("5".into()), Value::text("Pathogenic"));
        assert_eq!(
            clinvar_significance("0".into()),
            Value::text("Uncertain significance")
        );
        assert_eq!(clinvar_significance("255".into()), Value::text("other"));
        assert_eq!(
            clinvar_significance("5|2".into()),
            Value::text("Pathogenic|Benign")
        );
        assert_eq!(clinvar_significance(Value::Integer(4)), Value::text("Likely pathogenic"));
        assert_eq!(clinvar_significance(Value::Missing), Value::Missing);
    }

    #[test]
    fn test_codes_inside_larger_text_are_replaced() {
        assert_eq!(
            clinvar_significance("CLNSIG_12".into()),
            Value::text("CLNSIG_not providedBenign")
        );
    }

    #[test]
    fn test_decode_clinvar_column() {
        let table = make_table(
            &["CLINVAR_CLNSIG", "OTHER"],
            vec![vec!["5".into(), "5".into()], vec!["3".into(), "0".into()]],
        );
        let output = decode_clinvar(table);
        assert_eq!(output.get(0, "CLINVAR_CLNSIG"), Some(&Value::text("Pathogenic")));
        assert_eq!(output.get(1, "CLINVAR_CLNSIG"), Some(&Value::text("Likely Benign")));
        assert_eq!(output.get(0, "OTHER"), Some(&Value::text("5")));
    }
}
