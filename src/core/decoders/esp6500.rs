use crate::{
    constants::{
        ESP6500_FREQUENCY_DIVISOR, ESP6500_MAF_COLUMN, ESP6500_MAF_POPULATIONS, ESP6500_PH_COLUMN,
        ESP6500_RENAMES, POLYPHEN_PRED_COLUMN, POLYPHEN_SCORE_COLUMN,
    },
    core::{
        table::Table,
        value::{safe_divide, Value},
    },
    utils::util::split_first,
};

/// Comma segment `idx` of the combined EA,AA,ALL frequency, as a fraction.
pub fn population_frequency(maf: &Value, idx: usize) -> Value {
    let Some(text) = maf.to_text() else {
        return Value::Missing;
    };
    let segment = text
        .split(',')
        .nth(idx)
        .map_or(Value::Missing, Value::text);
    safe_divide(segment, ESP6500_FREQUENCY_DIVISOR)
}

/// Splits `prediction:score` into a trimmed prediction and the first score.
pub fn polyphen(ph: &Value) -> (Value, Value) {
    let Some(text) = ph.to_text() else {
        return (Value::Missing, Value::Missing);
    };
    let (prediction, score) = split_first(&text, ':');
    let prediction = Value::text(prediction.trim_matches(['.', ',']));
    let score = score.map_or(Value::Missing, |s| {
        Value::text(s.split(',').next().unwrap_or_default())
    });
    (prediction, score)
}

/// Expands ESP6500_MAF into per-population columns and ESP6500_PH into
/// POLYPHEN_PRED and POLYPHEN_SCORE.
pub fn decode_esp6500(mut table: Table) -> Table {
    if let Some(maf_idx) = table.column_index(ESP6500_MAF_COLUMN) {
        for (population_idx, column) in ESP6500_MAF_POPULATIONS.iter().enumerate() {
            table.set_column_with(column, |row| population_frequency(&row[maf_idx], population_idx));
        }
        table.drop_column(ESP6500_MAF_COLUMN);
    }

    if let Some(ph_idx) = table.column_index(ESP6500_PH_COLUMN) {
        table.set_column_with(POLYPHEN_PRED_COLUMN, |row| polyphen(&row[ph_idx]).0);
        table.set_column_with(POLYPHEN_SCORE_COLUMN, |row| polyphen(&row[ph_idx]).1);
        table.drop_column(ESP6500_PH_COLUMN);
        for (from, to) in ESP6500_RENAMES {
            table.rename_column(from, to);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::make_table;
    use approx::assert_relative_eq;

    fn number(value: &Value) -> f64 {
        match value {
            Value::Number(n) => *n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn test_population_frequency() {
        let maf = Value::text("12.5,3.0,8.25");
        assert_relative_eq!(number(&population_frequency(&maf, 0)), 0.125);
        assert_relative_eq!(number(&population_frequency(&maf, 1)), 0.03);
        assert_relative_eq!(number(&population_frequency(&maf, 2)), 0.0825);
        assert_eq!(population_frequency(&Value::text("1.0,NA"), 1), Value::text("NA"));
        assert_eq!(population_frequency(&Value::text("1.0"), 2), Value::Missing);
        assert_eq!(population_frequency(&Value::Missing, 0), Value::Missing);
    }

    #[test]
    fn test_polyphen() {
        assert_eq!(
            polyphen(&Value::text("probably_damaging:0.998,0.5")),
            (Value::text("probably_damaging"), Value::text("0.998"))
        );
        assert_eq!(
            polyphen(&Value::text(".,benign.:0.01")),
            (Value::text("benign"), Value::text("0.01"))
        );
        assert_eq!(
            polyphen(&Value::text("unknown")),
            (Value::text("unknown"), Value::Missing)
        );
        assert_eq!(polyphen(&Value::Missing), (Value::Missing, Value::Missing));
    }

    #[test]
    fn test_decode_esp6500() {
        let table = make_table(
            &["ID", "ANNOTATION", "ANNOTATION_IMPACT", "ESP6500_MAF", "ESP6500_PH"],
            vec![vec![
                "rs1".into(),
                "missense_variant".into(),
                "MODERATE".into(),
                "10.0,20.0,15.0".into(),
                "benign:0.1".into(),
            ]],
        );
        let output = decode_esp6500(table);
        assert_eq!(
            output.columns(),
            &[
                "RSID",
                "EFFECT",
                "IMPACT",
                "ESP6500_MAF_EA",
                "ESP6500_MAF_AA",
                "ESP6500_MAF_ALL",
                "POLYPHEN_PRED",
                "POLYPHEN_SCORE"
            ]
        );
        assert_relative_eq!(number(output.get(0, "ESP6500_MAF_AA").unwrap()), 0.2);
        assert_eq!(output.get(0, "POLYPHEN_PRED"), Some(&Value::text("benign")));
        assert_eq!(output.get(0, "POLYPHEN_SCORE"), Some(&Value::text("0.1")));
    }

    #[test]
    fn test_renames_only_with_polyphen() {
        let table = make_table(
            &["ID", "ANNOTATION", "ESP6500_MAF"],
            vec![vec!["rs1".into(), "missense_variant".into(), "1,2,3".into()]],
        );
        let output = decode_esp6500(table);
        assert!(output.has_column("ID"));
        assert!(output.has_column("ANNOTATION"));
        assert!(!output.has_column("ESP6500_MAF"));
        assert!(output.has_column("ESP6500_MAF_ALL"));
    }
}
