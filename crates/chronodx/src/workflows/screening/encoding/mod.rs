//! Feature encoding for the three disease schemas.
//!
//! Encoding walks a disease's fixed schema in order and converts each raw
//! field independently; one malformed field never aborts the vector. Every
//! degraded slot is tagged instead of silently collapsing into a sentinel,
//! and `EncodedFeatures::report` surfaces the problems so callers can decide
//! whether the payload should still be submitted.

mod schema;
mod tokens;

pub use schema::{schema_for, FieldKind, FieldSpec};

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::domain::{DiseaseType, RawFieldMap, RawValue};

/// Result of encoding a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// Parsed number, table hit, or sex-rule result.
    Valid(f64),
    /// Categorical token missing from the lookup table.
    Unrecognized { raw: String },
    /// Numeric field that failed the strict parse.
    Unparseable { raw: String },
    /// Key absent from the submission.
    Missing,
}

impl FieldOutcome {
    /// Value the prediction service sees for this slot. Unrecognized
    /// categories keep the `-1` code the downstream model treats as
    /// "unknown", unparseable numbers keep the NaN sentinel (`null` on the
    /// JSON wire), and missing fields are omitted entirely.
    pub fn wire_value(&self) -> Option<f64> {
        match self {
            FieldOutcome::Valid(value) => Some(*value),
            FieldOutcome::Unrecognized { .. } => Some(-1.0),
            FieldOutcome::Unparseable { .. } => Some(f64::NAN),
            FieldOutcome::Missing => None,
        }
    }
}

/// One named slot of an encoded vector.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedField {
    pub name: &'static str,
    pub outcome: FieldOutcome,
}

/// Fixed-shape numeric feature vector for one disease. The slot set and
/// order are exactly the schema for the disease, so the external service
/// always receives the layout its model was trained against.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFeatures {
    disease: DiseaseType,
    fields: Vec<EncodedField>,
}

/// Encode the raw submission fields against the schema for `disease`.
///
/// Pure and total: no I/O, no side effects, and every schema slot receives
/// an outcome regardless of how malformed the input is.
pub fn encode(disease: DiseaseType, raw: &RawFieldMap) -> EncodedFeatures {
    let fields = schema_for(disease)
        .iter()
        .map(|spec| EncodedField {
            name: spec.name,
            outcome: encode_field(spec.kind, raw.get(spec.name)),
        })
        .collect();

    EncodedFeatures { disease, fields }
}

fn encode_field(kind: FieldKind, value: Option<&RawValue>) -> FieldOutcome {
    let Some(value) = value else {
        return FieldOutcome::Missing;
    };

    match kind {
        FieldKind::Numeric => parse_number(value),
        FieldKind::Binary => match value.token().and_then(tokens::binary_code) {
            Some(code) => FieldOutcome::Valid(code.into()),
            None => FieldOutcome::Unrecognized {
                raw: raw_text(value),
            },
        },
        // Two-way rule: anything that is not "male" codes as 0, including
        // values that are not tokens at all.
        FieldKind::Sex => {
            let code = value.token().map(tokens::sex_code).unwrap_or(0);
            FieldOutcome::Valid(code.into())
        }
    }
}

fn parse_number(value: &RawValue) -> FieldOutcome {
    match value {
        RawValue::Number(number) => FieldOutcome::Valid(*number),
        RawValue::Text(text) => match text.trim().parse::<f64>() {
            Ok(parsed) => FieldOutcome::Valid(parsed),
            Err(_) => FieldOutcome::Unparseable { raw: text.clone() },
        },
    }
}

fn raw_text(value: &RawValue) -> String {
    match value {
        RawValue::Number(number) => number.to_string(),
        RawValue::Text(text) => text.clone(),
    }
}

impl EncodedFeatures {
    pub fn disease(&self) -> DiseaseType {
        self.disease
    }

    pub fn fields(&self) -> &[EncodedField] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldOutcome> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.outcome)
    }

    /// Collect every degraded slot so the caller can inspect the vector
    /// before deciding whether to submit it.
    pub fn report(&self) -> FieldReport {
        let mut report = FieldReport::default();
        for field in &self.fields {
            match &field.outcome {
                FieldOutcome::Valid(_) => {}
                FieldOutcome::Unrecognized { raw } => report.flags.push(FieldFlag {
                    field: field.name,
                    problem: FieldProblem::UnrecognizedCategory,
                    raw: raw.clone(),
                }),
                FieldOutcome::Unparseable { raw } => report.flags.push(FieldFlag {
                    field: field.name,
                    problem: FieldProblem::UnparseableNumber,
                    raw: raw.clone(),
                }),
                FieldOutcome::Missing => report.missing.push(field.name),
            }
        }
        report
    }
}

impl Serialize for EncodedFeatures {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let present = self
            .fields
            .iter()
            .filter(|field| !matches!(field.outcome, FieldOutcome::Missing))
            .count();

        let mut map = serializer.serialize_map(Some(present))?;
        for field in &self.fields {
            match field.outcome.wire_value() {
                Some(value) if value.is_nan() => {
                    map.serialize_entry(field.name, &None::<f64>)?;
                }
                Some(value) => map.serialize_entry(field.name, &value)?,
                None => {}
            }
        }
        map.end()
    }
}

/// One degraded slot: the field, what went wrong, and the raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFlag {
    pub field: &'static str,
    pub problem: FieldProblem,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    UnrecognizedCategory,
    UnparseableNumber,
}

/// Per-submission encoding report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    pub missing: Vec<&'static str>,
    pub flags: Vec<FieldFlag>,
}

impl FieldReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(entries: &[(&str, RawValue)]) -> RawFieldMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn numeric_strings_round_trip_exactly() {
        let raw = fields(&[("glucose", "120".into()), ("bmi", "0.5".into())]);
        let encoded = encode(DiseaseType::Diabetes, &raw);
        assert_eq!(encoded.get("glucose"), Some(&FieldOutcome::Valid(120.0)));
        assert_eq!(encoded.get("bmi"), Some(&FieldOutcome::Valid(0.5)));
    }

    #[test]
    fn specific_gravity_keeps_decimal_precision() {
        let raw = fields(&[("sg", "1.015".into())]);
        let encoded = encode(DiseaseType::Kidney, &raw);
        assert_eq!(encoded.get("sg"), Some(&FieldOutcome::Valid(1.015)));
    }

    #[test]
    fn sex_rule_codes_male_only() {
        for (token, expected) in [("Male", 1.0), ("FEMALE", 0.0), ("unknown", 0.0)] {
            let raw = fields(&[("sex", token.into())]);
            let encoded = encode(DiseaseType::Heart, &raw);
            assert_eq!(encoded.get("sex"), Some(&FieldOutcome::Valid(expected)));
        }
    }

    #[test]
    fn binary_fields_resolve_through_the_shared_table() {
        let raw = fields(&[("htn", "YES".into()), ("dm", "no".into())]);
        let encoded = encode(DiseaseType::Kidney, &raw);
        assert_eq!(encoded.get("htn"), Some(&FieldOutcome::Valid(1.0)));
        assert_eq!(encoded.get("dm"), Some(&FieldOutcome::Valid(0.0)));
    }

    #[test]
    fn unknown_category_is_tagged_and_keeps_its_sentinel() {
        let raw = fields(&[("htn", "maybe".into())]);
        let encoded = encode(DiseaseType::Kidney, &raw);
        let outcome = encoded.get("htn").expect("slot present");
        assert_eq!(
            outcome,
            &FieldOutcome::Unrecognized {
                raw: "maybe".to_string()
            }
        );
        assert_eq!(outcome.wire_value(), Some(-1.0));
    }

    #[test]
    fn numeric_garbage_is_tagged_and_maps_to_nan() {
        let raw = fields(&[("age", "eleven".into())]);
        let encoded = encode(DiseaseType::Diabetes, &raw);
        let outcome = encoded.get("age").expect("slot present");
        assert_eq!(
            outcome,
            &FieldOutcome::Unparseable {
                raw: "eleven".to_string()
            }
        );
        assert!(outcome.wire_value().expect("sentinel").is_nan());
    }

    #[test]
    fn pre_coded_numbers_pass_through_without_token_lookup() {
        let raw = fields(&[("cp", 3.0.into()), ("al", 2.0.into())]);
        assert_eq!(
            encode(DiseaseType::Heart, &raw).get("cp"),
            Some(&FieldOutcome::Valid(3.0))
        );
        assert_eq!(
            encode(DiseaseType::Kidney, &raw).get("al"),
            Some(&FieldOutcome::Valid(2.0))
        );
    }

    #[test]
    fn number_in_a_binary_slot_is_unrecognized() {
        let raw = fields(&[("htn", 1.0.into())]);
        let encoded = encode(DiseaseType::Kidney, &raw);
        assert!(matches!(
            encoded.get("htn"),
            Some(FieldOutcome::Unrecognized { .. })
        ));
    }

    #[test]
    fn absent_keys_are_reported_missing() {
        let raw = fields(&[("glucose", "120".into())]);
        let encoded = encode(DiseaseType::Diabetes, &raw);
        let report = encoded.report();
        assert!(report.missing.contains(&"age"));
        assert_eq!(report.missing.len(), 7);
        assert!(report.flags.is_empty());
    }

    #[test]
    fn serialization_omits_missing_and_nulls_unparseable() {
        let raw = fields(&[
            ("htn", "maybe".into()),
            ("age", "abc".into()),
            ("bp", "80".into()),
        ]);
        let encoded = encode(DiseaseType::Kidney, &raw);
        let value = serde_json::to_value(&encoded).expect("serialize");
        let object = value.as_object().expect("object");

        assert_eq!(object["htn"], serde_json::json!(-1.0));
        assert_eq!(object["age"], serde_json::Value::Null);
        assert_eq!(object["bp"], serde_json::json!(80.0));
        assert!(!object.contains_key("sg"));
    }
}
