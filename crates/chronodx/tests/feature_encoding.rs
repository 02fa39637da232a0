//! Whole-vector properties of the feature encoder: for every disease a fully
//! valid submission must produce exactly the schema's key set, in schema
//! order, with values the prediction service can consume unchanged.

use std::collections::BTreeSet;

use chronodx::workflows::screening::{
    encode, schema_for, DiseaseType, FieldOutcome, RawFieldMap,
};

fn diabetes_fields() -> RawFieldMap {
    [
        ("pregnancies", "2"),
        ("glucose", "148"),
        ("bloodPressure", "72"),
        ("skinThickness", "35"),
        ("insulin", "0"),
        ("bmi", "33.6"),
        ("diabetesPedigreeFunction", "0.627"),
        ("age", "50"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.into()))
    .collect()
}

fn heart_fields() -> RawFieldMap {
    [
        ("age", "63"),
        ("sex", "Male"),
        ("cp", "3"),
        ("trestbps", "145"),
        ("chol", "233"),
        ("fbs", "yes"),
        ("restecg", "0"),
        ("thalach", "150"),
        ("exang", "no"),
        ("oldpeak", "2.3"),
        ("slope", "0"),
        ("ca", "0"),
        ("thal", "1"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.into()))
    .collect()
}

fn kidney_fields() -> RawFieldMap {
    [
        ("age", "48"),
        ("al", "1"),
        ("ane", "no"),
        ("appet", "good"),
        ("ba", "notpresent"),
        ("bgr", "121"),
        ("bp", "80"),
        ("bu", "36"),
        ("cad", "no"),
        ("dm", "yes"),
        ("hemo", "15.4"),
        ("htn", "yes"),
        ("pc", "normal"),
        ("pcc", "notpresent"),
        ("pcv", "44"),
        ("pe", "no"),
        ("pot", "4.6"),
        ("rbc", "normal"),
        ("sc", "1.2"),
        ("sg", "1.020"),
        ("sod", "137"),
        ("su", "0"),
        ("wc", "7800"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.into()))
    .collect()
}

fn fields_for(disease: DiseaseType) -> RawFieldMap {
    match disease {
        DiseaseType::Diabetes => diabetes_fields(),
        DiseaseType::Heart => heart_fields(),
        DiseaseType::Kidney => kidney_fields(),
    }
}

#[test]
fn valid_submissions_encode_to_exactly_the_schema_key_set() {
    for disease in DiseaseType::ALL {
        let encoded = encode(disease, &fields_for(disease));
        assert!(encoded.report().is_clean(), "{disease} should encode clean");

        let value = serde_json::to_value(&encoded).expect("serialize");
        let keys: BTreeSet<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        let expected: BTreeSet<&str> =
            schema_for(disease).iter().map(|spec| spec.name).collect();

        assert_eq!(keys, expected, "key set for {disease}");
    }
}

#[test]
fn payload_preserves_schema_order() {
    for disease in DiseaseType::ALL {
        let encoded = encode(disease, &fields_for(disease));
        let body = serde_json::to_string(&encoded).expect("serialize");

        let mut previous = 0;
        for spec in schema_for(disease) {
            let needle = format!("\"{}\":", spec.name);
            let position = body[previous..]
                .find(&needle)
                .unwrap_or_else(|| panic!("{} out of order in {disease}", spec.name));
            previous += position;
        }
    }
}

#[test]
fn diabetes_numeric_strings_round_trip_to_their_exact_values() {
    let encoded = encode(DiseaseType::Diabetes, &diabetes_fields());
    assert_eq!(encoded.get("glucose"), Some(&FieldOutcome::Valid(148.0)));
    assert_eq!(
        encoded.get("diabetesPedigreeFunction"),
        Some(&FieldOutcome::Valid(0.627))
    );
    assert_eq!(encoded.get("bmi"), Some(&FieldOutcome::Valid(33.6)));
}

#[test]
fn kidney_specific_gravity_is_not_truncated() {
    let encoded = encode(DiseaseType::Kidney, &kidney_fields());
    assert_eq!(encoded.get("sg"), Some(&FieldOutcome::Valid(1.02)));

    let mut fields = kidney_fields();
    fields.insert("sg".to_string(), "1.015".into());
    let encoded = encode(DiseaseType::Kidney, &fields);
    assert_eq!(encoded.get("sg"), Some(&FieldOutcome::Valid(1.015)));
}

#[test]
fn heart_vector_applies_sex_and_table_rules_in_one_pass() {
    let encoded = encode(DiseaseType::Heart, &heart_fields());
    assert_eq!(encoded.get("sex"), Some(&FieldOutcome::Valid(1.0)));
    assert_eq!(encoded.get("fbs"), Some(&FieldOutcome::Valid(1.0)));
    assert_eq!(encoded.get("exang"), Some(&FieldOutcome::Valid(0.0)));
    assert_eq!(encoded.get("oldpeak"), Some(&FieldOutcome::Valid(2.3)));
}

#[test]
fn unknown_disease_tokens_never_reach_the_encoder() {
    let error = DiseaseType::parse("invalidDisease").expect_err("closed set");
    assert!(error.to_string().contains("invalidDisease"));
}
