use crate::workflows::screening::domain::DiseaseType;

/// How a raw value is turned into its numeric feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Strict numeric parse; the majority of every schema. Covers decimals
    /// (`sg`, `oldpeak`) and the selects that arrive pre-coded as small
    /// integers (`cp`, `restecg`, `slope`, `ca`, `thal`, `al`, `su`).
    Numeric,
    /// Categorical token resolved through the shared yes/no/present table.
    Binary,
    /// Dedicated male/female rule used only by the heart schema.
    Sex,
}

/// One slot in a disease's fixed feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn num(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Numeric,
    }
}

const fn bin(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Binary,
    }
}

const DIABETES: &[FieldSpec] = &[
    num("pregnancies"),
    num("glucose"),
    num("bloodPressure"),
    num("skinThickness"),
    num("insulin"),
    num("bmi"),
    num("diabetesPedigreeFunction"),
    num("age"),
];

const HEART: &[FieldSpec] = &[
    num("age"),
    FieldSpec {
        name: "sex",
        kind: FieldKind::Sex,
    },
    num("cp"),
    num("trestbps"),
    num("chol"),
    bin("fbs"),
    num("restecg"),
    num("thalach"),
    bin("exang"),
    num("oldpeak"),
    num("slope"),
    num("ca"),
    num("thal"),
];

const KIDNEY: &[FieldSpec] = &[
    num("age"),
    num("al"),
    bin("ane"),
    bin("appet"),
    bin("ba"),
    num("bgr"),
    num("bp"),
    num("bu"),
    bin("cad"),
    bin("dm"),
    num("hemo"),
    bin("htn"),
    bin("pc"),
    bin("pcc"),
    num("pcv"),
    bin("pe"),
    num("pot"),
    bin("rbc"),
    num("sc"),
    num("sg"),
    num("sod"),
    num("su"),
    num("wc"),
];

/// Fixed, ordered feature schema the prediction model for `disease` was
/// trained against. Field names and order are part of the external service
/// contract and must not drift.
pub fn schema_for(disease: DiseaseType) -> &'static [FieldSpec] {
    match disease {
        DiseaseType::Diabetes => DIABETES,
        DiseaseType::Heart => HEART,
        DiseaseType::Kidney => KIDNEY,
    }
}
