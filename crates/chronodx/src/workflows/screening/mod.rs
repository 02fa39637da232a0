//! Disease risk screening workflow.
//!
//! One attempt runs in strict sequence: encode the raw intake fields into
//! the feature vector for the selected disease, submit it to the external
//! prediction service, and classify the returned probability into a risk
//! tier with a patient-facing narrative.

pub mod assessment;
pub mod client;
pub mod domain;
pub mod encoding;
pub mod gateway;
pub mod router;
pub mod service;

pub use assessment::{classify, RiskAssessment, RiskTier};
pub use client::HttpPredictionClient;
pub use domain::{DiseaseType, InvalidDiseaseType, RawFieldMap, RawValue, ScreeningSubmission};
pub use encoding::{
    encode, schema_for, EncodedFeatures, FieldFlag, FieldKind, FieldOutcome, FieldProblem,
    FieldReport, FieldSpec,
};
pub use gateway::{
    GatewayError, PredictionFlag, PredictionGateway, PredictionRequest, PredictionResponse,
};
pub use router::screening_router;
pub use service::{ScreeningError, ScreeningOutcome, ScreeningService};
