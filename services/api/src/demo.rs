use crate::infra::ScriptedPredictionGateway;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use chronodx::config::AppConfig;
use chronodx::error::AppError;
use chronodx::workflows::screening::{
    encode, DiseaseType, FieldReport, HttpPredictionClient, PredictionFlag, PredictionResponse,
    RawFieldMap, ScreeningOutcome, ScreeningService, ScreeningSubmission,
};

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Disease domain to screen for (diabetes, heart, kidney)
    #[arg(long, value_parser = DiseaseType::parse)]
    pub(crate) disease: DiseaseType,
    /// JSON document mapping field names to raw intake values
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the encoded feature payload without calling the prediction service
    #[arg(long)]
    pub(crate) encode_only: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Limit the demo to a single disease domain
    #[arg(long, value_parser = DiseaseType::parse)]
    pub(crate) disease: Option<DiseaseType>,
}

pub(crate) async fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        disease,
        input,
        encode_only,
    } = args;

    let document = std::fs::read_to_string(&input)?;
    let fields: RawFieldMap = serde_json::from_str(&document)?;

    if encode_only {
        let features = encode(disease, &fields);
        println!("{}", serde_json::to_string_pretty(&features)?);
        render_report(&features.report());
        return Ok(());
    }

    let config = AppConfig::load()?;
    let gateway = Arc::new(HttpPredictionClient::new(config.predictor.endpoint.clone()));
    let service = ScreeningService::new(gateway);

    let outcome = service
        .screen(ScreeningSubmission { disease, fields })
        .await
        .map_err(AppError::from)?;

    println!("{} screening", disease.display_name());
    render_outcome(&outcome);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let diseases: Vec<DiseaseType> = match args.disease {
        Some(disease) => vec![disease],
        None => DiseaseType::ALL.to_vec(),
    };

    let gateway = Arc::new(scripted_gateway());
    let service = ScreeningService::new(gateway);

    println!(
        "Screening pipeline demo (scripted predictions, {})",
        Local::now().date_naive()
    );

    for disease in diseases {
        let fields = sample_fields(disease);

        println!("\n{}", disease.display_name());
        let features = encode(disease, &fields);
        println!("Encoded payload: {}", serde_json::to_string(&features)?);

        let outcome = service
            .screen(ScreeningSubmission { disease, fields })
            .await?;
        render_outcome(&outcome);
    }

    Ok(())
}

/// Canned responses covering the flag encodings the live service has been
/// observed to return: a bare number, a boolean, and a labelled string.
fn scripted_gateway() -> ScriptedPredictionGateway {
    ScriptedPredictionGateway::new()
        .with(
            DiseaseType::Diabetes,
            PredictionResponse {
                prediction: PredictionFlag::Number(1.0),
                probability: 0.35,
            },
        )
        .with(
            DiseaseType::Heart,
            PredictionResponse {
                prediction: PredictionFlag::Bool(true),
                probability: 0.72,
            },
        )
        .with(
            DiseaseType::Kidney,
            PredictionResponse {
                prediction: PredictionFlag::Text("Negative".to_string()),
                probability: 0.12,
            },
        )
}

fn sample_fields(disease: DiseaseType) -> RawFieldMap {
    let entries: &[(&str, &str)] = match disease {
        DiseaseType::Diabetes => &[
            ("pregnancies", "2"),
            ("glucose", "148"),
            ("bloodPressure", "72"),
            ("skinThickness", "35"),
            ("insulin", "0"),
            ("bmi", "33.6"),
            ("diabetesPedigreeFunction", "0.627"),
            ("age", "50"),
        ],
        DiseaseType::Heart => &[
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
        ],
        DiseaseType::Kidney => &[
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
        ],
    };

    entries
        .iter()
        .map(|(name, value)| (name.to_string(), (*value).into()))
        .collect()
}

fn render_outcome(outcome: &ScreeningOutcome) {
    println!(
        "Risk level: {} ({:.1}% probability)",
        outcome.assessment.tier.label(),
        outcome.probability * 100.0
    );
    println!(
        "Prediction: {}",
        if outcome.assessment.is_positive {
            "positive"
        } else {
            "negative"
        }
    );
    println!("{}", outcome.assessment.narrative);

    if !outcome.flagged_fields.is_empty() {
        println!("Fields submitted as unknown:");
        for flag in &outcome.flagged_fields {
            println!("- {} (raw value '{}')", flag.field, flag.raw);
        }
    }
}

fn render_report(report: &FieldReport) {
    if report.is_clean() {
        println!("All fields encoded cleanly.");
        return;
    }

    if !report.missing.is_empty() {
        println!("Missing fields: {}", report.missing.join(", "));
    }
    for flag in &report.flags {
        println!("- {}: '{}' could not be encoded", flag.field, flag.raw);
    }
}
