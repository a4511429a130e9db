//! Remedy command-line front end.
//!
//! Wires the symptom catalog, the drug and interaction tables and the two
//! frozen models together from `remedy.toml`.
//!
//! Usage:
//!   remedy symptoms
//!   remedy predict --symptom fever --symptom cough
//!   remedy recommend Flu
//!   remedy interactions Aspirin Warfarin Paracetamol
//!   remedy interaction-drugs
//!   remedy risk --age 55 --gender female --height 168 --weight 78 \
//!       --systolic 150 --diastolic 95 --cholesterol normal --glucose normal \
//!       --smoker false --alcohol false --active true

mod config;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use remedy_contracts::{
    advisory::{Advisory, DRUG_DATA_UNAVAILABLE, INTERACTION_DATA_UNAVAILABLE, OUTSIDE_SCOPE},
    error::{RemedyError, RemedyResult},
    patient::{Gender, Level, PatientForm},
};
use remedy_core::{
    interaction_advisories,
    traits::{DrugSource, InteractionSource},
    Advisor, RiskAssessor,
};
use remedy_models::{ForestClassifier, HypertensionModel};
use remedy_tables::{load_catalog, DrugCatalog, InteractionTable, TableStore};

use crate::config::RemedyConfig;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Remedy: symptom-based disease prediction with drug safety checks.
#[derive(Parser)]
#[command(
    name = "remedy",
    about = "Symptom-based disease prediction, drug interaction checks and hypertension risk",
    long_about = "Predicts a disease from selected symptoms, recommends drugs for it and checks\n\
                  the recommendation for known drug-drug interactions. Also scores hypertension\n\
                  risk from patient vitals."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "remedy.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the symptoms the disease model knows, in feature order.
    Symptoms,
    /// Predict a disease, recommend drugs and check them for interactions.
    Predict {
        /// A selected symptom; repeat for several.
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        /// Print the consultation as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Look up the drugs listed for a disease.
    Recommend { disease: String },
    /// Check a list of drugs for pairwise interactions.
    Interactions { drugs: Vec<String> },
    /// List every drug named in the interaction table.
    InteractionDrugs,
    /// Score hypertension risk from patient vitals.
    Risk(RiskArgs),
}

/// Unset fields are passed on as "not filled in".
#[derive(clap::Args)]
struct RiskArgs {
    /// Age in whole years.
    #[arg(long)]
    age: Option<u32>,
    #[arg(long, value_enum)]
    gender: Option<GenderArg>,
    /// Height in cm.
    #[arg(long)]
    height: Option<u32>,
    /// Weight in kg.
    #[arg(long)]
    weight: Option<u32>,
    /// Systolic blood pressure in mmHg.
    #[arg(long)]
    systolic: Option<u32>,
    /// Diastolic blood pressure in mmHg.
    #[arg(long)]
    diastolic: Option<u32>,
    #[arg(long, value_enum)]
    cholesterol: Option<LevelArg>,
    #[arg(long, value_enum)]
    glucose: Option<LevelArg>,
    #[arg(long, action = ArgAction::Set)]
    smoker: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    alcohol: Option<bool>,
    /// Physically active.
    #[arg(long, action = ArgAction::Set)]
    active: Option<bool>,
    /// Print the assessment as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Female,
    Male,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl From<GenderArg> for Gender {
    fn from(g: GenderArg) -> Self {
        match g {
            GenderArg::Female => Gender::Female,
            GenderArg::Male => Gender::Male,
        }
    }
}

impl From<LevelArg> for Level {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::Normal => Level::Normal,
            LevelArg::AboveNormal => Level::AboveNormal,
            LevelArg::WellAboveNormal => Level::WellAboveNormal,
        }
    }
}

impl RiskArgs {
    fn to_form(&self) -> PatientForm {
        PatientForm {
            age_years: self.age.unwrap_or(0),
            height_cm: self.height.unwrap_or(0),
            weight_kg: self.weight.unwrap_or(0),
            systolic: self.systolic.unwrap_or(0),
            diastolic: self.diastolic.unwrap_or(0),
            gender: self.gender.map(Gender::from),
            cholesterol: self.cholesterol.map(Level::from),
            glucose: self.glucose.map(Level::from),
            smoker: self.smoker,
            alcohol: self.alcohol,
            active: self.active,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    // Only configuration and start-up failures end up here; request-level
    // problems are printed as advisories by each command.
    if let Err(e) = run(cli) {
        eprintln!("remedy: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> RemedyResult<()> {
    let config = RemedyConfig::from_file(&cli.config)?;

    match cli.command {
        Command::Symptoms => run_symptoms(&config),
        Command::Predict { symptoms, json } => run_predict(&config, symptoms, json),
        Command::Recommend { disease } => run_recommend(&config, &disease),
        Command::Interactions { drugs } => run_interactions(&config, &drugs),
        Command::InteractionDrugs => run_interaction_drugs(&config),
        Command::Risk(args) => run_risk(&config, &args),
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

/// Build the consultation pipeline.
///
/// The catalog and the disease model are required up front; the drug and
/// interaction tables load lazily so a missing table degrades to a notice.
fn build_advisor(config: &RemedyConfig) -> RemedyResult<Advisor> {
    let catalog = load_catalog(&config.data.symptoms).map_err(startup)?;
    let classifier = ForestClassifier::from_file(&config.models.disease).map_err(startup)?;

    if classifier.n_features() != catalog.len() {
        return Err(RemedyError::ConfigError {
            reason: format!(
                "disease model expects {} features but the symptom catalog has {}",
                classifier.n_features(),
                catalog.len()
            ),
        });
    }

    Ok(Advisor::new(
        Arc::new(catalog),
        Box::new(classifier),
        Box::new(TableStore::<DrugCatalog>::new(&config.data.drugs)),
        Box::new(TableStore::<InteractionTable>::new(&config.data.interactions)),
    ))
}

/// Treat a failed load of a required resource as a start-up failure.
fn startup(err: RemedyError) -> RemedyError {
    match err {
        RemedyError::ConfigError { .. } => err,
        other => RemedyError::ConfigError {
            reason: other.reason().to_string(),
        },
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_symptoms(config: &RemedyConfig) -> RemedyResult<()> {
    let catalog = load_catalog(&config.data.symptoms).map_err(startup)?;
    for name in catalog.names() {
        println!("{}", name);
    }
    Ok(())
}

fn run_predict(config: &RemedyConfig, symptoms: Vec<String>, json: bool) -> RemedyResult<()> {
    let advisor = build_advisor(config)?;
    let selected: BTreeSet<String> = symptoms.into_iter().collect();

    let consultation = match advisor.consult(selected) {
        Ok(c) => c,
        Err(e) => {
            print_advisories(&[Advisory::from_error(&e)]);
            return Ok(());
        }
    };

    if json {
        return print_json(&consultation);
    }

    println!("Predicted disease: {}", consultation.disease);
    if !consultation.drugs.is_empty() {
        println!("Recommended drugs:");
        for drug in &consultation.drugs {
            println!("  - {}", drug);
        }
    }
    print_advisories(&consultation.notices);
    println!();
    println!("Drug safety check:");
    print_advisories(&consultation.safety);
    Ok(())
}

fn run_recommend(config: &RemedyConfig, disease: &str) -> RemedyResult<()> {
    let store = TableStore::<DrugCatalog>::new(&config.data.drugs);

    match store.drugs_for(disease) {
        Ok(drugs) if drugs.is_empty() => print_advisories(&[Advisory::info(OUTSIDE_SCOPE)]),
        Ok(drugs) => {
            for drug in drugs {
                println!("{}", drug);
            }
        }
        Err(RemedyError::DataUnavailable { reason }) => {
            warn!(%reason, "drug lookup failed");
            print_advisories(&[Advisory::warning(DRUG_DATA_UNAVAILABLE)]);
        }
        Err(e) => print_advisories(&[Advisory::from_error(&e)]),
    }
    Ok(())
}

fn run_interactions(config: &RemedyConfig, drugs: &[String]) -> RemedyResult<()> {
    let store = TableStore::<InteractionTable>::new(&config.data.interactions);
    print_advisories(&interaction_advisories(store.find_interactions(drugs)));
    Ok(())
}

fn run_interaction_drugs(config: &RemedyConfig) -> RemedyResult<()> {
    let store = TableStore::<InteractionTable>::new(&config.data.interactions);

    match store.get() {
        Ok(table) => {
            for drug in table.drugs() {
                println!("{}", drug);
            }
        }
        Err(e) => {
            warn!(error = %e, "interaction table could not be loaded");
            print_advisories(&[Advisory::warning(INTERACTION_DATA_UNAVAILABLE)]);
        }
    }
    Ok(())
}

fn run_risk(config: &RemedyConfig, args: &RiskArgs) -> RemedyResult<()> {
    let model = HypertensionModel::from_file(&config.models.hypertension).map_err(startup)?;
    let assessor = RiskAssessor::new(Box::new(model));

    let assessment = match assessor.assess(&args.to_form()) {
        Ok(a) => a,
        Err(e) => {
            print_advisories(&[Advisory::from_error(&e)]);
            return Ok(());
        }
    };

    if args.json {
        return print_json(&assessment);
    }

    println!("{}", assessment);
    if assessment.meets_bp_threshold {
        println!("Blood pressure reading is at or above 140/90 mmHg.");
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_advisories(advisories: &[Advisory]) {
    for advisory in advisories {
        println!("{}", advisory);
    }
}

fn print_json<T: Serialize>(value: &T) -> RemedyResult<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| RemedyError::data_unavailable(format!("failed to encode output: {e}")))?;
    println!("{}", out);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::Path;

    use remedy_contracts::{
        advisory::{NO_INTERACTIONS, OUTSIDE_SCOPE},
        risk::RiskLevel,
    };
    use remedy_core::RiskAssessor;
    use remedy_models::HypertensionModel;

    use super::{build_advisor, GenderArg, LevelArg, RemedyConfig, RiskArgs};

    /// The configuration shipped at the workspace root.
    fn shipped_config() -> RemedyConfig {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../remedy.toml");
        RemedyConfig::from_file(&path).unwrap()
    }

    fn selected(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn shipped_data_runs_a_flu_consultation() {
        let advisor = build_advisor(&shipped_config()).unwrap();

        let c = advisor.consult(selected(&["fever", "cough"])).unwrap();

        assert_eq!(c.disease.as_str(), "Flu");
        assert_eq!(c.drugs, vec!["Oseltamivir", "Paracetamol", "Ibuprofen"]);
        assert!(c.notices.is_empty());
        assert_eq!(c.safety.len(), 1);
        assert_eq!(c.safety[0].message, NO_INTERACTIONS);
    }

    #[test]
    fn shipped_data_recognizes_migraine() {
        let advisor = build_advisor(&shipped_config()).unwrap();

        let c = advisor
            .consult(selected(&["headache", "sensitivity_to_light", "nausea"]))
            .unwrap();

        assert_eq!(c.disease.as_str(), "Migraine");
        assert!(c.drugs.contains(&"Sumatriptan".to_string()));
    }

    #[test]
    fn disease_without_drugs_gets_scope_notice() {
        let advisor = build_advisor(&shipped_config()).unwrap();

        let c = advisor
            .consult(selected(&["headache", "dizziness", "chest_pain"]))
            .unwrap();

        assert_eq!(c.disease.as_str(), "Hypertension");
        assert!(c.drugs.is_empty());
        assert_eq!(c.notices[0].message, OUTSIDE_SCOPE);
    }

    #[test]
    fn shipped_risk_model_flags_high_pressure() {
        let config = shipped_config();
        let model = HypertensionModel::from_file(&config.models.hypertension).unwrap();
        let assessor = RiskAssessor::new(Box::new(model));
        let args = RiskArgs {
            age: Some(55),
            gender: Some(GenderArg::Female),
            height: Some(168),
            weight: Some(78),
            systolic: Some(165),
            diastolic: Some(100),
            cholesterol: Some(LevelArg::Normal),
            glucose: Some(LevelArg::Normal),
            smoker: Some(false),
            alcohol: Some(false),
            active: Some(true),
            json: false,
        };

        let assessment = assessor.assess(&args.to_form()).unwrap();

        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment.meets_bp_threshold);
        assert!(assessment.probability > 50.0 && assessment.probability <= 100.0);
    }

    #[test]
    fn unset_risk_fields_are_not_filled_in() {
        let args = RiskArgs {
            age: Some(40),
            gender: None,
            height: None,
            weight: None,
            systolic: Some(120),
            diastolic: Some(80),
            cholesterol: None,
            glucose: None,
            smoker: None,
            alcohol: None,
            active: None,
            json: false,
        };

        let form = args.to_form();

        assert_eq!(form.height_cm, 0);
        assert!(form.gender.is_none());
        assert!(form.validate().is_err());
    }
}
