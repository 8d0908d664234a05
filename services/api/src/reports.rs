use crate::infra::{seed_catalog, InMemoryCatalog};
use clap::Args;
use machine_advisor::advisor::{
    AdvisorService, CalibrationReport, Recommendation, RecommendationQuery,
};
use machine_advisor::config::{AdvisorConfig, AppConfig};
use machine_advisor::engine::{
    BrandId, ComparisonEngine, MachineCategory, ProfileId, WeightProfile,
};
use machine_advisor::error::AppError;
use machine_advisor::telemetry::{self, LogTarget};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogSource {
    /// Catalog CSV to rank. Defaults to ADVISOR_CATALOG_CSV or the built-in samples.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Usage profile CSV. Defaults to ADVISOR_PROFILES_CSV or the built-in samples.
    #[arg(long)]
    pub(crate) profiles: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub(crate) source: CatalogSource,
    /// Usage profile id (e.g. gaming, student, office)
    #[arg(long)]
    pub(crate) profile: String,
    /// Only rank machines from this brand
    #[arg(long)]
    pub(crate) brand: Option<String>,
    /// Only rank desktops or laptops
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<MachineCategory>,
    /// Print the recommendation as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CalibrateArgs {
    #[command(flatten)]
    pub(crate) source: CatalogSource,
    /// Usage profile id to calibrate
    #[arg(long)]
    pub(crate) profile: String,
    #[arg(long)]
    pub(crate) performance: f64,
    #[arg(long)]
    pub(crate) price: f64,
    #[arg(long)]
    pub(crate) consumption: f64,
    #[arg(long)]
    pub(crate) temperature: f64,
}

pub(crate) fn parse_category(raw: &str) -> Result<MachineCategory, String> {
    MachineCategory::parse(raw)
        .ok_or_else(|| format!("unknown category '{raw}' (use desktop or laptop)"))
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        source,
        profile,
        brand,
        category,
        json,
    } = args;

    let service = build_service(source)?;
    let query = RecommendationQuery {
        profile_id: ProfileId(profile),
        brand_id: brand
            .filter(|brand| !brand.trim().is_empty())
            .map(BrandId),
        category,
    };
    let recommendation = service.recommend(&query)?;

    if json {
        match serde_json::to_string_pretty(&recommendation) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Recommendation payload unavailable: {err}"),
        }
    } else {
        render_recommendation(&recommendation);
    }
    Ok(())
}

pub(crate) fn run_calibrate(args: CalibrateArgs) -> Result<(), AppError> {
    let CalibrateArgs {
        source,
        profile,
        performance,
        price,
        consumption,
        temperature,
    } = args;

    let service = build_service(source)?;
    let proposed = WeightProfile {
        performance,
        price,
        consumption,
        temperature,
    };
    // Preview only: the CLI store lives for one run.
    let report = service.calibrate(&ProfileId(profile), proposed, false)?;
    render_calibration(&report);
    Ok(())
}

fn build_service(source: CatalogSource) -> Result<AdvisorService<InMemoryCatalog>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogTarget::Cli)?;

    let advisor = AdvisorConfig {
        catalog_csv: source.catalog.or(config.advisor.catalog_csv),
        profiles_csv: source.profiles.or(config.advisor.profiles_csv),
        top_n: config.advisor.top_n,
    };
    let catalog = seed_catalog(&advisor)?;

    Ok(AdvisorService::new(
        Arc::new(catalog),
        ComparisonEngine::new(advisor.top_n),
    ))
}

fn render_recommendation(recommendation: &Recommendation) {
    println!(
        "Recommendation for {} ({} machines evaluated)",
        recommendation.profile_name, recommendation.evaluated_candidates
    );
    if let Some(strategy) = recommendation.strategy {
        println!("Strategy: {}", strategy.label());
    }

    if recommendation.top3.is_empty() {
        println!("No machines matched the selection.");
    } else {
        println!(
            "{:<4} {:<24} {:<11} {:>10} {:>12} {:>8}",
            "#", "Model", "Category", "Price", "Performance", "Score"
        );
        for (position, entry) in recommendation.top3.iter().enumerate() {
            println!(
                "{:<4} {:<24} {:<11} {:>10.2} {:>12.1} {:>8.4}",
                position + 1,
                entry.name,
                entry.category.label(),
                entry.price,
                entry.performance,
                entry.score
            );
        }
    }

    println!("\n{}", recommendation.recommendation);
}

fn render_calibration(report: &CalibrationReport) {
    println!("Calibration preview for {}", report.profile_name);
    println!(
        "Current weights:  performance {:.2} | price {:.2} | consumption {:.2} | temperature {:.2}",
        report.current.performance,
        report.current.price,
        report.current.consumption,
        report.current.temperature
    );
    println!(
        "Proposed weights: performance {:.2} | price {:.2} | consumption {:.2} | temperature {:.2}",
        report.proposed.performance,
        report.proposed.price,
        report.proposed.consumption,
        report.proposed.temperature
    );

    if let Some(message) = &report.message {
        println!("{message}");
        return;
    }

    println!(
        "{:<24} {:<11} {:>9} {:>9} {:>9}",
        "Model", "Category", "Current", "Proposed", "Delta"
    );
    for row in &report.rows {
        println!(
            "{:<24} {:<11} {:>9.4} {:>9.4} {:>+9.4}",
            row.name,
            row.category.label(),
            row.score_under_current,
            row.score_under_proposed,
            row.delta
        );
    }
}
