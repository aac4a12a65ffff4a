//! Pension Engine CLI
//!
//! Command-line interface for scale lookups, first-pillar calculations and
//! household aggregation

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use pension_engine::{
    avs::{AvsCalculationResult, AvsCalculator, DisabilityTier, PensionAmount},
    format::{format_chf, format_percent},
    lpp::{self, LppAnalysis},
    pillar3::{self, ThirdPillarAnalysis},
    provider::{load_from_dir, loader, InMemoryProvider},
    scale::{BenefitScale, CsvScaleSource, ScaleRepository, StatutoryScale, DEFAULT_SCALE_PATH},
    ErrorKind, HouseholdAnalysis, PensionError, PensionService,
};

#[derive(Debug, Parser)]
#[command(name = "pension_engine", version, about = "Swiss pension benefit calculations")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the scale bracket an income resolves to
    Scale {
        #[arg(long)]
        income: f64,
        /// Scale CSV (defaults to data/scale/avs_scale_44.csv, else the statutory table)
        #[arg(long)]
        scale: Option<PathBuf>,
    },
    /// Compute first-pillar rents
    Avs {
        #[arg(long)]
        income: f64,
        #[arg(long)]
        years: u8,
        /// Disability degree: 1/1, 3/4, 1/2 or 1/4
        #[arg(long, default_value = "1/1")]
        tier: String,
        #[arg(long)]
        scale: Option<PathBuf>,
    },
    /// Aggregate occupational pension accounts from a CSV file
    Lpp {
        accounts: PathBuf,
        /// Only accounts of this profile
        #[arg(long)]
        profile: Option<String>,
    },
    /// Aggregate third-pillar accounts from a CSV file
    Pillar3 {
        accounts: PathBuf,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Three-pillar overview for profiles of a data directory
    Overview {
        #[arg(long, default_value = "data/sample")]
        data_dir: PathBuf,
        /// Profiles to compute (all profiles when omitted)
        #[arg(long)]
        profile: Vec<String>,
    },
}

fn load_scale(path: Option<&Path>) -> anyhow::Result<BenefitScale> {
    let scale = match path {
        Some(path) => CsvScaleSource::new(path)
            .load_scale()
            .with_context(|| format!("loading scale from {}", path.display()))?,
        None if Path::new(DEFAULT_SCALE_PATH).exists() => CsvScaleSource::default().load_scale()?,
        None => StatutoryScale::default().load_scale()?,
    };
    info!("Scale with {} brackets ready", scale.len());
    Ok(scale)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_amount(label: &str, amount: &PensionAmount) {
    println!(
        "  {:<22} {:>14} / month {:>16} / year",
        label,
        format_chf(amount.monthly),
        format_chf(amount.annual)
    );
}

fn print_avs(result: &AvsCalculationResult) {
    println!("AVS/AI rents");
    println!("  Income used:           {}", format_chf(result.income_used));
    println!("  Scale bracket:         {}", format_chf(result.scale_row.income_threshold));
    println!(
        "  Contribution years:    {} ({} of a full rent)",
        result.years_contributed,
        format_percent(result.full_rent_fraction)
    );
    print_amount("Old-age", &result.old_age);
    print_amount(&format!("Disability ({})", result.disability_tier), &result.disability);
    print_amount("Survivor", &result.survivor);
    print_amount("Per child", &result.child);
    print_amount("Per orphan", &result.orphan);
}

fn print_lpp(analysis: &LppAnalysis) {
    println!("LPP ({} accounts)", analysis.total_accounts);
    println!("  Current savings:       {}", format_chf(analysis.total_current_savings));
    println!("  Projected savings:     {}", format_chf(analysis.total_projected_savings));
    println!(
        "  Rent at 65:            {} / month",
        format_chf(analysis.total_monthly_rent_65)
    );
    println!(
        "  Disability rent:       {} / month",
        format_chf(analysis.total_disability_rent_monthly)
    );
    println!(
        "  Widow rent:            {} / month",
        format_chf(analysis.total_widow_rent_monthly)
    );
    println!("  Death capital:         {}", format_chf(analysis.total_death_capital));
    for option in &analysis.early_retirement_options {
        println!(
            "  Early retirement at {}: {} / month ({})",
            option.age,
            format_chf(option.monthly_rent),
            option.provider
        );
    }
}

fn print_pillar3(analysis: &ThirdPillarAnalysis) {
    println!("Third pillar ({} accounts)", analysis.total_accounts);
    println!("  Current amount:        {}", format_chf(analysis.total_current_amount));
    println!("  Projected amount:      {}", format_chf(analysis.total_projected_amount));
    println!("  Annual contributions:  {}", format_chf(analysis.total_annual_contribution));
    println!(
        "  Disability rent:       {} / month",
        format_chf(analysis.total_disability_rent_monthly)
    );
    println!("  Death capital:         {}", format_chf(analysis.total_death_capital));
    if let Some(rate) = analysis.weighted_return_rate {
        println!("  Weighted return:       {}", format_percent(rate));
    }
}

fn print_household(household: &HouseholdAnalysis) {
    let overview = &household.overview;
    println!("{}", "=".repeat(60));
    println!("Profile {}", household.profile_id);
    println!("{}", "=".repeat(60));
    print_avs(&household.avs);
    print_lpp(&household.lpp);
    print_pillar3(&household.third_pillar);
    println!("Overview");
    println!(
        "  Income at 65:          {} / month",
        format_chf(overview.monthly_income_at_reference_age)
    );
    println!(
        "  Income if disabled:    {} / month",
        format_chf(overview.disability_monthly_income)
    );
    println!(
        "  Survivor income:       {} / month",
        format_chf(overview.survivor_monthly_income)
    );
    println!("  Retirement capital:    {}", format_chf(overview.retirement_capital));
    println!("  Death capital:         {}", format_chf(overview.death_capital));
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Scale { income, scale } => {
            let scale = load_scale(scale.as_deref())?;
            let row = scale.resolve(income)?;
            if cli.json {
                print_json(row)?;
            } else {
                println!(
                    "Income {} resolves to bracket {}: full old-age rent {}",
                    format_chf(income),
                    format_chf(row.income_threshold),
                    format_chf(row.old_age_rent_full)
                );
            }
        }
        Command::Avs { income, years, tier, scale } => {
            let tier: DisabilityTier = tier.parse()?;
            let calculator = AvsCalculator::new(load_scale(scale.as_deref())?);
            let result = calculator.calculate_pensions(income, years, tier)?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_avs(&result);
            }
        }
        Command::Lpp { accounts, profile } => {
            let mut accounts = loader::load_lpp_accounts(&accounts)
                .with_context(|| format!("loading LPP accounts from {}", accounts.display()))?;
            if let Some(profile) = profile {
                accounts.retain(|a| a.profile_id == profile);
            }
            let analysis = lpp::aggregate(&accounts);
            if cli.json {
                print_json(&analysis)?;
            } else {
                print_lpp(&analysis);
            }
        }
        Command::Pillar3 { accounts, profile } => {
            let mut accounts = loader::load_third_pillar_accounts(&accounts).with_context(|| {
                format!("loading third-pillar accounts from {}", accounts.display())
            })?;
            if let Some(profile) = profile {
                accounts.retain(|a| a.profile_id == profile);
            }
            let analysis = pillar3::aggregate(&accounts);
            if cli.json {
                print_json(&analysis)?;
            } else {
                print_pillar3(&analysis);
            }
        }
        Command::Overview { data_dir, profile } => {
            let loaded = load_from_dir(&data_dir)
                .with_context(|| format!("loading household data from {}", data_dir.display()))?;
            let service = PensionService::new(InMemoryProvider::from_loaded(loaded))?;
            let ids = if profile.is_empty() {
                service.provider().profile_ids()?
            } else {
                profile
            };

            let households = service
                .households(&ids)
                .into_iter()
                .collect::<Result<Vec<_>, PensionError>>()?;

            if cli.json {
                print_json(&households)?;
            } else {
                for household in &households {
                    print_household(household);
                }
            }
        }
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PensionError>().map(PensionError::kind) {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::NotFound) => 3,
        Some(ErrorKind::Data) => 4,
        None => 1,
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code(&err));
    }
}
