use crate::infra::load_store;
use clap::Args;
use college_finder::admissions::{
    CollegeFinderService, EligibilityWindow, QueryParams, RankedResult, RankingEngine,
};
use college_finder::config::AppConfig;
use college_finder::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct QueryArgs {
    /// Catalog file (.csv or .json) to search
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Admission-exam rank (defaults to 10000)
    #[arg(long)]
    pub(crate) rank: Option<String>,
    /// Branch code such as CSE or ECE, or ALL
    #[arg(long)]
    pub(crate) branch: Option<String>,
    /// Category key such as OC_BOYS or BCA_GIRLS, or ALL
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// District code such as GTR, or ALL
    #[arg(long)]
    pub(crate) district: Option<String>,
    /// University region (AU, SVU, OU), or ALL
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Override the configured eligibility margin
    #[arg(long)]
    pub(crate) margin: Option<u32>,
    /// Print results as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Catalog file (.csv or .json) to summarize
    #[arg(long)]
    pub(crate) catalog: PathBuf,
}

pub(crate) fn run_query(args: QueryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let window = query_window(config.finder.window, args.margin);
    let store = load_store(Some(args.catalog.as_path()))?;
    let service = CollegeFinderService::new(Arc::new(store), RankingEngine::new(window));

    let params = QueryParams {
        rank: args.rank,
        branch: args.branch,
        category: args.category,
        district: args.district,
        region: args.region,
    };
    let results = service.find(&params)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&results).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_table(&results));
    }
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let store = load_store(Some(args.catalog.as_path()))?;
    let service = CollegeFinderService::new(Arc::new(store), RankingEngine::default());
    let stats = service.stats()?;

    println!("Colleges:   {}", stats.total_colleges);
    println!("Offerings:  {}", stats.total_offerings);
    println!("Districts:  {}", stats.districts.join(", "));
    println!("Regions:    {}", stats.regions.join(", "));
    if let Some(top) = &stats.top_college {
        println!(
            "Top college: {} (best cutoff {})",
            top.display_name(),
            top.best_cutoff
        );
    }
    Ok(())
}

fn query_window(configured: EligibilityWindow, margin: Option<u32>) -> EligibilityWindow {
    match margin {
        Some(margin) => EligibilityWindow {
            margin,
            ..configured
        },
        None => configured,
    }
}

fn render_table(results: &[RankedResult]) -> String {
    if results.is_empty() {
        return "No colleges matched the query.\n".to_string();
    }

    let mut output = format!(
        "{:<4} {:<8} {:<6} {:<5} {:<5} {:>8} {:<9} {}\n",
        "#", "INST", "BRANCH", "DIST", "REG", "CUTOFF", "CHANCE", "COLLEGE"
    );
    for (position, result) in results.iter().enumerate() {
        let offering = &result.offering;
        let cutoff = result
            .selected_cutoff
            .map(|cutoff| cutoff.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let chance = result.chance.map(|chance| chance.label()).unwrap_or("-");
        output.push_str(&format!(
            "{:<4} {:<8} {:<6} {:<5} {:<5} {:>8} {:<9} {}\n",
            position + 1,
            offering.institution_code,
            offering.branch_code,
            offering.location.district,
            offering.location.region,
            cutoff,
            chance,
            offering.details.name.as_deref().unwrap_or("")
        ));
    }
    output
}
