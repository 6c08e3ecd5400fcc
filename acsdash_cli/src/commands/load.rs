use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::ProgressBar;

use acsdash_lib::{apply_filters, Ethnicity, FilterCriteria, Pipeline};

use crate::output::{print_json, print_records_table, OutputFormat};

#[derive(Args)]
pub struct LoadArgs {
    /// Population group: mexican or salvadoran
    #[arg(long, default_value = "mexican")]
    pub ethnicity: String,

    /// Age buckets to require, comma-separated (e.g. 18to24,25to34)
    #[arg(long, value_delimiter = ',')]
    pub age_range: Vec<String>,

    /// Income buckets to require (e.g. under25k,25kto50k)
    #[arg(long, value_delimiter = ',')]
    pub income_range: Vec<String>,

    /// Education buckets to require (e.g. highSchool,bachelors)
    #[arg(long, value_delimiter = ',')]
    pub education_level: Vec<String>,

    /// Ceiling in seconds for the initial nationwide fetch
    #[arg(long, default_value = "15")]
    pub timeout: u64,
}

pub async fn run(args: LoadArgs, pipeline: Pipeline, format: &OutputFormat) -> Result<()> {
    let ethnicity: Ethnicity = args.ethnicity.parse()?;
    let pipeline = pipeline.with_basic_timeout(Duration::from_secs(args.timeout));

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("loading {} population data...", ethnicity));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let records = pipeline.load_population_data(ethnicity).await;
    spinner.finish_and_clear();

    let criteria = FilterCriteria {
        age_range: args.age_range,
        income_range: args.income_range,
        education_level: args.education_level,
    };
    let filtered = apply_filters(&records, &criteria);

    eprintln!(
        "{} location(s){}",
        filtered.len(),
        if criteria.is_unrestricted() {
            String::new()
        } else {
            format!(" after filters ({} loaded)", records.len())
        }
    );

    match format {
        OutputFormat::Table => print_records_table(&filtered),
        OutputFormat::Json => print_json(&filtered)?,
    }

    Ok(())
}
