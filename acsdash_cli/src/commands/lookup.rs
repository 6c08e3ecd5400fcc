use anyhow::Result;
use clap::Args;

use acsdash_lib::Pipeline;

use crate::output::{print_json, print_profile_table, print_units_table, OutputFormat};

#[derive(Args)]
pub struct ZipArgs {
    /// 5-digit ZIP code
    pub zip: String,
}

#[derive(Args)]
pub struct PlaceArgs {
    /// 2-digit FIPS state code (e.g. 06)
    #[arg(long)]
    pub state: String,

    /// FIPS place code (e.g. 44000)
    #[arg(long)]
    pub place: String,
}

#[derive(Args)]
pub struct CityArgs {
    /// City name (e.g. "el paso")
    pub name: String,
}

#[derive(Args)]
pub struct PlacesArgs {
    /// 2-digit FIPS state code
    #[arg(long)]
    pub state: String,
}

pub async fn run_zip(args: &ZipArgs, pipeline: &Pipeline, format: &OutputFormat) -> Result<()> {
    let profile = pipeline.lookup_zip(&args.zip).await?;
    match format {
        OutputFormat::Table => print_profile_table(&profile),
        OutputFormat::Json => print_json(&profile)?,
    }
    Ok(())
}

pub async fn run_place(args: &PlaceArgs, pipeline: &Pipeline, format: &OutputFormat) -> Result<()> {
    let profile = pipeline.lookup_place(&args.state, &args.place).await?;
    match format {
        OutputFormat::Table => print_profile_table(&profile),
        OutputFormat::Json => print_json(&profile)?,
    }
    Ok(())
}

pub async fn run_city(args: &CityArgs, pipeline: &Pipeline, format: &OutputFormat) -> Result<()> {
    let profile = pipeline.lookup_city(&args.name).await?;
    match format {
        OutputFormat::Table => print_profile_table(&profile),
        OutputFormat::Json => print_json(&profile)?,
    }
    Ok(())
}

pub async fn run_places(
    args: &PlacesArgs,
    pipeline: &Pipeline,
    format: &OutputFormat,
) -> Result<()> {
    let units = pipeline.places_for_state(&args.state).await?;
    eprintln!("{} place(s) in state {}", units.len(), args.state);
    match format {
        OutputFormat::Table => print_units_table(&units),
        OutputFormat::Json => print_json(&units)?,
    }
    Ok(())
}
