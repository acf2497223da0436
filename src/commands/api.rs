use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use clap::{Parser, ValueEnum};
use ohno::IntoAppError;
use serde::Serialize;
use std::io::Write;

/// The JSON view to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Cases, deaths and hospital occupancy per province
    Bundesland,

    /// Cases per district
    Bezirk,

    /// National totals and the age distribution
    Total,
}

#[derive(Parser, Debug)]
pub struct ApiArgs {
    #[arg(value_name = "VIEW")]
    pub view: View,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn print_view<H: Host>(host: &mut H, args: &ApiArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let api = common.sources.api()?;

    let json = match args.view {
        View::Bundesland => to_json(&api.bundesland().await.into_app_err("building the province view")?)?,
        View::Bezirk => to_json(&api.bezirk().await.into_app_err("building the district view")?)?,
        View::Total => to_json(&api.total().await.into_app_err("building the national view")?)?,
    };

    let _ = writeln!(common.host().output(), "{json}");
    Ok(())
}

fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).into_app_err("serializing JSON view")
}
