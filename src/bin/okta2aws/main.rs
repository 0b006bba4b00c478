mod config;
mod credentials;
mod utils;

use crate::config::Config;
use crate::credentials::Credentials;
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use okta2aws::settings::AppConfig;
use simple_logger::SimpleLogger;

#[derive(Parser)]
#[clap(version, about = "Exchange okta credentials for temporary AWS credentials")]
struct Opts {
    #[clap(subcommand)]
    sub_command: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    Config(Config),
    Creds(Credentials),
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt: Opts = Opts::parse();
    let mut settings = AppConfig::read_config()?;

    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    match opt.sub_command {
        SubCommand::Config(val) => val.run(&mut settings)?,
        SubCommand::Creds(val) => val.run(settings).await?,
    }

    Ok(())
}
