use anyhow::Result;
use clap::{Parser, Subcommand};
use okta2aws::settings::{AppConfig, AwsHost};

#[derive(Parser)]
pub struct Config {
    #[clap(subcommand)]
    sub_command: ConfigSubCommand,
}

#[derive(Subcommand)]
enum ConfigSubCommand {
    Add(ConfigAdd),
}

#[derive(Parser)]
struct ConfigAdd {
    #[clap(subcommand)]
    sub_command: ConfigAddSubCommand,
}

#[derive(Subcommand)]
enum ConfigAddSubCommand {
    Aws(ConfigAddAws),
}

#[derive(Parser)]
struct ConfigAddAws {
    #[clap(required = true, long)]
    app_url: String,
    #[clap(required = true, short, long)]
    username: String,
}

impl Config {
    pub fn run(&self, settings: &mut AppConfig) -> Result<()> {
        match &self.sub_command {
            ConfigSubCommand::Add(val) => match &val.sub_command {
                ConfigAddSubCommand::Aws(val) => val.run(settings),
            },
        }
    }
}

impl ConfigAddAws {
    fn run(&self, settings: &mut AppConfig) -> Result<()> {
        let host = AwsHost::new(self.app_url.clone(), self.username.clone())?;
        settings.add_aws_host(host);
        settings.write_config()?;

        Ok(())
    }
}
