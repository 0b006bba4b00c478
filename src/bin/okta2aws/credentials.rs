use crate::utils;
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use okta2aws::aws::Credential;
use okta2aws::okta::okta_client::OktaClient;
use okta2aws::settings::{AppConfig, AwsHost};
use serde_json::json;

#[derive(Parser)]
pub struct Credentials {
    #[clap(subcommand)]
    sub_command: CredentialsSubCommands,
}

#[derive(Subcommand)]
enum CredentialsSubCommands {
    Aws(AwsCredentials),
}

#[derive(ValueEnum, PartialEq, Debug, Clone, Copy, Default)]
enum OutputOptions {
    #[default]
    Env,
    AwsProfile,
}

#[derive(Parser)]
struct AwsCredentials {
    #[clap(long)]
    app_url: Option<String>,
    #[clap(short, long)]
    username: Option<String>,
    #[clap(long, value_enum)]
    output: Option<OutputOptions>,
}

impl Credentials {
    pub async fn run(&self, settings: AppConfig) -> Result<()> {
        match &self.sub_command {
            CredentialsSubCommands::Aws(val) => val.run(settings).await,
        }
    }
}

impl AwsCredentials {
    async fn run(&self, settings: AppConfig) -> Result<()> {
        let aws_settings = self.find_settings(&settings)?;
        let password = utils::get_password()?;

        let client = OktaClient::new()?;
        let credential = client
            .aws_credentials(aws_settings.username, password, aws_settings.app_url)
            .await?;

        print_credential(&credential, self.output)
    }

    fn find_settings(&self, settings: &AppConfig) -> Result<AwsSettings> {
        let default_settings = match self.app_url.clone() {
            Some(app_url) => settings.find_aws_host(app_url),
            None => settings.aws_hosts(),
        };

        let app_url = match self.app_url.clone() {
            None => default_settings
                .clone()
                .ok_or_else(|| anyhow!("please supply an app-url"))?
                .app_url(),
            Some(url) => url,
        };

        let username = match self.username.clone() {
            None => default_settings
                .ok_or_else(|| anyhow!("please supply a username"))?
                .username(),
            Some(username) => username,
        };

        Ok(AwsSettings { app_url, username })
    }
}

struct AwsSettings {
    app_url: String,
    username: String,
}

fn print_credential(credential: &Credential, output: Option<OutputOptions>) -> Result<()> {
    match output.unwrap_or_default() {
        OutputOptions::Env => {
            if let Some(role_arn) = credential.role_arn() {
                println!("export AWS_ROLE_ARN=\"{}\"", role_arn);
            }
            println!(
                "export AWS_ACCESS_KEY_ID=\"{}\"\nexport AWS_SECRET_ACCESS_KEY=\"{}\"\nexport AWS_SESSION_TOKEN=\"{}\"",
                credential.access_key_id(),
                credential.secret_access_key(),
                credential.session_token()
            );
        }
        OutputOptions::AwsProfile => {
            let json = json!({
                "Version": 1,
                "AccessKeyId": credential.access_key_id(),
                "SecretAccessKey": credential.secret_access_key(),
                "SessionToken": credential.session_token(),
                "Expiration": credential.expiration()
            });

            println!("{}", json)
        }
    }

    Ok(())
}
