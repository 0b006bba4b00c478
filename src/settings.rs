use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

#[derive(Serialize, Deserialize, Default)]
pub struct AppConfig {
    hosts: Option<Vec<AwsHost>>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct AwsHost {
    app_url: String,
    username: String,
}

impl AppConfig {
    pub fn add_aws_host(&mut self, host: AwsHost) {
        let hosts = self.hosts.get_or_insert(vec![]);
        match hosts.iter_mut().find(|i| i.app_url == host.app_url) {
            Some(existing) => {
                existing.username = host.username;
            }
            None => {
                hosts.push(host);
            }
        }
    }

    pub fn aws_hosts(&self) -> Option<AwsHost> {
        self.hosts.as_ref()?.first().cloned()
    }

    pub fn find_aws_host(&self, app_url: String) -> Option<AwsHost> {
        match &self.hosts {
            Some(hosts) => hosts.iter().find(|host| app_url == host.app_url).cloned(),
            None => None,
        }
    }

    pub fn read_config() -> Result<Self> {
        let config_file = AppConfig::config_file()?;
        if !config_file.exists() {
            return Ok(AppConfig::default());
        }

        let config_contents = fs::read_to_string(config_file)?;
        let config: AppConfig = toml::from_str(config_contents.as_str())?;

        Ok(config)
    }

    pub fn write_config(&self) -> Result<()> {
        let config_dir = AppConfig::config_dir()?;
        fs::create_dir_all(&config_dir)?;

        let toml = toml::to_string(&self)?;
        fs::write(AppConfig::config_file()?, toml)?;

        Ok(())
    }

    fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("could not determine config directory"))?
            .join("okta2aws");

        Ok(config_dir)
    }

    fn config_file() -> Result<PathBuf> {
        let config_file = AppConfig::config_dir()?.join("settings.toml");

        Ok(config_file)
    }
}

impl AwsHost {
    pub fn new(app_url: String, username: String) -> Result<Self> {
        let mut app_url = Url::parse(app_url.as_str())?;

        // remove query
        app_url.set_query(None);

        // remove trailing slash
        app_url
            .path_segments_mut()
            .map_err(|_| anyhow!("app url cannot be a base"))?
            .pop_if_empty();

        Ok(AwsHost {
            app_url: String::from(app_url),
            username,
        })
    }

    pub fn app_url(&self) -> String {
        self.app_url.clone()
    }

    pub fn username(&self) -> String {
        self.username.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_url_normalization() {
        let host = AwsHost::new(
            String::from("https://okta.example.com/home/amazon_aws/0oa123/272/?fromHome=true"),
            String::from("jdoe"),
        )
        .unwrap();

        assert_eq!(
            host.app_url(),
            "https://okta.example.com/home/amazon_aws/0oa123/272"
        );
        assert_eq!(host.username(), "jdoe");
    }

    #[test]
    fn test_add_aws_host_updates_existing_entry() {
        let mut config = AppConfig::default();
        let url = String::from("https://okta.example.com/home/amazon_aws/0oa123/272");

        config.add_aws_host(AwsHost::new(url.clone(), String::from("jdoe")).unwrap());
        config.add_aws_host(AwsHost::new(url.clone(), String::from("jsmith")).unwrap());

        let host = config.find_aws_host(url).unwrap();
        assert_eq!(host.username(), "jsmith");
    }

    #[test]
    fn test_find_aws_host_without_match() {
        let mut config = AppConfig::default();
        config.add_aws_host(
            AwsHost::new(
                String::from("https://okta.example.com/home/amazon_aws/0oa123/272"),
                String::from("jdoe"),
            )
            .unwrap(),
        );

        let host = config.find_aws_host(String::from("https://other.example.com/app"));
        assert!(host.is_none());
    }
}
