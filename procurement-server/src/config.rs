use {
    anyhow::Result,
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::fs,
};

mod server;

// `Options` is a structup definition to provide clean command-line args for the procurement server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
#[allow(clippy::large_enum_variant)]
pub enum Options {
    /// Run the procurement server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub config: ConfigOptions,

    /// Bearer token that grants access to the admin routes.
    #[arg(long = "secret-key")]
    #[arg(env = "SECRET_KEY")]
    pub secret_key: String,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Config Options")]
#[group(id = "Config")]
pub struct ConfigOptions {
    /// Path to a configuration file containing the lifecycle policy
    #[arg(long = "config")]
    #[arg(env = "PROCUREMENT_CONFIG")]
    #[arg(default_value = "config.yaml")]
    pub config: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

impl Config {
    pub fn load(path: &str) -> Result<Config> {
        let yaml_content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&yaml_content)?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LifecycleConfig {
    /// Refuse to delete an rfq which already received bids or was awarded.
    #[serde(default)]
    pub protect_referenced_rfqs: bool,

    /// Validity period in days for bids which do not specify one.
    #[serde(default = "LifecycleConfig::default_bid_validity_days")]
    pub default_bid_validity_days: i64,
}

impl LifecycleConfig {
    pub fn default_bid_validity_days() -> i64 {
        30
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            protect_referenced_rfqs:   false,
            default_bid_validity_days: Self::default_bid_validity_days(),
        }
    }
}
