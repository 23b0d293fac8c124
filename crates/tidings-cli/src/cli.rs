//! CLI.

use super::*;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the toml configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Port override for the http server.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
    /// Log at debug level.
    #[arg(long, default_value_t = false)]
    pub debug: bool,
    /// Log at trace level.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Parse the configuration file. A missing default config falls back to
    /// built-in defaults; an explicitly-passed path must exist.
    pub fn parse_config(&self) -> Result<Config> {
        let config_path: PathBuf = match &self.config {
            Some(path) => path.clone(),
            None => PathBuf::from(DEFAULT_CONFIG_PATH),
        };
        if !config_path.exists() {
            if self.config.is_some() {
                bail!("No config file at {:?}.", config_path);
            }
            return Ok(Config::default());
        }
        let config_data = match std::fs::read_to_string(&config_path) {
            Ok(data) => data,
            Err(e) => {
                bail!("Unable to read config file {:?}: {}", config_path, e)
            }
        };
        match toml::from_str::<Config>(&config_data) {
            Ok(config) => Ok(config),
            Err(e) => {
                bail!("Configuration file {:?} is not valid: {}", config_path, e)
            }
        }
    }
}
