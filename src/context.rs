use std::path::PathBuf;
use std::time::Duration;

use crate::configuration::Configuration;

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let config = Configuration {
            api_listen: cli.api_listen,
            storage: cli.storage,
            data_dir: PathBuf::from(&cli.data_dir),
            db_name: cli.db_name.clone(),
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            reset: cli.reset,
        };
        Self { config }
    }
}
