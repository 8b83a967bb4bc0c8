use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Sqlite,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKind::Memory => "memory",
            StorageKind::Sqlite => "sqlite",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Configuration {
    pub api_listen: SocketAddr,
    pub storage: StorageKind,
    pub data_dir: PathBuf,
    pub db_name: String,
    pub request_timeout: Duration,
    pub log_file: Option<PathBuf>,
    pub reset: bool,
}

impl Configuration {
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_name)
    }
}
