#![allow(dead_code)]

use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

pub struct Server {
    child: Child,
    pub base_url: String,
}

impl Server {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.local_addr().expect("local addr").port()
}

pub fn base_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_capybara-api"));
    cmd.env("DOTENV_PATH", data_dir.path().join("missing.env"))
        .env("RUST_LOG", "warn")
        .env_remove("CAPYBARA_API_LISTEN")
        .env_remove("CAPYBARA_STORAGE")
        .env_remove("CAPYBARA_DB_NAME")
        .env_remove("CAPYBARA_LOG_FILE")
        .env_remove("CAPYBARA_REQUEST_TIMEOUT_SECS")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

pub fn client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("http client")
}

/// Starts the service with `extra` arguments and waits until `/health` answers.
pub fn spawn_server(data_dir: &TempDir, extra: &[&str]) -> Server {
    let port = free_port();
    let child = base_cmd(data_dir)
        .arg("--api-listen")
        .arg(format!("127.0.0.1:{port}"))
        .args(extra)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn capybara-api");

    let server = Server {
        child,
        base_url: format!("http://127.0.0.1:{port}"),
    };

    let http = client();
    let deadline = Instant::now() + Duration::from_secs(15);
    loop {
        if let Ok(resp) = http.get(server.url("/health")).send() {
            if resp.status().is_success() {
                return server;
            }
        }
        assert!(Instant::now() < deadline, "capybara-api did not become ready");
        thread::sleep(Duration::from_millis(100));
    }
}
