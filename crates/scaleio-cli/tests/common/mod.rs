use std::process::{Command, Output};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER: &str = "admin";
pub const PASSWORD: &str = "Password123";

/// Run the CLI binary with arguments and a clean `SCALEIO_*` environment.
///
/// The child blocks, so it runs off the async runtime to keep the mock
/// server responsive.
pub async fn run_cli(args: &[&str]) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sio"));
        cmd.args(&args);
        for key in [
            "SCALEIO_ENDPOINT",
            "SCALEIO_VERSION",
            "SCALEIO_INSECURE",
            "SCALEIO_CA_CERT",
            "SCALEIO_DEBUG",
            "SCALEIO_SHOW_HTTP",
            "SCALEIO_TIMEOUT_SECS",
            "SCALEIO_USERNAME",
            "SCALEIO_PASSWORD",
            "RUST_LOG",
        ] {
            cmd.env_remove(key);
        }
        cmd.env("NO_COLOR", "1");
        cmd.output().expect("Failed to execute CLI")
    })
    .await
    .expect("CLI task panicked")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn endpoint(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/api", server.address().port())
}

/// Mount version discovery and a login accepting the test user.
pub async fn mount_session(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/api/version"))
        .respond_with(ResponseTemplate::new(200).set_body_string("\"2.0\""))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!("\"{token}\"")))
        .mount(server)
        .await;
}
