//! End-to-end tests against the compiled binary
//!
//! These observe process exit codes, which in-process tests cannot.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};

/// Pick a free local port by binding to port 0 and releasing it
fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    listener
        .local_addr()
        .expect("Listener has no local address")
        .port()
}

fn spawn_binary(port: u16) -> Child {
    Command::new(env!("CARGO_BIN_EXE_chaos-probe"))
        .env("PROBE_HOST", "127.0.0.1")
        .env("PROBE_PORT", port.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn chaos-probe")
}

/// Wait for the binary to accept connections with retry logic
async fn wait_for_server(port: u16, max_retries: u32) -> reqwest::Client {
    let client = reqwest::Client::new();
    let mut delay = Duration::from_millis(10);

    for attempt in 1..=max_retries {
        match client
            .get(format!("http://127.0.0.1:{}/live", port))
            .timeout(Duration::from_millis(200))
            .send()
            .await
        {
            Ok(_) => return client,
            Err(_) if attempt < max_retries => {
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, Duration::from_millis(200));
            }
            Err(e) => panic!("Server not ready after {} attempts: {}", max_retries, e),
        }
    }
    client
}

async fn wait_for_exit(child: &mut Child) -> ExitStatus {
    tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("Process did not exit in time")
        .expect("Failed to wait on process")
}

#[tokio::test]
async fn test_crash_exits_with_code_1() {
    let port = free_port();
    let mut child = spawn_binary(port);
    let client = wait_for_server(port, 30).await;

    // The connection usually drops before a response is written
    let _ = client
        .post(format!("http://127.0.0.1:{}/crash", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await;

    let status = wait_for_exit(&mut child).await;
    assert_eq!(status.code(), Some(1), "Crash should exit with code 1");
}

#[tokio::test]
async fn test_scenario_against_binary() {
    let port = free_port();
    let mut child = spawn_binary(port);
    let client = wait_for_server(port, 30).await;
    let url = |path: &str| format!("http://127.0.0.1:{}{}", port, path);

    let response = client.get(url("/ready")).send().await.expect("GET /ready");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("body"), r#"{"status":"ok"}"#);

    let response = client.post(url("/freeze")).send().await.expect("POST /freeze");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("body"), r#"{"status":"frozen"}"#);

    let response = client.get(url("/ready")).send().await.expect("GET /ready");
    assert_eq!(response.status(), 503);
    assert_eq!(response.text().await.expect("body"), r#"{"status":"frozen"}"#);

    let response = client
        .post(url("/unfreeze"))
        .send()
        .await
        .expect("POST /unfreeze");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("body"), r#"{"status":"unfrozen"}"#);

    let response = client.get(url("/ready")).send().await.expect("GET /ready");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("body"), r#"{"status":"ok"}"#);

    child.kill().await.expect("Failed to kill chaos-probe");
}

#[cfg(unix)]
#[tokio::test]
async fn test_sigterm_shuts_down_gracefully() {
    let port = free_port();
    let mut child = spawn_binary(port);
    wait_for_server(port, 30).await;
    // Signal handlers are registered by a spawned task; give it time to run
    tokio::time::sleep(Duration::from_millis(200)).await;

    let pid = child.id().expect("Child has no pid").to_string();
    let kill = Command::new("kill")
        .args(["-TERM", pid.as_str()])
        .status()
        .await
        .expect("Failed to run kill");
    assert!(kill.success());

    let status = wait_for_exit(&mut child).await;
    assert_eq!(status.code(), Some(0), "SIGTERM should exit cleanly");
}

#[tokio::test]
async fn test_invalid_port_fails_startup() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chaos-probe"))
        .env("PROBE_PORT", "not-a-port")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn chaos-probe");

    let status = wait_for_exit(&mut child).await;
    assert!(!status.success(), "Bad configuration must abort startup");
}
