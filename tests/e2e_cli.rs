mod support;

use std::process::Output;

use support::{VALID_TOKEN, run_nyanlook, spawn_api_server};

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn expect_success(output: &Output) -> Result<String, String> {
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(stdout_of(output))
}

#[test]
fn e2e_devices_lists_fleet() -> Result<(), String> {
    let (url, _server) = spawn_api_server()?;
    let output = run_nyanlook(["--api-url", &url, "--token", VALID_TOKEN, "--no-ui", "devices"])?;
    let stdout = expect_success(&output)?;
    for expected in ["Devices (2)", "dev-1", "Pixel", "android", "iPhone", "48.85660"] {
        if !stdout.contains(expected) {
            return Err(format!("Missing '{}' in:\n{}", expected, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_without_terminal_falls_back_to_device_list() -> Result<(), String> {
    let (url, _server) = spawn_api_server()?;
    let output = run_nyanlook(["--api-url", &url, "--token", VALID_TOKEN])?;
    let stdout = expect_success(&output)?;
    if !stdout.contains("Devices (2)") {
        return Err(format!("Expected the device list, got:\n{}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_device_windows_history() -> Result<(), String> {
    let (url, _server) = spawn_api_server()?;
    let output = run_nyanlook([
        "--api-url",
        &url,
        "--token",
        VALID_TOKEN,
        "device",
        "dev-1",
        "--window",
        "48h",
    ])?;
    let stdout = expect_success(&output)?;
    for expected in [
        "Device dev-1",
        "Manufacturer: Google",
        "History: 3 points fetched, 2 in window (48h)",
        "Last: 48.85000, 2.35000",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("Missing '{}' in:\n{}", expected, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_login_prints_token() -> Result<(), String> {
    let (url, _server) = spawn_api_server()?;
    let output = run_nyanlook([
        "--api-url",
        &url,
        "--username",
        "ops",
        "--password",
        "secret",
        "login",
    ])?;
    let stdout = expect_success(&output)?;
    if stdout.trim() != VALID_TOKEN {
        return Err(format!("Unexpected login output: {}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_rejected_token_fails() -> Result<(), String> {
    let (url, _server) = spawn_api_server()?;
    let output = run_nyanlook(["--api-url", &url, "--token", "stale", "--no-ui", "devices"])?;
    if output.status.success() {
        return Err(format!("Expected failure, got:\n{}", stdout_of(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("401") {
        return Err(format!("Expected a 401 in stderr:\n{}", stderr));
    }
    Ok(())
}

#[test]
fn e2e_missing_credentials_fail() -> Result<(), String> {
    let (url, _server) = spawn_api_server()?;
    let output = run_nyanlook(["--api-url", &url, "--no-ui", "devices"])?;
    if output.status.success() {
        return Err("Expected failure without credentials".to_owned());
    }
    Ok(())
}
