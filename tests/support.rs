use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Token the fake API accepts; anything else gets a 401.
pub const VALID_TOKEN: &str = "valid-token";

const DEVICES_BODY: &str = r#"{
  "count": 2,
  "devices": [
    {"device_id": "dev-1", "latitude": 48.8566, "longitude": 2.3522, "timestamp": 1700000000000,
     "infos": {"device_id": "dev-1", "display_name": "Pixel", "summary": {"platform": "android"}}},
    {"device_id": "dev-2", "latitude": 40.7128, "longitude": -74.006, "timestamp": 1699990000000,
     "infos": {"device_id": "dev-2", "display_name": "iPhone", "summary": {"platform": "ios"}}}
  ]
}"#;

const DETAILS_BODY: &str = r#"{
  "device_id": "dev-1",
  "display_name": "Pixel",
  "platform": "android",
  "manufacturer": "Google",
  "model": "Pixel 8",
  "supported_abis": ["arm64-v8a"]
}"#;

const HISTORY_BODY: &str = r#"{
  "device_id": "dev-1",
  "count": 3,
  "history": [
    {"latitude": 48.85, "longitude": 2.35, "timestamp": 1700000000000, "device_id": "dev-1"},
    {"latitude": 48.84, "longitude": 2.34, "timestamp": 1699900000000, "device_id": "dev-1"},
    {"latitude": 48.83, "longitude": 2.33, "timestamp": 1699000000000, "device_id": "dev-1"}
  ]
}"#;

const UNAUTHORIZED_BODY: &str = r#"{"detail": "Could not validate credentials"}"#;
const NOT_FOUND_BODY: &str = r#"{"detail": "Not Found"}"#;

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a fake location API for tests.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_api_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

struct Request {
    method: String,
    path: String,
    authorization: Option<String>,
}

fn read_request(stream: &TcpStream) -> Option<Request> {
    if stream.set_nonblocking(false).is_err() {
        return None;
    }
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_owned();
    let path = parts.next()?.to_owned();

    let mut authorization = None;
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            if name == "authorization" {
                authorization = Some(value.trim().to_owned());
            } else if name == "content-length" {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(Request {
        method,
        path,
        authorization,
    })
}

fn route(request: &Request) -> (&'static str, &'static str) {
    if request.method == "POST" && request.path == "/auth/token" {
        return ("200 OK", r#"{"access_token": "valid-token", "token_type": "bearer"}"#);
    }
    let expected = format!("Bearer {}", VALID_TOKEN);
    if request.authorization.as_deref() != Some(expected.as_str()) {
        return ("401 Unauthorized", UNAUTHORIZED_BODY);
    }
    let path = request
        .path
        .split_once('?')
        .map_or(request.path.as_str(), |(path, _)| path);
    match path {
        "/devices" => ("200 OK", DEVICES_BODY),
        "/device/dev-1/details" => ("200 OK", DETAILS_BODY),
        "/device/dev-1/location/history" => ("200 OK", HISTORY_BODY),
        _ => ("404 Not Found", NOT_FOUND_BODY),
    }
}

fn handle_client(mut stream: TcpStream) {
    let Some(request) = read_request(&stream) else {
        return;
    };
    let (status, body) = route(&request);
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

/// Run the `nyanlook` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_nyanlook<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = nyanlook_bin()?;
    Command::new(bin)
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("NYANLOOK_TOKEN")
        .env_remove("NYANLOOK_USERNAME")
        .env_remove("NYANLOOK_PASSWORD")
        .env_remove("NYANLOOK_API_URL")
        .output()
        .map_err(|err| format!("run nyanlook failed: {}", err))
}

fn nyanlook_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_nyanlook").map_or_else(
        || Err("CARGO_BIN_EXE_nyanlook missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
