use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::{ApiClient, DeviceApi};
use crate::error::{ApiError, AppError, AppResult};

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

struct CannedResponse {
    status: u16,
    body: &'static str,
}

/// Serves one canned response per connection and returns the raw requests.
async fn spawn_api_server(
    responses: Vec<CannedResponse>,
) -> AppResult<(String, JoinHandle<AppResult<Vec<String>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| AppError::validation(format!("Failed to bind API server: {}", err)))?;
    let addr = listener
        .local_addr()
        .map_err(|err| AppError::validation(format!("Failed to read API addr: {}", err)))?;

    let task = tokio::spawn(async move {
        let mut requests = Vec::with_capacity(responses.len());
        for response in responses {
            let (mut stream, _) = timeout(TEST_TIMEOUT, listener.accept())
                .await
                .map_err(|_err| AppError::validation("API accept timed out"))?
                .map_err(|err| AppError::validation(format!("API accept failed: {}", err)))?;
            requests.push(read_request(&mut stream).await?);
            let reply = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.status,
                response.body.len(),
                response.body
            );
            stream
                .write_all(reply.as_bytes())
                .await
                .map_err(|err| AppError::validation(format!("API write failed: {}", err)))?;
            drop(stream.shutdown().await);
        }
        Ok(requests)
    });
    Ok((format!("http://{}", addr), task))
}

async fn read_request(stream: &mut TcpStream) -> AppResult<String> {
    let mut raw = Vec::with_capacity(1024);
    loop {
        let mut chunk = [0_u8; 1024];
        let read = timeout(TEST_TIMEOUT, stream.read(&mut chunk))
            .await
            .map_err(|_err| AppError::validation("API read timed out"))?
            .map_err(|err| AppError::validation(format!("API read failed: {}", err)))?;
        if read == 0 {
            break;
        }
        raw.extend_from_slice(chunk.get(..read).unwrap_or_default());
        let text = String::from_utf8_lossy(&raw);
        if let Some((head, body)) = text.split_once("\r\n\r\n") {
            let expected = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if body.len() >= expected {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

async fn finish(task: JoinHandle<AppResult<Vec<String>>>) -> AppResult<Vec<String>> {
    timeout(TEST_TIMEOUT, task)
        .await
        .map_err(|_err| AppError::validation("API server did not finish"))?
        .map_err(|err| AppError::validation(format!("API server task failed: {}", err)))?
}

fn client(base: &str) -> AppResult<ApiClient> {
    Ok(ApiClient::new(base, TEST_TIMEOUT)?)
}

#[test]
fn login_posts_form_and_returns_token() -> AppResult<()> {
    run_async_test(async {
        let (base, task) = spawn_api_server(vec![CannedResponse {
            status: 200,
            body: r#"{"access_token":"tok-1","token_type":"bearer"}"#,
        }])
        .await?;
        let token = client(&base)?.login("ops", "s3cret&x").await?;
        if token != "tok-1" {
            return Err(AppError::validation(format!("Unexpected token {}", token)));
        }
        let requests = finish(task).await?;
        let request = requests
            .first()
            .ok_or_else(|| AppError::validation("Missing request"))?;
        if !request.starts_with("POST /auth/token ") {
            return Err(AppError::validation(format!("Unexpected request line: {}", request)));
        }
        if !request.contains("username=ops&password=s3cret%26x") {
            return Err(AppError::validation("Form body not encoded"));
        }
        Ok(())
    })
}

#[test]
fn login_without_access_token_is_an_error() -> AppResult<()> {
    run_async_test(async {
        let (base, task) = spawn_api_server(vec![CannedResponse {
            status: 200,
            body: r#"{"token_type":"bearer"}"#,
        }])
        .await?;
        match client(&base)?.login("ops", "pw").await {
            Err(ApiError::MissingAccessToken { .. }) => {}
            Ok(_) | Err(_) => return Err(AppError::validation("Expected missing token error")),
        }
        finish(task).await?;
        Ok(())
    })
}

#[test]
fn devices_send_bearer_token() -> AppResult<()> {
    run_async_test(async {
        let (base, task) = spawn_api_server(vec![CannedResponse {
            status: 200,
            body: r#"{"count":1,"devices":[{"device_id":"d1","latitude":1.5,"longitude":2.5,"timestamp":10,"infos":{}}]}"#,
        }])
        .await?;
        let devices = client(&base)?.devices("tok-1").await?;
        if devices.len() != 1 || devices.first().map(|d| d.device_id.as_str()) != Some("d1") {
            return Err(AppError::validation("Unexpected device list"));
        }
        let requests = finish(task).await?;
        let request = requests.concat().to_ascii_lowercase();
        if !request.starts_with("get /devices ") {
            return Err(AppError::validation("Unexpected request line"));
        }
        if !request.contains("authorization: bearer tok-1") {
            return Err(AppError::validation("Missing bearer header"));
        }
        Ok(())
    })
}

#[test]
fn history_encodes_device_id_and_limit() -> AppResult<()> {
    run_async_test(async {
        let (base, task) = spawn_api_server(vec![CannedResponse {
            status: 200,
            body: r#"{"device_id":"a/b","count":2,"history":[
                {"latitude":1.0,"longitude":2.0,"timestamp":20,"device_id":"a/b"},
                {"latitude":1.1,"longitude":2.1,"timestamp":10,"device_id":"a/b"}]}"#,
        }])
        .await?;
        let history = client(&base)?.location_history("t", "a/b", 100).await?;
        if history.len() != 2 {
            return Err(AppError::validation("Expected two points"));
        }
        let requests = finish(task).await?;
        if !requests.concat().starts_with("GET /device/a%2Fb/location/history?limit=100 ") {
            return Err(AppError::validation(format!("Unexpected request: {:?}", requests)));
        }
        Ok(())
    })
}

#[test]
fn error_status_carries_detail() -> AppResult<()> {
    run_async_test(async {
        let (base, task) = spawn_api_server(vec![
            CannedResponse {
                status: 401,
                body: r#"{"detail":"Could not validate credentials"}"#,
            },
            CannedResponse {
                status: 500,
                body: "not json",
            },
        ])
        .await?;
        let api = client(&base)?;
        match api.device_details("t", "d1").await {
            Err(err @ ApiError::Status { .. }) if err.is_unauthorized() => {
                if err.to_string() != "API responded 401: Could not validate credentials" {
                    return Err(AppError::validation(format!("Unexpected message: {}", err)));
                }
            }
            Ok(_) | Err(_) => return Err(AppError::validation("Expected 401 status error")),
        }
        match api.devices("t").await {
            Err(ApiError::Status { status: 500, detail }) if detail == "Internal Server Error" => {}
            Ok(_) | Err(_) => return Err(AppError::validation("Expected 500 with reason")),
        }
        finish(task).await?;
        Ok(())
    })
}

#[test]
fn invalid_base_url_is_rejected() -> AppResult<()> {
    match ApiClient::new("not a url", TEST_TIMEOUT) {
        Err(ApiError::InvalidBaseUrl { .. }) => {}
        Ok(_) | Err(_) => return Err(AppError::validation("Expected invalid URL error")),
    }
    match ApiClient::new("mailto:ops@example.com", TEST_TIMEOUT) {
        Err(ApiError::BaseUrlNotHierarchical { .. }) => Ok(()),
        Ok(_) | Err(_) => Err(AppError::validation("Expected non-hierarchical URL error")),
    }
}

#[test]
fn endpoint_keeps_base_path() -> AppResult<()> {
    let api = client("http://localhost:8000/api/")?;
    let url = api.endpoint(&["device", "x y", "details"])?;
    if url.as_str() != "http://localhost:8000/api/device/x%20y/details" {
        return Err(AppError::validation(format!("Unexpected endpoint {}", url)));
    }
    Ok(())
}
