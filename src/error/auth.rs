use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token available. Pass --token or --username/--password.")]
    MissingCredentials,
    #[error("Password is required when --username is set.")]
    MissingPassword,
    #[error("Session unauthorized; log in again.")]
    Unauthorized,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
}
