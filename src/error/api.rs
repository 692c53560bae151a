use thiserror::Error;

/// HTTP status for a rejected or expired bearer token.
const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("API URL '{url}' cannot be used as a base.")]
    BaseUrlNotHierarchical { url: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Cannot reach API during {context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("API responded {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("Failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected login response: {body}")]
    MissingAccessToken { body: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::InvalidBaseUrl { .. }
            | ApiError::BaseUrlNotHierarchical { .. }
            | ApiError::BuildClientFailed { .. }
            | ApiError::Transport { .. }
            | ApiError::Decode { .. }
            | ApiError::MissingAccessToken { .. } => None,
            #[cfg(test)]
            ApiError::TestExpectation { .. } | ApiError::TestExpectationValue { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(STATUS_UNAUTHORIZED))
    }
}
