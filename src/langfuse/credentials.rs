//! Langfuse API credentials

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;

use crate::error::{LangfuseError, Result};

/// Public endpoint used when no domain is configured
pub const DEFAULT_DOMAIN: &str = "https://api.langfuse.com";

/// Domain plus key pair, fixed for the life of the process
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    domain: String,
    public_key: String,
    private_key: String,
}

impl Credentials {
    /// Validate and build credentials. Both keys must be non-empty and the
    /// domain must be an absolute URL.
    pub fn new(
        domain: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self> {
        let domain = domain.into();
        let public_key = public_key.into();
        let private_key = private_key.into();

        if public_key.is_empty() {
            return Err(LangfuseError::Config("public key must not be empty".to_string()));
        }
        if private_key.is_empty() {
            return Err(LangfuseError::Config("private key must not be empty".to_string()));
        }

        let domain = domain.trim_end_matches('/').to_string();
        Url::parse(&domain)
            .map_err(|e| LangfuseError::Config(format!("Invalid Langfuse domain '{}': {}", domain, e)))?;

        Ok(Self {
            domain,
            public_key,
            private_key,
        })
    }

    /// Base URL without a trailing slash
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// `Basic <base64(public:private)>`
    pub fn basic_auth_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.public_key, self.private_key));
        format!("Basic {}", encoded)
    }
}

// Keep the private key out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
