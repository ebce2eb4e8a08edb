// crates/nfe-dfe-config/src/lib.rs
// ============================================================================
// Module: NFe DFe Config
// Description: The SEFAZ configuration record consumed by the distribution client.
// Purpose: Model environment, endpoints, timeout, and certificate source with validation.
// Dependencies: nfe-dfe-core, serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! This crate models the configuration record an operator maintains per
//! taxpayer: the authority environment, optional per-environment endpoint
//! overrides, the per-attempt request timeout, and the A1 certificate source
//! (path + password). Persistence of the record and the admin screens that
//! edit it are external collaborators; this crate only defines the shape,
//! defaults, and validation.
//!
//! The certificate password is secret material: the `Debug` form of
//! [`SefazConfig`] redacts it, and no error produced here echoes it back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use nfe_dfe_core::Environment;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default per-endpoint request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Serde default for the timeout field.
const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation failure of a SEFAZ configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed into a configuration record.
    #[error("configuration could not be parsed: {0}")]
    Parse(String),
    /// The request timeout is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
    /// An endpoint override is blank or not an http(s) URL.
    #[error("endpoint override is not a valid http(s) URL: {0}")]
    InvalidEndpoint(String),
    /// A certificate password is set without a certificate file.
    #[error("certificate password is set but no certificate file is configured")]
    PasswordWithoutCertificate,
}

// ============================================================================
// SECTION: Endpoint Overrides
// ============================================================================

/// Optional endpoint override lists, one per environment.
///
/// An empty list means "use the built-in mirrors for that environment".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointOverrides {
    /// Override list for the production environment.
    pub production: Vec<String>,
    /// Override list for the homologation environment.
    pub homologation: Vec<String>,
}

impl EndpointOverrides {
    /// Returns the override list for `environment` (possibly empty).
    #[must_use]
    pub fn for_environment(&self, environment: Environment) -> &[String] {
        match environment {
            Environment::Production => &self.production,
            Environment::Homologation => &self.homologation,
        }
    }
}

// ============================================================================
// SECTION: Configuration Record
// ============================================================================

/// Per-taxpayer SEFAZ configuration consumed by the distribution client.
///
/// # Invariants
/// - `certificate_password` never appears in `Debug` output or errors.
/// - `timeout_secs` >= 1 after validation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SefazConfig {
    /// Authority environment queries are issued against.
    pub environment: Environment,
    /// Optional endpoint overrides per environment.
    pub endpoints: EndpointOverrides,
    /// Per-endpoint request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Filesystem path of the uploaded PKCS#12 (A1) bundle.
    pub certificate_path: Option<PathBuf>,
    /// Password protecting the PKCS#12 bundle.
    pub certificate_password: Option<String>,
}

impl Default for SefazConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            endpoints: EndpointOverrides::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            certificate_path: None,
            certificate_password: None,
        }
    }
}

impl fmt::Debug for SefazConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SefazConfig")
            .field("environment", &self.environment)
            .field("endpoints", &self.endpoints)
            .field("timeout_secs", &self.timeout_secs)
            .field("certificate_path", &self.certificate_path)
            .field(
                "certificate_password",
                &self.certificate_password.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl SefazConfig {
    /// Parses a configuration record from a TOML document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and the relevant
    /// validation variant for semantic failures.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the record without touching the filesystem or network.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ConfigError`] variant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        for endpoint in
            self.endpoints.production.iter().chain(self.endpoints.homologation.iter())
        {
            let trimmed = endpoint.trim();
            let parsed =
                Url::parse(trimmed).map_err(|_| ConfigError::InvalidEndpoint(trimmed.to_string()))?;
            if parsed.scheme() != "https" && parsed.scheme() != "http" {
                return Err(ConfigError::InvalidEndpoint(trimmed.to_string()));
            }
        }
        if self.certificate_password.is_some() && self.certificate_path.is_none() {
            return Err(ConfigError::PasswordWithoutCertificate);
        }
        Ok(())
    }

    /// Returns the per-endpoint timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns true when both a certificate file and a password are set.
    #[must_use]
    pub fn has_certificate(&self) -> bool {
        self.certificate_path.is_some()
            && self.certificate_password.as_deref().is_some_and(|p| !p.is_empty())
    }
}
