//! Server configuration and injected service metadata.

use color_eyre::Result;

/// Version and release metadata shown by the health endpoint.
///
/// Captured at compile time and injected into the handlers; nothing below
/// the route layer reads ambient package state.
#[derive(Debug, Clone)]
pub struct ServiceMeta {
    /// Major version of the package.
    pub version_major: u64,
    /// `{semver}+{commit-hash}` of the running build.
    pub release_id: String,
}

impl ServiceMeta {
    pub fn from_build_info() -> Self {
        Self {
            version_major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            release_id: concat!(env!("CARGO_PKG_VERSION"), "+", env!("MINIFY_COMMIT_HASH"))
                .to_string(),
        }
    }
}

/// Runtime server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub meta: ServiceMeta,
}

impl ServerConfig {
    /// Read settings from the environment: `PORT`, default 3000.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse()?,
            Err(_) => 3000,
        };
        Ok(Self {
            port,
            meta: ServiceMeta::from_build_info(),
        })
    }
}
