//! Composite cluster identifier decomposition
//!
//! Cluster identifiers arrive as a single `<cluster>-<dc>.<env>` string;
//! the gauges label by the three parts separately.

use serde::Serialize;
use thiserror::Error;

/// A cluster identifier that failed to decompose
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed cluster identifier {0:?}: expected <cluster>-<dc>.<env>")]
pub struct ClusterNameError(pub String);

/// Location labels derived from a composite cluster identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterName {
    pub cluster: String,
    pub dc: String,
    pub env: String,
}

impl ClusterName {
    /// Decompose `<cluster>-<dc>.<env>`
    ///
    /// `cluster` runs up to the first hyphen, `dc` from there to the
    /// first period, `env` is the nonempty remainder. Anything else is
    /// malformed; there is no fallback decomposition.
    pub fn parse(raw: &str) -> Result<Self, ClusterNameError> {
        let malformed = || ClusterNameError(raw.to_string());

        let (cluster, rest) = raw.split_once('-').ok_or_else(malformed)?;
        let (dc, env) = rest.split_once('.').ok_or_else(malformed)?;

        if cluster.is_empty() || dc.is_empty() || env.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            cluster: cluster.to_string(),
            dc: dc.to_string(),
            env: env.to_string(),
        })
    }
}
