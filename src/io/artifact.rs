//! Load the model artifact from disk or over HTTP.
//!
//! This happens exactly once per process, at startup. Any failure here is a
//! `ModelUnavailable` error and the process should not start serving.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::PredictError;
use crate::models::ModelArtifact;
use crate::predict::ModelContext;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the model artifact lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    File(PathBuf),
    Url(String),
}

impl ArtifactSource {
    /// Interpret `location` as a URL when it has an `http(s)://` scheme, else as a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ArtifactSource::Url(location.to_string())
        } else {
            ArtifactSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactSource::File(path) => write!(f, "{}", path.display()),
            ArtifactSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read and validate the artifact.
pub fn load_artifact(source: &ArtifactSource) -> Result<ModelArtifact, PredictError> {
    let text = match source {
        ArtifactSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
            PredictError::model_unavailable(format!("failed to read artifact '{}': {e}", path.display()))
        })?,
        ArtifactSource::Url(url) => fetch_text(url)?,
    };

    ModelArtifact::from_json(&text).map_err(|err| match err {
        PredictError::ModelUnavailable { reason } => {
            PredictError::model_unavailable(format!("{source}: {reason}"))
        }
        other => other,
    })
}

/// Load the artifact and turn it into a ready-to-share model context.
pub fn load_context(source: &ArtifactSource) -> Result<ModelContext, PredictError> {
    let artifact = load_artifact(source)?;
    let context = ModelContext::from_artifact(artifact)?;

    tracing::info!(
        source = %source,
        model = context.name(),
        kind = context.model().kind(),
        commodities = context.vocabulary().len(),
        "loaded model artifact"
    );
    Ok(context)
}

fn fetch_text(url: &str) -> Result<String, PredictError> {
    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| PredictError::model_unavailable(format!("failed to build HTTP client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| PredictError::model_unavailable(format!("artifact request to {url} failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(PredictError::model_unavailable(format!(
            "artifact request to {url} failed with status {}",
            resp.status()
        )));
    }

    resp.text()
        .map_err(|e| PredictError::model_unavailable(format!("failed to read artifact body from {url}: {e}")))
}
