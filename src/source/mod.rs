//! Snapshot sources: local files and HTTP(S) URLs.
//!
//! Remote snapshots are fetched with a blocking client, so loading must
//! happen before any async runtime is started.

use crate::parser::{parse_snapshot, LoadedProfile};
use crate::utils::config::DEFAULT_FETCH_TIMEOUT;
use crate::utils::error::SourceError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Load a snapshot from a path or an `http://` / `https://` URL
pub fn load_profile(source: &str) -> Result<LoadedProfile, SourceError> {
    let raw = if is_url(source) {
        fetch(source)?
    } else {
        debug!("Reading snapshot from: {}", source);
        std::fs::read(source).map_err(|e| SourceError::ReadFailed {
            path: source.to_string(),
            source: e,
        })?
    };

    let profile = parse_snapshot(&raw)?;
    info!(
        "Loaded {} nodes and {} edges from {}",
        profile.graph.len(),
        profile.graph.edge_count(),
        source
    );
    Ok(profile)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch(url: &str) -> Result<Vec<u8>, SourceError> {
    info!("Fetching snapshot from: {}", url);

    let client = Client::builder()
        .timeout(DEFAULT_FETCH_TIMEOUT)
        .build()
        .map_err(SourceError::RequestFailed)?;

    let response = client.get(url).send().map_err(SourceError::RequestFailed)?;

    if !response.status().is_success() {
        return Err(SourceError::BadStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().map_err(SourceError::RequestFailed)?;
    debug!("Fetched {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://localhost:6060/graph.json"));
        assert!(is_url("https://example.com/g"));
        assert!(!is_url("graph.json"));
        assert!(!is_url("/tmp/http.json"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"unit": "bytes", "nodes": [{"id": 1, "name": "f", "flat": 5, "cum": 5}]}"#)
            .unwrap();

        let profile = load_profile(file.path().to_str().unwrap()).unwrap();
        assert_eq!(profile.graph.len(), 1);
        assert_eq!(profile.options.sample_unit, "bytes");
    }

    #[test]
    fn test_missing_file() {
        let err = load_profile("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SourceError::ReadFailed { .. }));
    }
}
