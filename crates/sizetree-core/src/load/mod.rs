/// Loading analyzer output from disk or any reader.
///
/// The analyzer emits one JSON document describing the whole binary. Only
/// decoding happens here; consistency checks live in
/// [`tree::validate`](crate::tree::validate).
use crate::model::AnalysisResult;
use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{origin} is not valid analyzer JSON")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and decode an analyzer JSON file.
pub fn load_result(path: &Path) -> Result<AnalysisResult, LoadError> {
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let result = decode(BufReader::new(file), path.display().to_string())?;
    debug!(
        path = %path.display(),
        sections = result.sections.len(),
        packages = result.packages.len(),
        "analysis result loaded"
    );
    Ok(result)
}

/// Decode an analyzer JSON document from any reader; `origin` names the
/// source in error messages.
pub fn decode(reader: impl Read, origin: impl Into<String>) -> Result<AnalysisResult, LoadError> {
    serde_json::from_reader(reader).map_err(|source| LoadError::Decode {
        origin: origin.into(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reports_origin() {
        let err = decode("{ not json".as_bytes(), "stdin").unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert_eq!(err.to_string(), "stdin is not valid analyzer JSON");
    }

    #[test]
    fn decode_minimal_document() {
        let result = decode(r#"{"name": "bin", "size": 12}"#.as_bytes(), "inline").unwrap();
        assert_eq!(result.size, 12);
        assert!(result.sections.is_empty());
    }
}
