//! Document and snapshot loading

use serde_json::Value;
use specmatch_core::errors::{ExError, ExErrorKind};
use specmatch_core::snapshot::Snapshot;
use std::path::Path;

fn read(path: &Path, op: &str) -> Result<String, ExError> {
    std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op(op)
            .with_path(path.display().to_string())
            .with_message(e.to_string())
    })
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Parse a JSON document, or YAML when the file extension says so.
pub fn load_document(path: &Path) -> Result<Value, ExError> {
    let text = read(path, "load_document")?;
    let parsed = if is_yaml(path) {
        serde_yaml::from_str(&text).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&text).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("load_document")
            .with_path(path.display().to_string())
            .with_message(message)
    })
}

/// Load a snapshot fixture written by `specmatch flatten`.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, ExError> {
    let text = read(path, "load_snapshot")?;
    Snapshot::from_json_str(&text).map_err(|e| ExError::from(e).with_op("load_snapshot"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_extension_detection() {
        assert!(is_yaml(Path::new("deploy.yaml")));
        assert!(is_yaml(Path::new("deploy.YML")));
        assert!(!is_yaml(Path::new("deploy.json")));
        assert!(!is_yaml(Path::new("deploy")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_document(Path::new("/nonexistent/specmatch/input.json")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
    }
}
