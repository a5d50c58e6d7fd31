//! Text content retrieval
//!
//! The file-reading instructions accept either a local path or an HTTP(S)
//! URL; both come back as one string.

use crate::Result;
use log::debug;
use std::fs;

/// Fetch the contents of a local file or an HTTP(S) URL.
pub fn fetch(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        debug!("Fetching URL: {}", source);
        let body = reqwest::blocking::get(source)?.error_for_status()?.text()?;
        Ok(body)
    } else {
        debug!("Reading file: {}", source);
        Ok(fs::read_to_string(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SaycmdError;
    use std::io::Write;

    #[test]
    fn test_fetch_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello from disk").unwrap();

        let text = fetch(file.path().to_str().unwrap()).unwrap();
        assert_eq!(text, "hello from disk");
    }

    #[test]
    fn test_fetch_missing_file_is_io_error() {
        let err = fetch("/nonexistent/saycmd-test-file").unwrap_err();
        assert!(matches!(err, SaycmdError::Io(_)));
    }
}
