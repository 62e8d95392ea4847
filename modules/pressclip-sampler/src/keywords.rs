use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Load the newline-delimited keyword list. Blank lines and `#` comments are
/// ignored; surrounding whitespace is trimmed.
pub fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keyword list {}", path.display()))?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_blanks_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agencies.txt");
        fs::write(&path, "# wire services\nHavas\n\n  Reuter  \n# done\nWolff\n").unwrap();

        let keywords = load_keywords(&path).unwrap();
        assert_eq!(keywords, vec!["Havas", "Reuter", "Wolff"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_keywords(Path::new("/nonexistent/agencies.txt")).is_err());
    }
}
