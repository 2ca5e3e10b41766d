//! Credentials file parsing.
//!
//! The credfile is one `KEY = VALUE` per line, with `ATP_HOST`,
//! `ATP_USERNAME`, and `ATP_PASSWORD` required. Blank lines are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use skypost::{Credentials, Host};

/// Load credentials from a credfile.
pub fn load(path: &Path) -> Result<Credentials> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read credentials file {}", path.display()))?;
    parse(&contents)
}

fn parse(contents: &str) -> Result<Credentials> {
    let mut fields = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Line content is never echoed: a malformed line may hold the secret.
        let Some((key, value)) = line.split_once(" = ") else {
            bail!("Malformed line in credentials file (expected 'KEY = VALUE')");
        };
        fields.insert(key.to_string(), value.to_string());
    }

    let get = |key: &str| {
        fields
            .get(key)
            .map(String::as_str)
            .with_context(|| format!("Missing {key} in credentials file"))
    };

    let host = Host::new(get("ATP_HOST")?).context("Invalid ATP_HOST in credentials file")?;
    Ok(Credentials::new(host, get("ATP_USERNAME")?, get("ATP_PASSWORD")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = "ATP_HOST = https://bsky.social\n\
                         ATP_USERNAME = alice.bsky.social\n\
                         ATP_PASSWORD = app-password-here\n";

    #[test]
    fn parses_valid_credfile() {
        let creds = parse(VALID).unwrap();
        assert_eq!(creds.host().as_str(), "https://bsky.social/");
        assert_eq!(creds.identifier(), "alice.bsky.social");
    }

    #[test]
    fn ignores_blank_lines() {
        let creds = parse(&VALID.replace('\n', "\n\n")).unwrap();
        assert_eq!(creds.identifier(), "alice.bsky.social");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = parse("ATP_HOST = https://bsky.social\n").unwrap_err();
        assert!(err.to_string().contains("ATP_USERNAME"));
    }

    #[test]
    fn malformed_line_does_not_echo_content() {
        let err = parse("ATP_PASSWORD=oops-no-spaces\n").unwrap_err();
        assert!(!err.to_string().contains("oops-no-spaces"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();

        let creds = load(file.path()).unwrap();
        assert_eq!(creds.identifier(), "alice.bsky.social");
    }
}
