//! Commit facts
//!
//! The structured description of a proposed change, as produced by an external
//! commit-metadata adapter. The engine never reads version control itself.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// Immutable input to a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitFacts {
    /// Opaque commit identifier
    pub sha: String,

    /// Full commit message, possibly multi-line
    pub message: String,

    /// Repository-relative paths touched by the change
    #[serde(alias = "changed_files")]
    pub changed_files: Vec<String>,

    /// Concatenated unified diff body (may be empty or caller-truncated)
    #[serde(default, alias = "diff_text")]
    pub diff_text: String,
}

impl CommitFacts {
    /// Create commit facts with no files and an empty diff
    pub fn new(sha: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            changed_files: Vec::new(),
            diff_text: String::new(),
        }
    }

    /// Add a changed file path
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.changed_files.push(path.into());
        self
    }

    /// Add several changed file paths
    pub fn with_files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Set the diff body
    pub fn with_diff(mut self, diff: impl Into<String>) -> Self {
        self.diff_text = diff.into();
        self
    }

    /// Parse commit facts from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let facts: CommitFacts =
            serde_json::from_str(json).map_err(|e| InputError::Malformed(e.to_string()))?;
        facts.validate()?;
        Ok(facts)
    }

    /// Structural validation performed before any extraction
    pub fn validate(&self) -> Result<()> {
        if self.sha.trim().is_empty() {
            return Err(InputError::EmptySha);
        }

        if let Some(index) = self
            .changed_files
            .iter()
            .position(|path| path.trim().is_empty())
        {
            return Err(InputError::EmptyPath { index });
        }

        Ok(())
    }

    /// First line of the message (the conventional-commit subject)
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }

    /// Count of added plus removed diff lines, excluding file headers
    pub fn changed_line_count(&self) -> usize {
        self.diff_text
            .lines()
            .filter(|line| {
                (line.starts_with('+') && !line.starts_with("+++"))
                    || (line.starts_with('-') && !line.starts_with("---"))
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let facts = CommitFacts::new("abc123", "feat(auth): add mfa")
            .with_file("services/auth-service/main.go")
            .with_files(["README.md", "docs/mfa.md"])
            .with_diff("+token := issue()\n");

        assert_eq!(facts.changed_files.len(), 3);
        assert_eq!(facts.subject(), "feat(auth): add mfa");
        assert!(facts.validate().is_ok());
    }

    #[test]
    fn test_subject_of_multiline_message() {
        let facts = CommitFacts::new("abc", "fix(phi): rotate keys\n\nHIPAA: Applicable");
        assert_eq!(facts.subject(), "fix(phi): rotate keys");
    }

    #[test]
    fn test_empty_sha_rejected() {
        let facts = CommitFacts::new("  ", "docs(readme): typo");
        assert_eq!(facts.validate(), Err(InputError::EmptySha));
    }

    #[test]
    fn test_empty_path_rejected() {
        let facts = CommitFacts::new("abc", "docs(readme): typo")
            .with_file("README.md")
            .with_file("");
        assert_eq!(facts.validate(), Err(InputError::EmptyPath { index: 1 }));
    }

    #[test]
    fn test_from_json_camel_case() {
        let json = r#"{
            "sha": "abc123",
            "message": "feat(payment): add apple pay support",
            "changedFiles": ["services/payment-gateway/payment.go"],
            "diffText": "+charge()\n"
        }"#;

        let facts = CommitFacts::from_json(json).unwrap();
        assert_eq!(facts.changed_files, vec!["services/payment-gateway/payment.go"]);
        assert_eq!(facts.diff_text, "+charge()\n");
    }

    #[test]
    fn test_from_json_null_message_is_input_error() {
        let json = r#"{"sha": "abc", "message": null, "changedFiles": []}"#;
        let err = CommitFacts::from_json(json).unwrap_err();
        assert!(matches!(err, InputError::Malformed(_)));
    }

    #[test]
    fn test_from_json_missing_files_is_input_error() {
        let json = r#"{"sha": "abc", "message": "chore(ci): bump"}"#;
        assert!(matches!(
            CommitFacts::from_json(json),
            Err(InputError::Malformed(_))
        ));
    }

    #[test]
    fn test_changed_line_count_skips_headers() {
        let diff = "--- a/main.go\n+++ b/main.go\n@@ -1,2 +1,2 @@\n-old\n+new\n+extra\n context\n";
        let facts = CommitFacts::new("abc", "fix(x): y").with_diff(diff);
        assert_eq!(facts.changed_line_count(), 3);
    }
}
