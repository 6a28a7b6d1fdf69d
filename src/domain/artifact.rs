//! Build artifact records from `cargo --message-format=json`.

use crate::error::ArtifactError;
use serde::Deserialize;
use std::path::PathBuf;

/// Build profile attached to a compiler artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Profile {
    /// Whether the artifact was built with the test harness
    #[serde(default)]
    pub test: bool,
}

/// One line of the build tool's JSON message stream.
///
/// Only the fields needed to spot test binaries are kept. Messages that are
/// not artifacts (build script output, diagnostics, `build-finished`) simply
/// have no profile and no filenames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BuildArtifact {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub filenames: Vec<PathBuf>,
}

impl BuildArtifact {
    /// Parse a single message line
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Check if this artifact is a test binary
    pub fn is_test(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.test)
    }
}

/// Single-pass iterator over the artifact records in captured build output.
///
/// Empty and whitespace-only lines are skipped without being parsed.
pub struct ArtifactStream<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> ArtifactStream<'a> {
    pub fn new(output: &'a str) -> Self {
        Self {
            lines: output.lines().enumerate(),
        }
    }
}

impl Iterator for ArtifactStream<'_> {
    type Item = Result<BuildArtifact, ArtifactError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, line) in self.lines.by_ref() {
            // Whitespace-only lines count as blank too.
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            return Some(
                BuildArtifact::parse(line).map_err(|source| ArtifactError::Parse {
                    line: index + 1,
                    source,
                }),
            );
        }
        None
    }
}

/// Collect the output files of every test artifact, in stream order
pub fn test_binaries(output: &str) -> Result<Vec<PathBuf>, ArtifactError> {
    let mut binaries = Vec::new();

    for artifact in ArtifactStream::new(output) {
        let artifact = artifact?;
        if artifact.is_test() {
            binaries.extend(artifact.filenames);
        }
    }

    tracing::debug!("Found {} test artifact file(s)", binaries.len());
    Ok(binaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_test_profiles_are_kept() {
        let output = concat!(
            r#"{"profile":{"test":false},"filenames":["a.out"]}"#,
            "\n",
            r#"{"profile":{"test":true},"filenames":["b_test","b_test.d"]}"#,
            "\n",
        );

        let binaries = test_binaries(output).unwrap();
        assert_eq!(
            binaries,
            vec![PathBuf::from("b_test"), PathBuf::from("b_test.d")]
        );
    }

    #[test]
    fn test_no_test_artifacts_yields_empty_list() {
        let output = concat!(
            r#"{"reason":"build-script-executed","package_id":"foo 0.1.0"}"#,
            "\n",
            r#"{"profile":{"test":false},"filenames":["libfoo.rlib"]}"#,
            "\n",
            r#"{"profile":{},"filenames":["libbar.rlib"]}"#,
            "\n",
            r#"{"reason":"build-finished","success":true}"#,
        );

        assert!(test_binaries(output).unwrap().is_empty());
    }

    #[test]
    fn test_order_is_preserved_across_records() {
        let output = [
            r#"{"profile":{"test":true},"filenames":["first"]}"#,
            r#"{"profile":{"test":false},"filenames":["skipped"]}"#,
            r#"{"profile":{"test":true},"filenames":["second","third"]}"#,
            r#"{"profile":{"test":true}}"#,
            r#"{"profile":{"test":true},"filenames":["fourth"]}"#,
        ]
        .join("\n");

        let binaries = test_binaries(&output).unwrap();
        assert_eq!(
            binaries,
            ["first", "second", "third", "fourth"]
                .iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_blank_and_whitespace_only_lines_are_skipped() {
        let output = "\n\n{\"profile\":{\"test\":true},\"filenames\":[\"t\"]}\n   \n\n";

        let records: Vec<_> = ArtifactStream::new(output).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(test_binaries(output).unwrap(), vec![PathBuf::from("t")]);
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(ArtifactStream::new("").count(), 0);
        assert!(test_binaries("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let output = "{\"profile\":{\"test\":true},\"filenames\":[\"ok\"]}\n\nnot json\n";

        let err = test_binaries(output).unwrap_err();
        let ArtifactError::Parse { line, .. } = err;
        assert_eq!(line, 3);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let artifact = BuildArtifact::parse(
            r#"{"reason":"compiler-artifact","target":{"kind":["lib"]},"profile":{"opt_level":"0","test":true},"executable":"/t/x","fresh":false,"filenames":["/t/x"]}"#,
        )
        .unwrap();

        assert!(artifact.is_test());
        assert_eq!(artifact.filenames, vec![PathBuf::from("/t/x")]);
    }

    #[test]
    fn test_null_profile_is_not_a_test() {
        let artifact = BuildArtifact::parse(r#"{"profile":null,"filenames":["x"]}"#).unwrap();
        assert!(!artifact.is_test());
    }
}
