use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::importer::DecodeFailure;
use crate::validate::Rejection;

/// Renders import diagnostics exactly as the operator sees them.
///
/// ```text
/// > Invalid JSON file...
///     Check your filename and/or contents and try again.
/// > 2 files not loaded
///     1: /a.mov: invalid type 'hologram', expecting image, document, audio or video
///     2: /b.mp3: invalid metadata for audio, missing or empty: runtime
/// ```
///
/// Every line ends in a newline; a clean import renders as the empty string.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    failure: Option<&'a DecodeFailure>,
    rejections: &'a [Rejection],
}
impl<'a> Report<'a> {
    pub fn new(failure: Option<&'a DecodeFailure>, rejections: &'a [Rejection]) -> Self {
        Self { failure, rejections }
    }

    pub fn is_empty(&self) -> bool {
        self.failure.is_none() && self.rejections.is_empty()
    }
}
impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.failure.is_some() {
            writeln!(f, "> Invalid JSON file...")?;
            writeln!(f, "\tCheck your filename and/or contents and try again.")?;
        }
        let count = self.rejections.len();
        if count > 0 {
            let noun = if count == 1 { "file" } else { "files" };
            writeln!(f, "> {count} {noun} not loaded")?;
            for (i, rejection) in self.rejections.iter().enumerate() {
                writeln!(f, "\t{}: {rejection}", i + 1)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::RejectionReason;
    use medialib_media::MediaKind;

    fn invalid_type(path: &str) -> Rejection {
        Rejection { path: path.to_string(), reason: RejectionReason::InvalidType { found: "hologram".to_string() } }
    }

    #[test]
    fn test_clean_report_is_empty() {
        let report = Report::new(None, &[]);
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_decode_failure() {
        let failure = DecodeFailure::Malformed { line: 1, column: 1 };
        assert_eq!(
            Report::new(Some(&failure), &[]).to_string(),
            "> Invalid JSON file...\n\tCheck your filename and/or contents and try again.\n"
        );
    }

    #[test]
    fn test_single_rejection_is_singular() {
        let rejections = [invalid_type("/a.mov")];
        assert_eq!(
            Report::new(None, &rejections).to_string(),
            "> 1 file not loaded\n\t1: /a.mov: invalid type 'hologram', expecting image, document, audio or video\n"
        );
    }

    #[test]
    fn test_rejections_are_numbered_from_one() {
        let rejections = [
            invalid_type("/a.mov"),
            Rejection {
                path: "/b.mp3".to_string(),
                reason: RejectionReason::InvalidMetadataForType {
                    kind: MediaKind::Audio,
                    keywords: vec!["runtime".to_string()],
                },
            },
        ];
        let rendered = Report::new(None, &rejections).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "> 2 files not loaded");
        assert!(lines[1].starts_with("\t1: /a.mov: "));
        assert_eq!(lines[2], "\t2: /b.mp3: invalid metadata for audio, missing or empty: runtime");
        assert_eq!(lines.len(), 3);
    }
}
