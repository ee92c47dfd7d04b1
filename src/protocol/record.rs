use std::fmt;

const PROGRESS_PREFIX: &str = "PROGRESS:";
const SUMMARY_PREFIX: &str = "SUMMARY:";

/// Escaped form of a newline inside a `SUMMARY:` payload
const ESCAPED_NEWLINE: &str = "\\n";

/// One complete line of the summarizer stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolRecord {
    /// `completed <= total` is not checked, `total` is always non-zero
    Progress { completed: u64, total: u64 },
    Summary { text: String },
}

impl ProtocolRecord {
    /// Classifies a single line (without its trailing newline).
    /// Returns `None` for lines that are not part of the protocol or are malformed.
    pub fn parse_line(line: &str) -> Option<Self> {
        if let Some(rest) = line.strip_prefix(PROGRESS_PREFIX) {
            let record = parse_progress(rest);
            if record.is_none() {
                log::debug!("Dropping malformed progress line: {:?}", line);
            }
            return record;
        }

        if let Some(rest) = line.strip_prefix(SUMMARY_PREFIX) {
            return Some(ProtocolRecord::Summary {
                text: rest.replace(ESCAPED_NEWLINE, "\n"),
            });
        }

        if !line.is_empty() {
            log::debug!("Ignoring unknown line: {:?}", line);
        }
        None
    }
}

fn parse_progress(fields: &str) -> Option<ProtocolRecord> {
    let mut parts = fields.split('/');
    let completed = parse_count(parts.next()?)?;
    let total = parse_count(parts.next()?)?;

    if total == 0 {
        return None;
    }

    Some(ProtocolRecord::Progress { completed, total })
}

fn parse_count(field: &str) -> Option<u64> {
    field.trim().parse::<u64>().ok()
}

/// Writes the record the way the backend puts it on the wire, minus the newline
impl fmt::Display for ProtocolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolRecord::Progress { completed, total } => {
                write!(f, "{}{}/{}", PROGRESS_PREFIX, completed, total)
            }
            ProtocolRecord::Summary { text } => {
                write!(f, "{}{}", SUMMARY_PREFIX, text.replace('\n', ESCAPED_NEWLINE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(completed: u64, total: u64) -> ProtocolRecord {
        ProtocolRecord::Progress { completed, total }
    }

    #[test]
    fn test_parse_progress() {
        assert_eq!(
            ProtocolRecord::parse_line("PROGRESS:3/10"),
            Some(progress(3, 10))
        );
    }

    #[test]
    fn test_parse_progress_zero_total_is_dropped() {
        assert_eq!(ProtocolRecord::parse_line("PROGRESS:3/0"), None);
    }

    #[test]
    fn test_parse_progress_malformed_fields() {
        for line in [
            "PROGRESS:abc/10",
            "PROGRESS:3/xyz",
            "PROGRESS:3",
            "PROGRESS:/5",
            "PROGRESS:-1/5",
            "PROGRESS:1/-5",
            "PROGRESS:1.5/5",
            "PROGRESS:",
        ] {
            assert_eq!(ProtocolRecord::parse_line(line), None, "line: {}", line);
        }
    }

    #[test]
    fn test_parse_progress_allows_completed_above_total() {
        assert_eq!(
            ProtocolRecord::parse_line("PROGRESS:12/10"),
            Some(progress(12, 10))
        );
    }

    #[test]
    fn test_parse_progress_tolerates_whitespace_and_extra_fields() {
        assert_eq!(
            ProtocolRecord::parse_line("PROGRESS: 2 / 8\r"),
            Some(progress(2, 8))
        );
        assert_eq!(
            ProtocolRecord::parse_line("PROGRESS:2/8/99"),
            Some(progress(2, 8))
        );
    }

    #[test]
    fn test_parse_summary_unescapes_newlines() {
        assert_eq!(
            ProtocolRecord::parse_line("SUMMARY:line1\\nline2"),
            Some(ProtocolRecord::Summary {
                text: "line1\nline2".to_string()
            })
        );
    }

    #[test]
    fn test_parse_summary_empty_text() {
        assert_eq!(
            ProtocolRecord::parse_line("SUMMARY:"),
            Some(ProtocolRecord::Summary {
                text: String::new()
            })
        );
    }

    #[test]
    fn test_unknown_lines_are_ignored() {
        assert_eq!(ProtocolRecord::parse_line(""), None);
        assert_eq!(ProtocolRecord::parse_line("hello"), None);
        assert_eq!(ProtocolRecord::parse_line("progress:1/2"), None);
        assert_eq!(ProtocolRecord::parse_line(" SUMMARY:x"), None);
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(progress(1, 4).to_string(), "PROGRESS:1/4");

        let summary = ProtocolRecord::Summary {
            text: "first\nsecond".to_string(),
        };
        assert_eq!(summary.to_string(), "SUMMARY:first\\nsecond");
        assert_eq!(ProtocolRecord::parse_line(&summary.to_string()), Some(summary));
    }
}
