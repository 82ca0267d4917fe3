//! Sync operation reporting and statistics

use std::fmt::Write;

use super::SyncResult;

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(result: &SyncResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Directories: {}", result.directories);
        let _ = writeln!(output, "Pulled:      {}", result.pulled);
        let _ = writeln!(output, "Skipped:     {}", result.skipped);

        let mut reasons: Vec<_> = result.skip_reasons.iter().collect();
        reasons.sort();
        for (reason, count) in reasons {
            let _ = writeln!(output, "  - {reason}: {count}");
        }

        if !result.warnings.is_empty() {
            let _ = writeln!(output, "\nWarnings ({}):", result.warnings.len());
            for warning in &result.warnings {
                let _ = writeln!(output, "  - {warning}");
            }
        }

        let _ = writeln!(output, "\nTotal operations: {}", result.total_operations());

        if result.is_success() {
            output.push_str("Status: ✓ Success\n");
        } else {
            output.push_str("Status: ✓ Completed with warnings\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::SkipReason;

    #[test]
    fn test_sync_reporter() {
        let mut result = SyncResult {
            directories: 4,
            pulled: 5,
            ..SyncResult::default()
        };
        result.record_skip(SkipReason::Unchanged);
        result.record_skip(SkipReason::Ignored);

        let summary = SyncReporter::generate_summary(&result);

        assert!(summary.contains("Directories: 4"));
        assert!(summary.contains("Pulled:      5"));
        assert!(summary.contains("Skipped:     2"));
        assert!(summary.contains("  - ignored: 1"));
        assert!(summary.contains("  - unchanged: 1"));
        assert!(summary.contains("Total operations: 5"));
        assert!(summary.contains("✓ Success"));

        let ignored = summary.find("ignored").unwrap();
        let unchanged = summary.find("unchanged").unwrap();
        assert!(ignored < unchanged);
    }

    #[test]
    fn test_sync_reporter_with_warnings() {
        let mut result = SyncResult {
            pulled: 1,
            ..SyncResult::default()
        };
        result.record_warning("/mirror/a.jpg could not be copied");

        let summary = SyncReporter::generate_summary(&result);

        assert!(summary.contains("Warnings (1)"));
        assert!(summary.contains("/mirror/a.jpg could not be copied"));
        assert!(summary.contains("Completed with warnings"));
    }
}
