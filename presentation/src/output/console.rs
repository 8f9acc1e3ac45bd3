//! Console output formatter for casequery results

use casequery_application::ProcessedDocument;
use casequery_domain::{
    AttemptOutcome, ConfigIssue, FolderRunReport, GroupOutcome, ModelSequence, ProviderFamily,
    Question, Severity, truncate,
};
use colored::Colorize;

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Numbered question catalog
    pub fn format_questions(family: ProviderFamily, questions: &[Question]) -> String {
        let mut output = Self::section_header(&format!("{} questions", family.label()));
        if questions.is_empty() {
            output.push_str(&format!("{}\n", "(catalog is empty)".dimmed()));
            return output;
        }
        for q in questions {
            output.push_str(&format!(
                "{:>4}  {}  {}\n",
                q.id,
                q.external_id.dimmed(),
                q.text
            ));
        }
        output
    }

    /// Result of a single-document run
    pub fn format_processed(processed: &ProcessedDocument) -> String {
        let mut output = String::new();
        let result = &processed.dispatch.result;

        for attempt in &processed.dispatch.attempts {
            if let AttemptOutcome::QuotaExceeded(message) = &attempt.outcome {
                output.push_str(&format!(
                    "{} {} {}\n",
                    "skipped".yellow(),
                    attempt.model,
                    truncate(message, 80).dimmed()
                ));
            }
        }

        let source = if result.local_fallback {
            format!("{} (local fallback)", result.source_model)
        } else {
            result.source_model.to_string()
        };
        output.push_str(&format!("{} {}\n", "Answered by:".cyan().bold(), source));
        output.push_str(&format!(
            "{} {}\n",
            "Answer:".cyan().bold(),
            processed.output_path.display()
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Archived:".cyan().bold(),
            processed.relocated_to.display()
        ));
        output.push_str(processed.answer());
        output.push('\n');
        output
    }

    /// Per-group table and the summary line
    pub fn format_report(report: &FolderRunReport) -> String {
        if report.no_groups {
            return format!(
                "{} no subfolders found in {}\n",
                "warning:".yellow().bold(),
                report.root.display()
            );
        }

        let mut output = Self::section_header("Folder run");
        for group in &report.groups {
            let status = match &group.outcome {
                GroupOutcome::Retired => group.outcome.label().green(),
                GroupOutcome::Skipped => group.outcome.label().yellow(),
                _ => group.outcome.label().red(),
            };
            output.push_str(&format!(
                "  {:<30} {:>3}/{:<3} {}\n",
                group.name, group.processed_files, group.eligible_files, status
            ));
            match &group.outcome {
                GroupOutcome::Failed { file, reason } => output.push_str(&format!(
                    "      {} {}\n",
                    file.display(),
                    truncate(reason, 120).dimmed()
                )),
                GroupOutcome::RetireFailed { reason } => {
                    output.push_str(&format!("      {}\n", truncate(reason, 120).dimmed()))
                }
                _ => {}
            }
        }
        output.push('\n');
        output.push_str(&report.summary().bold().to_string());
        output.push('\n');
        output
    }

    pub fn format_sequence(sequence: &ModelSequence, from_store: bool) -> String {
        let origin = if from_store { "stored" } else { "default" };
        let mut output = format!("{} ({})\n", "Model sequence".cyan().bold(), origin);
        if sequence.is_empty() {
            output.push_str(&format!("  {}\n", "(empty: local model only)".dimmed()));
        }
        for (i, model) in sequence.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, model));
        }
        output
    }

    pub fn format_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
        }
    }

    fn section_header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casequery_domain::GroupReport;

    #[test]
    fn test_report_ends_with_summary() {
        let mut report = FolderRunReport::new("input");
        report.push(GroupReport {
            name: "case_17".into(),
            eligible_files: 2,
            processed_files: 2,
            outcome: GroupOutcome::Retired,
        });
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_report(&report);
        assert!(text.contains("case_17"));
        assert!(text.trim_end().ends_with("1/1 groups processed."));
    }

    #[test]
    fn test_empty_catalog() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_questions(ProviderFamily::DeepSeek, &[]);
        assert!(text.contains("DeepSeek questions"));
        assert!(text.contains("catalog is empty"));
    }

    #[test]
    fn test_sequence_listing() {
        colored::control::set_override(false);
        let text =
            ConsoleFormatter::format_sequence(&ModelSequence::parse(["m1", "m2"]), true);
        assert!(text.contains("1. m1"));
        assert!(text.contains("2. m2"));
        assert!(text.contains("stored"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
