use chrono::NaiveDate;

/// A single contact row from the spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRow {
    /// Phone number in international format with a leading '+'
    pub phone: String,
    pub first_name: String,
    pub other_name: String,
    /// Only month and day are significant downstream
    pub birthday: NaiveDate,
}

/// Outcome of one message send attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    Sent,
    Failed(String),
}

/// Report for one of the two greeting messages
#[derive(Debug, Clone, PartialEq)]
pub struct SendReport {
    pub message: String,
    pub outcome: SendOutcome,
}

/// Outcome of processing one matched row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Recipient resolved; one report per attempted message
    Delivered(Vec<SendReport>),
    /// Recipient could not be resolved; no send was attempted
    Skipped(String),
}

/// Report for one matched row
#[derive(Debug, Clone, PartialEq)]
pub struct RowReport {
    pub phone: String,
    pub outcome: RowOutcome,
}

/// Summary of a whole delivery run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<RowReport>,
}

impl RunSummary {
    /// Number of rows that matched today's date
    pub fn rows(&self) -> usize {
        self.reports.len()
    }

    /// Number of messages delivered successfully
    pub fn sent(&self) -> usize {
        self.message_reports()
            .filter(|report| report.outcome == SendOutcome::Sent)
            .count()
    }

    /// Number of messages that failed to deliver
    pub fn failed(&self) -> usize {
        self.message_reports()
            .filter(|report| matches!(report.outcome, SendOutcome::Failed(_)))
            .count()
    }

    /// Number of rows skipped because the contact could not be resolved
    pub fn skipped(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| matches!(report.outcome, RowOutcome::Skipped(_)))
            .count()
    }

    fn message_reports(&self) -> impl Iterator<Item = &SendReport> {
        self.reports.iter().flat_map(|report| match &report.outcome {
            RowOutcome::Delivered(reports) => reports.as_slice(),
            RowOutcome::Skipped(_) => &[],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivered(phone: &str, outcomes: &[SendOutcome]) -> RowReport {
        RowReport {
            phone: phone.to_string(),
            outcome: RowOutcome::Delivered(
                outcomes
                    .iter()
                    .map(|outcome| SendReport {
                        message: "greeting".to_string(),
                        outcome: outcome.clone(),
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            reports: vec![
                delivered("+1", &[SendOutcome::Sent, SendOutcome::Sent]),
                delivered(
                    "+2",
                    &[SendOutcome::Failed("flood".to_string()), SendOutcome::Sent],
                ),
                RowReport {
                    phone: "+3".to_string(),
                    outcome: RowOutcome::Skipped("not on Telegram".to_string()),
                },
            ],
        };

        assert_eq!(summary.rows(), 3);
        assert_eq!(summary.sent(), 3);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.skipped(), 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert_eq!(summary.rows(), 0);
        assert_eq!(summary.sent(), 0);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.skipped(), 0);
    }
}
