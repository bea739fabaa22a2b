/// Delivery service - selects today's birthdays and sends the greetings
use chrono::Datelike;
use tracing::{info, warn};

use crate::config::ResolverStrategy;
use crate::messaging::{Messenger, resolve_recipient};
use crate::models::{ContactRow, RowOutcome, RowReport, RunSummary, SendOutcome, SendReport};
use crate::utils::datetime::matches_birthday;
use crate::utils::greetings::{birthday_greeting, congratulations_greeting};

/// Return the rows whose birthday falls on the given month and day.
///
/// The filter is stable and ignores the birthday's year entirely.
pub fn birthdays_on(table: &[ContactRow], month: u32, day: u32) -> Vec<ContactRow> {
    table
        .iter()
        .filter(|row| matches_birthday(row.birthday.month(), row.birthday.day(), month, day))
        .cloned()
        .collect()
}

/// Process every matched row in order: resolve the recipient, then send
/// both greetings. A row that fails to resolve is skipped and the loop
/// continues with the next row.
pub async fn deliver_all<M: Messenger>(
    messenger: &M,
    strategy: ResolverStrategy,
    rows: &[ContactRow],
) -> RunSummary {
    let mut summary = RunSummary::default();

    for row in rows {
        info!(
            "Processing {}: {}, {}",
            row.phone, row.first_name, row.other_name
        );

        let outcome = match resolve_recipient(messenger, strategy, row).await {
            Ok(recipient) => {
                RowOutcome::Delivered(send_greetings(messenger, &recipient, row).await)
            }
            Err(e) => {
                warn!("Skipping {}: {}", row.phone, e);
                RowOutcome::Skipped(e.to_string())
            }
        };

        summary.reports.push(RowReport {
            phone: row.phone.clone(),
            outcome,
        });
    }

    summary
}

/// Send the two greeting messages for one row.
///
/// Each send is attempted independently; a failure on the first message
/// never suppresses the second.
async fn send_greetings<M: Messenger>(
    messenger: &M,
    recipient: &M::Recipient,
    row: &ContactRow,
) -> Vec<SendReport> {
    let messages = [
        birthday_greeting(&row.first_name),
        congratulations_greeting(&row.other_name),
    ];

    let mut reports = Vec::with_capacity(messages.len());
    for message in messages {
        let outcome = match messenger.send_text(recipient, &message).await {
            Ok(()) => {
                info!("Sent to {}: {}", row.phone, message);
                SendOutcome::Sent
            }
            Err(e) => {
                warn!("Failed to send to {}: {}", row.phone, e);
                SendOutcome::Failed(e.to_string())
            }
        };
        reports.push(SendReport { message, outcome });
    }
    reports
}
