/// Path of the contact spreadsheet, relative to the working directory
pub const WORKBOOK_PATH: &str = "birthdays.xlsx";

/// File the Telegram client uses to persist its session across runs
pub const SESSION_FILE: &str = "autoresponder.session";

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "bdaygram_rs=info";
