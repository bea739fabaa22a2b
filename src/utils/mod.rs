/// Utility modules for common functionality
pub mod datetime;
pub mod greetings;
pub mod phone;
