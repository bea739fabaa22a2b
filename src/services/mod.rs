/// Service modules holding the delivery business logic
pub mod delivery;
