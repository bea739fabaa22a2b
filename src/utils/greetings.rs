/// Pure functions for building the two greeting messages (platform-agnostic)

/// Build the birthday greeting from a contact's first name
pub fn birthday_greeting(first_name: &str) -> String {
    format!("Happy Birthday, {}!", first_name)
}

/// Build the congratulations message from a contact's other name
pub fn congratulations_greeting(other_name: &str) -> String {
    format!("Congratulations, {}!", other_name)
}
