//! Domain-level command types
//! These structs carry raw user input into the domain services. Presentation
//! layers map their form state to these types.

pub mod transactions {
    use shared::Direction;

    use crate::domain::date_key::DateKey;

    /// Input for creating a new transaction.
    #[derive(Debug, Clone)]
    pub struct CreateTransactionCommand {
        /// Expense or income tab the user picked; fixes the sign of the amount
        pub direction: Direction,
        /// Positive magnitude as typed on the keypad (separators allowed)
        pub amount_input: String,
        /// Falls back to the category name when blank
        pub title: String,
        pub note: String,
        pub category: String,
        /// Defaults to the default account label when `None`
        pub account: Option<String>,
        pub date: DateKey,
    }

    /// Input for editing title, subtitle and amount of a transaction.
    /// The sign of the original amount is kept.
    #[derive(Debug, Clone)]
    pub struct EditTransactionCommand {
        pub title: String,
        pub subtitle: String,
        pub amount_input: String,
    }
}
