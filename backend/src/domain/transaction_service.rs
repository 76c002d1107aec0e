//! Transaction service domain logic.
//!
//! Create, edit, move and delete transactions through a [`TransactionStore`].
//! Every write keeps `Transaction::date` equal to the key it is filed under.

use anyhow::{Context, Result};
use shared::{Direction, Transaction, TransactionPatch};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::categories;
use crate::domain::commands::transactions::{CreateTransactionCommand, EditTransactionCommand};
use crate::domain::date_key::DateKey;
use crate::storage::{StoreError, TransactionStore};

/// Account label used when none is chosen
pub const DEFAULT_ACCOUNT: &str = "Tài khoản mặc định";

const MAX_TITLE_LEN: usize = 256;

/// Specific validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is too long ({0} characters, max 256)")]
    TitleTooLong(usize),
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero")]
    ZeroAmount,
    #[error("Amount is too large")]
    AmountTooLarge,
    #[error("Unknown {direction} category: {category}")]
    UnknownCategory { direction: Direction, category: String },
}

/// Parse a keypad amount into a positive magnitude.
///
/// Group separators (`.`, `,`, spaces) are ignored; anything else that is not
/// an ASCII digit is rejected.
pub fn parse_amount_input(input: &str) -> Result<i64, ValidationError> {
    let digits: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | ' '))
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidAmount(input.to_string()));
    }

    let magnitude: i64 = digits.parse().map_err(|_| ValidationError::AmountTooLarge)?;
    if magnitude == 0 {
        return Err(ValidationError::ZeroAmount);
    }
    Ok(magnitude)
}

/// Apply one keypad press to the amount being typed.
///
/// `backspace` drops the last digit (down to `"0"`); a digit typed over the
/// initial `"0"` replaces it; anything else is appended.
pub fn apply_keypad_key(current: &str, key: &str) -> String {
    if key == "backspace" {
        let mut chars = current.chars();
        chars.next_back();
        let rest = chars.as_str();
        return if rest.is_empty() { "0".to_string() } else { rest.to_string() };
    }
    let is_digit = !key.is_empty() && key.chars().all(|c| c.is_ascii_digit());
    if current == "0" && is_digit {
        key.to_string()
    } else {
        format!("{}{}", current, key)
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong(len));
    }
    Ok(())
}

pub struct TransactionService<S: TransactionStore> {
    store: S,
}

impl<S: TransactionStore> TransactionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn create_transaction(&mut self, command: CreateTransactionCommand) -> Result<Transaction> {
        let category = categories::find(command.direction, &command.category).ok_or_else(|| {
            ValidationError::UnknownCategory {
                direction: command.direction,
                category: command.category.clone(),
            }
        })?;

        let magnitude = parse_amount_input(&command.amount_input)?;
        let amount = match command.direction {
            Direction::Expense => -magnitude,
            Direction::Income => magnitude,
        };

        let title = if command.title.trim().is_empty() {
            category.name.clone()
        } else {
            command.title.trim().to_string()
        };
        validate_title(&title)?;

        let date_key = command.date.as_str();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            title,
            subtitle: command.note.trim().to_string(),
            amount,
            category: category.id,
            account: command.account.unwrap_or_else(|| DEFAULT_ACCOUNT.to_string()),
            date: date_key.to_string(),
        };

        self.store
            .put(date_key, transaction.clone())
            .with_context(|| format!("Failed to store transaction under {}", date_key))?;

        info!(
            "Created {} transaction {} on {} for {}",
            command.direction, transaction.id, date_key, transaction.amount
        );
        Ok(transaction)
    }

    /// Update title, subtitle and amount. The new amount takes the sign of the
    /// stored one: an expense stays an expense.
    pub fn edit_transaction(
        &mut self,
        date_key: &str,
        transaction_id: &str,
        command: EditTransactionCommand,
    ) -> Result<Transaction> {
        let existing = self
            .find_transaction(date_key, transaction_id)
            .ok_or_else(|| StoreError::NotFound {
                id: transaction_id.to_string(),
                key: date_key.to_string(),
            })?;

        validate_title(&command.title)?;
        let magnitude = parse_amount_input(&command.amount_input)?;
        let amount = if existing.amount < 0 { -magnitude } else { magnitude };

        let patch = TransactionPatch {
            title: Some(command.title),
            subtitle: Some(command.subtitle),
            amount: Some(amount),
            ..Default::default()
        };

        let updated = self.store.update(date_key, transaction_id, &patch)?;
        info!("Edited transaction {} on {}", transaction_id, date_key);
        Ok(updated)
    }

    /// Refile a transaction under another day
    pub fn move_transaction(
        &mut self,
        date_key: &str,
        transaction_id: &str,
        new_date: &DateKey,
    ) -> Result<Transaction> {
        let mut transaction = self
            .find_transaction(date_key, transaction_id)
            .ok_or_else(|| StoreError::NotFound {
                id: transaction_id.to_string(),
                key: date_key.to_string(),
            })?;

        if transaction.date == new_date.as_str() {
            return Ok(transaction);
        }

        transaction.date = new_date.to_string();
        self.store.put(new_date.as_str(), transaction.clone())?;

        if let Err(remove_err) = self.store.remove(date_key, transaction_id) {
            // Undo the put so the transaction stays filed under exactly one key
            return match self.store.remove(new_date.as_str(), transaction_id) {
                Ok(_) => Err(anyhow::Error::new(remove_err).context(format!(
                    "Failed to move transaction {} from {}, left in place",
                    transaction_id, date_key
                ))),
                Err(rollback_err) => {
                    warn!(
                        "Rollback of move for {} failed: {}",
                        transaction_id, rollback_err
                    );
                    Err(anyhow::Error::new(remove_err).context(format!(
                        "Transaction {} is now filed under both {} and {}",
                        transaction_id, date_key, new_date
                    )))
                }
            };
        }

        info!("Moved transaction {} from {} to {}", transaction_id, date_key, new_date);
        Ok(transaction)
    }

    /// Returns true if the transaction was found and deleted
    pub fn delete_transaction(&mut self, date_key: &str, transaction_id: &str) -> Result<bool> {
        let deleted = self.store.remove(date_key, transaction_id)?;
        if deleted {
            info!("Deleted transaction {} from {}", transaction_id, date_key);
        } else {
            warn!("Transaction {} not found under {}, nothing deleted", transaction_id, date_key);
        }
        Ok(deleted)
    }

    pub fn transactions_for_day(&self, date_key: &str) -> Vec<Transaction> {
        self.store.get(date_key)
    }

    fn find_transaction(&self, date_key: &str, transaction_id: &str) -> Option<Transaction> {
        self.store
            .get(date_key)
            .into_iter()
            .find(|tx| tx.id == transaction_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date_key::encode;
    use crate::storage::InMemoryTransactionStore;

    fn create_test_service() -> TransactionService<InMemoryTransactionStore> {
        TransactionService::new(InMemoryTransactionStore::new())
    }

    fn create_command(
        direction: Direction,
        amount: &str,
        category: &str,
    ) -> CreateTransactionCommand {
        CreateTransactionCommand {
            direction,
            amount_input: amount.to_string(),
            title: String::new(),
            note: "  weekly shop ".to_string(),
            category: category.to_string(),
            account: None,
            date: encode(2024, 2, 5).unwrap(),
        }
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input("250000"), Ok(250_000));
        assert_eq!(parse_amount_input("1,500,000"), Ok(1_500_000));
        assert_eq!(parse_amount_input("1.500.000"), Ok(1_500_000));
        assert_eq!(parse_amount_input(" 42 "), Ok(42));
        assert_eq!(parse_amount_input("0"), Err(ValidationError::ZeroAmount));
        let invalid = |input: &str| -> Result<i64, ValidationError> {
            Err(ValidationError::InvalidAmount(input.to_string()))
        };
        assert_eq!(parse_amount_input(""), invalid(""));
        assert_eq!(parse_amount_input("-5"), invalid("-5"));
        assert_eq!(parse_amount_input("12a"), invalid("12a"));
        assert_eq!(
            parse_amount_input("99999999999999999999"),
            Err(ValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn test_apply_keypad_key() {
        assert_eq!(apply_keypad_key("0", "5"), "5");
        assert_eq!(apply_keypad_key("5", "0"), "50");
        assert_eq!(apply_keypad_key("50", "000"), "50000");
        assert_eq!(apply_keypad_key("50", "backspace"), "5");
        assert_eq!(apply_keypad_key("5", "backspace"), "0");
        assert_eq!(apply_keypad_key("0", "backspace"), "0");
        assert_eq!(apply_keypad_key("0", "."), "0.");
    }

    #[test]
    fn test_create_expense_negates_amount() {
        let mut service = create_test_service();
        let tx = service
            .create_transaction(create_command(Direction::Expense, "250,000", "food"))
            .unwrap();

        assert_eq!(tx.amount, -250_000);
        assert_eq!(tx.title, "Diet"); // blank title falls back to the category name
        assert_eq!(tx.subtitle, "weekly shop");
        assert_eq!(tx.account, DEFAULT_ACCOUNT);
        assert_eq!(tx.date, "2024-03-05");
        assert!(Uuid::parse_str(&tx.id).is_ok());
        assert_eq!(service.transactions_for_day("2024-03-05"), vec![tx]);
    }

    #[test]
    fn test_create_income() {
        let mut service = create_test_service();
        let mut command = create_command(Direction::Income, "15500220", "salary");
        command.title = "Lương tháng 2".to_string();
        command.account = Some("Vietcombank".to_string());

        let tx = service.create_transaction(command).unwrap();
        assert_eq!(tx.amount, 15_500_220);
        assert_eq!(tx.title, "Lương tháng 2");
        assert_eq!(tx.account, "Vietcombank");
    }

    #[test]
    fn test_create_rejects_category_of_other_direction() {
        let mut service = create_test_service();
        let err = service
            .create_transaction(create_command(Direction::Income, "100", "food"))
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::UnknownCategory {
                direction: Direction::Income,
                category: "food".to_string()
            })
        );
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_create_rejects_long_title() {
        let mut service = create_test_service();
        let mut command = create_command(Direction::Expense, "100", "food");
        command.title = "x".repeat(257);
        let err = service.create_transaction(command).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::TitleTooLong(257))
        );
    }

    #[test]
    fn test_edit_keeps_sign_and_date() {
        let mut service = create_test_service();
        let expense = service
            .create_transaction(create_command(Direction::Expense, "250000", "food"))
            .unwrap();
        let income = service
            .create_transaction(create_command(Direction::Income, "500000", "bonus"))
            .unwrap();

        let edited = service
            .edit_transaction(
                "2024-03-05",
                &expense.id,
                EditTransactionCommand {
                    title: "Supermarket".to_string(),
                    subtitle: "Daily spending".to_string(),
                    amount_input: "300000".to_string(),
                },
            )
            .unwrap();
        assert_eq!(edited.amount, -300_000);
        assert_eq!(edited.title, "Supermarket");
        assert_eq!(edited.date, "2024-03-05");

        let edited = service
            .edit_transaction(
                "2024-03-05",
                &income.id,
                EditTransactionCommand {
                    title: "Sold old phone".to_string(),
                    subtitle: String::new(),
                    amount_input: "600000".to_string(),
                },
            )
            .unwrap();
        assert_eq!(edited.amount, 600_000);
    }

    #[test]
    fn test_edit_unknown_transaction() {
        let mut service = create_test_service();
        let err = service
            .edit_transaction(
                "2024-03-05",
                "missing",
                EditTransactionCommand {
                    title: "x".to_string(),
                    subtitle: String::new(),
                    amount_input: "1".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_move_transaction() {
        let mut service = create_test_service();
        let tx = service
            .create_transaction(create_command(Direction::Expense, "100", "food"))
            .unwrap();

        let new_date = encode(2024, 2, 6).unwrap();
        let moved = service.move_transaction("2024-03-05", &tx.id, &new_date).unwrap();
        assert_eq!(moved.date, "2024-03-06");
        assert!(service.transactions_for_day("2024-03-05").is_empty());
        assert_eq!(service.transactions_for_day("2024-03-06"), vec![moved]);
    }

    /// Store whose `remove` fails for the listed keys
    struct FailingRemoveStore {
        inner: InMemoryTransactionStore,
        failing_keys: Vec<&'static str>,
    }

    impl TransactionStore for FailingRemoveStore {
        fn get(&self, date_key: &str) -> Vec<Transaction> {
            self.inner.get(date_key)
        }

        fn keys(&self) -> Vec<String> {
            self.inner.keys()
        }

        fn put(&mut self, date_key: &str, transaction: Transaction) -> Result<(), StoreError> {
            self.inner.put(date_key, transaction)
        }

        fn remove(&mut self, date_key: &str, transaction_id: &str) -> Result<bool, StoreError> {
            if self.failing_keys.iter().any(|key| *key == date_key) {
                return Err(StoreError::Poisoned);
            }
            self.inner.remove(date_key, transaction_id)
        }

        fn update(
            &mut self,
            date_key: &str,
            transaction_id: &str,
            patch: &TransactionPatch,
        ) -> Result<Transaction, StoreError> {
            self.inner.update(date_key, transaction_id, patch)
        }
    }

    fn create_failing_service(
        failing_keys: Vec<&'static str>,
    ) -> (TransactionService<FailingRemoveStore>, Transaction) {
        let mut service = TransactionService::new(FailingRemoveStore {
            inner: InMemoryTransactionStore::new(),
            failing_keys,
        });
        let tx = service
            .create_transaction(create_command(Direction::Expense, "100", "food"))
            .unwrap();
        (service, tx)
    }

    #[test]
    fn test_failed_move_is_rolled_back() {
        let (mut service, tx) = create_failing_service(vec!["2024-03-05"]);

        let new_date = encode(2024, 2, 6).unwrap();
        let err = service.move_transaction("2024-03-05", &tx.id, &new_date).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Poisoned)));
        assert_eq!(service.transactions_for_day("2024-03-05"), vec![tx]);
        assert!(service.transactions_for_day("2024-03-06").is_empty());
    }

    #[test]
    fn test_failed_rollback_reports_both_keys() {
        let (mut service, tx) = create_failing_service(vec!["2024-03-05", "2024-03-06"]);

        let new_date = encode(2024, 2, 6).unwrap();
        let err = service.move_transaction("2024-03-05", &tx.id, &new_date).unwrap_err();
        assert!(err.to_string().contains("both 2024-03-05 and 2024-03-06"));
        assert_eq!(service.transactions_for_day("2024-03-05").len(), 1);
        assert_eq!(service.transactions_for_day("2024-03-06").len(), 1);
    }

    #[test]
    fn test_delete_transaction() {
        let mut service = create_test_service();
        let tx = service
            .create_transaction(create_command(Direction::Expense, "100", "food"))
            .unwrap();

        assert!(service.delete_transaction("2024-03-05", &tx.id).unwrap());
        assert!(!service.delete_transaction("2024-03-05", &tx.id).unwrap());
        assert!(service.into_store().is_empty());
    }
}
