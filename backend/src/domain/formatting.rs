//! Currency formatting for the ledger screens.
//!
//! Amounts are whole đồng. The formatter groups digits with a configurable
//! separator, appends the currency suffix, and produces the compact labels
//! shown inside calendar cells ("1.5tr", "250k").
//!
//! ## Core Components
//!
//! - **FormattingConfig**: separator, currency and unit labels, balance visibility
//! - **FormatOptions**: per-call sign, currency and absolute switches
//! - **CurrencyFormatter**: the formatting service itself

use serde::{Deserialize, Serialize};
use shared::{AmountType, FormattedTransaction, Transaction};

/// Placeholder shown instead of balances when they are hidden
pub const MASK: &str = "******";

/// Display preferences for amounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormattingConfig {
    pub currency_suffix: String,
    pub thousands_separator: String,
    pub million_unit: String,
    pub thousand_unit: String,
    pub show_balances: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            currency_suffix: " ₫".to_string(),
            thousands_separator: ".".to_string(),
            million_unit: "tr".to_string(),
            thousand_unit: "k".to_string(),
            show_balances: true,
        }
    }
}

/// Per-call switches for `format_amount`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub show_sign: bool,
    pub show_currency: bool,
    /// Drop the sign entirely; overrides `show_sign`
    pub absolute: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            show_sign: false,
            show_currency: true,
            absolute: false,
        }
    }
}

impl FormatOptions {
    pub fn signed() -> Self {
        Self {
            show_sign: true,
            ..Self::default()
        }
    }

    pub fn absolute() -> Self {
        Self {
            absolute: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurrencyFormatter {
    config: FormattingConfig,
}

impl CurrencyFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormattingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormattingConfig {
        &self.config
    }

    /// Group the digits of a magnitude in threes
    pub fn group_digits(&self, value: u64) -> String {
        let digits = value.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.config.thousands_separator);
            }
            grouped.push(ch);
        }
        grouped
    }

    /// "1.234.567 ₫", "+500.000 ₫", "-250.000 ₫" depending on options.
    /// Without `show_sign` a negative amount is printed as its magnitude.
    pub fn format_amount(&self, amount: i64, options: FormatOptions) -> String {
        let mut result = self.group_digits(amount.unsigned_abs());
        if options.show_currency {
            result.push_str(&self.config.currency_suffix);
        }
        if options.show_sign && !options.absolute {
            let sign = if amount >= 0 { '+' } else { '-' };
            result.insert(0, sign);
        }
        result
    }

    /// Compact label for calendar cells: one decimal for millions, whole
    /// thousands, raw value below a thousand.
    pub fn format_short(&self, amount: i64) -> String {
        let abs = amount.unsigned_abs();
        let sign = if amount < 0 { "-" } else { "" };

        if abs >= 1_000_000 {
            let tenths = (abs + 50_000) / 100_000;
            format!("{}{}.{}{}", sign, tenths / 10, tenths % 10, self.config.million_unit)
        } else if abs >= 1_000 {
            let thousands = (abs + 500) / 1_000;
            format!("{}{}{}", sign, thousands, self.config.thousand_unit)
        } else {
            amount.to_string()
        }
    }

    /// Format a balance, or the mask when balances are hidden
    pub fn format_balance(&self, amount: i64) -> String {
        if self.config.show_balances {
            self.format_amount(amount, FormatOptions::default())
        } else {
            MASK.to_string()
        }
    }

    pub fn classify_amount(&self, amount: i64) -> AmountType {
        match amount {
            a if a > 0 => AmountType::Positive,
            a if a < 0 => AmountType::Negative,
            _ => AmountType::Zero,
        }
    }

    pub fn format_transaction(&self, transaction: &Transaction) -> FormattedTransaction {
        FormattedTransaction {
            id: transaction.id.clone(),
            title: transaction.title.clone(),
            subtitle: transaction.subtitle.clone(),
            formatted_amount: self.format_amount(transaction.amount, FormatOptions::signed()),
            amount_type: self.classify_amount(transaction.amount),
            raw_amount: transaction.amount,
            date: transaction.date.clone(),
        }
    }

    pub fn format_transactions(&self, transactions: &[Transaction]) -> Vec<FormattedTransaction> {
        transactions
            .iter()
            .map(|tx| self.format_transaction(tx))
            .collect()
    }
}
