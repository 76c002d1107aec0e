//! Wallet overview: assets across wallets, savings and group funds, plus debts.

use shared::{Debt, DebtKind, GroupFund, Saving, Wallet, WalletOverview};

use crate::domain::aggregation::{percent_of, saturating_sum};

#[derive(Debug, Clone, Default)]
pub struct WalletService;

impl WalletService {
    pub fn new() -> Self {
        Self
    }

    pub fn overview(
        &self,
        wallets: &[Wallet],
        savings: &[Saving],
        group_funds: &[GroupFund],
        debts: &[Debt],
    ) -> WalletOverview {
        let total_assets = saturating_sum(
            wallets
                .iter()
                .map(|w| w.balance)
                .chain(savings.iter().map(|s| s.balance))
                .chain(group_funds.iter().map(|g| g.balance)),
        );

        WalletOverview {
            total_assets,
            total_debts: self.remaining_of(debts, DebtKind::Borrow),
            total_lending: self.remaining_of(debts, DebtKind::Lend),
        }
    }

    /// Progress toward a savings target in whole percent, capped at 100
    pub fn savings_progress(&self, saving: &Saving) -> u32 {
        percent_of(saving.balance, saving.target).min(100)
    }

    fn remaining_of(&self, debts: &[Debt], kind: DebtKind) -> i64 {
        saturating_sum(debts.iter().filter(|d| d.kind == kind).map(|d| d.remaining))
    }
}
