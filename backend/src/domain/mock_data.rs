//! Sample ledger content used to seed a fresh store for demos.

use shared::{BudgetCategory, Debt, DebtKind, GroupFund, Saving, Transaction, Wallet};
use tracing::info;

use crate::domain::date_key::DateKey;
use crate::domain::transaction_service::DEFAULT_ACCOUNT;
use crate::storage::{StoreError, TransactionStore};

const SAMPLE_DAY: &[(&str, &str, i64, &str)] = &[
    ("Lương tháng 2", "Công ty", 15_500_220, "salary"),
    ("Bán đồ cũ", "Chợ Tốt", 500_000, "bonus"),
    ("Tiền siêu thị", "Chi tiêu hàng ngày", -250_000, "food"),
    ("Cafe Highlands", "Daily", -55_000, "daily"),
    ("Đi ăn lẩu", "Social", -450_000, "social"),
    ("Sửa xe", "Transport", -120_000, "transport"),
    ("Mua quần áo", "Clothes", -350_000, "clothes"),
    ("Netflix", "Entertainment", -180_000, "ent"),
];

/// The dashboard's sample day, all filed under `date`
pub fn sample_transactions(date: &DateKey) -> Vec<Transaction> {
    SAMPLE_DAY
        .iter()
        .enumerate()
        .map(|(i, (title, subtitle, amount, category))| Transaction {
            id: format!("mock-{}-{}", date, i + 1),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            amount: *amount,
            category: category.to_string(),
            account: DEFAULT_ACCOUNT.to_string(),
            date: date.to_string(),
        })
        .collect()
}

/// Write the sample day into a store. Returns how many transactions were added.
pub fn seed_store<S>(store: &mut S, date: &DateKey) -> Result<usize, StoreError>
where
    S: TransactionStore + ?Sized,
{
    let transactions = sample_transactions(date);
    let count = transactions.len();
    for transaction in transactions {
        store.put(date.as_str(), transaction)?;
    }
    info!("Seeded {} sample transactions on {}", count, date);
    Ok(count)
}

fn budget(
    id: &str,
    name: &str,
    icon: &str,
    icon_color: &str,
    budget_amount: i64,
    spent_amount: i64,
) -> BudgetCategory {
    BudgetCategory {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        icon_color: icon_color.to_string(),
        budget_amount,
        spent_amount,
    }
}

pub fn sample_budgets() -> Vec<BudgetCategory> {
    vec![
        budget("food", "Ăn uống", "food", "#FBC02D", 50_000_000, 5_000_000),
        budget("daily", "Chi tiêu hằng ngày", "shopping", "#66BB6A", 5_000_000, 0),
        budget("clothes", "Quần áo", "tshirt-crew", "#5C6BC0", 500_000_000, 0),
        budget("beauty", "Mỹ phẩm", "lipstick", "#EC407A", 5_000_000, 0),
        budget("social", "Phí giao lưu", "gift", "#FFA726", 5_000_000, 0),
    ]
}

pub fn sample_wallets() -> Vec<Wallet> {
    [
        ("1", "Tiền mặt", 2_500_000, "cash", "#10B981", "Cash"),
        ("2", "Vietcombank", 15_450_000, "bank", "#059669", "Bank"),
        ("3", "Momo", 850_000, "wallet", "#AF156A", "E-Wallet"),
    ]
    .into_iter()
    .map(|(id, name, balance, icon, color, kind)| Wallet {
        id: id.to_string(),
        name: name.to_string(),
        balance,
        icon: icon.to_string(),
        color: color.to_string(),
        kind: kind.to_string(),
    })
    .collect()
}

pub fn sample_savings() -> Vec<Saving> {
    vec![
        Saving {
            id: "1".to_string(),
            name: "Tiết kiệm mua xe".to_string(),
            balance: 45_000_000,
            target: 120_000_000,
            icon: "car-outline".to_string(),
        },
        Saving {
            id: "2".to_string(),
            name: "Quỹ khẩn cấp".to_string(),
            balance: 10_000_000,
            target: 50_000_000,
            icon: "shield-checkmark-outline".to_string(),
        },
    ]
}

pub fn sample_group_funds() -> Vec<GroupFund> {
    vec![
        GroupFund {
            id: "1".to_string(),
            name: "Quỹ gia đình".to_string(),
            balance: 25_000_000,
            members: 4,
            icon: "home-group".to_string(),
        },
        GroupFund {
            id: "2".to_string(),
            name: "Quỹ ăn nhậu".to_string(),
            balance: 1_200_000,
            members: 8,
            icon: "glass-mug-variant".to_string(),
        },
    ]
}

pub fn sample_debts() -> Vec<Debt> {
    vec![
        Debt {
            id: "1".to_string(),
            name: "Vay mua laptop".to_string(),
            amount: 8_000_000,
            remaining: 3_500_000,
            kind: DebtKind::Borrow,
            counterparty: "Nguyễn Văn A".to_string(),
        },
        Debt {
            id: "2".to_string(),
            name: "Cho mượn tiền ăn".to_string(),
            amount: 500_000,
            remaining: 500_000,
            kind: DebtKind::Lend,
            counterparty: "Trần Thị B".to_string(),
        },
    ]
}
