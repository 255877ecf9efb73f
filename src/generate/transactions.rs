use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::firestore::value::{Fields, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCategory {
    Maintenance,
    Insurance,
    Utilities,
    Rental,
    Fees,
    Other,
}

impl TransactionCategory {
    /// Wire values match the Dart enum the mobile app stores verbatim.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionCategory::Maintenance => "TransactionType.maintenance",
            TransactionCategory::Insurance => "TransactionType.insurance",
            TransactionCategory::Utilities => "TransactionType.utilities",
            TransactionCategory::Rental => "TransactionType.rental",
            TransactionCategory::Fees => "TransactionType.fees",
            TransactionCategory::Other => "TransactionType.other",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub title: String,
    pub category: TransactionCategory,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub is_income: bool,
}

impl Transaction {
    /// Note the absence of `metadata` stamps: those are filled by the
    /// store's write-time clock.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("title".into(), Value::string(&self.title));
        fields.insert("type".into(), Value::string(self.category.as_str()));
        fields.insert("amount".into(), Value::Double(self.amount));
        fields.insert(
            "date".into(),
            Value::Timestamp(self.date.and_time(NaiveTime::MIN).and_utc()),
        );
        fields.insert("description".into(), Value::string(&self.description));
        fields.insert("isIncome".into(), Value::Boolean(self.is_income));
        fields
    }
}

/// Walk `months_ago` calendar months back from `today` and land on `day`,
/// clamped to the target month's true length. Handles year boundaries and
/// February in leap and non-leap years.
pub fn months_back(today: NaiveDate, months_ago: u32, day: u32) -> NaiveDate {
    let mut year = today.year();
    let mut month = today.month() as i32 - months_ago as i32;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let month = month as u32;
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("day clamped to month length")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The fixed treasury ledger: five months of HOA fee income, a one-off
/// assessment, clubhouse rental income, and the recurring expense lines.
/// Structure is hand-authored; only the dates depend on `today`.
pub fn transactions(today: NaiveDate) -> Vec<Transaction> {
    let mut out = Vec::new();

    // Monthly HOA fee income for the past five months.
    for months_ago in 0..5 {
        out.push(Transaction {
            title: "Monthly HOA Fees".to_string(),
            category: TransactionCategory::Fees,
            amount: 5000.0,
            date: months_back(today, months_ago, 15),
            description: "Monthly HOA fees collection from 25 units".to_string(),
            is_income: true,
        });
    }

    out.push(Transaction {
        title: "Special Assessment".to_string(),
        category: TransactionCategory::Fees,
        amount: 12500.0,
        date: months_back(today, 2, 10),
        description: "Special assessment for roof repairs".to_string(),
        is_income: true,
    });

    out.push(Transaction {
        title: "Clubhouse Rental".to_string(),
        category: TransactionCategory::Rental,
        amount: 750.0,
        date: months_back(today, 1, 5),
        description: "Clubhouse rental for private event".to_string(),
        is_income: true,
    });

    let maintenance: [(&str, f64, u32); 5] = [
        ("Pool Maintenance", 450.0, 1),
        ("Landscaping", 1200.0, 0),
        ("Elevator Repair", 2750.0, 3),
        ("Snow Removal", 800.0, 2),
        ("Plumbing Repairs", 1150.0, 1),
    ];
    // A few days before today, kept within every month's length.
    let maintenance_day = today.day().saturating_sub(5).clamp(1, 28);
    for (title, amount, months_ago) in maintenance {
        out.push(Transaction {
            title: title.to_string(),
            category: TransactionCategory::Maintenance,
            amount,
            date: months_back(today, months_ago, maintenance_day),
            description: format!("Regular maintenance: {title}"),
            is_income: false,
        });
    }

    let utilities: [(&str, f64, u32); 6] = [
        ("Electricity", 950.0, 0),
        ("Water", 750.0, 0),
        ("Gas", 380.0, 1),
        ("Internet", 120.0, 1),
        ("Electricity", 890.0, 2),
        ("Water", 820.0, 2),
    ];
    for (title, amount, months_ago) in utilities {
        out.push(Transaction {
            title: title.to_string(),
            category: TransactionCategory::Utilities,
            amount,
            date: months_back(today, months_ago, 5),
            description: format!("{title} bill for common areas"),
            is_income: false,
        });
    }

    out.push(Transaction {
        title: "Property Insurance".to_string(),
        category: TransactionCategory::Insurance,
        amount: 3500.0,
        date: months_back(today, 3, 15),
        description: "Quarterly property insurance premium".to_string(),
        is_income: false,
    });

    let other: [(&str, f64, u32, u32); 4] = [
        ("Legal Fees", 2000.0, 2, 12),
        ("Office Supplies", 150.0, 1, 8),
        ("Management Fee", 1800.0, 0, 1),
        ("Security System", 250.0, 3, 22),
    ];
    for (title, amount, months_ago, day) in other {
        out.push(Transaction {
            title: title.to_string(),
            category: TransactionCategory::Other,
            amount,
            date: months_back(today, months_ago, day),
            description: format!("{title} expense"),
            is_income: false,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn months_back_clamps_into_leap_february() {
        assert_eq!(months_back(date(2024, 3, 31), 1, 31), date(2024, 2, 29));
    }

    #[test]
    fn months_back_clamps_into_plain_february() {
        assert_eq!(months_back(date(2023, 3, 31), 1, 31), date(2023, 2, 28));
    }

    #[test]
    fn months_back_applies_the_century_rule() {
        // 2100 is not a leap year; 2000 was.
        assert_eq!(months_back(date(2100, 3, 15), 1, 29), date(2100, 2, 28));
        assert_eq!(months_back(date(2000, 3, 15), 1, 29), date(2000, 2, 29));
    }

    #[test]
    fn months_back_crosses_year_boundaries() {
        assert_eq!(months_back(date(2025, 1, 20), 1, 31), date(2024, 12, 31));
        assert_eq!(months_back(date(2025, 2, 5), 14, 10), date(2023, 12, 10));
    }

    #[test]
    fn months_back_with_zero_offset_stays_in_the_month() {
        assert_eq!(months_back(date(2025, 8, 7), 0, 15), date(2025, 8, 15));
    }

    #[test]
    fn months_back_never_yields_an_invalid_day() {
        let start = date(2024, 3, 31);
        for months_ago in 0..48 {
            for day in 1..=31 {
                let produced = months_back(start, months_ago, day);
                assert!(produced.day() <= days_in_month(produced.year(), produced.month()));
            }
        }
    }

    #[test]
    fn the_ledger_is_the_fixed_twenty_three_line_set() {
        let batch = transactions(date(2025, 8, 7));
        assert_eq!(batch.len(), 23);

        let income = batch.iter().filter(|t| t.is_income).count();
        assert_eq!(income, 7);

        let hoa = batch
            .iter()
            .filter(|t| t.title == "Monthly HOA Fees")
            .count();
        assert_eq!(hoa, 5);

        for tx in &batch {
            assert!(tx.amount > 0.0);
            assert!(tx.date <= date(2025, 8, 31));
            assert!(tx.category.as_str().starts_with("TransactionType."));
        }
    }

    #[test]
    fn ledger_dates_survive_a_january_start() {
        // Offsets up to 3 months reach back into the previous year.
        let batch = transactions(date(2025, 1, 31));
        for tx in &batch {
            assert!(tx.date.year() >= 2024);
        }
    }

    #[test]
    fn transaction_fields_omit_client_metadata() {
        let batch = transactions(date(2025, 8, 7));
        let fields = batch[0].to_fields();
        assert!(fields.get("metadata").is_none());
        assert!(matches!(fields.get("isIncome"), Some(Value::Boolean(true))));
    }
}
