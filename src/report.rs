//! Offering balance report
//!
//! Totals income and expenses per currency over an optional period. Amounts
//! in different currencies are never added together. Inactive (soft-deleted)
//! records are left out.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use flock_types::{
    Currency, DateRange, OfferingExpense, OfferingExpenseType, OfferingIncome,
    OfferingIncomeSubType, RecordStatus,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyBalance {
    pub currency: Currency,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeBreakdown {
    /// `None` groups income recorded without a sub-type
    pub sub_type: Option<OfferingIncomeSubType>,
    pub currency: Currency,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseBreakdown {
    pub expense_type: OfferingExpenseType,
    pub currency: Currency,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferingSummary {
    pub period: Option<DateRange>,
    pub balances: Vec<CurrencyBalance>,
    pub income_by_sub_type: Vec<IncomeBreakdown>,
    pub expenses_by_type: Vec<ExpenseBreakdown>,
}

impl OfferingSummary {
    pub fn balance(&self, currency: Currency) -> Option<&CurrencyBalance> {
        self.balances.iter().find(|b| b.currency == currency)
    }
}

fn in_period(date: chrono::NaiveDate, period: Option<DateRange>) -> bool {
    match period {
        Some(range) => date >= range.from && date <= range.to.unwrap_or(range.from),
        None => true,
    }
}

pub fn summarize_offerings(
    income: &[OfferingIncome],
    expenses: &[OfferingExpense],
    period: Option<DateRange>,
) -> OfferingSummary {
    // currency -> (income, expenses, income_count, expense_count)
    let mut totals: BTreeMap<Currency, (Decimal, Decimal, usize, usize)> = BTreeMap::new();
    let mut by_sub_type: BTreeMap<(Option<OfferingIncomeSubType>, Currency), (Decimal, usize)> =
        BTreeMap::new();
    let mut by_expense_type: BTreeMap<(OfferingExpenseType, Currency), (Decimal, usize)> =
        BTreeMap::new();

    for record in income
        .iter()
        .filter(|r| r.record_status == RecordStatus::Active && in_period(r.date, period))
    {
        let entry = totals
            .entry(record.currency)
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0, 0));
        entry.0 += record.amount;
        entry.2 += 1;

        let group = by_sub_type
            .entry((record.sub_type, record.currency))
            .or_insert((Decimal::ZERO, 0));
        group.0 += record.amount;
        group.1 += 1;
    }

    for record in expenses
        .iter()
        .filter(|r| r.record_status == RecordStatus::Active && in_period(r.date, period))
    {
        let entry = totals
            .entry(record.currency)
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0, 0));
        entry.1 += record.amount;
        entry.3 += 1;

        let group = by_expense_type
            .entry((record.expense_type, record.currency))
            .or_insert((Decimal::ZERO, 0));
        group.0 += record.amount;
        group.1 += 1;
    }

    let balances = totals
        .into_iter()
        .map(
            |(currency, (income, expenses, income_count, expense_count))| CurrencyBalance {
                currency,
                income,
                expenses,
                net: income - expenses,
                income_count,
                expense_count,
            },
        )
        .collect();

    let income_by_sub_type = by_sub_type
        .into_iter()
        .map(|((sub_type, currency), (total, count))| IncomeBreakdown {
            sub_type,
            currency,
            total,
            count,
        })
        .collect();

    let expenses_by_type = by_expense_type
        .into_iter()
        .map(|((expense_type, currency), (total, count))| ExpenseBreakdown {
            expense_type,
            currency,
            total,
            count,
        })
        .collect();

    OfferingSummary {
        period,
        balances,
        income_by_sub_type,
        expenses_by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flock_types::OfferingIncomeType;
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn income(amount: Decimal, currency: Currency, date: NaiveDate) -> OfferingIncome {
        OfferingIncome {
            id: Uuid::new_v4(),
            income_type: OfferingIncomeType::Offering,
            sub_type: Some(OfferingIncomeSubType::SundayService),
            amount,
            currency,
            date,
            shift: None,
            comments: None,
            their_church: None,
            their_family_group: None,
            their_zone: None,
            member_id: None,
            member_type: None,
            record_status: RecordStatus::Active,
        }
    }

    fn expense(amount: Decimal, currency: Currency, date: NaiveDate) -> OfferingExpense {
        OfferingExpense {
            id: Uuid::new_v4(),
            expense_type: OfferingExpenseType::OperationalExpenses,
            sub_type: None,
            amount,
            currency,
            date,
            description: None,
            their_church: None,
            record_status: RecordStatus::Active,
        }
    }

    #[test]
    fn test_balances_per_currency() {
        let incomes = vec![
            income(Decimal::new(10050, 2), Currency::Pen, day(2)),
            income(Decimal::new(4950, 2), Currency::Pen, day(9)),
            income(Decimal::new(20, 0), Currency::Usd, day(9)),
        ];
        let expenses = vec![expense(Decimal::new(30, 0), Currency::Pen, day(10))];

        let summary = summarize_offerings(&incomes, &expenses, None);
        let pen = summary.balance(Currency::Pen).unwrap();
        assert_eq!(pen.income, Decimal::new(150, 0));
        assert_eq!(pen.expenses, Decimal::new(30, 0));
        assert_eq!(pen.net, Decimal::new(120, 0));
        assert_eq!((pen.income_count, pen.expense_count), (2, 1));

        let usd = summary.balance(Currency::Usd).unwrap();
        assert_eq!(usd.net, Decimal::new(20, 0));
        assert!(summary.balance(Currency::Eur).is_none());
        assert_eq!(summary.income_by_sub_type.len(), 2);
        assert_eq!(summary.expenses_by_type.len(), 1);
    }

    #[test]
    fn test_period_and_inactive_records_are_excluded() {
        let mut voided = income(Decimal::new(500, 0), Currency::Pen, day(3));
        voided.record_status = RecordStatus::Inactive;
        let incomes = vec![
            income(Decimal::new(10, 0), Currency::Pen, day(1)),
            income(Decimal::new(15, 0), Currency::Pen, day(20)),
            voided,
        ];

        let period = DateRange {
            from: day(1),
            to: Some(day(15)),
        };
        let summary = summarize_offerings(&incomes, &[], Some(period));
        let pen = summary.balance(Currency::Pen).unwrap();
        assert_eq!(pen.income, Decimal::new(10, 0));
        assert_eq!(pen.income_count, 1);
        assert_eq!(pen.net, pen.income);
    }
}
