//! Age-based investment planning and fund suggestions.

use std::fmt;

/// Buffer kept on top of one month of average expenses.
const EXPENSE_BUFFER: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTolerance {
    High,
    ModerateHigh,
    Moderate,
    LowModerate,
    Low,
}

impl RiskTolerance {
    pub fn title(&self) -> &'static str {
        match self {
            RiskTolerance::High => "High",
            RiskTolerance::ModerateHigh => "Moderate-High",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::LowModerate => "Low-Moderate",
            RiskTolerance::Low => "Low",
        }
    }

    pub fn allocation(&self) -> Allocation {
        let (equities, debt) = match self {
            RiskTolerance::High => (0.75, 0.25),
            RiskTolerance::ModerateHigh => (0.65, 0.35),
            RiskTolerance::Moderate => (0.55, 0.45),
            RiskTolerance::LowModerate => (0.40, 0.60),
            RiskTolerance::Low => (0.20, 0.80),
        };
        Allocation { equities, debt }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strategy {
    pub risk: RiskTolerance,
    /// Share of the investable amount to put to work.
    pub investment_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub equities: f64,
    pub debt: f64,
}

pub fn strategy_for_age(age: u32) -> Strategy {
    let (risk, investment_percent) = match age {
        20..=29 => (RiskTolerance::High, 0.10),
        30..=39 => (RiskTolerance::ModerateHigh, 0.175),
        40..=49 => (RiskTolerance::Moderate, 0.225),
        50..=59 => (RiskTolerance::LowModerate, 0.275),
        _ => (RiskTolerance::Low, 0.225),
    };
    Strategy {
        risk,
        investment_percent,
    }
}

/// Balance left after one month of expenses plus a 10% buffer, never negative.
pub fn investable_amount(current_balance: f64, average_expense: f64) -> f64 {
    (current_balance - (average_expense + EXPENSE_BUFFER * average_expense)).max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentPlan {
    pub age: u32,
    pub strategy: Strategy,
    pub allocation: Allocation,
    pub total: f64,
    pub equity_amount: f64,
    pub debt_amount: f64,
}

impl InvestmentPlan {
    pub fn new(age: u32, investable: f64) -> Self {
        let strategy = strategy_for_age(age);
        let allocation = strategy.risk.allocation();
        let total = investable * strategy.investment_percent;
        Self {
            age,
            strategy,
            allocation,
            total,
            equity_amount: total * allocation.equities,
            debt_amount: total * allocation.debt,
        }
    }

    pub fn equity_funds(&self) -> &'static [Fund] {
        suggest_funds(RiskCategory::High)
    }

    pub fn debt_funds(&self) -> &'static [Fund] {
        suggest_funds(RiskCategory::Low)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCategory {
    High,
    Medium,
    Low,
}

impl RiskCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "high" => Some(RiskCategory::High),
            "medium" => Some(RiskCategory::Medium),
            "low" => Some(RiskCategory::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fund {
    pub name: &'static str,
    pub one_year: f64,
    pub three_year: f64,
    pub five_year: f64,
    pub since_inception: f64,
}

const fn fund(name: &'static str, returns: [f64; 4]) -> Fund {
    Fund {
        name,
        one_year: returns[0],
        three_year: returns[1],
        five_year: returns[2],
        since_inception: returns[3],
    }
}

const HIGH_RISK_FUNDS: [Fund; 5] = [
    fund("Fund A (High Risk Category)", [12.3, 8.5, 10.7, 15.2]),
    fund("Fund B (High Risk Category)", [15.6, 10.3, 12.8, 17.5]),
    fund("Fund C (High Risk Category)", [18.2, 12.1, 14.5, 19.3]),
    fund("Fund D (High Risk Category)", [20.1, 15.0, 16.2, 21.4]),
    fund("Fund E (High Risk Category)", [22.0, 17.2, 18.3, 23.6]),
];

const MEDIUM_RISK_FUNDS: [Fund; 5] = [
    fund("Fund A (Medium Risk Category)", [8.5, 6.3, 7.2, 10.0]),
    fund("Fund B (Medium Risk Category)", [10.2, 8.0, 9.0, 12.3]),
    fund("Fund C (Medium Risk Category)", [12.1, 9.5, 10.3, 14.2]),
    fund("Fund D (Medium Risk Category)", [14.0, 11.2, 12.4, 16.0]),
    fund("Fund E (Medium Risk Category)", [15.8, 13.0, 14.5, 18.0]),
];

const LOW_RISK_FUNDS: [Fund; 5] = [
    fund("Fund A (Low Risk Category)", [5.3, 4.0, 5.2, 6.5]),
    fund("Fund B (Low Risk Category)", [6.1, 5.3, 6.1, 7.5]),
    fund("Fund C (Low Risk Category)", [7.0, 6.2, 7.0, 8.3]),
    fund("Fund D (Low Risk Category)", [7.8, 7.0, 7.8, 9.5]),
    fund("Fund E (Low Risk Category)", [8.5, 7.8, 8.6, 10.5]),
];

pub fn suggest_funds(category: RiskCategory) -> &'static [Fund] {
    match category {
        RiskCategory::High => &HIGH_RISK_FUNDS,
        RiskCategory::Medium => &MEDIUM_RISK_FUNDS,
        RiskCategory::Low => &LOW_RISK_FUNDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_brackets() {
        assert_eq!(strategy_for_age(25).risk, RiskTolerance::High);
        assert_eq!(strategy_for_age(30).risk, RiskTolerance::ModerateHigh);
        assert_eq!(strategy_for_age(49).risk, RiskTolerance::Moderate);
        assert_eq!(strategy_for_age(55).investment_percent, 0.275);
        // under twenty falls through to the conservative bracket
        assert_eq!(strategy_for_age(18).risk, RiskTolerance::Low);
        assert_eq!(strategy_for_age(70).investment_percent, 0.225);
    }

    #[test]
    fn allocations_sum_to_one() {
        for risk in [
            RiskTolerance::High,
            RiskTolerance::ModerateHigh,
            RiskTolerance::Moderate,
            RiskTolerance::LowModerate,
            RiskTolerance::Low,
        ] {
            let a = risk.allocation();
            assert!((a.equities + a.debt - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn investable_keeps_expense_buffer() {
        assert!((investable_amount(100_000.0, 20_000.0) - 78_000.0).abs() < 1e-9);
        assert_eq!(investable_amount(10_000.0, 20_000.0), 0.0);
    }

    #[test]
    fn plan_splits_total() {
        let plan = InvestmentPlan::new(25, 100_000.0);
        assert!((plan.total - 10_000.0).abs() < 1e-9);
        assert!((plan.equity_amount - 7_500.0).abs() < 1e-9);
        assert!((plan.debt_amount - 2_500.0).abs() < 1e-9);
        assert_eq!(plan.equity_funds().len(), 5);
        assert!(plan.debt_funds()[0].name.contains("Low Risk"));
    }

    #[test]
    fn risk_category_parse_is_case_insensitive() {
        assert_eq!(RiskCategory::parse("MEDIUM"), Some(RiskCategory::Medium));
        assert_eq!(RiskCategory::parse("extreme"), None);
    }
}
