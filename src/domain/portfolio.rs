//! Built-in portfolio figures for the dashboard and currency views.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [
        TimeRange::Week,
        TimeRange::Month,
        TimeRange::Quarter,
        TimeRange::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "Last 7 days",
            TimeRange::Month => "Last 30 days",
            TimeRange::Quarter => "Last 90 days",
            TimeRange::Year => "Last 12 months",
        }
    }

    /// Accepts the full label or a short form (`7d`, `30d`, `90d`, `12m`, `1y`).
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|range| range.label().to_lowercase() == value)
            .or(match value.as_str() {
                "7d" | "1w" | "week" => Some(TimeRange::Week),
                "30d" | "1m" | "month" => Some(TimeRange::Month),
                "90d" | "3m" | "quarter" => Some(TimeRange::Quarter),
                "12m" | "1y" | "year" => Some(TimeRange::Year),
                _ => None,
            })
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioMetrics {
    pub total_value: f64,
    pub invested: f64,
    pub returns: f64,
    pub returns_pct: f64,
    pub income: f64,
    pub expenses: f64,
}

impl PortfolioMetrics {
    pub fn savings_rate(&self) -> f64 {
        if self.income <= 0.0 {
            return 0.0;
        }
        (self.income - self.expenses) / self.income * 100.0
    }
}

pub fn metrics_for(range: TimeRange) -> PortfolioMetrics {
    match range {
        TimeRange::Week => PortfolioMetrics {
            total_value: 1_248_500.0,
            invested: 1_100_000.0,
            returns: 3_150.0,
            returns_pct: 0.25,
            income: 0.0,
            expenses: 8_420.0,
        },
        TimeRange::Month => PortfolioMetrics {
            total_value: 1_248_500.0,
            invested: 1_100_000.0,
            returns: 18_900.0,
            returns_pct: 1.54,
            income: 95_000.0,
            expenses: 41_760.0,
        },
        TimeRange::Quarter => PortfolioMetrics {
            total_value: 1_248_500.0,
            invested: 1_060_000.0,
            returns: 52_300.0,
            returns_pct: 4.37,
            income: 285_000.0,
            expenses: 131_400.0,
        },
        TimeRange::Year => PortfolioMetrics {
            total_value: 1_248_500.0,
            invested: 960_000.0,
            returns: 148_500.0,
            returns_pct: 13.50,
            income: 1_140_000.0,
            expenses: 538_200.0,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyHolding {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub balance: f64,
    /// Value of one unit in rupees.
    pub rate_inr: f64,
    pub change_pct: f64,
}

impl CurrencyHolding {
    pub fn value_inr(&self) -> f64 {
        self.balance * self.rate_inr
    }
}

const fn holding(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    balance: f64,
    rate_inr: f64,
    change_pct: f64,
) -> CurrencyHolding {
    CurrencyHolding {
        code,
        name,
        symbol,
        balance,
        rate_inr,
        change_pct,
    }
}

pub const HOLDINGS: [CurrencyHolding; 8] = [
    holding("INR", "Indian Rupee", "₹", 425_000.0, 1.0, 0.0),
    holding("USD", "US Dollar", "$", 2_450.0, 83.12, 0.21),
    holding("EUR", "Euro", "€", 1_180.0, 90.47, -0.34),
    holding("GBP", "British Pound", "£", 640.0, 105.83, 0.12),
    holding("JPY", "Japanese Yen", "¥", 185_000.0, 0.56, -0.58),
    holding("AED", "UAE Dirham", "د.إ", 3_200.0, 22.63, 0.02),
    holding("SGD", "Singapore Dollar", "S$", 900.0, 61.88, 0.44),
    holding("AUD", "Australian Dollar", "A$", 1_050.0, 54.91, -0.17),
];

pub fn total_holdings_inr(holdings: &[CurrencyHolding]) -> f64 {
    holdings.iter().map(CurrencyHolding::value_inr).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_labels_parse() {
        for range in TimeRange::ALL {
            assert_eq!(TimeRange::from_label(range.label()), Some(range));
        }
        assert_eq!(TimeRange::from_label("90d"), Some(TimeRange::Quarter));
        assert_eq!(TimeRange::from_label("forever"), None);
    }

    #[test]
    fn eight_distinct_holdings() {
        let mut codes: Vec<&str> = HOLDINGS.iter().map(|h| h.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 8);
        assert!(total_holdings_inr(&HOLDINGS) > 425_000.0);
    }

    #[test]
    fn savings_rate_handles_zero_income() {
        assert_eq!(metrics_for(TimeRange::Week).savings_rate(), 0.0);
        let month = metrics_for(TimeRange::Month);
        assert!((month.savings_rate() - 56.042).abs() < 0.01);
    }
}
