//! Month-ahead closing-balance forecast.
//!
//! Additive model: least-squares linear trend over the month index, plus a
//! yearly seasonal offset per calendar month once two full years of history
//! are available. The interval is the 80% band of a normal residual.

use thiserror::Error;

use super::balance::MonthlyBalance;
use super::month::YearMonth;

pub const DEFAULT_PERIODS: usize = 36;
const MIN_HISTORY: usize = 2;
const SEASONAL_HISTORY: usize = 24;
/// z-score of the 80% two-sided interval.
const INTERVAL_Z: f64 = 1.2816;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ForecastError {
    #[error("need at least {needed} months of balance history, found {found}")]
    InsufficientHistory { needed: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub month: YearMonth,
    pub yhat: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastPoint {
    /// Balances below zero shown as zero.
    pub fn floored(&self) -> Self {
        Self {
            month: self.month,
            yhat: self.yhat.max(0.0),
            lower: self.lower.max(0.0),
            upper: self.upper.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendModel {
    origin: YearMonth,
    intercept: f64,
    slope: f64,
    seasonal: Option<[f64; 12]>,
    sigma: f64,
}

impl TrendModel {
    pub fn fit(history: &[MonthlyBalance]) -> Result<Self, ForecastError> {
        if history.len() < MIN_HISTORY {
            return Err(ForecastError::InsufficientHistory {
                needed: MIN_HISTORY,
                found: history.len(),
            });
        }
        let origin = history[0].month;
        let xs: Vec<f64> = history
            .iter()
            .map(|point| origin.months_until(point.month) as f64)
            .collect();
        let ys: Vec<f64> = history.iter().map(|point| point.balance).collect();
        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let var_x: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
        let cov: f64 = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();
        let slope = if var_x > 0.0 { cov / var_x } else { 0.0 };
        let intercept = mean_y - slope * mean_x;

        let trend_residuals: Vec<f64> = xs
            .iter()
            .zip(&ys)
            .map(|(x, y)| y - (intercept + slope * x))
            .collect();

        let seasonal = (history.len() >= SEASONAL_HISTORY).then(|| {
            let mut sums = [0.0f64; 12];
            let mut counts = [0usize; 12];
            for (point, residual) in history.iter().zip(&trend_residuals) {
                let idx = (point.month.month - 1) as usize;
                sums[idx] += residual;
                counts[idx] += 1;
            }
            let mut offsets = [0.0f64; 12];
            for idx in 0..12 {
                if counts[idx] > 0 {
                    offsets[idx] = sums[idx] / counts[idx] as f64;
                }
            }
            offsets
        });

        let residuals: Vec<f64> = history
            .iter()
            .zip(&trend_residuals)
            .map(|(point, residual)| {
                residual - seasonal.map_or(0.0, |s| s[(point.month.month - 1) as usize])
            })
            .collect();
        let sigma = if residuals.len() > 2 {
            let ss: f64 = residuals.iter().map(|r| r * r).sum();
            (ss / (residuals.len() - 2) as f64).sqrt()
        } else {
            0.0
        };

        Ok(Self {
            origin,
            intercept,
            slope,
            seasonal,
            sigma,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn is_seasonal(&self) -> bool {
        self.seasonal.is_some()
    }

    pub fn predict(&self, month: YearMonth) -> ForecastPoint {
        let x = self.origin.months_until(month) as f64;
        let seasonal = self
            .seasonal
            .map_or(0.0, |s| s[(month.month - 1) as usize]);
        let yhat = self.intercept + self.slope * x + seasonal;
        let band = INTERVAL_Z * self.sigma;
        ForecastPoint {
            month,
            yhat,
            lower: yhat - band,
            upper: yhat + band,
        }
    }
}

/// Forecast `periods` months following the last month of `history`.
pub fn forecast(history: &[MonthlyBalance], periods: usize) -> Result<Vec<ForecastPoint>, ForecastError> {
    let model = TrendModel::fit(history)?;
    let last = history[history.len() - 1].month;
    Ok((1..=periods as i64)
        .map(|n| model.predict(last.offset(n)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(months: u32, start: f64, step: f64) -> Vec<MonthlyBalance> {
        (0..months)
            .map(|i| MonthlyBalance {
                month: YearMonth::new(2022, 1).offset(i as i64),
                balance: start + step * i as f64,
            })
            .collect()
    }

    #[test]
    fn exact_linear_history_extrapolates() {
        let history = linear(6, 1_000.0, 250.0);
        let points = forecast(&history, 3).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].month, YearMonth::new(2022, 7));
        assert!((points[0].yhat - 2_500.0).abs() < 1e-6);
        assert!((points[2].yhat - 3_000.0).abs() < 1e-6);
        // perfect fit has a zero-width interval
        assert!((points[2].upper - points[2].lower).abs() < 1e-6);
    }

    #[test]
    fn interval_brackets_prediction() {
        let mut history = linear(8, 10_000.0, -100.0);
        history[3].balance += 400.0;
        history[5].balance -= 300.0;
        let points = forecast(&history, 4).unwrap();
        for point in points {
            assert!(point.lower < point.yhat && point.yhat < point.upper);
        }
    }

    #[test]
    fn seasonality_needs_two_years() {
        let short = linear(23, 0.0, 10.0);
        assert!(!TrendModel::fit(&short).unwrap().is_seasonal());

        let mut long = linear(24, 0.0, 10.0);
        for point in long.iter_mut().filter(|p| p.month.month == 12) {
            point.balance += 1_000.0;
        }
        let model = TrendModel::fit(&long).unwrap();
        assert!(model.is_seasonal());
        let dec = model.predict(YearMonth::new(2024, 12));
        let nov = model.predict(YearMonth::new(2024, 11));
        assert!(dec.yhat - nov.yhat > 500.0);
    }

    #[test]
    fn insufficient_history() {
        let history = linear(1, 5.0, 0.0);
        assert_eq!(
            forecast(&history, 3),
            Err(ForecastError::InsufficientHistory { needed: 2, found: 1 })
        );
    }

    #[test]
    fn floored_clamps_negatives() {
        let point = ForecastPoint {
            month: YearMonth::new(2024, 1),
            yhat: -5.0,
            lower: -10.0,
            upper: 3.0,
        };
        let floored = point.floored();
        assert_eq!((floored.yhat, floored.lower, floored.upper), (0.0, 0.0, 3.0));
    }
}
