//! Payment breakdown and buy-back tables for the linear model.
//!
//! Payments run over periods T0, T1 and T2: the base price is paid in two
//! halves at T0 and T1, and the difference between valuation and base
//! price in two halves at T1 and T2. Halves are truncated toward zero.

/// Payment split of a valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PaymentBreakdown {
    /// Valuation being paid
    pub valuation: i64,
    /// Base price
    pub base_price: i64,
    /// Base price paid at T0
    pub base_t0: i64,
    /// Base price paid at T1
    pub base_t1: i64,
    /// Valuation minus base price
    pub difference: i64,
    /// Earnout paid at T1
    pub earnout_t1: i64,
    /// Earnout paid at T2
    pub earnout_t2: i64,
}

impl PaymentBreakdown {
    /// Column headers of [`PaymentBreakdown::rows`].
    pub const HEADERS: [&'static str; 4] = ["T0", "T1", "T2", "Total"];

    /// Split `valuation` against `base_price`.
    ///
    /// # Examples
    /// ```
    /// use valuation_engine::linear::PaymentBreakdown;
    ///
    /// let b = PaymentBreakdown::new(1121, 800.0);
    /// assert_eq!((b.base_t0, b.base_t1), (400, 400));
    /// assert_eq!((b.earnout_t1, b.earnout_t2), (160, 160));
    /// assert_eq!(b.totals(), [400, 560, 160]);
    /// ```
    pub fn new(valuation: i64, base_price: f64) -> Self {
        let half = (base_price / 2.0).trunc() as i64;
        let difference = (valuation as f64 - base_price).trunc() as i64;
        let earnout_half = (difference as f64 / 2.0).trunc() as i64;
        Self {
            valuation,
            base_price: base_price.trunc() as i64,
            base_t0: half,
            base_t1: half,
            difference,
            earnout_t1: earnout_half,
            earnout_t2: earnout_half,
        }
    }

    /// Total paid at T0, T1 and T2.
    pub fn totals(&self) -> [i64; 3] {
        [self.base_t0, self.base_t1 + self.earnout_t1, self.earnout_t2]
    }

    /// `Base price`, `Earnout` and `Total` rows over T0, T1, T2 and Total.
    pub fn rows(&self) -> Vec<(&'static str, [i64; 4])> {
        let [t0, t1, t2] = self.totals();
        vec![
            ("Base price", [self.base_t0, self.base_t1, 0, self.base_price]),
            (
                "Earnout",
                [0, self.earnout_t1, self.earnout_t2, self.valuation - self.base_price],
            ),
            ("Total", [t0, t1, t2, self.valuation]),
        ]
    }
}

/// Seller earnings against deal payments over T0..T3.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BuyBackTable {
    /// Earnings per period
    pub earnings: [f64; 4],
    /// Payments per period
    pub payments: [f64; 4],
    /// Earnings minus payments
    pub difference: [f64; 4],
    /// Running earnings
    pub cumulative_earnings: [f64; 4],
    /// Running payments
    pub cumulative_payments: [f64; 4],
    /// Running difference
    pub cumulative_difference: [f64; 4],
}

impl BuyBackTable {
    /// Column headers of [`BuyBackTable::rows`].
    pub const HEADERS: [&'static str; 4] = ["T0", "T1", "T2", "T3"];

    /// Build the table. Earnings are 0 at T0, `ebit` at T1 and
    /// `ebit + seller_income` from T2; nothing is paid at T3.
    pub fn new(ebit: f64, seller_income: f64, breakdown: &PaymentBreakdown) -> Self {
        let steady = ebit + seller_income;
        let earnings = [0.0, ebit, steady, steady];
        let [t0, t1, t2] = breakdown.totals();
        let payments = [t0 as f64, t1 as f64, t2 as f64, 0.0];
        let difference: [f64; 4] = std::array::from_fn(|i| earnings[i] - payments[i]);

        Self {
            earnings,
            payments,
            difference,
            cumulative_earnings: cumulative(&earnings),
            cumulative_payments: cumulative(&payments),
            cumulative_difference: cumulative(&difference),
        }
    }

    /// Labelled rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, [f64; 4])> {
        vec![
            ("Earnings", self.earnings),
            ("Payments", self.payments),
            ("Difference", self.difference),
            ("Cumulative Earnings", self.cumulative_earnings),
            ("Cumulative Payments", self.cumulative_payments),
            ("Cumulative Difference", self.cumulative_difference),
        ]
    }

    /// Cumulative difference at T3: positive once earnings repay the deal.
    pub fn final_position(&self) -> f64 {
        self.cumulative_difference[3]
    }
}

fn cumulative(values: &[f64; 4]) -> [f64; 4] {
    let mut out = [0.0; 4];
    let mut running = 0.0;
    for (slot, v) in out.iter_mut().zip(values) {
        running += v;
        *slot = running;
    }
    out
}
