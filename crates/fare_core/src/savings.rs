//! Savings tracker: synthetic savings per comparison, fun facts, badges and
//! comparison milestones.

use serde::Serialize;

use crate::counters::CounterSnapshot;
use crate::offers::RideOffer;

/// Total savings at which the Super Saver badge unlocks.
pub const SUPER_SAVER_THRESHOLD: u64 = 500;
/// Price of a cup of chai in currency units.
pub const CHAI_PRICE: u64 = 50;
/// Price of a movie ticket in currency units.
pub const MOVIE_TICKET_PRICE: u64 = 200;
/// Minutes saved per compared ride.
pub const MINUTES_SAVED_PER_RIDE: u64 = 2;
/// Months used for the yearly projection.
pub const PROJECTION_MONTHS: u64 = 12;
/// Every this many comparisons is a milestone (after the 10th).
pub const MILESTONE_INTERVAL: u64 = 50;

/// Amount a rider saves by picking the cheapest offer instead of an average
/// one: mean fare minus cheapest fare, rounded. Zero for an empty set.
pub fn comparison_savings(offers: &[RideOffer]) -> u64 {
    let Some(cheapest) = offers.iter().map(|offer| offer.fare).min() else {
        return 0;
    };
    let total: u64 = offers.iter().map(|offer| u64::from(offer.fare)).sum();
    let mean = total as f64 / offers.len() as f64;
    (mean - f64::from(cheapest)).round().max(0.0) as u64
}

/// Celebration reached by the n-th comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Milestone {
    FirstComparison,
    TenComparisons,
    Multiple(u64),
}

impl Milestone {
    /// Milestone reached when the comparison count becomes `count`.
    pub fn for_count(count: u64) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::FirstComparison),
            10 => Some(Self::TenComparisons),
            n if n % MILESTONE_INTERVAL == 0 => Some(Self::Multiple(n)),
            _ => None,
        }
    }

    pub fn title(self) -> String {
        match self {
            Self::FirstComparison => "Welcome Aboard!".to_string(),
            Self::TenComparisons => "10 Comparisons!".to_string(),
            Self::Multiple(n) => format!("{n} Comparisons Milestone!"),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::FirstComparison => "You've made your first comparison! Keep saving smart!",
            Self::TenComparisons => "You're becoming a smart rider! Keep it up!",
            Self::Multiple(_) => "You're a comparison pro! Amazing!",
        }
    }
}

/// Read-only view of the counters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavingsSummary {
    pub total_savings: u64,
    pub rides_compared: u64,
}

impl From<CounterSnapshot> for SavingsSummary {
    fn from(snapshot: CounterSnapshot) -> Self {
        Self {
            total_savings: snapshot.total_savings,
            rides_compared: snapshot.rides_compared,
        }
    }
}

impl SavingsSummary {
    /// Nothing compared and nothing saved yet.
    pub fn is_fresh(&self) -> bool {
        self.total_savings == 0 && self.rides_compared == 0
    }

    pub fn has_super_saver_badge(&self) -> bool {
        self.total_savings >= SUPER_SAVER_THRESHOLD
    }

    pub fn fun_facts(&self) -> Vec<String> {
        let savings = self.total_savings;
        vec![
            format!(
                "With ₹{savings}, you could buy {} cups of chai!",
                savings / CHAI_PRICE
            ),
            format!(
                "You've compared {} rides. That's {} minutes saved!",
                self.rides_compared,
                self.rides_compared.saturating_mul(MINUTES_SAVED_PER_RIDE)
            ),
            format!(
                "Your savings could pay for {} movie tickets!",
                savings / MOVIE_TICKET_PRICE
            ),
            format!(
                "Keep going! You're on track to save ₹{} this year!",
                group_thousands(savings.saturating_mul(PROJECTION_MONTHS))
            ),
        ]
    }

    /// Fact shown at rotation step `step`, cycling through [`Self::fun_facts`].
    pub fn fact_at(&self, step: usize) -> String {
        let facts = self.fun_facts();
        let index = step % facts.len();
        facts.into_iter().nth(index).unwrap_or_default()
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
