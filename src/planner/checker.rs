use std::fmt;

use crate::models::{Nutrient, RequirementProfile, Totals};

/// What a violated requirement constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Nutrient(Nutrient),
    Price,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Nutrient(n) => write!(f, "{}", n),
            Subject::Price => f.write_str("Budget"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    BelowFloor,
    AboveCeiling,
}

/// One unmet requirement with the limit and the actual value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
    pub subject: Subject,
    pub direction: Direction,
    pub limit: f64,
    pub actual: f64,
}

impl Violation {
    /// Distance to the limit: floor − actual, or actual − ceiling.
    pub fn gap(&self) -> f64 {
        match self.direction {
            Direction::BelowFloor => self.limit - self.actual,
            Direction::AboveCeiling => self.actual - self.limit,
        }
    }

    /// Human-readable description, e.g. "Protein below floor by 16.0 g".
    pub fn describe(&self) -> String {
        let unit = match self.subject {
            Subject::Nutrient(n) => n.unit(),
            Subject::Price => "USD",
        };
        let side = match self.direction {
            Direction::BelowFloor => "below floor",
            Direction::AboveCeiling => "above ceiling",
        };
        format!("{} {} by {:.1} {}", self.subject, side, self.gap(), unit)
    }
}

/// Outcome of checking totals against a profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verdict {
    violations: Vec<Violation>,
}

impl Verdict {
    /// True iff nothing was violated.
    pub fn meets(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in evaluation order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Shortfall of a floor nutrient, if it is below its floor.
    pub fn deficit(&self, nutrient: Nutrient) -> Option<f64> {
        self.violations
            .iter()
            .find(|v| {
                v.subject == Subject::Nutrient(nutrient) && v.direction == Direction::BelowFloor
            })
            .map(Violation::gap)
    }
}

/// Check totals against every floor, then sodium, then the budget.
///
/// Floors pass with `>=`, ceilings with `<=`; boundary values satisfy.
pub fn check(totals: &Totals, profile: &RequirementProfile) -> Verdict {
    let mut violations = Vec::new();

    for nutrient in Nutrient::FLOOR_ORDER {
        let floor = profile.floor(nutrient).unwrap_or_default();
        let actual = totals.get(nutrient);
        if !(actual >= floor) {
            violations.push(Violation {
                subject: Subject::Nutrient(nutrient),
                direction: Direction::BelowFloor,
                limit: floor,
                actual,
            });
        }
    }

    let sodium = totals.get(Nutrient::Sodium);
    if !(sodium <= profile.sodium_max) {
        violations.push(Violation {
            subject: Subject::Nutrient(Nutrient::Sodium),
            direction: Direction::AboveCeiling,
            limit: profile.sodium_max,
            actual: sodium,
        });
    }

    if !(totals.price <= profile.price_limit) {
        violations.push(Violation {
            subject: Subject::Price,
            direction: Direction::AboveCeiling,
            limit: profile.price_limit,
            actual: totals.price,
        });
    }

    Verdict { violations }
}
