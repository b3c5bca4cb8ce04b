use serde::{Deserialize, Serialize};

use super::aggregation::RowAggregate;

/// Maturity tier for one classified row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Critical,
    Weakness,
    Neutral,
    Strength,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Critical => "critical",
            Tier::Weakness => "weakness",
            Tier::Neutral => "neutral",
            Tier::Strength => "strength",
        }
    }
}

const DEFAULT_CRITICAL_MAX: f64 = 1.0;
const DEFAULT_WEAKNESS_MAX: f64 = 2.0;
const DEFAULT_STRENGTH_MIN: f64 = 3.0;

/// Threshold bands shared by every classification call site.
///
/// The banding is canonical: critical owns its upper boundary (a rating of
/// exactly `critical_max` is critical), strength owns its lower boundary,
/// and weakness is the open interval between `critical_max` and
/// `weakness_max`. Ratings in `[weakness_max, strength_min)` sit in the
/// neutral band and are not flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationBands {
    pub critical_max: f64,
    pub weakness_max: f64,
    pub strength_min: f64,
}

impl ClassificationBands {
    pub fn new(critical_max: f64, weakness_max: f64, strength_min: f64) -> Self {
        let candidate = Self {
            critical_max,
            weakness_max,
            strength_min,
        };
        if candidate.is_well_formed() {
            candidate
        } else {
            Self::default()
        }
    }

    fn is_well_formed(&self) -> bool {
        self.critical_max.is_finite()
            && self.weakness_max.is_finite()
            && self.strength_min.is_finite()
            && self.critical_max < self.weakness_max
            && self.weakness_max <= self.strength_min
    }

    /// Return these bands if they are usable, the defaults otherwise.
    pub fn normalized(self) -> Self {
        if self.is_well_formed() {
            self
        } else {
            Self::default()
        }
    }

    pub fn classify(&self, rating: f64) -> Tier {
        if rating <= self.critical_max {
            Tier::Critical
        } else if rating < self.weakness_max {
            Tier::Weakness
        } else if rating < self.strength_min {
            Tier::Neutral
        } else {
            Tier::Strength
        }
    }
}

impl Default for ClassificationBands {
    fn default() -> Self {
        Self {
            critical_max: DEFAULT_CRITICAL_MAX,
            weakness_max: DEFAULT_WEAKNESS_MAX,
            strength_min: DEFAULT_STRENGTH_MIN,
        }
    }
}

/// One row placed into a tier; rows with no rating are never classified.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    pub process: String,
    pub activity: String,
    pub rating: f64,
    pub tier: Tier,
    pub notes: Vec<String>,
}

/// The three flagged buckets. Neutral rows appear in none of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierBuckets {
    pub strengths: Vec<ClassifiedRow>,
    pub weaknesses: Vec<ClassifiedRow>,
    pub critical: Vec<ClassifiedRow>,
}

impl TierBuckets {
    /// Bucket every rated row. A row whose rating is `None` (fully
    /// not-applicable) belongs to no bucket; it must not fall into critical
    /// through a null-as-zero coercion.
    pub fn from_rows(rows: &[RowAggregate], bands: &ClassificationBands) -> Self {
        let mut buckets = Self::default();

        for row in rows {
            let Some(rating) = row.rating else {
                continue;
            };

            let classified = ClassifiedRow {
                process: row.process.clone(),
                activity: row.activity.clone(),
                rating,
                tier: bands.classify(rating),
                notes: row.notes.clone(),
            };

            match classified.tier {
                Tier::Critical => buckets.critical.push(classified),
                Tier::Weakness => buckets.weaknesses.push(classified),
                Tier::Strength => buckets.strengths.push(classified),
                Tier::Neutral => {}
            }
        }

        // Canonical ordering: process name, then rating ascending for the
        // problem buckets and descending for strengths; stable sort keeps
        // insertion order on full ties.
        buckets.critical.sort_by(|a, b| {
            a.process
                .cmp(&b.process)
                .then(a.rating.total_cmp(&b.rating))
        });
        buckets.weaknesses.sort_by(|a, b| {
            a.process
                .cmp(&b.process)
                .then(a.rating.total_cmp(&b.rating))
        });
        buckets.strengths.sort_by(|a, b| {
            a.process
                .cmp(&b.process)
                .then(b.rating.total_cmp(&a.rating))
        });

        buckets
    }
}
