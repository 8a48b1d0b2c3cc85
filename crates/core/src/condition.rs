//! Book condition scoring and price suggestion.
//!
//! A seller answers a 15-item checklist (five categories, three yes/no checks
//! each) describing the physical state of a book. Each category contributes a
//! sub-score in [0, 100]; the overall score is a fixed convex combination of
//! the five sub-scores. The overall score maps to a human-readable label and,
//! when a reference market price is supplied, to a suggested resale price.
//!
//! Everything in this module is pure: no I/O, no state, no failure modes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Weight of the pages sub-score in the overall score.
pub const PAGES_WEIGHT: f64 = 0.25;
/// Weight of the binding sub-score in the overall score.
pub const BINDING_WEIGHT: f64 = 0.20;
/// Weight of the cover sub-score in the overall score.
pub const COVER_WEIGHT: f64 = 0.20;
/// Weight of the damage sub-score in the overall score.
pub const DAMAGE_WEIGHT: f64 = 0.25;
/// Weight of the accessories sub-score in the overall score.
pub const ACCESSORIES_WEIGHT: f64 = 0.10;

/// Number of boolean checks in each category.
pub const CHECKS_PER_CATEGORY: u32 = 3;

/// Sub-scores below this threshold trigger an improvement recommendation.
const RECOMMENDATION_THRESHOLD: f64 = 80.0;

/// Overall scores at or above this threshold earn a praise recommendation.
const EXCELLENT_THRESHOLD: f64 = 90.0;

// ---------------------------------------------------------------------------
// Checklist input
// ---------------------------------------------------------------------------

/// Pages category: missing, torn, and dirty pages.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageChecks {
    pub no_missing: bool,
    pub no_torn: bool,
    pub clean: bool,
}

/// Binding category: loose stitching/glue, pages falling out, stability.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingChecks {
    pub no_loose: bool,
    pub no_falling: bool,
    pub stable: bool,
}

/// Cover category: detachment, cleanliness, scratches.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverChecks {
    pub no_detachment: bool,
    pub clean: bool,
    pub no_scratches: bool,
}

/// Damage category: burn/stain marks, odor, insect traces.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageChecks {
    pub no_burns: bool,
    pub no_smell: bool,
    pub no_insects: bool,
}

/// Accessories category: included extras (CD, access code), internal content.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessoryChecks {
    pub complete: bool,
    pub content: bool,
    pub extras: bool,
}

/// The full 15-item condition checklist.
///
/// Every field defaults to `false` during deserialization: an unanswered
/// question never raises the score. Absence of evidence lowers the score, it
/// does not skip the check.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionChecklist {
    pub pages: PageChecks,
    pub binding: BindingChecks,
    pub cover: CoverChecks,
    pub damage: DamageChecks,
    pub accessories: AccessoryChecks,
}

impl PageChecks {
    pub fn passed(&self) -> u32 {
        u32::from(self.no_missing) + u32::from(self.no_torn) + u32::from(self.clean)
    }
}

impl BindingChecks {
    pub fn passed(&self) -> u32 {
        u32::from(self.no_loose) + u32::from(self.no_falling) + u32::from(self.stable)
    }
}

impl CoverChecks {
    pub fn passed(&self) -> u32 {
        u32::from(self.no_detachment) + u32::from(self.clean) + u32::from(self.no_scratches)
    }
}

impl DamageChecks {
    pub fn passed(&self) -> u32 {
        u32::from(self.no_burns) + u32::from(self.no_smell) + u32::from(self.no_insects)
    }
}

impl AccessoryChecks {
    pub fn passed(&self) -> u32 {
        u32::from(self.complete) + u32::from(self.content) + u32::from(self.extras)
    }
}

/// Score of a single category: the fraction of passed checks, as a percentage.
fn category_score(checks_passed: u32) -> f64 {
    f64::from(checks_passed) / f64::from(CHECKS_PER_CATEGORY) * 100.0
}

// ---------------------------------------------------------------------------
// Condition label
// ---------------------------------------------------------------------------

/// Human-readable condition tier derived from the overall score.
///
/// The same five thresholds drive both the display label and the price
/// multiplier, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionLabel {
    LikeNew,
    VeryGood,
    Good,
    Acceptable,
    Worn,
}

impl ConditionLabel {
    /// Map an overall score to its tier. First match wins, highest first.
    pub fn from_score(overall_score: f64) -> Self {
        if overall_score >= 95.0 {
            Self::LikeNew
        } else if overall_score >= 85.0 {
            Self::VeryGood
        } else if overall_score >= 70.0 {
            Self::Good
        } else if overall_score >= 50.0 {
            Self::Acceptable
        } else {
            Self::Worn
        }
    }

    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LikeNew => "Like new",
            Self::VeryGood => "Very good condition",
            Self::Good => "Good condition",
            Self::Acceptable => "Acceptable condition",
            Self::Worn => "Worn",
        }
    }

    /// Fraction of the market price this tier commands.
    pub fn price_multiplier(self) -> f64 {
        match self {
            Self::LikeNew => 1.00,
            Self::VeryGood => 0.85,
            Self::Good => 0.70,
            Self::Acceptable => 0.50,
            Self::Worn => 0.35,
        }
    }
}

impl std::fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Score breakdown
// ---------------------------------------------------------------------------

/// The result of evaluating a [`ConditionChecklist`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    pub page_score: f64,
    pub binding_score: f64,
    pub cover_score: f64,
    pub damage_score: f64,
    pub accessories_score: f64,
    /// Convex combination of the five sub-scores; always in [0, 100].
    pub overall_score: f64,
    pub label: ConditionLabel,
}

/// Compute the five sub-scores, the weighted overall score, and the label.
///
/// Deterministic and total: every checklist yields a valid result.
pub fn compute_scores(checklist: &ConditionChecklist) -> ScoreBreakdown {
    let page_score = category_score(checklist.pages.passed());
    let binding_score = category_score(checklist.binding.passed());
    let cover_score = category_score(checklist.cover.passed());
    let damage_score = category_score(checklist.damage.passed());
    let accessories_score = category_score(checklist.accessories.passed());

    let overall_score = page_score * PAGES_WEIGHT
        + binding_score * BINDING_WEIGHT
        + cover_score * COVER_WEIGHT
        + damage_score * DAMAGE_WEIGHT
        + accessories_score * ACCESSORIES_WEIGHT;

    ScoreBreakdown {
        page_score,
        binding_score,
        cover_score,
        damage_score,
        accessories_score,
        overall_score,
        label: ConditionLabel::from_score(overall_score),
    }
}

// ---------------------------------------------------------------------------
// Price suggestion
// ---------------------------------------------------------------------------

/// Suggest a resale price from the overall score and a reference market price.
///
/// Returns `None` when `market_price` is absent or non-positive; this is a
/// normal outcome, not an error. The result is rounded to 2 decimal places.
pub fn suggest_price(overall_score: f64, market_price: Option<f64>) -> Option<f64> {
    let market_price = market_price.filter(|p| *p > 0.0)?;
    let multiplier = ConditionLabel::from_score(overall_score).price_multiplier();
    Some(round_price(market_price * multiplier))
}

/// Round a price to 2 decimal places.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Summary recommendations
// ---------------------------------------------------------------------------

/// Generate short improvement recommendations for the summary view.
pub fn recommendations(breakdown: &ScoreBreakdown, has_photos: bool) -> Vec<&'static str> {
    let mut out = Vec::new();
    if breakdown.page_score < RECOMMENDATION_THRESHOLD {
        out.push("Pages show signs of wear");
    }
    if breakdown.binding_score < RECOMMENDATION_THRESHOLD {
        out.push("The binding needs attention");
    }
    if breakdown.cover_score < RECOMMENDATION_THRESHOLD {
        out.push("The cover has imperfections");
    }
    if !has_photos {
        out.push("Add photos to increase your chances of selling");
    }
    if breakdown.overall_score >= EXCELLENT_THRESHOLD {
        out.push("Excellent condition, this book will sell quickly");
    }
    out
}

/// One-line explanation of how the condition affected the suggested price.
pub fn price_impact(market_price: Option<f64>, suggested_price: Option<f64>) -> String {
    match (market_price, suggested_price) {
        (Some(market), Some(suggested)) if market > 0.0 => {
            let reduction = (market - suggested) / market * 100.0;
            format!("Price reduced by {reduction:.0}% based on condition")
        }
        _ => "Price based on overall condition".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
