use crate::marketplace::profiles::{AcquisitionPreferences, BusinessListing};
use serde::{Deserialize, Serialize};

pub const INDUSTRY_POINTS: u8 = 30;
pub const BUDGET_POINTS: u8 = 25;
pub const GEOGRAPHY_POINTS: u8 = 20;
pub const SIZE_COMPATIBILITY_POINTS: u8 = 15;
pub const TIMELINE_POINTS: u8 = 10;
pub const MAX_SCORE: u8 = 100;

/// Factors contributing to a buyer/seller compatibility estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    IndustryAlignment,
    BudgetFit,
    GeographicFit,
    SizeCompatibility,
    TimelineAlignment,
}

impl MatchFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::IndustryAlignment => "Industry Alignment",
            Self::BudgetFit => "Budget Fit",
            Self::GeographicFit => "Geographic Fit",
            Self::SizeCompatibility => "Size Compatibility",
            Self::TimelineAlignment => "Timeline Alignment",
        }
    }
}

/// Discrete contribution to a compatibility score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: u8,
    pub notes: String,
}

/// Composite 0-100 estimate of buyer/seller fit with its component trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

/// Additive point allocation over independent checks. Absent fields score
/// zero rather than failing, and the total is capped at [`MAX_SCORE`].
pub fn compatibility_score(
    preferences: &AcquisitionPreferences,
    listing: &BusinessListing,
) -> CompatibilityScore {
    let mut components = Vec::with_capacity(5);
    let mut total: u16 = 0;

    if preferences.industries.contains(&listing.industry) {
        total += u16::from(INDUSTRY_POINTS);
        components.push(ScoreComponent {
            factor: MatchFactor::IndustryAlignment,
            points: INDUSTRY_POINTS,
            notes: format!("{} is a target industry", listing.industry),
        });
    } else {
        components.push(ScoreComponent {
            factor: MatchFactor::IndustryAlignment,
            points: 0,
            notes: format!("{} is outside the target industries", listing.industry),
        });
    }

    match &preferences.budget_range {
        Some(range) if range.contains(listing.annual_revenue) => {
            total += u16::from(BUDGET_POINTS);
            components.push(ScoreComponent {
                factor: MatchFactor::BudgetFit,
                points: BUDGET_POINTS,
                notes: format!(
                    "annual revenue {} within budget {}-{}",
                    listing.annual_revenue, range.min, range.max
                ),
            });
        }
        Some(range) => {
            components.push(ScoreComponent {
                factor: MatchFactor::BudgetFit,
                points: 0,
                notes: format!(
                    "annual revenue {} outside budget {}-{}",
                    listing.annual_revenue, range.min, range.max
                ),
            });
        }
        None => {
            components.push(ScoreComponent {
                factor: MatchFactor::BudgetFit,
                points: 0,
                notes: "no budget range declared".to_string(),
            });
        }
    }

    let geographic_hit = listing.location.as_ref().is_some_and(|location| {
        preferences
            .geographic_focus
            .iter()
            .any(|entry| *entry == location.state || *entry == location.country)
    });
    if geographic_hit {
        total += u16::from(GEOGRAPHY_POINTS);
        components.push(ScoreComponent {
            factor: MatchFactor::GeographicFit,
            points: GEOGRAPHY_POINTS,
            notes: "business located within the geographic focus".to_string(),
        });
    } else {
        components.push(ScoreComponent {
            factor: MatchFactor::GeographicFit,
            points: 0,
            notes: "business located outside the geographic focus".to_string(),
        });
    }

    // Size compatibility is not modeled yet; every pairing earns the base award.
    total += u16::from(SIZE_COMPATIBILITY_POINTS);
    components.push(ScoreComponent {
        factor: MatchFactor::SizeCompatibility,
        points: SIZE_COMPATIBILITY_POINTS,
        notes: "base size compatibility".to_string(),
    });

    let timeline_hit = match (&preferences.timeline, &listing.timeline) {
        (Some(wanted), Some(offered)) => wanted == offered,
        _ => false,
    };
    if timeline_hit {
        total += u16::from(TIMELINE_POINTS);
        components.push(ScoreComponent {
            factor: MatchFactor::TimelineAlignment,
            points: TIMELINE_POINTS,
            notes: "timelines align exactly".to_string(),
        });
    } else {
        components.push(ScoreComponent {
            factor: MatchFactor::TimelineAlignment,
            points: 0,
            notes: "timelines differ or are undeclared".to_string(),
        });
    }

    // Components sum to at most 100 today; the cap guards future factors.
    let total = total.min(u16::from(MAX_SCORE)) as u8;

    CompatibilityScore { total, components }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::profiles::{BudgetRange, Location};

    fn tech_buyer_preferences() -> AcquisitionPreferences {
        AcquisitionPreferences {
            industries: vec!["Technology".to_string(), "Healthcare".to_string()],
            budget_range: Some(BudgetRange {
                min: 5_000_000,
                max: 50_000_000,
            }),
            revenue_range: None,
            geographic_focus: vec!["California".to_string()],
            timeline: Some("3-6 months".to_string()),
            acquisition_types: Vec::new(),
        }
    }

    #[test]
    fn texas_tech_seller_scores_eighty() {
        let listing = BusinessListing {
            industry: "Technology".to_string(),
            annual_revenue: 12_000_000,
            location: Some(Location {
                city: "Austin".to_string(),
                state: "Texas".to_string(),
                country: "United States".to_string(),
            }),
            timeline: Some("3-6 months".to_string()),
        };

        let score = compatibility_score(&tech_buyer_preferences(), &listing);
        assert_eq!(score.total, 80);
        assert_eq!(score.components.len(), 5);
    }

    #[test]
    fn california_retail_seller_scores_thirty_five() {
        let listing = BusinessListing {
            industry: "Retail".to_string(),
            annual_revenue: 100_000_000,
            location: Some(Location {
                city: "San Diego".to_string(),
                state: "California".to_string(),
                country: "United States".to_string(),
            }),
            timeline: Some("1-3 months".to_string()),
        };

        let score = compatibility_score(&tech_buyer_preferences(), &listing);
        assert_eq!(score.total, 35);
    }

    #[test]
    fn country_match_counts_toward_geography() {
        let mut preferences = tech_buyer_preferences();
        preferences.geographic_focus = vec!["United States".to_string()];

        let listing = BusinessListing {
            industry: "Finance".to_string(),
            annual_revenue: 1_000,
            location: Some(Location {
                city: "Boise".to_string(),
                state: "Idaho".to_string(),
                country: "United States".to_string(),
            }),
            timeline: None,
        };

        let score = compatibility_score(&preferences, &listing);
        assert_eq!(score.total, 35);
    }

    #[test]
    fn absent_fields_score_as_non_matches() {
        let preferences = AcquisitionPreferences::default();
        let listing = BusinessListing {
            industry: "Technology".to_string(),
            annual_revenue: 12_000_000,
            location: None,
            timeline: None,
        };

        let score = compatibility_score(&preferences, &listing);
        assert_eq!(score.total, SIZE_COMPATIBILITY_POINTS);
    }

    #[test]
    fn scoring_is_pure_and_bounded() {
        let preferences = tech_buyer_preferences();
        let listing = BusinessListing {
            industry: "Technology".to_string(),
            annual_revenue: 12_000_000,
            location: Some(Location {
                city: "Sacramento".to_string(),
                state: "California".to_string(),
                country: "United States".to_string(),
            }),
            timeline: Some("3-6 months".to_string()),
        };

        let first = compatibility_score(&preferences, &listing);
        let second = compatibility_score(&preferences, &listing);
        assert_eq!(first, second);
        assert!(first.total <= MAX_SCORE);
        assert_eq!(first.total, 100);
    }
}
