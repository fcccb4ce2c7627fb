use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for marketplace participants (buyers and sellers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which side of the marketplace a participant acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartySide {
    Buyer,
    Seller,
}

impl PartySide {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Buyer => "Buyer",
            Self::Seller => "Seller",
        }
    }
}

/// Inclusive dollar range used for budgets and revenue brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u64,
    pub max: u64,
}

impl BudgetRange {
    pub const fn contains(&self, amount: u64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// What a buyer is shopping for. Absent fields never match during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AcquisitionPreferences {
    pub industries: Vec<String>,
    pub budget_range: Option<BudgetRange>,
    pub revenue_range: Option<BudgetRange>,
    pub geographic_focus: Vec<String>,
    pub timeline: Option<String>,
    pub acquisition_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub name: String,
    pub industry: String,
    pub size: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerProfile {
    pub id: ParticipantId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: CompanySummary,
    pub preferences: AcquisitionPreferences,
    pub location: Location,
    pub previous_acquisitions: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub name: String,
    pub industry: String,
    pub year_established: u16,
    pub employees: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    pub annual_revenue: u64,
    pub ebitda: Option<i64>,
    pub assets: u64,
    pub asking_price: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerProfile {
    pub id: ParticipantId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub business: BusinessSummary,
    pub financials: Financials,
    pub location: Location,
    pub selling_reason: String,
    pub timeline: String,
    pub key_assets: Vec<String>,
}

impl SellerProfile {
    /// Snapshot of the facts the compatibility scorer consumes. The profile
    /// itself is never mutated by scoring.
    pub fn listing(&self) -> BusinessListing {
        BusinessListing {
            industry: self.business.industry.clone(),
            annual_revenue: self.financials.annual_revenue,
            location: Some(self.location.clone()),
            timeline: Some(self.timeline.clone()),
        }
    }
}

/// Seller-side scoring input. Optional fields score as non-matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessListing {
    pub industry: String,
    pub annual_revenue: u64,
    pub location: Option<Location>,
    pub timeline: Option<String>,
}

/// Criteria buyers apply while browsing seller listings. Empty collections
/// and `None` fields place no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFilter {
    pub industries: Vec<String>,
    pub asking_price: Option<BudgetRange>,
    pub locations: Vec<String>,
    pub timeline: Option<String>,
}

impl ListingFilter {
    fn matches(&self, seller: &SellerProfile) -> bool {
        if !self.industries.is_empty() && !self.industries.contains(&seller.business.industry) {
            return false;
        }

        if let Some(range) = &self.asking_price {
            match seller.financials.asking_price {
                Some(price) if range.contains(price) => {}
                _ => return false,
            }
        }

        if !self.locations.is_empty()
            && !self
                .locations
                .iter()
                .any(|entry| *entry == seller.location.state || *entry == seller.location.country)
        {
            return false;
        }

        if let Some(timeline) = &self.timeline {
            if *timeline != seller.timeline {
                return false;
            }
        }

        true
    }
}

/// Read-only reference data for both sides of the marketplace.
#[derive(Debug, Default, Clone)]
pub struct ProfileDirectory {
    buyers: Vec<BuyerProfile>,
    sellers: Vec<SellerProfile>,
}

impl ProfileDirectory {
    pub fn new(buyers: Vec<BuyerProfile>, sellers: Vec<SellerProfile>) -> Self {
        Self { buyers, sellers }
    }

    pub fn add_buyer(&mut self, profile: BuyerProfile) {
        self.buyers.push(profile);
    }

    pub fn add_seller(&mut self, profile: SellerProfile) {
        self.sellers.push(profile);
    }

    /// Replace a buyer record by id. Returns false when no record matched.
    pub fn replace_buyer(&mut self, profile: BuyerProfile) -> bool {
        match self.buyers.iter_mut().find(|buyer| buyer.id == profile.id) {
            Some(slot) => {
                *slot = profile;
                true
            }
            None => false,
        }
    }

    /// Replace a seller record by id. Returns false when no record matched.
    pub fn replace_seller(&mut self, profile: SellerProfile) -> bool {
        match self
            .sellers
            .iter_mut()
            .find(|seller| seller.id == profile.id)
        {
            Some(slot) => {
                *slot = profile;
                true
            }
            None => false,
        }
    }

    pub fn buyer(&self, id: &ParticipantId) -> Option<&BuyerProfile> {
        self.buyers.iter().find(|buyer| &buyer.id == id)
    }

    pub fn seller(&self, id: &ParticipantId) -> Option<&SellerProfile> {
        self.sellers.iter().find(|seller| &seller.id == id)
    }

    pub fn buyers(&self) -> &[BuyerProfile] {
        &self.buyers
    }

    pub fn sellers(&self) -> &[SellerProfile] {
        &self.sellers
    }

    pub fn filter_sellers(&self, filter: &ListingFilter) -> Vec<&SellerProfile> {
        self.sellers
            .iter()
            .filter(|seller| filter.matches(seller))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(id: &str, industry: &str, state: &str, asking_price: Option<u64>) -> SellerProfile {
        SellerProfile {
            id: ParticipantId(id.to_string()),
            email: format!("{id}@example.com"),
            first_name: "Sample".to_string(),
            last_name: "Seller".to_string(),
            business: BusinessSummary {
                name: format!("{id} Co"),
                industry: industry.to_string(),
                year_established: 2015,
                employees: 40,
                description: "Sample business".to_string(),
            },
            financials: Financials {
                annual_revenue: 4_000_000,
                ebitda: Some(900_000),
                assets: 2_000_000,
                asking_price,
            },
            location: Location {
                city: "Austin".to_string(),
                state: state.to_string(),
                country: "United States".to_string(),
            },
            selling_reason: "Succession planning".to_string(),
            timeline: "3-6 months".to_string(),
            key_assets: vec!["Recurring revenue".to_string()],
        }
    }

    #[test]
    fn empty_filter_returns_every_seller() {
        let directory = ProfileDirectory::new(
            Vec::new(),
            vec![
                seller("seller-1", "Technology", "Texas", Some(12_000_000)),
                seller("seller-2", "Healthcare", "Massachusetts", None),
            ],
        );

        let listed = directory.filter_sellers(&ListingFilter::default());
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn filter_constrains_industry_budget_and_location() {
        let directory = ProfileDirectory::new(
            Vec::new(),
            vec![
                seller("seller-1", "Technology", "Texas", Some(12_000_000)),
                seller("seller-2", "Technology", "Texas", Some(80_000_000)),
                seller("seller-3", "Healthcare", "Texas", Some(9_000_000)),
                seller("seller-4", "Technology", "Ohio", None),
            ],
        );

        let filter = ListingFilter {
            industries: vec!["Technology".to_string()],
            asking_price: Some(BudgetRange {
                min: 5_000_000,
                max: 50_000_000,
            }),
            locations: vec!["Texas".to_string()],
            timeline: None,
        };

        let listed = directory.filter_sellers(&filter);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.0, "seller-1");
    }

    #[test]
    fn country_entries_match_geographic_filters() {
        let directory = ProfileDirectory::new(
            Vec::new(),
            vec![seller("seller-1", "Retail", "Oregon", Some(2_000_000))],
        );

        let filter = ListingFilter {
            locations: vec!["United States".to_string()],
            ..ListingFilter::default()
        };

        assert_eq!(directory.filter_sellers(&filter).len(), 1);
    }

    #[test]
    fn replace_seller_reports_unknown_ids() {
        let mut directory = ProfileDirectory::default();
        let replaced = directory.replace_seller(seller("ghost", "Retail", "Oregon", None));
        assert!(!replaced);
    }
}
