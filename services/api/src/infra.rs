use chrono::{DateTime, NaiveDate, Utc};
use dealbridge::marketplace::acquisition::{AcquisitionStore, SharedStore};
use dealbridge::marketplace::profiles::{
    AcquisitionPreferences, BudgetRange, BusinessSummary, BuyerProfile, CompanySummary, Financials,
    Location, ParticipantId, SellerProfile,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn shared_store() -> SharedStore {
    Arc::new(Mutex::new(AcquisitionStore::new()))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Deal activity starts at 09:00 UTC on the chosen day.
pub(crate) fn kickoff_timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(9, 0, 0)
        .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).expect("midnight exists"))
        .and_utc()
}

pub(crate) fn sample_buyer() -> BuyerProfile {
    BuyerProfile {
        id: ParticipantId("buyer-1".to_string()),
        email: "sarah.chen@techventures.com".to_string(),
        first_name: "Sarah".to_string(),
        last_name: "Chen".to_string(),
        company: CompanySummary {
            name: "TechVentures Capital".to_string(),
            industry: "Private Equity".to_string(),
            size: "50-100".to_string(),
            description: Some("Growth-stage acquirer focused on B2B software".to_string()),
        },
        preferences: AcquisitionPreferences {
            industries: vec!["Technology".to_string(), "Healthcare".to_string()],
            budget_range: Some(BudgetRange {
                min: 5_000_000,
                max: 50_000_000,
            }),
            revenue_range: Some(BudgetRange {
                min: 2_000_000,
                max: 30_000_000,
            }),
            geographic_focus: vec!["California".to_string(), "Texas".to_string()],
            timeline: Some("3-6 months".to_string()),
            acquisition_types: vec!["Strategic".to_string()],
        },
        location: Location {
            city: "San Francisco".to_string(),
            state: "California".to_string(),
            country: "United States".to_string(),
        },
        previous_acquisitions: 3,
    }
}

pub(crate) fn sample_sellers() -> Vec<SellerProfile> {
    vec![
        SellerProfile {
            id: ParticipantId("seller-1".to_string()),
            email: "david.martinez@innovatetech.com".to_string(),
            first_name: "David".to_string(),
            last_name: "Martinez".to_string(),
            business: BusinessSummary {
                name: "InnovateTech Solutions".to_string(),
                industry: "Technology".to_string(),
                year_established: 2018,
                employees: 25,
                description: "B2B SaaS platform for customer analytics".to_string(),
            },
            financials: Financials {
                annual_revenue: 12_000_000,
                ebitda: Some(1_200_000),
                assets: 2_800_000,
                asking_price: Some(12_000_000),
            },
            location: Location {
                city: "Austin".to_string(),
                state: "Texas".to_string(),
                country: "United States".to_string(),
            },
            selling_reason: "Looking to scale with a strategic partner".to_string(),
            timeline: "3-6 months".to_string(),
            key_assets: vec![
                "Recurring revenue model".to_string(),
                "Proprietary analytics engine".to_string(),
            ],
        },
        SellerProfile {
            id: ParticipantId("seller-2".to_string()),
            email: "maria.lopez@coastalretail.com".to_string(),
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            business: BusinessSummary {
                name: "Coastal Retail Group".to_string(),
                industry: "Retail".to_string(),
                year_established: 2005,
                employees: 140,
                description: "Regional specialty retail chain".to_string(),
            },
            financials: Financials {
                annual_revenue: 100_000_000,
                ebitda: Some(8_500_000),
                assets: 45_000_000,
                asking_price: Some(120_000_000),
            },
            location: Location {
                city: "San Diego".to_string(),
                state: "California".to_string(),
                country: "United States".to_string(),
            },
            selling_reason: "Founder retirement".to_string(),
            timeline: "1-3 months".to_string(),
            key_assets: vec!["Prime storefront leases".to_string()],
        },
    ]
}
