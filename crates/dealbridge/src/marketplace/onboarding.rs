use crate::marketplace::profiles::{AcquisitionPreferences, Financials};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error enumeration for onboarding navigation and payload validation.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: u64, max: u64 },
    #[error("year established {0} is implausible")]
    ImplausibleYear(u16),
    #[error("step {step} is outside 1..={total}")]
    StepOutOfRange { step: u32, total: u32 },
}

/// Per-step onboarding form data as a tagged union. Each variant is
/// validated at construction via [`OnboardingPayload::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnboardingPayload {
    BuyerCompany {
        name: String,
        industry: String,
        size: String,
    },
    BuyerPreferences {
        preferences: AcquisitionPreferences,
    },
    SellerBusiness {
        name: String,
        industry: String,
        year_established: u16,
        employees: u32,
        description: String,
    },
    SellerFinancials {
        financials: Financials,
    },
    Review {
        confirmed: bool,
    },
}

impl OnboardingPayload {
    pub fn validate(&self) -> Result<(), OnboardingError> {
        match self {
            OnboardingPayload::BuyerCompany { name, .. } => {
                if name.trim().is_empty() {
                    return Err(OnboardingError::EmptyName);
                }
                Ok(())
            }
            OnboardingPayload::BuyerPreferences { preferences } => {
                for range in [&preferences.budget_range, &preferences.revenue_range]
                    .into_iter()
                    .flatten()
                {
                    if range.min > range.max {
                        return Err(OnboardingError::InvertedRange {
                            min: range.min,
                            max: range.max,
                        });
                    }
                }
                Ok(())
            }
            OnboardingPayload::SellerBusiness {
                name,
                year_established,
                ..
            } => {
                if name.trim().is_empty() {
                    return Err(OnboardingError::EmptyName);
                }
                if !(1800..=2100).contains(year_established) {
                    return Err(OnboardingError::ImplausibleYear(*year_established));
                }
                Ok(())
            }
            OnboardingPayload::SellerFinancials { .. } | OnboardingPayload::Review { .. } => Ok(()),
        }
    }
}

pub const DEFAULT_ONBOARDING_STEPS: u32 = 5;

/// Guided signup flow with a 1-based step cursor clamped to its bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingFlow {
    current_step: u32,
    total_steps: u32,
    complete: bool,
    payloads: BTreeMap<u32, OnboardingPayload>,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new(DEFAULT_ONBOARDING_STEPS)
    }
}

impl OnboardingFlow {
    pub fn new(total_steps: u32) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
            complete: false,
            payloads: BTreeMap::new(),
        }
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn payload(&self, step: u32) -> Option<&OnboardingPayload> {
        self.payloads.get(&step)
    }

    /// Advance the cursor, saturating at the last step.
    pub fn next(&mut self) {
        if self.current_step < self.total_steps {
            self.current_step += 1;
        }
    }

    /// Move the cursor back, saturating at the first step.
    pub fn previous(&mut self) {
        if self.current_step > 1 {
            self.current_step -= 1;
        }
    }

    pub fn jump(&mut self, step: u32) -> Result<(), OnboardingError> {
        if step == 0 || step > self.total_steps {
            return Err(OnboardingError::StepOutOfRange {
                step,
                total: self.total_steps,
            });
        }
        self.current_step = step;
        Ok(())
    }

    /// Validate and store form data for a step, replacing earlier input.
    pub fn record(&mut self, step: u32, payload: OnboardingPayload) -> Result<(), OnboardingError> {
        if step == 0 || step > self.total_steps {
            return Err(OnboardingError::StepOutOfRange {
                step,
                total: self.total_steps,
            });
        }
        payload.validate()?;
        self.payloads.insert(step, payload);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.complete = true;
        self.current_step = self.total_steps;
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
        self.complete = false;
        self.payloads.clear();
    }
}
