pub mod acquisition;
pub mod matching;
pub mod onboarding;
pub mod profiles;
