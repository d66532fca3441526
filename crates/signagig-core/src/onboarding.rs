//! Five-step creator onboarding wizard.
//!
//! The wizard is a plain value: each [`WizardAction`] consumes the current
//! state and returns the next one, so the step gating can be exercised
//! without any rendering layer.

use serde::{Deserialize, Serialize};

use crate::fields::join_field;
use crate::profiles::NewCreatorProfile;
use crate::CoreError;

pub const NICHES: &[&str] = &[
    "Fashion & Style",
    "Beauty & Skincare",
    "Fitness & Health",
    "Technology",
    "Gaming",
    "Food & Cooking",
    "Travel",
    "Lifestyle",
    "Business & Finance",
    "Education",
    "Entertainment",
    "Home & Garden",
    "Parenting",
    "Sports",
];

pub const PLATFORMS: &[&str] = &[
    "Instagram",
    "TikTok",
    "YouTube",
    "Twitter/X",
    "LinkedIn",
    "Pinterest",
    "Snapchat",
    "Twitch",
];

pub const COUNTRIES: &[&str] = &[
    "United States",
    "Canada",
    "United Kingdom",
    "Australia",
    "Germany",
    "France",
    "Spain",
    "Italy",
    "Netherlands",
    "Brazil",
    "Mexico",
    "India",
    "Nigeria",
    "South Africa",
    "Other",
];

pub const AUDIENCE_SIZES: &[&str] = &[
    "< 1K followers",
    "1K - 10K followers",
    "10K - 50K followers",
    "50K - 100K followers",
    "100K - 500K followers",
    "500K - 1M followers",
    "1M+ followers",
];

pub const AFFILIATE_PLATFORMS: &[&str] = &[
    "Amazon Associates",
    "ClickBank",
    "ShareASale",
    "CJ Affiliate",
    "Impact",
    "Digistore24",
    "PartnerStack",
    "Rakuten Advertising",
    "AvantLink",
    "FlexOffers",
    "None yet",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Niche,
    Platforms,
    Country,
    AudienceSize,
    AffiliatePlatforms,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Niche,
        OnboardingStep::Platforms,
        OnboardingStep::Country,
        OnboardingStep::AudienceSize,
        OnboardingStep::AffiliatePlatforms,
    ];

    /// 1-based position in the wizard.
    #[must_use]
    pub fn number(self) -> usize {
        match self {
            OnboardingStep::Niche => 1,
            OnboardingStep::Platforms => 2,
            OnboardingStep::Country => 3,
            OnboardingStep::AudienceSize => 4,
            OnboardingStep::AffiliatePlatforms => 5,
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.number()).copied()
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.number()
            .checked_sub(2)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::Niche => "What's your primary niche?",
            OnboardingStep::Platforms => "Which platforms do you create on?",
            OnboardingStep::Country => "Where are you located?",
            OnboardingStep::AudienceSize => "What's your audience size?",
            OnboardingStep::AffiliatePlatforms => "Which affiliate platforms do you use?",
        }
    }

    /// Options offered at this step.
    #[must_use]
    pub fn options(self) -> &'static [&'static str] {
        match self {
            OnboardingStep::Niche => NICHES,
            OnboardingStep::Platforms => PLATFORMS,
            OnboardingStep::Country => COUNTRIES,
            OnboardingStep::AudienceSize => AUDIENCE_SIZES,
            OnboardingStep::AffiliatePlatforms => AFFILIATE_PLATFORMS,
        }
    }

    fn field_name(self) -> &'static str {
        match self {
            OnboardingStep::Niche => "niche",
            OnboardingStep::Platforms => "platform",
            OnboardingStep::Country => "country",
            OnboardingStep::AudienceSize => "audience_size",
            OnboardingStep::AffiliatePlatforms => "affiliate_platform",
        }
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnboardingStep::Niche => write!(f, "niche"),
            OnboardingStep::Platforms => write!(f, "platforms"),
            OnboardingStep::Country => write!(f, "country"),
            OnboardingStep::AudienceSize => write!(f, "audience_size"),
            OnboardingStep::AffiliatePlatforms => write!(f, "affiliate_platforms"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    SelectNiche(String),
    TogglePlatform(String),
    SelectCountry(String),
    SelectAudienceSize(String),
    ToggleAffiliatePlatform(String),
    Next,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingWizard {
    pub step: OnboardingStep,
    pub primary_niche: String,
    /// Selection order is kept.
    pub platforms: Vec<String>,
    pub country: String,
    pub audience_size: String,
    pub affiliate_platforms: Vec<String>,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingWizard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Niche,
            primary_niche: String::new(),
            platforms: Vec::new(),
            country: String::new(),
            audience_size: String::new(),
            affiliate_platforms: Vec::new(),
        }
    }

    /// Apply one user action and return the resulting state.
    ///
    /// `Next` is a no-op while the current step is incomplete or on the last
    /// step; `Back` is a no-op on the first step.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownOption`] when a selected value is not part
    /// of the option list for its step.
    pub fn apply(mut self, action: WizardAction) -> Result<Self, CoreError> {
        match action {
            WizardAction::SelectNiche(niche) => {
                self.primary_niche = validated(OnboardingStep::Niche, niche)?;
            }
            WizardAction::TogglePlatform(platform) => {
                let platform = validated(OnboardingStep::Platforms, platform)?;
                toggle(&mut self.platforms, platform);
            }
            WizardAction::SelectCountry(country) => {
                self.country = validated(OnboardingStep::Country, country)?;
            }
            WizardAction::SelectAudienceSize(size) => {
                self.audience_size = validated(OnboardingStep::AudienceSize, size)?;
            }
            WizardAction::ToggleAffiliatePlatform(platform) => {
                let platform = validated(OnboardingStep::AffiliatePlatforms, platform)?;
                toggle(&mut self.affiliate_platforms, platform);
            }
            WizardAction::Next => {
                if self.can_proceed() {
                    if let Some(next) = self.step.next() {
                        self.step = next;
                    }
                }
            }
            WizardAction::Back => {
                if let Some(previous) = self.step.previous() {
                    self.step = previous;
                }
            }
        }
        Ok(self)
    }

    /// Whether the current step has the input it needs.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.is_step_complete(self.step)
    }

    #[must_use]
    pub fn is_step_complete(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::Niche => !self.primary_niche.is_empty(),
            OnboardingStep::Platforms => !self.platforms.is_empty(),
            OnboardingStep::Country => !self.country.is_empty(),
            OnboardingStep::AudienceSize => !self.audience_size.is_empty(),
            OnboardingStep::AffiliatePlatforms => !self.affiliate_platforms.is_empty(),
        }
    }

    /// Completion percentage for the progress bar, rounded.
    #[must_use]
    pub fn progress_percent(&self) -> usize {
        let total = OnboardingStep::ALL.len();
        (self.step.number() * 100 + total / 2) / total
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.step.next().is_none()
    }

    /// Turn a completed wizard into the profile write shape.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IncompleteOnboarding`] naming the first step that is
    /// incomplete, or the current step if the wizard has not reached the end.
    pub fn finish(self, user_id: impl Into<String>) -> Result<NewCreatorProfile, CoreError> {
        if let Some(step) = OnboardingStep::ALL
            .into_iter()
            .find(|step| !self.is_step_complete(*step))
        {
            return Err(CoreError::IncompleteOnboarding(step));
        }
        if !self.is_last_step() {
            return Err(CoreError::IncompleteOnboarding(self.step));
        }

        Ok(NewCreatorProfile {
            user_id: user_id.into(),
            primary_niche: self.primary_niche,
            platforms: join_field(&self.platforms),
            country: self.country,
            audience_size: self.audience_size,
            affiliate_platforms: join_field(&self.affiliate_platforms),
        })
    }
}

fn validated(step: OnboardingStep, value: String) -> Result<String, CoreError> {
    if step.options().contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(CoreError::UnknownOption {
            field: step.field_name(),
            value,
        })
    }
}

fn toggle(values: &mut Vec<String>, value: String) {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
    } else {
        values.push(value);
    }
}

#[cfg(test)]
#[path = "onboarding_test.rs"]
mod tests;
