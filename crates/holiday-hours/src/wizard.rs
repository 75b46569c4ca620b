//! The four-step page creation flow: business details, holiday selection, hours, then
//! preview and payment.

use serde::{Deserialize, Serialize};

use crate::listing::CreateBusinessRequest;
use crate::schedule::{HolidayRecord, HolidaySchedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BusinessInfo,
    SelectHolidays,
    ConfigureHours,
    PreviewAndPay,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BusinessInfo,
            Self::SelectHolidays,
            Self::ConfigureHours,
            Self::PreviewAndPay,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::BusinessInfo => 1,
            Self::SelectHolidays => 2,
            Self::ConfigureHours => 3,
            Self::PreviewAndPay => 4,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::BusinessInfo => "Business Info",
            Self::SelectHolidays => "Select Holidays",
            Self::ConfigureHours => "Configure Hours",
            Self::PreviewAndPay => "Preview & Pay",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::BusinessInfo => Some(Self::SelectHolidays),
            Self::SelectHolidays => Some(Self::ConfigureHours),
            Self::ConfigureHours => Some(Self::PreviewAndPay),
            Self::PreviewAndPay => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::BusinessInfo => None,
            Self::SelectHolidays => Some(Self::BusinessInfo),
            Self::ConfigureHours => Some(Self::SelectHolidays),
            Self::PreviewAndPay => Some(Self::ConfigureHours),
        }
    }
}

/// Position of a step relative to the current one, as drawn by the step indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Complete,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub business_type: String,
}

impl BusinessDraft {
    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }

    /// Blank optional fields are sent as absent.
    pub fn to_request(&self) -> CreateBusinessRequest {
        CreateBusinessRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            address: optional(&self.address),
            business_type: optional(&self.business_type),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Everything collected by the wizard, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardSubmission {
    pub business: CreateBusinessRequest,
    pub holidays: Vec<HolidayRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationWizard {
    step: WizardStep,
    pub business: BusinessDraft,
    pub holidays: HolidaySchedule,
}

impl Default for CreationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl CreationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::BusinessInfo,
            business: BusinessDraft::default(),
            holidays: HolidaySchedule::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Whether the data gathered so far satisfies `step`.
    pub fn step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::BusinessInfo => self.business.is_complete(),
            WizardStep::SelectHolidays => !self.holidays.is_empty(),
            WizardStep::ConfigureHours | WizardStep::PreviewAndPay => true,
        }
    }

    pub fn can_proceed(&self) -> bool {
        self.step_complete(self.step)
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        if !self.can_proceed() {
            return Err(WizardError::Incomplete(self.step));
        }
        let next = self.step.next().ok_or(WizardError::AtFinalStep)?;
        self.step = next;
        Ok(next)
    }

    /// Steps back, staying put on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn indicator(&self) -> Vec<(WizardStep, StepState)> {
        WizardStep::ordered()
            .into_iter()
            .map(|step| {
                let state = match step.cmp(&self.step) {
                    std::cmp::Ordering::Less => StepState::Complete,
                    std::cmp::Ordering::Equal => StepState::Current,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                };
                (step, state)
            })
            .collect()
    }

    pub fn submission(&self) -> Result<WizardSubmission, WizardError> {
        if let Some(step) = WizardStep::ordered()
            .into_iter()
            .find(|step| !self.step_complete(*step))
        {
            return Err(WizardError::Incomplete(step));
        }

        Ok(WizardSubmission {
            business: self.business.to_request(),
            holidays: self.holidays.records().to_vec(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {} ({}) is incomplete", .0.number(), .0.title())]
    Incomplete(WizardStep),
    #[error("already on the final step")]
    AtFinalStep,
}
