use std::{collections::BTreeSet, sync::Arc};

use crate::{
    error::CalendarError,
    models::{expand_vacation_days, DateKey, VacationRange},
    services::holiday_provider::HolidayProvider,
};

pub const DEFAULT_REGION: &str = "MV";

/// Builds the set of days that never count as regular working days.
#[derive(Clone)]
pub struct CalendarSource {
    provider: Arc<dyn HolidayProvider>,
    region: String,
    vacations: Arc<Vec<VacationRange>>,
}

impl CalendarSource {
    pub fn new(
        provider: Arc<dyn HolidayProvider>,
        region: impl Into<String>,
        vacations: Vec<VacationRange>,
    ) -> Self {
        Self {
            provider,
            region: region.into(),
            vacations: Arc::new(vacations),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn vacations(&self) -> &[VacationRange] {
        &self.vacations
    }

    pub async fn fetch_holidays(&self, year: i32) -> Result<BTreeSet<DateKey>, CalendarError> {
        self.provider.fetch_holidays(year, &self.region).await
    }

    pub fn expand_static_vacations(&self) -> BTreeSet<DateKey> {
        expand_vacation_days(&self.vacations)
    }

    /// Public holidays of `year` plus all configured vacation days.
    ///
    /// Fails as a whole when the holiday fetch fails, even though the
    /// vacation part would still be available.
    pub async fn get_exclusion_calendar(
        &self,
        year: i32,
    ) -> Result<ExclusionCalendar, CalendarError> {
        let public_holidays = self.fetch_holidays(year).await.map_err(|err| {
            tracing::warn!(year, region = %self.region, error = %err, "Holiday fetch failed");
            err
        })?;
        let school_vacations = self.expand_static_vacations();

        tracing::debug!(
            year,
            region = %self.region,
            public_holidays = public_holidays.len(),
            school_vacation_days = school_vacations.len(),
            "Built exclusion calendar"
        );

        Ok(ExclusionCalendar {
            public_holidays,
            school_vacations,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    PublicHoliday,
    SchoolVacation,
    None,
}

impl ExclusionReason {
    pub fn label(&self) -> &'static str {
        match self {
            ExclusionReason::PublicHoliday => "public holiday",
            ExclusionReason::SchoolVacation => "school vacation",
            ExclusionReason::None => "regular day",
        }
    }
}

/// Union of public holidays and school vacation days, for membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionCalendar {
    public_holidays: BTreeSet<DateKey>,
    school_vacations: BTreeSet<DateKey>,
}

impl ExclusionCalendar {
    pub fn new(
        public_holidays: impl IntoIterator<Item = DateKey>,
        school_vacations: impl IntoIterator<Item = DateKey>,
    ) -> Self {
        Self {
            public_holidays: public_holidays.into_iter().collect(),
            school_vacations: school_vacations.into_iter().collect(),
        }
    }

    pub fn contains(&self, key: &DateKey) -> bool {
        self.public_holidays.contains(key) || self.school_vacations.contains(key)
    }

    pub fn reason_for(&self, key: &DateKey) -> ExclusionReason {
        if self.public_holidays.contains(key) {
            ExclusionReason::PublicHoliday
        } else if self.school_vacations.contains(key) {
            ExclusionReason::SchoolVacation
        } else {
            ExclusionReason::None
        }
    }

    pub fn public_holidays(&self) -> &BTreeSet<DateKey> {
        &self.public_holidays
    }

    pub fn school_vacations(&self) -> &BTreeSet<DateKey> {
        &self.school_vacations
    }
}
