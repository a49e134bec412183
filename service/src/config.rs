use std::fmt;
use std::sync::Arc;

use crate::availability::BusinessHours;
use crate::ServiceError;
use async_trait::async_trait;
use mockall::automock;
use salon_utils::{minutes_to_time_of_day, time_of_day_to_minutes};
use time::{Time, Weekday};
use time_tz::{TimeZone, Tz};

/// Salon wide settings shared by all tenants of one deployment.
#[derive(Clone)]
pub struct SalonConfig {
    pub timezone: &'static Tz,
    pub opening: Time,
    pub closing: Time,
    pub slot_interval_minutes: u16,
    pub closed_weekdays: Arc<[Weekday]>,
}

impl fmt::Debug for SalonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalonConfig")
            .field("timezone", &self.timezone.name())
            .field("opening", &self.opening)
            .field("closing", &self.closing)
            .field("slot_interval_minutes", &self.slot_interval_minutes)
            .field("closed_weekdays", &self.closed_weekdays)
            .finish()
    }
}

impl SalonConfig {
    pub fn business_hours(&self) -> BusinessHours {
        BusinessHours {
            opening: self.opening,
            closing: self.closing,
        }
    }

    /// Candidate start times from opening (inclusive) to closing (exclusive).
    pub fn slot_grid(&self) -> Arc<[Time]> {
        let opening = time_of_day_to_minutes(self.opening);
        let closing = time_of_day_to_minutes(self.closing);
        let step = usize::from(self.slot_interval_minutes.max(1));
        (opening..closing)
            .step_by(step)
            .map(minutes_to_time_of_day)
            .collect()
    }

    pub fn is_closed_weekday(&self, weekday: Weekday) -> bool {
        self.closed_weekdays.contains(&weekday)
    }
}

#[automock]
#[async_trait]
pub trait ConfigService {
    async fn get_config(&self) -> Result<SalonConfig, ServiceError>;
}
