use std::sync::Arc;

use async_trait::async_trait;
use dao::booking::BookingDao;
use dao::TransactionDao;
use salon_utils::{combine, Span};
use service::{
    availability::{AvailabilityService, BusinessHours, SlotAvailability},
    booking::Booking,
    calendar::{CalendarDay, CalendarService},
    config::ConfigService,
    treatment::{Treatment, TreatmentService},
    ServiceError,
};
use time::{Date, Duration, Time};
use time_tz::Tz;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::conflict::find_conflict;
use crate::duration::{resolve_buffer, resolve_duration};
use crate::gen_service_impl;

/// Everything needed to judge start times of one stylist on one day.
pub struct DaySchedule<'a> {
    pub day: CalendarDay,
    pub stylist_id: Uuid,
    pub business_hours: BusinessHours,
    pub existing: &'a [Booking],
    pub tz: &'a Tz,
}

impl DaySchedule<'_> {
    /// Occupied block of a treatment starting at `time`, `None` if it ends
    /// past the representable range.
    pub fn slot_window(
        &self,
        time: Time,
        duration_minutes: u32,
        buffer_minutes: u32,
    ) -> Option<Span> {
        let start = combine(self.day.date, time, self.tz);
        let occupied_minutes = i64::from(duration_minutes.max(1)) + i64::from(buffer_minutes);
        let end = start.checked_add(Duration::minutes(occupied_minutes))?;
        Some(Span::new(start, end))
    }

    fn within_business_hours(&self, window: &Span) -> bool {
        let opening = combine(self.day.date, self.business_hours.opening, self.tz);
        let closing = combine(self.day.date, self.business_hours.closing, self.tz);
        opening <= window.start && window.end <= closing
    }
}

/// Whether a treatment of the given length can start at `time`.
pub fn evaluate_slot(
    schedule: &DaySchedule,
    time: Time,
    duration_minutes: u32,
    buffer_minutes: u32,
) -> bool {
    if !schedule.day.active {
        return false;
    }
    let Some(window) = schedule.slot_window(time, duration_minutes, buffer_minutes) else {
        return false;
    };
    if !schedule.within_business_hours(&window) {
        return false;
    }
    find_conflict(schedule.stylist_id, &window, schedule.existing, schedule.tz).is_none()
}

/// Availability of every candidate time, in the order given.
pub fn evaluate_slot_grid(
    schedule: &DaySchedule,
    treatment: &Treatment,
    candidate_times: &[Time],
) -> Arc<[SlotAvailability]> {
    if !schedule.day.active {
        return candidate_times
            .iter()
            .map(|&time| SlotAvailability {
                time,
                available: false,
            })
            .collect();
    }
    let duration_minutes = resolve_duration(treatment);
    let buffer_minutes = resolve_buffer(treatment);
    candidate_times
        .iter()
        .map(|&time| SlotAvailability {
            time,
            available: evaluate_slot(schedule, time, duration_minutes, buffer_minutes),
        })
        .collect()
}

gen_service_impl! {
    struct AvailabilityServiceImpl: AvailabilityService = AvailabilityServiceDeps {
        BookingDao: BookingDao<Transaction = Self::Transaction> = booking_dao,
        TreatmentService: TreatmentService<Transaction = Self::Transaction> = treatment_service,
        CalendarService: CalendarService<Transaction = Self::Transaction> = calendar_service,
        ConfigService: ConfigService = config_service,
        TransactionDao: TransactionDao<Transaction = Self::Transaction> = transaction_dao,
    }
}

impl<Deps: AvailabilityServiceDeps> AvailabilityServiceImpl<Deps> {
    async fn stylist_bookings(
        &self,
        tenant_id: Uuid,
        stylist_id: Uuid,
        tx: Deps::Transaction,
    ) -> Result<Arc<[Booking]>, ServiceError> {
        let bookings: Arc<[Booking]> = self
            .booking_dao
            .find_by_tenant(tenant_id, Some(stylist_id), tx)
            .await?
            .iter()
            .map(Booking::from)
            .collect();
        let malformed = bookings
            .iter()
            .filter(|booking| booking.occupied_block().is_none())
            .count();
        if malformed > 0 {
            warn!(%stylist_id, malformed, "Ignoring bookings without a valid time range");
        }
        Ok(bookings)
    }
}

#[async_trait]
impl<Deps: AvailabilityServiceDeps> AvailabilityService for AvailabilityServiceImpl<Deps> {
    type Transaction = Deps::Transaction;

    #[instrument(skip(self))]
    async fn get_slot_grid(
        &self,
        tenant_id: Uuid,
        stylist_id: Uuid,
        treatment_id: Uuid,
        date: Date,
        tx: Option<Self::Transaction>,
    ) -> Result<Arc<[SlotAvailability]>, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let config = self.config_service.get_config().await?;
        let treatment = self
            .treatment_service
            .get(tenant_id, treatment_id, Some(tx.clone()))
            .await?;
        let day = self
            .calendar_service
            .get_day(tenant_id, date, Some(tx.clone()))
            .await?;
        let existing = self
            .stylist_bookings(tenant_id, stylist_id, tx.clone())
            .await?;

        let schedule = DaySchedule {
            day,
            stylist_id,
            business_hours: config.business_hours(),
            existing: &existing,
            tz: config.timezone,
        };
        let grid = evaluate_slot_grid(&schedule, &treatment, &config.slot_grid());

        self.transaction_dao.commit(tx).await?;
        Ok(grid)
    }

    #[instrument(skip(self))]
    async fn is_slot_available(
        &self,
        tenant_id: Uuid,
        stylist_id: Uuid,
        treatment: &Treatment,
        date: Date,
        time: Time,
        tx: Option<Self::Transaction>,
    ) -> Result<bool, ServiceError> {
        let tx = self.transaction_dao.use_transaction(tx).await?;
        let config = self.config_service.get_config().await?;
        let day = self
            .calendar_service
            .get_day(tenant_id, date, Some(tx.clone()))
            .await?;
        let existing = self
            .stylist_bookings(tenant_id, stylist_id, tx.clone())
            .await?;

        let schedule = DaySchedule {
            day,
            stylist_id,
            business_hours: config.business_hours(),
            existing: &existing,
            tz: config.timezone,
        };
        let available = evaluate_slot(
            &schedule,
            time,
            resolve_duration(treatment),
            resolve_buffer(treatment),
        );

        self.transaction_dao.commit(tx).await?;
        Ok(available)
    }
}
