use mockall::automock;
use time::PrimitiveDateTime;

/// Source of the current time, replaced by a mock in tests.
#[automock]
pub trait ClockService {
    /// Current UTC date and time without offset, as stored in `created`.
    fn date_time_now(&self) -> PrimitiveDateTime;
}
