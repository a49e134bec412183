use salon_utils::{local_date, Span};
use service::booking::Booking;
use time_tz::Tz;
use uuid::Uuid;

/// First booking of `stylist_id` whose occupied block overlaps `candidate`.
///
/// Only bookings on the candidate's local calendar date are considered.
/// Cancelled bookings and bookings without a valid time range are ignored.
pub fn find_conflict<'a>(
    stylist_id: Uuid,
    candidate: &Span,
    existing: &'a [Booking],
    tz: &Tz,
) -> Option<&'a Booking> {
    let candidate_date = local_date(candidate.start, tz);
    existing
        .iter()
        .filter(|booking| booking.stylist_id == stylist_id)
        .filter(|booking| !booking.is_cancelled())
        .filter_map(|booking| booking.occupied_block().map(|block| (booking, block)))
        .filter(|(_, block)| local_date(block.start, tz) == candidate_date)
        .find(|(_, block)| block.overlaps(candidate))
        .map(|(booking, _)| booking)
}

pub fn has_conflict(stylist_id: Uuid, candidate: &Span, existing: &[Booking], tz: &Tz) -> bool {
    find_conflict(stylist_id, candidate, existing, tz).is_some()
}
