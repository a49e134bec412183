use service::treatment::Treatment;
use tracing::warn;

pub const COLOUR_MINUTES: u32 = 120;
pub const CUT_MINUTES: u32 = 30;
pub const DEFAULT_MINUTES: u32 = 60;

// Checked in this order, the first matching category wins.
const COLOUR_KEYWORDS: &[&str] = &["color", "colour", "dye", "highlight", "رنگ", "مش", "لایت"];
const CUT_KEYWORDS: &[&str] = &["cut", "trim", "کوتاهی", "اصلاح"];

/// Minutes the treatment itself takes.
///
/// Treatments without a positive duration are legacy records. Their duration
/// is guessed from the name.
pub fn resolve_duration(treatment: &Treatment) -> u32 {
    match treatment.duration_minutes {
        Some(minutes) if minutes > 0 => minutes,
        _ => {
            let minutes = duration_from_name(&treatment.name);
            warn!(
                treatment_id = %treatment.id,
                name = %treatment.name,
                minutes,
                "Treatment has no duration, guessed it from the name"
            );
            minutes
        }
    }
}

/// Minutes the stylist stays blocked after the treatment.
pub fn resolve_buffer(treatment: &Treatment) -> u32 {
    treatment.buffer_minutes.unwrap_or(0)
}

fn duration_from_name(name: &str) -> u32 {
    let name = name.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| name.contains(keyword));
    if mentions(COLOUR_KEYWORDS) {
        COLOUR_MINUTES
    } else if mentions(CUT_KEYWORDS) {
        CUT_MINUTES
    } else {
        DEFAULT_MINUTES
    }
}
