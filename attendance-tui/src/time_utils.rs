use std::sync::OnceLock;
use time::{Date, OffsetDateTime, UtcOffset};

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Read the local UTC offset once. Must run before any other thread is
/// spawned: on Unix the offset cannot be determined in a multi-threaded
/// process, and UTC is used instead.
pub fn init_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// The calendar date at `now` on a clock running at `offset`.
pub fn date_at(now: OffsetDateTime, offset: UtcOffset) -> Date {
    now.to_offset(offset).date()
}

/// Today's date on the local clock captured by [`init_local_offset`].
pub fn local_today() -> Date {
    let offset = LOCAL_OFFSET.get().copied().unwrap_or(UtcOffset::UTC);
    date_at(OffsetDateTime::now_utc(), offset)
}
