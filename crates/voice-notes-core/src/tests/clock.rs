use crate::{Clock, SystemClock};

/// WHAT: The wall clock reports milliseconds since the epoch
/// WHY: Note ids must look like the capture-completion timestamp
#[test]
fn given_system_clock_when_reading_then_recent_millisecond_timestamp() {
    // Given: The wall clock
    let clock = SystemClock;

    // When: Reading twice
    let first = clock.now_millis();
    let second = clock.now_millis();

    // Then: Millisecond scale (after 2020-09-13) and non-decreasing
    assert!(first > 1_600_000_000_000);
    assert!(second >= first);
}
