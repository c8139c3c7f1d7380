use command_router::Clock;
use time::error::IndeterminateOffset;
use time::{OffsetDateTime, UtcOffset};

/// Wall clock in the local timezone.
///
/// The offset is resolved once, by [`SystemClock::try_local`], because `time`
/// refuses to read it after the process has spawned threads. Call it from
/// `main` before starting any runtime. Offset changes during a session
/// (daylight saving) are not picked up.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// The caller decides how to report a failure, usually by logging it and
    /// falling back to [`SystemClock::utc`].
    pub fn try_local() -> Result<Self, IndeterminateOffset> {
        UtcOffset::current_local_offset().map(Self::with_offset)
    }

    pub fn utc() -> Self {
        Self::with_offset(UtcOffset::UTC)
    }

    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn reports_in_configured_offset() {
        let clock = SystemClock::with_offset(offset!(+5:30));
        assert_eq!(clock.offset(), offset!(+5:30));
        assert_eq!(clock.now().offset(), offset!(+5:30));
    }

    #[test]
    fn utc_fallback_has_zero_offset() {
        assert_eq!(SystemClock::utc().offset(), UtcOffset::UTC);
        assert!(SystemClock::utc().now().offset().is_utc());
    }
}
