enum TimerState {
    Stopped,
    Started { t_start_ms: u64 },
}

#[derive(Debug, PartialEq, Eq)]
pub enum TimerError {
    NotStarted,
}

/// Software timer that re-arms itself each time it fires.
///
/// Fed from a monotonic millisecond clock; deadlines are computed with
/// wrapping arithmetic so a clock wrap does not stall it.
pub struct PeriodicTimer {
    period_ms: u64,
    state: TimerState,
}

impl PeriodicTimer {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            state: TimerState::Stopped,
        }
    }

    pub fn start(&mut self, t_start_ms: u64) {
        self.state = TimerState::Started { t_start_ms }
    }

    /// Returns `Ok(true)` once per elapsed period.
    ///
    /// The next period is measured from the previous deadline, not from
    /// `now_ms`, so late polls do not accumulate drift. A zero period fires
    /// on every poll.
    pub fn has_expired(&mut self, now_ms: u64) -> Result<bool, TimerError> {
        match self.state {
            TimerState::Stopped => Err(TimerError::NotStarted),
            TimerState::Started { t_start_ms } => {
                let elapsed = now_ms.wrapping_sub(t_start_ms);
                if self.period_ms == 0 {
                    self.state = TimerState::Started { t_start_ms: now_ms };
                    Ok(true)
                } else if elapsed >= self.period_ms {
                    let missed = elapsed / self.period_ms;
                    self.state = TimerState::Started {
                        t_start_ms: t_start_ms.wrapping_add(missed * self.period_ms),
                    };
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
        }
    }
}
