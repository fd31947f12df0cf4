/// Outcome of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing is armed; the tick is ignored.
    Idle,
    /// Time remains, in whole seconds.
    Running(u32),
    /// Time just ran out. Reported once per arm.
    Expired,
}

/// Per-question timer driven by external one-second ticks.
///
/// The countdown never touches a session itself. Whoever owns it forwards
/// [`Tick::Expired`] as a timed-out resolution and disarms it once the
/// question is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining: Option<u32>,
}

impl Countdown {
    #[must_use]
    pub fn armed(seconds: u32) -> Self {
        Self {
            remaining: Some(seconds),
        }
    }

    /// Restarts the timer with a full allowance.
    pub fn arm(&mut self, seconds: u32) {
        self.remaining = Some(seconds);
    }

    pub fn disarm(&mut self) {
        self.remaining = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left, or `None` when disarmed.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    pub fn tick(&mut self) -> Tick {
        match self.remaining {
            None => Tick::Idle,
            Some(left) if left <= 1 => {
                self.remaining = None;
                Tick::Expired
            }
            Some(left) => {
                self.remaining = Some(left - 1);
                Tick::Running(left - 1)
            }
        }
    }
}
