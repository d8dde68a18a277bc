use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self { remaining: duration }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_zero()
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.is_expired()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Repeating {
    period: Duration,
    accumulated: Duration,
}

impl Repeating {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.accumulated += dt;
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }
}
