//! One-second countdown for station challenges

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownState {
    /// Never started; shows the full duration
    Idle,
    Running { remaining: u32 },
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    state: CountdownState,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            state: CountdownState::Idle,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    /// Seconds to display
    pub fn display_secs(&self) -> u32 {
        match self.state {
            CountdownState::Idle => self.duration,
            CountdownState::Running { remaining } => remaining,
            CountdownState::Finished => 0,
        }
    }

    /// Start from the full duration; refused while running
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = if self.duration == 0 {
            CountdownState::Finished
        } else {
            CountdownState::Running {
                remaining: self.duration,
            }
        };
        true
    }

    /// Advance one second; returns true when this tick finished the countdown
    pub fn tick(&mut self) -> bool {
        let CountdownState::Running { remaining } = self.state else {
            return false;
        };
        if remaining <= 1 {
            self.state = CountdownState::Finished;
            true
        } else {
            self.state = CountdownState::Running {
                remaining: remaining - 1,
            };
            false
        }
    }
}
