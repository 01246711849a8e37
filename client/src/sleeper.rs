use std::time::{Duration, Instant};

/// Paces frame output to a target frames-per-second rate. Pure display
/// delay; the simulated state sequence is the same at any rate.
pub struct Sleeper {
    target_delta: Duration,
    last_instant: Option<Instant>,
}

impl Sleeper {
    /// `fps == 0` disables pacing.
    pub fn new(fps: u64) -> Self {
        let target_delta = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps as u32
        };

        Self {
            target_delta,
            last_instant: None,
        }
    }

    /// Sleeps off whatever remains of the current frame budget since the
    /// previous call. Returns whether any sleeping was needed.
    pub fn pace(&mut self) -> bool {
        let slept = if let Some(last_instant) = self.last_instant {
            let delta_time = Instant::now() - last_instant;

            if delta_time < self.target_delta {
                spin_sleep::sleep(self.target_delta - delta_time);
                true
            } else {
                false
            }
        } else {
            // First frame goes out immediately.
            false
        };

        self.last_instant = Some(Instant::now());
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::Sleeper;

    #[test]
    fn zero_fps_never_sleeps() {
        let mut sleeper = Sleeper::new(0);

        assert!(!sleeper.pace());
        assert!(!sleeper.pace());
    }

    #[test]
    fn fast_frames_get_paced() {
        let mut sleeper = Sleeper::new(100);

        assert!(!sleeper.pace());
        assert!(sleeper.pace());
    }
}
