//! Timing and stepping.

use std::thread;
use std::time::{Duration, Instant};

/// The time of one frame. It is sampled once at the start of the frame and
/// shared by every pass of that frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub frame: u64,
}

enum Source {
    Wall { start: Instant, last: Instant },
    Fixed { step: Duration, elapsed: Duration },
}

/// A monotonic frame clock.
pub struct FrameClock {
    source: Source,
    current: FrameTime,
}

impl FrameClock {
    /// A clock driven by `Instant`.
    pub fn wall() -> Self {
        let now = Instant::now();
        FrameClock {
            source: Source::Wall {
                start: now,
                last: now,
            },
            current: FrameTime::default(),
        }
    }

    /// A clock that advances by exactly `step` every frame.
    pub fn fixed(step: Duration) -> Self {
        FrameClock {
            source: Source::Fixed {
                step,
                elapsed: Duration::new(0, 0),
            },
            current: FrameTime::default(),
        }
    }

    /// Starts a new frame and returns its time.
    pub fn advance(&mut self) -> FrameTime {
        let (elapsed, delta) = match self.source {
            Source::Wall {
                start,
                ref mut last,
            } => {
                let now = Instant::now();
                let delta = now - *last;
                *last = now;
                (now - start, delta)
            }
            Source::Fixed {
                step,
                ref mut elapsed,
            } => {
                *elapsed += step;
                (*elapsed, step)
            }
        };

        self.current = FrameTime {
            elapsed: seconds(elapsed),
            delta: seconds(delta),
            frame: self.current.frame + 1,
        };

        self.current
    }

    /// The time of the current frame.
    #[inline]
    pub fn now(&self) -> FrameTime {
        self.current
    }

    /// Waits until at least `1 / max_fps` seconds passed since the current
    /// frame started, cooperatively giving up timeslices to the OS scheduler.
    /// Fixed clocks never wait.
    pub fn limit(&self, max_fps: u32) {
        let last = match self.source {
            Source::Wall { last, .. } => last,
            Source::Fixed { .. } => return,
        };

        if max_fps == 0 {
            return;
        }

        let td = Duration::from_micros(1_000_000 / u64::from(max_fps));
        while last.elapsed() <= td {
            if (last.elapsed() + Duration::from_millis(2)) < td {
                thread::sleep(Duration::from_millis(1));
            } else {
                thread::yield_now();
            }
        }
    }
}

#[inline]
fn seconds(d: Duration) -> f32 {
    d.as_secs() as f32 + d.subsec_nanos() as f32 * 1e-9
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_step() {
        let mut clock = FrameClock::fixed(Duration::from_millis(250));
        clock.advance();
        clock.advance();
        let t = clock.advance();

        assert_eq!(t.frame, 3);
        assert_eq!(t.delta, 0.25);
        assert_eq!(t.elapsed, 0.75);
        assert_eq!(clock.now(), t);
    }

    #[test]
    fn wall_is_monotonic() {
        let mut clock = FrameClock::wall();
        let a = clock.advance();
        clock.limit(500);
        let b = clock.advance();

        assert!(b.elapsed >= a.elapsed);
        assert!(b.delta >= 0.002);
    }
}
