use std::time::{Duration, Instant};

/// Paces the demo loop to a fixed tick rate.
pub struct MainLoop {
    desired_fps: f32,
}

impl MainLoop {
    pub fn new(desired_fps: f32) -> Self {
        Self { desired_fps }
    }

    pub fn iter(&self) -> MainLoopIterator {
        MainLoopIterator {
            desired_delta_time_in_secs: 1.0 / self.desired_fps,
            last_tick: Instant::now(),
        }
    }
}

pub struct MainLoopIterator {
    desired_delta_time_in_secs: f32,
    last_tick: Instant,
}

impl Iterator for MainLoopIterator {
    /// Seconds elapsed since the previous tick.
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let elapsed_in_secs = self.last_tick.elapsed().as_secs_f32();

        if elapsed_in_secs < self.desired_delta_time_in_secs {
            std::thread::sleep(Duration::from_secs_f32(
                self.desired_delta_time_in_secs - elapsed_in_secs,
            ));
        }

        let now = Instant::now();
        let delta_time_in_secs = (now - self.last_tick).as_secs_f32();
        self.last_tick = now;

        Some(delta_time_in_secs)
    }
}
