use std::time::Instant;

/// Play clock. Position is derived from absolute elapsed time on every
/// query, so callers may sample it at any rate.
#[derive(Debug, Clone)]
pub struct Transport {
    bars_per_second: f64,
    started: Option<Instant>,
    /// Position in bars at the moment playback last started or paused.
    offset: f64,
}

impl Transport {
    pub fn new(bars_per_second: f64) -> Self {
        Self {
            bars_per_second: bars_per_second.max(0.0),
            started: None,
            offset: 0.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.started.is_some()
    }

    pub fn play(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.started.is_some() {
            self.offset = self.raw_position(now);
            self.started = None;
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause(now);
        } else {
            self.play(now);
        }
    }

    /// Play position in bars, wrapped to the song length.
    pub fn position(&self, now: Instant, song_bars: usize) -> f64 {
        if song_bars == 0 {
            return 0.0;
        }
        self.raw_position(now).rem_euclid(song_bars as f64)
    }

    fn raw_position(&self, now: Instant) -> f64 {
        let elapsed = self
            .started
            .map_or(0.0, |t| now.saturating_duration_since(t).as_secs_f64());
        self.offset + elapsed * self.bars_per_second
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn stopped_transport_stays_at_zero() {
        let transport = Transport::new(1.0);
        let now = Instant::now();
        assert_eq!(transport.position(now + Duration::from_secs(5), 8), 0.0);
    }

    #[test]
    fn position_follows_elapsed_time_and_wraps() {
        let mut transport = Transport::new(2.0);
        let start = Instant::now();
        transport.play(start);
        assert_eq!(transport.position(start + Duration::from_millis(1500), 8), 3.0);
        assert_eq!(transport.position(start + Duration::from_secs(5), 8), 2.0);
    }

    #[test]
    fn pause_holds_position() {
        let mut transport = Transport::new(1.0);
        let start = Instant::now();
        transport.play(start);
        transport.pause(start + Duration::from_secs(3));
        assert!(!transport.is_playing());
        assert_eq!(transport.position(start + Duration::from_secs(10), 16), 3.0);
        transport.toggle(start + Duration::from_secs(10));
        assert_eq!(transport.position(start + Duration::from_secs(11), 16), 4.0);
    }
}
