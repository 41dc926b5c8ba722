//! Spawn gates — time and distance thresholds
//!
//! Гейт запоминает момент/позицию *срабатывания*, а не `last + interval`:
//! долгий кадр даёт максимум один batch, без накопленного backlog.

/// Fires at most once per `interval` seconds of gameplay time
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGate {
    pub interval: f32,
    last_trigger: Option<f32>,
}

impl TimeGate {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_trigger: None,
        }
    }

    /// First call always fires
    pub fn try_trigger(&mut self, now: f32) -> bool {
        let ready = match self.last_trigger {
            None => true,
            Some(last) => now - last >= self.interval,
        };
        if ready {
            self.last_trigger = Some(now);
        }
        ready
    }

    pub fn last_trigger(&self) -> Option<f32> {
        self.last_trigger
    }

    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}

/// Fires when the camera has travelled more than `spacing` past the mark
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGate {
    pub spacing: f32,
    mark: f32,
}

impl DistanceGate {
    pub fn new(spacing: f32, start: f32) -> Self {
        Self {
            spacing,
            mark: start,
        }
    }

    pub fn try_trigger(&mut self, position: f32) -> bool {
        if position > self.mark + self.spacing {
            self.mark = position;
            true
        } else {
            false
        }
    }

    pub fn mark(&self) -> f32 {
        self.mark
    }

    pub fn reset(&mut self, start: f32) {
        self.mark = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_gate_fires_first_then_waits() {
        let mut gate = TimeGate::new(3.0);
        assert!(gate.try_trigger(0.0));
        assert!(!gate.try_trigger(1.0));
        assert!(!gate.try_trigger(2.9));
        assert!(gate.try_trigger(3.0));
        assert_eq!(gate.last_trigger(), Some(3.0));
    }

    #[test]
    fn test_time_gate_hitch_yields_single_trigger() {
        let mut gate = TimeGate::new(3.0);
        gate.try_trigger(0.0);

        // Кадр на 10 секунд → одно срабатывание, отсчёт от момента срабатывания
        assert!(gate.try_trigger(10.0));
        assert!(!gate.try_trigger(10.5));
        assert!(!gate.try_trigger(12.9));
        assert!(gate.try_trigger(13.0));
    }

    #[test]
    fn test_distance_gate_uses_trigger_position() {
        let mut gate = DistanceGate::new(10.0, -5.0);
        assert!(!gate.try_trigger(0.0));
        assert!(!gate.try_trigger(5.0)); // ровно spacing — ещё нет
        assert!(gate.try_trigger(5.5));
        assert_eq!(gate.mark(), 5.5);

        // Прыжок на 100 единиц → одно срабатывание
        assert!(gate.try_trigger(105.0));
        assert!(!gate.try_trigger(110.0));
    }

    #[test]
    fn test_gate_reset() {
        let mut time = TimeGate::new(8.0);
        time.try_trigger(0.0);
        time.reset();
        assert!(time.try_trigger(0.5));

        let mut distance = DistanceGate::new(10.0, 0.0);
        distance.try_trigger(50.0);
        distance.reset(0.0);
        assert!(distance.try_trigger(11.0));
    }
}
