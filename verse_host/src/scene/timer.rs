/// TimerSet — scene-owned delayed and repeating callbacks.
///
/// Every timer a scene starts lives in its TimerSet, and the scene's
/// `dispose` calls `clear()` — the cancellation handle is mandatory, so
/// no timer can outlive its scene and fire into freed state. Ticked from
/// the scene's `update`, so a paused or deactivated scene advances no
/// timers.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable key for a scheduled timer
    pub struct TimerKey;
}

struct Timer {
    remaining: f32,
    repeat: Option<f32>,
}

/// Set of pending timers with stable keys.
///
/// `tick(delta)` returns the keys that fired this tick; the scene maps
/// them back to whatever it scheduled. One-shot timers are removed when
/// they fire, repeating timers are re-armed drift-free.
pub struct TimerSet {
    timers: SlotMap<TimerKey, Timer>,
}

impl TimerSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
        }
    }

    /// Schedule a timer.
    ///
    /// # Arguments
    ///
    /// * `after` - Seconds until the first fire
    /// * `repeat` - Re-arm period in seconds, or None for one-shot
    pub fn schedule(&mut self, after: f32, repeat: Option<f32>) -> TimerKey {
        self.timers.insert(Timer {
            remaining: after.max(0.0),
            repeat,
        })
    }

    /// Cancel a timer. Returns false if the key is stale.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.timers.remove(key).is_some()
    }

    /// Advance all timers by `delta` seconds.
    ///
    /// Returns the keys that fired. A timer fires at most once per tick;
    /// a repeating timer whose period is shorter than the tick catches
    /// up on subsequent ticks instead of firing in a burst.
    pub fn tick(&mut self, delta: f32) -> Vec<TimerKey> {
        let mut fired = Vec::new();
        let mut finished = Vec::new();

        for (key, timer) in self.timers.iter_mut() {
            timer.remaining -= delta;
            if timer.remaining <= 0.0 {
                fired.push(key);
                match timer.repeat {
                    Some(period) => timer.remaining += period.max(f32::EPSILON),
                    None => finished.push(key),
                }
            }
        }

        for key in finished {
            self.timers.remove(key);
        }
        fired
    }

    /// Cancel every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl Default for TimerSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
