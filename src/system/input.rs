//! Input line state machines
//!
//! Pure logic for the physical input lines: active-level classification per
//! pull resistor mode, the stability-gated stateful switch and the long-press
//! timer. Hardware access lives in the tasks; everything here is driven by
//! sampled levels and timestamps so it can be exercised without pins.

use defmt::Format;
use embassy_time::{Duration, Instant};

/// Pull resistor applied to an input line.
///
/// The pull mode also determines which raw transition counts as a press:
/// pull-up lines are active low (falling edge), pull-down lines are active
/// high (rising edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum PullMode {
    Up,
    Down,
}

impl PullMode {
    /// Returns true when the sampled level is the active (pressed) level
    /// for this pull mode.
    pub fn is_active(self, high: bool) -> bool {
        match self {
            PullMode::Up => !high,
            PullMode::Down => high,
        }
    }
}

/// Persistent ON/OFF state for a latching switch.
///
/// Raw edges propose a candidate state; the candidate is accepted only when
/// it differs from the stored state and the stored state has been stable for
/// at least the configured window. Mechanical toggle contacts chatter across
/// several bounce intervals, so the hardware debounce alone is not enough.
pub struct SwitchCore {
    state: bool,
    last_change: Instant,
    stable: Duration,
    invert: bool,
}

impl SwitchCore {
    /// Samples the initial state from the raw level, inverted if requested.
    pub fn new(raw_high: bool, invert: bool, stable: Duration, now: Instant) -> Self {
        Self {
            state: if invert { !raw_high } else { raw_high },
            last_change: now,
            stable,
            invert,
        }
    }

    /// Feeds one qualifying edge with the level sampled at `now`.
    ///
    /// Returns the new state when the transition is accepted, `None` when the
    /// candidate is discarded as chatter.
    pub fn on_edge(&mut self, raw_high: bool, now: Instant) -> Option<bool> {
        let candidate = if self.invert { !raw_high } else { raw_high };
        if candidate == self.state {
            return None;
        }
        if elapsed(self.last_change, now) < self.stable {
            return None;
        }
        self.state = candidate;
        self.last_change = now;
        Some(self.state)
    }

    /// Last accepted state. Does not re-sample hardware.
    pub fn state(&self) -> bool {
        self.state
    }

    /// Overrides the stored state, e.g. to un-latch a momentary member or
    /// when another switch in a bank logically deactivates this one.
    pub fn force(&mut self, state: bool, now: Instant) {
        self.state = state;
        self.last_change = now;
    }
}

/// Outcome of one long-press poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum HoldPoll {
    /// No press in progress.
    Idle,
    /// Press in progress, threshold not reached (or already reported).
    Armed,
    /// Threshold crossed; reported exactly once per continuous press.
    Fired,
    /// Recorded press start lies in the future. The poller logs this and
    /// keeps running.
    Anomaly,
}

/// Long-press detector, polled periodically while a press is in progress.
///
/// `press` records the press start and re-arms the trigger; `release`
/// disarms it. `poll` reports `Fired` at most once per continuous press.
pub struct HoldTimer {
    threshold: Duration,
    pressed_at: Option<Instant>,
    fired: bool,
}

impl HoldTimer {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pressed_at: None,
            fired: false,
        }
    }

    /// Records a fresh press start and re-arms the trigger.
    pub fn press(&mut self, now: Instant) {
        self.pressed_at = Some(now);
        self.fired = false;
    }

    /// Disarms the timer; the next `press` starts a new cycle.
    pub fn release(&mut self) {
        self.pressed_at = None;
    }

    pub fn poll(&mut self, now: Instant) -> HoldPoll {
        let Some(start) = self.pressed_at else {
            return HoldPoll::Idle;
        };
        if now < start {
            return HoldPoll::Anomaly;
        }
        if !self.fired && elapsed(start, now) >= self.threshold {
            self.fired = true;
            return HoldPoll::Fired;
        }
        HoldPoll::Armed
    }
}

fn elapsed(since: Instant, now: Instant) -> Duration {
    Duration::from_ticks(now.as_ticks().saturating_sub(since.as_ticks()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn active_level_follows_pull_mode() {
        // pull-up: low is pressed
        assert!(PullMode::Up.is_active(false));
        assert!(!PullMode::Up.is_active(true));
        // pull-down: high is pressed
        assert!(PullMode::Down.is_active(true));
        assert!(!PullMode::Down.is_active(false));
    }

    #[test]
    fn switch_initial_state_respects_invert() {
        let stable = Duration::from_millis(50);
        assert!(SwitchCore::new(true, false, stable, at(0)).state());
        assert!(!SwitchCore::new(true, true, stable, at(0)).state());
        assert!(SwitchCore::new(false, true, stable, at(0)).state());
    }

    #[test]
    fn switch_accepts_stable_transition() {
        let mut sw = SwitchCore::new(false, false, Duration::from_millis(50), at(0));
        assert_eq!(sw.on_edge(true, at(100)), Some(true));
        assert!(sw.state());
    }

    #[test]
    fn switch_rejects_chatter_within_window() {
        let mut sw = SwitchCore::new(false, false, Duration::from_millis(50), at(0));
        assert_eq!(sw.on_edge(true, at(100)), Some(true));
        // bouncing back 10 ms later must be discarded
        assert_eq!(sw.on_edge(false, at(110)), None);
        assert!(sw.state());
        // and so must any number of further edges inside the window
        assert_eq!(sw.on_edge(false, at(130)), None);
        assert_eq!(sw.on_edge(false, at(149)), None);
        // once the window has passed the release goes through
        assert_eq!(sw.on_edge(false, at(151)), Some(false));
    }

    #[test]
    fn switch_same_candidate_is_not_a_transition() {
        let mut sw = SwitchCore::new(true, false, Duration::from_millis(50), at(0));
        assert_eq!(sw.on_edge(true, at(500)), None);
        assert!(sw.state());
    }

    #[test]
    fn switch_force_overrides_state() {
        let mut sw = SwitchCore::new(true, false, Duration::from_millis(50), at(0));
        sw.force(false, at(10));
        assert!(!sw.state());
    }

    #[test]
    fn hold_fires_once_per_press() {
        let mut hold = HoldTimer::new(Duration::from_millis(3000));
        assert_eq!(hold.poll(at(0)), HoldPoll::Idle);
        hold.press(at(0));
        assert_eq!(hold.poll(at(50)), HoldPoll::Armed);
        assert_eq!(hold.poll(at(2999)), HoldPoll::Armed);
        assert_eq!(hold.poll(at(3000)), HoldPoll::Fired);
        // still held: must not fire again
        assert_eq!(hold.poll(at(3050)), HoldPoll::Armed);
        assert_eq!(hold.poll(at(10_000)), HoldPoll::Armed);
    }

    #[test]
    fn hold_short_press_never_fires() {
        let mut hold = HoldTimer::new(Duration::from_millis(100));
        hold.press(at(0));
        assert_eq!(hold.poll(at(50)), HoldPoll::Armed);
        hold.release();
        assert_eq!(hold.poll(at(5000)), HoldPoll::Idle);
    }

    #[test]
    fn hold_rearms_on_next_press() {
        let mut hold = HoldTimer::new(Duration::from_millis(100));
        hold.press(at(0));
        assert_eq!(hold.poll(at(100)), HoldPoll::Fired);
        hold.release();
        hold.press(at(1000));
        assert_eq!(hold.poll(at(1050)), HoldPoll::Armed);
        assert_eq!(hold.poll(at(1100)), HoldPoll::Fired);
    }

    #[test]
    fn hold_reports_clock_anomaly() {
        let mut hold = HoldTimer::new(Duration::from_millis(100));
        hold.press(at(1000));
        assert_eq!(hold.poll(at(500)), HoldPoll::Anomaly);
        // recovers once time moves past the press start
        assert_eq!(hold.poll(at(1100)), HoldPoll::Fired);
    }
}
