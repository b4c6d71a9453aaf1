use crate::*;

/// Period of the timer tick.
pub const TICK_PERIOD: Millis = 250;
/// Period of an auto-assist step at normal speed.
pub const ASSIST_PERIOD: Millis = 300;

/// Fixed-period scheduler for [`Action::Tick`] and [`Action::AssistStep`].
///
/// Hosts call [`Driver::poll`] from whatever loop they have; each timer fires at most once per poll, so a late poll
/// never produces a burst of catch-up steps.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    next_tick: Option<Millis>,
    next_assist: Option<Millis>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn assist_period(speed: AssistSpeed) -> Millis {
        ASSIST_PERIOD / speed.multiplier()
    }

    /// Earliest time a timer is due, if any is armed.
    pub fn next_due(&self) -> Option<Millis> {
        match (self.next_tick, self.next_assist) {
            (Some(tick), Some(assist)) => Some(tick.min(assist)),
            (tick, assist) => tick.or(assist),
        }
    }

    pub fn poll<C: Clock>(&mut self, session: &mut Session<C>) -> Vec<SessionEvent> {
        let now = session.now();
        let mut events = Vec::new();

        let state = session.state();
        let running = state.status == GameStatus::Playing && !state.paused;
        let assisting = running && state.preferences.auto_assist;
        let assist_period = Self::assist_period(state.preferences.assist_speed);

        if Self::fire(&mut self.next_tick, running, now, TICK_PERIOD) {
            events.extend(session.dispatch(Action::Tick));
        }
        if Self::fire(&mut self.next_assist, assisting, now, assist_period) {
            events.extend(session.dispatch(Action::AssistStep));
        }
        events
    }

    /// Arms, disarms or fires one timer.
    fn fire(due: &mut Option<Millis>, active: bool, now: Millis, period: Millis) -> bool {
        match *due {
            _ if !active => {
                *due = None;
                false
            }
            Some(at) if at <= now => {
                *due = Some(now + period);
                true
            }
            Some(_) => false,
            None => {
                *due = Some(now + period);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> Session<ManualClock> {
        let config = SessionConfig {
            seed: Some(11),
            ..SessionConfig::default()
        };
        let mut session = Session::new(config, ManualClock::new(0)).unwrap();
        session.open((4, 4));
        session
    }

    #[test]
    fn assist_period_scales_with_speed() {
        assert_eq!(Driver::assist_period(AssistSpeed::X1), 300);
        assert_eq!(Driver::assist_period(AssistSpeed::X4), 75);
        assert_eq!(Driver::assist_period(AssistSpeed::X16), 18);
    }

    #[test]
    fn idle_session_arms_nothing() {
        let config = SessionConfig::default();
        let mut session = Session::new(config, ManualClock::new(0)).unwrap();
        let mut driver = Driver::new();

        assert!(driver.poll(&mut session).is_empty());
        assert_eq!(driver.next_due(), None);
    }

    #[test]
    fn tick_fires_once_per_period() {
        let mut session = started();
        let clock = session.clock().clone();
        let mut driver = Driver::new();

        driver.poll(&mut session);
        assert_eq!(driver.next_due(), Some(250));

        clock.set(1_000);
        driver.poll(&mut session);
        assert_eq!(session.state().timer_seconds, 1.0);
        assert_eq!(driver.next_due(), Some(1_250));

        clock.set(1_100);
        driver.poll(&mut session);
        assert_eq!(session.state().timer_seconds, 1.0);
    }

    #[test]
    fn pause_disarms_timers() {
        let mut session = started();
        let mut driver = Driver::new();
        driver.poll(&mut session);

        session.toggle_pause();
        driver.poll(&mut session);

        assert_eq!(driver.next_due(), None);
    }

    #[test]
    fn assist_steps_follow_speed() {
        let mut session = started();
        let clock = session.clock().clone();
        session.toggle_auto_assist();
        session.dispatch(Action::SetAssistSpeed(AssistSpeed::X2));
        let mut driver = Driver::new();

        driver.poll(&mut session);
        assert_eq!(driver.next_due(), Some(150));

        clock.set(100);
        assert!(driver.poll(&mut session).is_empty());

        clock.set(150);
        let events = driver.poll(&mut session);

        assert!(matches!(events[..], [SessionEvent::AssistMoved(_), ..]));
        let state = session.state();
        assert_eq!(state.assist_count, 1);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(driver.next_due(), Some(250));

        clock.set(300);
        let events = driver.poll(&mut session);
        assert!(events.iter().any(|e| matches!(e, SessionEvent::AssistMoved(_))));
        assert_eq!(session.state().assist_count, 2);
    }
}
