use std::cell::Cell;
use std::rc::Rc;
use web_time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or since an arbitrary origin for simulated clocks.
pub type Millis = u64;

pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Wall-clock time, also usable from the browser.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis().try_into().unwrap_or(Millis::MAX))
    }
}

/// Clock that only moves when told to; clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) {
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.get()
    }
}
