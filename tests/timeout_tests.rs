// Host-side tests for single-slot timeout bookkeeping.

#![allow(dead_code)]
mod timeout {
    include!("../src/timeout.rs");
}

use std::cell::RefCell;
use std::time::Duration;
use timeout::*;

/// Records calls and keeps callbacks so tests can fire them by hand.
#[derive(Default)]
struct ManualTimers {
    next: RefCell<i32>,
    pending: RefCell<Vec<(i32, Box<dyn FnOnce()>)>>,
    cleared: RefCell<Vec<i32>>,
}

impl ManualTimers {
    fn fire_all(&self) {
        let pending: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        for (_, callback) in pending {
            callback();
        }
    }
}

impl TimerHost for ManualTimers {
    fn set(&self, _delay: Duration, callback: Box<dyn FnOnce()>) -> Option<i32> {
        let mut next = self.next.borrow_mut();
        *next += 1;
        self.pending.borrow_mut().push((*next, callback));
        Some(*next)
    }

    fn clear(&self, handle: i32) {
        self.cleared.borrow_mut().push(handle);
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

#[test]
fn rearming_clears_the_previous_timeout() {
    let timers = ManualTimers::default();
    let hidden = std::rc::Rc::new(RefCell::new(Vec::new()));
    let mut banner = Timeout::default();

    let log = hidden.clone();
    banner.arm(&timers, Duration::from_secs(5), move || log.borrow_mut().push("first"));
    let log = hidden.clone();
    banner.arm(&timers, Duration::from_secs(5), move || log.borrow_mut().push("second"));

    assert_eq!(*timers.cleared.borrow(), vec![1]);
    timers.fire_all();
    // only the latest message's timer may hide the banner
    assert_eq!(*hidden.borrow(), vec!["second"]);
}

#[test]
fn cancel_is_idempotent() {
    let timers = ManualTimers::default();
    let mut t = Timeout::default();
    t.arm(&timers, Duration::from_millis(10), || {});
    t.cancel(&timers);
    t.cancel(&timers);
    assert_eq!(*timers.cleared.borrow(), vec![1]);
    assert!(timers.pending.borrow().is_empty());
}
