//! Realtime driver
//!
//! Two threads share one session behind a mutex:
//! - the tick thread runs fixed 60 Hz steps, contact detection and event routing
//! - the timer thread feeds wall-clock time to the spawn timers and the one-second clock
//!
//! Every entry point takes the lock, so the session's handlers never
//! interleave. Shutdown stops both threads before tearing the session down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::EventRouter;
use super::overlap::OverlapDetector;
use crate::consts::{MAX_SUBSTEPS, SIM_DT, TIMER_RESOLUTION};
use crate::sim::{GameSession, PointerEvent};

/// Session handle shared between the runtime threads and the caller
#[derive(Clone)]
pub struct SharedSession(Arc<Mutex<GameSession>>);

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    /// Lock the session. A panic on another thread does not make the
    /// session unusable, so a poisoned lock is recovered.
    pub fn lock(&self) -> MutexGuard<'_, GameSession> {
        self.0.lock().unwrap_or_else(|poisoned| {
            log::warn!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn handle_pointer(&self, event: PointerEvent) {
        self.lock().handle_pointer(event);
    }

    pub fn is_over(&self) -> bool {
        self.lock().is_over()
    }
}

/// Hook run on the tick thread before every step, under the session lock
pub type TickHook = Box<dyn FnMut(&mut GameSession) + Send>;

pub struct Runtime {
    session: SharedSession,
    stop: Arc<AtomicBool>,
    tick_thread: Option<JoinHandle<()>>,
    timer_thread: Option<JoinHandle<()>>,
    router: Arc<Mutex<EventRouter>>,
}

impl Runtime {
    /// Spawn the tick and timer threads for `session`
    pub fn start(session: SharedSession, router: EventRouter, before_tick: Option<TickHook>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let router = Arc::new(Mutex::new(router));

        let tick_thread = {
            let session = session.clone();
            let stop = stop.clone();
            let router = router.clone();
            thread::spawn(move || tick_loop(session, stop, router, before_tick))
        };
        let timer_thread = {
            let session = session.clone();
            let stop = stop.clone();
            thread::spawn(move || timer_loop(session, stop))
        };

        log::info!("Runtime started");
        Self {
            session,
            stop,
            tick_thread: Some(tick_thread),
            timer_thread: Some(timer_thread),
            router,
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::Acquire)
    }

    /// Stop both threads, wait for them, then tear the session down.
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        for handle in [self.tick_thread.take(), self.timer_thread.take()]
            .into_iter()
            .flatten()
        {
            if handle.join().is_err() {
                log::error!("Runtime thread panicked");
            }
        }

        let events = {
            let mut session = self.session.lock();
            if session.is_torn_down() {
                return;
            }
            session.teardown();
            session.drain_events()
        };
        lock_router(&self.router).dispatch(&events);
        log::info!("Runtime stopped");
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn lock_router(router: &Mutex<EventRouter>) -> MutexGuard<'_, EventRouter> {
    router.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn tick_loop(
    session: SharedSession,
    stop: Arc<AtomicBool>,
    router: Arc<Mutex<EventRouter>>,
    mut before_tick: Option<TickHook>,
) {
    let step = Duration::from_secs_f32(SIM_DT);
    let mut detector = OverlapDetector::new();
    let mut last = Instant::now();
    let mut accumulator = Duration::ZERO;

    while !stop.load(Ordering::Acquire) {
        let now = Instant::now();
        accumulator += now - last;
        last = now;

        let mut substeps = 0;
        while accumulator >= step && substeps < MAX_SUBSTEPS {
            accumulator -= step;
            substeps += 1;

            let events = {
                let mut s = session.lock();
                if let Some(hook) = before_tick.as_mut() {
                    hook(&mut *s);
                }
                s.tick();
                for contact in detector.detect(&s) {
                    s.handle_contact(contact);
                }
                s.drain_events()
            };
            lock_router(&router).dispatch(&events);
        }
        // Too far behind: drop the backlog rather than spiral
        if substeps == MAX_SUBSTEPS {
            accumulator = Duration::ZERO;
        }

        thread::sleep(step.saturating_sub(accumulator));
    }
    log::debug!("Tick thread exiting");
}

fn timer_loop(session: SharedSession, stop: Arc<AtomicBool>) {
    let mut last = Instant::now();
    while !stop.load(Ordering::Acquire) {
        thread::sleep(TIMER_RESOLUTION);
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;
        session.lock().advance_clock(dt);
    }
    log::debug!("Timer thread exiting");
}
