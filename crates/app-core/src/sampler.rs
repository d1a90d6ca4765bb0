//! Periodic gesture sampling — the bridge between an external vision
//! classifier and the render loop.
//!
//! The classifier runs on a dedicated worker thread at a fixed cadence.
//! Calls are serialized on that thread, so at most one classification is
//! ever in flight; a tick that would start while the previous attempt is
//! still running is absorbed by the loop. Every completed attempt publishes
//! exactly one immutable snapshot — the classifier's answer on success, a
//! neutral fallback on any failure — so a flaky service can never wedge the
//! render loop on a stale state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use instant::Instant;

use crate::constants::SAMPLE_INTERVAL_MS;

// Worker sleeps in slices so stop() is honored promptly.
const STOP_POLL_SLICE: Duration = Duration::from_millis(50);

/// One completed gesture observation. `x`/`y` are normalized to [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSample {
    pub is_open: bool,
    pub x: f32,
    pub y: f32,
}

impl GestureSample {
    /// Neutral value published when classification fails or no hand is
    /// visible: closed hand (formed tree), centered pointing.
    pub const NEUTRAL: GestureSample = GestureSample {
        is_open: false,
        x: 0.0,
        y: 0.0,
    };

    /// Copy with both axes clamped into range. The sampler applies this to
    /// every published snapshot so consumers never see out-of-range values.
    #[inline]
    pub fn clamped(self) -> GestureSample {
        GestureSample {
            is_open: self.is_open,
            x: self.x.clamp(-1.0, 1.0),
            y: self.y.clamp(-1.0, 1.0),
        }
    }
}

/// Why a classification attempt produced no usable sample.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),
    #[error("malformed classifier response: {0}")]
    Malformed(String),
    #[error("capture device unavailable: {0}")]
    Unavailable(String),
}

/// An opaque hand-gesture classifier.
///
/// Implementations may block for a camera grab and a network round trip;
/// the sampler serializes calls so an implementation never has to worry
/// about reentrancy. Errors are soft failures — the sampler substitutes
/// [`GestureSample::NEUTRAL`] and tries again on the next tick.
pub trait GestureClassifier: Send + 'static {
    fn classify(&mut self) -> Result<GestureSample, ClassifyError>;
}

struct Shared {
    // (generation, sample); the generation lets consumers distinguish a
    // fresh snapshot from the one they already applied.
    latest: Mutex<(u64, GestureSample)>,
    in_flight: AtomicBool,
    stop: AtomicBool,
}

/// Handle to the sampling worker. Dropping it (or calling [`stop`]) shuts
/// the worker down and joins it — no orphaned threads on teardown.
///
/// [`stop`]: GestureSampler::stop
pub struct GestureSampler {
    shared: Arc<Shared>,
    worker: Option<thread::JoinHandle<()>>,
}

impl GestureSampler {
    /// Start sampling at the standard cadence.
    pub fn start<C: GestureClassifier>(classifier: C) -> Self {
        Self::with_interval(classifier, Duration::from_millis(SAMPLE_INTERVAL_MS))
    }

    /// Start sampling at a custom cadence. The interval is measured from
    /// tick start; a classify call that overruns it simply delays the next
    /// attempt rather than stacking requests.
    pub fn with_interval<C: GestureClassifier>(mut classifier: C, interval: Duration) -> Self {
        let shared = Arc::new(Shared {
            latest: Mutex::new((0, GestureSample::NEUTRAL)),
            in_flight: AtomicBool::new(false),
            stop: AtomicBool::new(false),
        });
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("gesture-sampler".into())
            .spawn(move || {
                let mut device_down_logged = false;
                while !worker_shared.stop.load(Ordering::Relaxed) {
                    let started = Instant::now();

                    worker_shared.in_flight.store(true, Ordering::Release);
                    let result = classifier.classify();
                    worker_shared.in_flight.store(false, Ordering::Release);

                    let sample = match result {
                        Ok(sample) => sample.clamped(),
                        Err(ClassifyError::Unavailable(reason)) => {
                            // Degraded-but-functional: log once, keep
                            // ticking so a device that comes back is
                            // picked up without a restart.
                            if !device_down_logged {
                                log::warn!(
                                    "capture device unavailable, manual override only: {reason}"
                                );
                                device_down_logged = true;
                            }
                            GestureSample::NEUTRAL
                        }
                        Err(err) => {
                            log::warn!("gesture classification failed: {err}");
                            GestureSample::NEUTRAL
                        }
                    };

                    {
                        let mut latest = worker_shared.latest.lock().unwrap();
                        latest.0 += 1;
                        latest.1 = sample;
                    }

                    let mut remaining = interval.saturating_sub(started.elapsed());
                    while remaining > Duration::ZERO
                        && !worker_shared.stop.load(Ordering::Relaxed)
                    {
                        let slice = remaining.min(STOP_POLL_SLICE);
                        thread::sleep(slice);
                        remaining = remaining.saturating_sub(slice);
                    }
                }
            })
            .expect("spawn gesture-sampler thread");
        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Most recently completed snapshot, regardless of whether the caller
    /// has seen it before.
    pub fn latest(&self) -> GestureSample {
        self.shared.latest.lock().unwrap().1
    }

    /// Return the latest snapshot only if it is newer than `last_seen`,
    /// updating `last_seen` to match. Lets the render loop apply each
    /// sample exactly once, which is what keeps a manual override in force
    /// until a genuinely new sample arrives.
    pub fn poll(&self, last_seen: &mut u64) -> Option<GestureSample> {
        let latest = self.shared.latest.lock().unwrap();
        if latest.0 != *last_seen {
            *last_seen = latest.0;
            Some(latest.1)
        } else {
            None
        }
    }

    /// True while a classification attempt is executing.
    pub fn in_flight(&self) -> bool {
        self.shared.in_flight.load(Ordering::Acquire)
    }

    /// Stop the worker and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.shared.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for GestureSampler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Stand-in classifier for running the installation without a camera or a
/// vision service: toggles the hand state on a fixed cycle and sweeps the
/// pointing signal along slow sine arcs.
#[derive(Default)]
pub struct ScriptedClassifier {
    ticks: u32,
}

impl GestureClassifier for ScriptedClassifier {
    fn classify(&mut self) -> Result<GestureSample, ClassifyError> {
        self.ticks += 1;
        let t = self.ticks as f32 * 0.4;
        Ok(GestureSample {
            // A dozen ticks per phase: hold formed, then scatter, repeat.
            is_open: (self.ticks / 12) % 2 == 1,
            x: t.sin() * 0.6,
            y: (t * 0.7).cos() * 0.4,
        })
    }
}
