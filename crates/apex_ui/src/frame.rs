//! Animation-frame scheduling.
//!
//! A [`FrameLoop`] is the headless stand-in for `requestAnimationFrame`:
//! callbacks stay registered until their [`FrameHandle`] is cancelled or
//! dropped, and every [`FrameLoop::tick`] runs each live callback once with
//! the frame timestamp in milliseconds.
//!
//! ```text
//! mount ──► request() ──► FrameHandle ──(drop)──► callback removed
//!                 │
//!   tick(t) ──────┴──► callback(t) on every frame in between
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Callback = Box<dyn FnMut(f64) + Send>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: Vec<(u64, Callback)>,
    /// Ids cancelled while their callback was checked out by `tick`.
    cancelled: Vec<u64>,
    /// Ids checked out by the running `tick`.
    in_flight: Vec<u64>,
    frames: u64,
}

/// Shared registry of per-frame callbacks.
///
/// Cloning yields another handle to the same loop.
#[derive(Clone, Default)]
pub struct FrameLoop {
    inner: Arc<Mutex<Registry>>,
}

impl FrameLoop {
    /// Creates an empty frame loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to run on every tick until the handle is dropped.
    #[must_use = "dropping the handle cancels the callback"]
    pub fn request<F>(&self, callback: F) -> FrameHandle
    where
        F: FnMut(f64) + Send + 'static,
    {
        let mut registry = self.inner.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.callbacks.push((id, Box::new(callback)));
        drop(registry);

        tracing::trace!(id, "frame callback registered");
        FrameHandle {
            id,
            registry: Arc::downgrade(&self.inner),
            active: true,
        }
    }

    /// Runs every live callback once. Returns how many ran.
    ///
    /// The registry lock is released while callbacks run, so callbacks may
    /// request or cancel frames themselves.
    pub fn tick(&self, time_ms: f64) -> usize {
        let mut batch = {
            let mut registry = self.inner.lock();
            registry.frames += 1;
            let batch = std::mem::take(&mut registry.callbacks);
            registry.in_flight = batch.iter().map(|(id, _)| *id).collect();
            batch
        };

        let mut ran = 0;
        for (id, callback) in &mut batch {
            if self.inner.lock().cancelled.contains(id) {
                continue;
            }
            callback(time_ms);
            ran += 1;
        }

        let mut registry = self.inner.lock();
        let cancelled = std::mem::take(&mut registry.cancelled);
        registry.in_flight.clear();
        batch.retain(|(id, _)| !cancelled.contains(id));
        // Callbacks requested during this tick were pushed behind; keep order.
        let requested = std::mem::replace(&mut registry.callbacks, batch);
        registry.callbacks.extend(requested);
        ran
    }

    /// Number of live callbacks.
    #[must_use]
    pub fn pending(&self) -> usize {
        let registry = self.inner.lock();
        registry.callbacks.len() + registry.in_flight.len() - registry.cancelled.len()
    }

    /// Number of ticks run so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.inner.lock().frames
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("pending", &self.pending())
            .field("frames", &self.frame_count())
            .finish()
    }
}

/// Keeps a frame callback alive. Dropping it cancels the callback.
#[derive(Debug)]
pub struct FrameHandle {
    id: u64,
    registry: Weak<Mutex<Registry>>,
    active: bool,
}

impl FrameHandle {
    /// Returns true until the callback is cancelled or its loop is gone.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }

    /// Cancels the callback. Idempotent.
    pub fn cancel(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.lock();
        let before = registry.callbacks.len();
        registry.callbacks.retain(|(id, _)| *id != self.id);
        if registry.callbacks.len() == before && registry.in_flight.contains(&self.id) {
            registry.cancelled.push(self.id);
        }
        tracing::trace!(id = self.id, "frame callback cancelled");
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_callbacks_run_until_dropped() {
        let frames = FrameLoop::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let handle = frames.request(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        frames.tick(16.0);
        frames.tick(32.0);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(frames.pending(), 1);

        drop(handle);
        frames.tick(48.0);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_callback_receives_timestamp() {
        let frames = FrameLoop::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _handle = frames.request(move |t| sink.lock().push(t));

        frames.tick(100.0);
        frames.tick(116.5);
        assert_eq!(*seen.lock(), vec![100.0, 116.5]);
    }

    #[test]
    fn test_cancel_during_tick_stops_later_callback() {
        let frames = FrameLoop::new();
        let count = Arc::new(AtomicUsize::new(0));

        let victim_slot: Arc<Mutex<Option<FrameHandle>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&victim_slot);
        let _killer = frames.request(move |_| {
            slot.lock().take();
        });
        let counter = Arc::clone(&count);
        let victim = frames.request(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        *victim_slot.lock() = Some(victim);

        assert_eq!(frames.tick(0.0), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn test_handle_outlives_loop() {
        let frames = FrameLoop::new();
        let mut handle = frames.request(|_| {});
        drop(frames);
        assert!(!handle.is_active());
        handle.cancel();
    }
}
