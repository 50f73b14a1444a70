//! Thread-safe handle around an [`Engine`].
//!
//! An engine expects a single writer. When inputs can arrive from more than one
//! thread, [`SharedEngine`] serializes them behind one mutex that covers both the
//! state mutation and the publication that follows it.

use super::calculator::Engine;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable, mutex-guarded engine.
///
/// # Example
///
/// ```rust
/// use keypad_calc::engine::SharedEngine;
/// use keypad_calc::Engine;
///
/// let shared = SharedEngine::new(Engine::default());
/// let worker = shared.clone();
/// std::thread::spawn(move || worker.with(|engine| engine.number_pressed("9")))
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.with(|engine| engine.result().to_string()), "9");
/// ```
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Runs `f` with exclusive access to the engine.
    ///
    /// A subscriber that panicked mid-publication leaves the engine usable, so a
    /// poisoned lock is recovered rather than propagated.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Mode;
    use std::thread;

    #[test]
    fn concurrent_digit_entry_is_serialized() {
        let shared = SharedEngine::new(Engine::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = shared.clone();
                thread::spawn(move || {
                    for _ in 0..10 {
                        engine.with(|e| e.number_pressed("1"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with(|engine| {
            assert_eq!(engine.mode(), Mode::EnteringNumber);
            assert_eq!(engine.state().current_input.len(), 80);
        });
    }
}
