//! Reference-counted document effects
//!
//! Gestures and fullscreen windows change page-wide state: text selection is
//! suppressed while dragging, background scroll is locked in fullscreen, and
//! global pointer listeners are attached for the length of a gesture. Several
//! windows may want the same effect at once, so each effect is counted: the
//! first [`LockGuard`] applies it through the [`DocumentHost`], dropping the
//! last one reverts it. Because release happens in `Drop`, every exit path
//! (pointer up, blur, close, removal, engine teardown) restores the page.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A page-wide change owned by the interaction lock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentEffect {
    /// `user-select: none` on the body (all vendor prefixes)
    SuppressSelection,
    /// `overflow: hidden` on the body
    LockScroll,
    /// Capturing pointer move/up listeners on the document plus window
    /// mouse-up and blur listeners
    CapturePointer,
}

impl DocumentEffect {
    /// Every effect
    pub const ALL: [DocumentEffect; 3] = [
        DocumentEffect::SuppressSelection,
        DocumentEffect::LockScroll,
        DocumentEffect::CapturePointer,
    ];

    fn index(self) -> usize {
        match self {
            DocumentEffect::SuppressSelection => 0,
            DocumentEffect::LockScroll => 1,
            DocumentEffect::CapturePointer => 2,
        }
    }
}

/// The page the effects are applied to
///
/// Implemented with `web-sys` in the browser binding and with in-memory
/// fakes in tests. `apply` is only called on 0 -> 1 and 1 -> 0 transitions.
pub trait DocumentHost {
    fn apply(&mut self, effect: DocumentEffect, active: bool);
}

/// Host that ignores every effect
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl DocumentHost for NullHost {
    fn apply(&mut self, _effect: DocumentEffect, _active: bool) {}
}

struct LockState {
    counts: [usize; 3],
    host: Box<dyn DocumentHost>,
}

/// Shared counter of active document effects
#[derive(Clone)]
pub struct InteractionLock {
    inner: Rc<RefCell<LockState>>,
}

impl Default for InteractionLock {
    fn default() -> Self {
        Self::new(NullHost)
    }
}

impl fmt::Debug for InteractionLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("InteractionLock")
            .field("counts", &state.counts)
            .finish()
    }
}

impl InteractionLock {
    /// Create a lock that applies effects through `host`
    pub fn new(host: impl DocumentHost + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LockState {
                counts: [0; 3],
                host: Box::new(host),
            })),
        }
    }

    /// Take a hold on `effect`, applying it if nobody else holds it
    pub fn acquire(&self, effect: DocumentEffect) -> LockGuard {
        let mut state = self.inner.borrow_mut();
        let count = &mut state.counts[effect.index()];
        *count += 1;
        if *count == 1 {
            tracing::debug!(?effect, "document effect applied");
            state.host.apply(effect, true);
        }
        LockGuard {
            inner: Rc::clone(&self.inner),
            effect,
        }
    }

    /// Number of outstanding guards for `effect`
    pub fn count(&self, effect: DocumentEffect) -> usize {
        self.inner.borrow().counts[effect.index()]
    }

    /// Check if `effect` is currently applied
    pub fn is_active(&self, effect: DocumentEffect) -> bool {
        self.count(effect) > 0
    }

    /// Check if no effect is applied
    pub fn is_idle(&self) -> bool {
        DocumentEffect::ALL.iter().all(|&e| !self.is_active(e))
    }
}

/// Scoped hold on a document effect; released on drop
#[must_use = "dropping the guard releases the effect immediately"]
pub struct LockGuard {
    inner: Rc<RefCell<LockState>>,
    effect: DocumentEffect,
}

impl LockGuard {
    /// The effect this guard holds
    pub fn effect(&self) -> DocumentEffect {
        self.effect
    }
}

impl fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("effect", &self.effect)
            .finish()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let Ok(mut state) = self.inner.try_borrow_mut() else {
            tracing::warn!(effect = ?self.effect, "lock busy during release, effect leaked");
            return;
        };
        let count = &mut state.counts[self.effect.index()];
        *count = count.saturating_sub(1);
        if *count == 0 {
            tracing::debug!(effect = ?self.effect, "document effect released");
            state.host.apply(self.effect, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Calls(Rc<RefCell<Vec<(DocumentEffect, bool)>>>);

    impl DocumentHost for Calls {
        fn apply(&mut self, effect: DocumentEffect, active: bool) {
            self.0.borrow_mut().push((effect, active));
        }
    }

    #[test]
    fn test_first_acquire_applies_last_release_reverts() {
        let calls = Calls::default();
        let lock = InteractionLock::new(calls.clone());

        let a = lock.acquire(DocumentEffect::SuppressSelection);
        let b = lock.acquire(DocumentEffect::SuppressSelection);
        assert_eq!(lock.count(DocumentEffect::SuppressSelection), 2);
        assert_eq!(
            *calls.0.borrow(),
            vec![(DocumentEffect::SuppressSelection, true)]
        );

        drop(a);
        assert!(lock.is_active(DocumentEffect::SuppressSelection));
        assert_eq!(calls.0.borrow().len(), 1);

        drop(b);
        assert!(lock.is_idle());
        assert_eq!(
            *calls.0.borrow(),
            vec![
                (DocumentEffect::SuppressSelection, true),
                (DocumentEffect::SuppressSelection, false),
            ]
        );
    }

    #[test]
    fn test_effects_counted_independently() {
        let lock = InteractionLock::default();
        let scroll = lock.acquire(DocumentEffect::LockScroll);
        let capture = lock.acquire(DocumentEffect::CapturePointer);

        drop(scroll);
        assert!(!lock.is_active(DocumentEffect::LockScroll));
        assert!(lock.is_active(DocumentEffect::CapturePointer));
        assert_eq!(capture.effect(), DocumentEffect::CapturePointer);

        drop(capture);
        assert!(lock.is_idle());
    }

    #[test]
    fn test_guards_outlive_lock_handle() {
        let calls = Calls::default();
        let guard = {
            let lock = InteractionLock::new(calls.clone());
            lock.acquire(DocumentEffect::LockScroll)
        };
        drop(guard);
        assert_eq!(
            calls.0.borrow().last(),
            Some(&(DocumentEffect::LockScroll, false))
        );
    }
}
