//! Effect-aware state store
//!
//! The reducer returns [`DispatchResult`]: whether state changed plus the
//! effects (async work) it wants performed. The store never runs effects
//! itself; the caller hands them to an effect handler.

use std::fmt::Debug;
use std::marker::PhantomData;

/// Anything that can be dispatched to a store
pub trait Action: Clone + Debug + Send + 'static {
    /// Action name for logging
    fn name(&self) -> &'static str;
}

/// Outcome of a single dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified (re-render needed)
    pub changed: bool,
    /// Effects to process after dispatch
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Effect-emitting reducer
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// Hooks around every dispatch
pub trait Middleware<A: Action> {
    fn before(&mut self, action: &A);
    fn after(&mut self, action: &A, state_changed: bool);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) {}
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Logs each processed action through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl<A: Action> Middleware<A> for TracingMiddleware {
    fn before(&mut self, action: &A) {
        tracing::trace!(action = %action.name(), "dispatching");
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        tracing::debug!(action = %action.name(), state_changed, "action processed");
    }
}

/// Single owner of application state
///
/// State only changes through [`EffectStore::dispatch`].
pub struct EffectStore<S, A, E, M = NoopMiddleware>
where
    A: Action,
    M: Middleware<A>,
{
    state: S,
    reducer: EffectReducer<S, A, E>,
    middleware: M,
    _marker: PhantomData<(A, E)>,
}

impl<S, A: Action, E> EffectStore<S, A, E, NoopMiddleware> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A, E, M> EffectStore<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn with_middleware(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Debug)]
    enum TestAction {
        Bump,
        Ignore,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Bump => "Bump",
                TestAction::Ignore => "Ignore",
            }
        }
    }

    fn reducer(state: &mut u32, action: TestAction) -> DispatchResult<&'static str> {
        match action {
            TestAction::Bump => {
                *state += 1;
                DispatchResult::changed_with("bumped")
            }
            TestAction::Ignore => DispatchResult::unchanged(),
        }
    }

    #[derive(Clone, Default)]
    struct CountingMiddleware {
        before: Rc<Cell<usize>>,
        changed: Rc<Cell<usize>>,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) {
            self.before.set(self.before.get() + 1);
        }

        fn after(&mut self, _action: &A, state_changed: bool) {
            if state_changed {
                self.changed.set(self.changed.get() + 1);
            }
        }
    }

    #[test]
    fn test_dispatch_returns_effects() {
        let mut store = EffectStore::new(0u32, reducer);

        let result = store.dispatch(TestAction::Bump);
        assert!(result.changed);
        assert_eq!(result.effects, vec!["bumped"]);
        assert_eq!(*store.state(), 1);

        let result = store.dispatch(TestAction::Ignore);
        assert!(!result.changed);
        assert!(!result.has_effects());
    }

    #[test]
    fn test_middleware_sees_every_dispatch() {
        let counts = CountingMiddleware::default();
        let mut store = EffectStore::with_middleware(0u32, reducer, counts.clone());
        store.dispatch(TestAction::Bump);
        store.dispatch(TestAction::Ignore);
        store.dispatch(TestAction::Bump);

        assert_eq!(counts.before.get(), 3);
        assert_eq!(counts.changed.get(), 2);
    }
}
