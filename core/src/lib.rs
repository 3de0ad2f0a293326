//! # Taskboard Core
//!
//! Core traits and types for the Taskboard architecture.
//!
//! This crate provides the fundamental abstractions for building the todo
//! application as a set of composable, unidirectional features.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature (the list view, the edit form)
//! - **Action**: All possible inputs to a reducer, as a tagged union
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies, passed down the call chain
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment

// Re-export commonly used types
pub use smallvec::SmallVec;

pub use effect::Effect;
pub use reducer::{Effects, Reducer};

/// Reducer module - The core trait for feature logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all feature logic and are deterministic and testable. A
/// reducer never performs I/O itself; it returns [`Effect`] descriptions for
/// the runtime to execute.
pub mod reducer {
    use crate::effect::Effect;
    use smallvec::SmallVec;

    /// Effects returned from a single reducer invocation.
    ///
    /// Most invocations produce zero or one effect, so the vector is inlined.
    pub type Effects<Action> = SmallVec<[Effect<Action>; 4]>;

    /// The Reducer trait - core abstraction for feature logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for ListReducer {
    ///     type State = ListState;
    ///     type Action = ListAction;
    ///     type Environment = AppEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut ListState,
    ///         action: ListAction,
    ///         env: &AppEnvironment,
    ///     ) -> Effects<ListAction> {
    ///         match action {
    ///             ListAction::Activated => {
    ///                 // Feature logic here
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action against current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Effects<Self::Action>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable and mappable.
pub mod effect {
    use futures::future::BoxFuture;
    use std::future::Future;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, returned from reducers and executed by the Store
    /// runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Run effects in parallel
        Parallel(Vec<Effect<Action>>),

        /// Run effects sequentially
        Sequential(Vec<Effect<Action>>),

        /// Delayed action (for timeouts, retries)
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(BoxFuture<'static, Option<Action>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Box an async computation into an effect
        ///
        /// The future's resulting action (if any) is fed back into the reducer.
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Combine effects to run in parallel
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Embed this effect into a parent action type
        ///
        /// This is the composition seam between features: a child reducer
        /// returns `Effect<ChildAction>`, and the parent wraps each produced
        /// action with its own constructor.
        pub fn map<Parent, F>(self, f: F) -> Effect<Parent>
        where
            Action: Send + 'static,
            Parent: Send + 'static,
            F: Fn(Action) -> Parent + Clone + Send + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Sequential(effects) => Effect::Sequential(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(fut) => {
                    Effect::Future(Box::pin(async move { fut.await.map(f) }))
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Child {
        Done(u32),
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Parent {
        Child(Child),
    }

    #[test]
    fn effect_debug_formats_variants() {
        let none: Effect<Child> = Effect::None;
        assert_eq!(format!("{none:?}"), "Effect::None");

        let fut = Effect::<Child>::future(async { None });
        assert_eq!(format!("{fut:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn map_rewraps_delay_action() {
        let effect = Effect::Delay {
            duration: Duration::from_millis(5),
            action: Box::new(Child::Done(7)),
        };

        match effect.map(Parent::Child) {
            Effect::Delay { duration, action } => {
                assert_eq!(duration, Duration::from_millis(5));
                assert_eq!(*action, Parent::Child(Child::Done(7)));
            },
            other => panic!("expected Delay, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn map_rewraps_future_output() {
        let effect = Effect::future(async { Some(Child::Done(3)) });

        match effect.map(Parent::Child) {
            Effect::Future(fut) => {
                assert_eq!(fut.await, Some(Parent::Child(Child::Done(3))));
            },
            other => panic!("expected Future, got {other:?}"),
        }
    }

    #[test]
    fn merge_and_chain_group_effects() {
        let merged: Effect<Child> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(merged, Effect::Parallel(ref e) if e.len() == 2));

        let chained: Effect<Child> = Effect::chain(vec![Effect::None]);
        assert!(matches!(chained, Effect::Sequential(ref e) if e.len() == 1));
    }
}
