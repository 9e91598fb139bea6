//! LAZY combinator - deferred runtype construction for recursive definitions

use std::fmt;
use std::sync::OnceLock;

use runtypes_value::Value;

use crate::foundation::{Check, Reflect, Runtype, RuntypeId, Validation, Visited, inner_validate};

// ============================================================================
// LAZY
// ============================================================================

type Thunk = Box<dyn Fn() -> Runtype + Send + Sync>;

/// A runtype produced by a thunk on first use.
///
/// Resolution is memoized. The thunk runs outside the lock, so concurrent
/// first uses may each call it; the first published result is kept.
/// Resolving may also call the thunks of lazy runtypes it resolves to.
pub struct Lazy {
    owner: RuntypeId,
    thunk: Thunk,
    resolved: OnceLock<Runtype>,
}

impl Lazy {
    /// The runtype the thunk produces.
    ///
    /// # Panics
    ///
    /// If the thunk returns the lazy runtype itself, or a chain of lazy
    /// runtypes that leads back to it.
    pub fn resolve(&self) -> Runtype {
        if let Some(resolved) = self.resolved.get() {
            return resolved.clone();
        }
        let target = (self.thunk)();
        self.assert_productive(&target);
        let published = self.resolved.get_or_init(|| {
            tracing::debug!(lazy = %self.owner, target = %target.id(), tag = %target.reflect().tag(), "lazy runtype resolved");
            target
        });
        published.clone()
    }

    /// Follows lazy-to-lazy resolution from `target` without publishing.
    fn assert_productive(&self, target: &Runtype) {
        let mut chain = vec![self.owner];
        let mut next = target.clone();
        while let Reflect::Lazy(inner) = next.reflect() {
            assert!(
                !chain.contains(&next.id()),
                "lazy runtype {} resolved to itself; the thunk must build a new runtype",
                self.owner
            );
            chain.push(next.id());
            let following = match inner.resolved.get() {
                Some(resolved) => resolved.clone(),
                None => (inner.thunk)(),
            };
            next = following;
        }
    }

    /// `true` once the thunk has run and its result was published.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("owner", &self.owner)
            .field("resolved", &self.resolved.get().map(Runtype::id))
            .finish_non_exhaustive()
    }
}

impl Check for Lazy {
    fn check(&self, value: &Value, visited: &mut Visited) -> Validation {
        inner_validate(&self.resolve(), value, visited)
    }
}

/// Defers construction of a runtype until it is first used.
///
/// This is how recursive runtypes are written:
///
/// ```rust
/// use std::sync::LazyLock;
/// use runtypes_validator::prelude::*;
///
/// static TREE: LazyLock<Runtype> = LazyLock::new(|| lazy(|| array(TREE.clone())));
///
/// let leaf = Value::array([]);
/// assert!(TREE.guard(&Value::array([leaf.clone(), Value::array([leaf])])));
/// assert!(!TREE.guard(&Value::array([Value::from(1)])));
/// ```
pub fn lazy<F>(thunk: F) -> Runtype
where
    F: Fn() -> Runtype + Send + Sync + 'static,
{
    let id = RuntypeId::next();
    Runtype::with_id(
        id,
        Reflect::Lazy(Lazy {
            owner: id,
            thunk: Box::new(thunk),
            resolved: OnceLock::new(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use std::sync::LazyLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn resolves_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let rt = lazy(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            number()
        });
        let Reflect::Lazy(l) = rt.reflect() else {
            panic!("expected a lazy runtype");
        };
        assert!(!l.is_resolved());

        assert!(rt.guard(&Value::from(1)));
        assert!(!rt.guard(&Value::from("1")));
        assert_eq!(rt.tag(), Tag::Number);
        assert!(l.is_resolved());
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_pass_through() {
        let rt = lazy(string);
        let failure = rt.validate(&Value::Null).unwrap_err();
        assert_eq!(failure.code, Failcode::TypeIncorrect);
        assert_eq!(failure.message, "Expected string, but was null");
    }

    #[test]
    fn recursive_object() {
        static LIST: LazyLock<Runtype> = LazyLock::new(|| {
            lazy(|| object! { head: number(), tail: LIST.clone().nullable() })
        });

        let list = Value::object([
            ("head", Value::from(1)),
            (
                "tail",
                Value::object([("head", Value::from(2)), ("tail", Value::Null)]),
            ),
        ]);
        assert!(LIST.guard(&list));

        let broken = Value::object([
            ("head", Value::from(1)),
            ("tail", Value::object([("head", Value::from("2")), ("tail", Value::Null)])),
        ]);
        assert!(!LIST.guard(&broken));
    }

    #[test]
    fn concurrent_first_use_publishes_one_runtype() {
        use std::sync::Barrier;

        let rt = lazy(|| array(number()));
        let Reflect::Lazy(l) = rt.reflect() else {
            panic!("expected a lazy runtype");
        };
        let value = Value::array([Value::from(1), Value::from(2)]);
        let barrier = Barrier::new(8);

        let outcomes: Vec<(bool, RuntypeId)> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        (rt.guard(&value), l.resolve().id())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(outcomes.iter().all(|(ok, _)| *ok));
        let published = l.resolve().id();
        assert!(outcomes.iter().all(|(_, id)| *id == published));
    }

    #[test]
    #[should_panic(expected = "resolved to itself")]
    fn mutual_references_panic() {
        static A: LazyLock<Runtype> = LazyLock::new(|| lazy(|| B.clone()));
        static B: LazyLock<Runtype> = LazyLock::new(|| lazy(|| A.clone()));
        let _ = A.tag();
    }

    #[test]
    fn chains_of_lazies_resolve() {
        let inner = lazy(number);
        let outer = {
            let inner = inner.clone();
            lazy(move || inner.clone())
        };
        assert_eq!(outer.tag(), Tag::Number);
        assert!(outer.guard(&Value::from(1)));
    }

    #[test]
    #[should_panic(expected = "resolved to itself")]
    fn self_reference_panics() {
        static SELF: LazyLock<Runtype> = LazyLock::new(|| lazy(|| SELF.clone()));
        SELF.guard(&Value::Null);
    }
}
