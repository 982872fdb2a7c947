//! Specification pattern for composable predicates
//!
//! Listing filters are expressed as specifications so that callers can
//! combine them with boolean logic (and, or, not).

use std::sync::Arc;

/// A predicate over `T`
pub trait Specification<T>: Send + Sync {
    /// Check if the entity satisfies this specification
    fn is_satisfied_by(&self, entity: &T) -> bool;

    /// Combine with another specification using AND
    fn and<S: Specification<T> + 'static>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
    {
        AndSpecification {
            left: Arc::new(self),
            right: Arc::new(other),
        }
    }

    /// Combine with another specification using OR
    fn or<S: Specification<T> + 'static>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + 'static,
    {
        OrSpecification {
            left: Arc::new(self),
            right: Arc::new(other),
        }
    }

    /// Negate this specification
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + 'static,
    {
        NotSpecification {
            spec: Arc::new(self),
        }
    }

    /// Select the satisfying entities, keeping their relative order
    fn select<'a>(&self, entities: &'a [T]) -> Vec<&'a T> {
        entities
            .iter()
            .filter(|entity| self.is_satisfied_by(entity))
            .collect()
    }
}

pub struct AndSpecification<T> {
    left: Arc<dyn Specification<T>>,
    right: Arc<dyn Specification<T>>,
}

impl<T> Specification<T> for AndSpecification<T>
where
    T: Send + Sync,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.left.is_satisfied_by(entity) && self.right.is_satisfied_by(entity)
    }
}

pub struct OrSpecification<T> {
    left: Arc<dyn Specification<T>>,
    right: Arc<dyn Specification<T>>,
}

impl<T> Specification<T> for OrSpecification<T>
where
    T: Send + Sync,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        self.left.is_satisfied_by(entity) || self.right.is_satisfied_by(entity)
    }
}

pub struct NotSpecification<T> {
    spec: Arc<dyn Specification<T>>,
}

impl<T> Specification<T> for NotSpecification<T>
where
    T: Send + Sync,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        !self.spec.is_satisfied_by(entity)
    }
}

/// A specification backed by a closure
pub struct PredicateSpec<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    predicate: F,
    _phantom: std::marker::PhantomData<fn(&T)>,
}

impl<T, F> Specification<T> for PredicateSpec<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }
}

/// Helper function to create a specification from a closure
pub fn spec<T, F>(predicate: F) -> PredicateSpec<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    PredicateSpec {
        predicate,
        _phantom: std::marker::PhantomData,
    }
}
