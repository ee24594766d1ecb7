use std::marker::PhantomData;

use super::expr::{CaseArm, Expr, NumberExpr, TypedExpr};
use super::predicate::Predicate;

/// Searched `CASE WHEN <predicate> THEN ... ELSE ... END`
///
/// The type parameter fixes the result type of every branch.
///
/// # Example
/// ```
/// use roster_api::query::{CaseBuilder, QMember, StringExpr};
///
/// let m = QMember::member();
/// let bucket: StringExpr = CaseBuilder::new()
///     .when(m.age.between(0, 20), "0-20")
///     .when(m.age.between(21, 30), "21-30")
///     .otherwise("other");
/// # let _ = bucket;
/// ```
#[derive(Debug, Clone)]
pub struct CaseBuilder<E> {
    arms: Vec<CaseArm>,
    _result: PhantomData<E>,
}

impl<E: TypedExpr> CaseBuilder<E> {
    pub fn new() -> Self {
        Self {
            arms: Vec::new(),
            _result: PhantomData,
        }
    }

    pub fn when(mut self, condition: Predicate, then: impl Into<E>) -> Self {
        self.arms
            .push(CaseArm::When(condition, then.into().into_expr()));
        self
    }

    /// Closes the expression; with no `when` arms this is just `value`
    pub fn otherwise(self, value: impl Into<E>) -> E {
        if self.arms.is_empty() {
            return value.into();
        }
        E::from_expr(Expr::Case {
            subject: None,
            arms: self.arms,
            otherwise: Box::new(value.into().into_expr()),
        })
    }
}

impl<E: TypedExpr> Default for CaseBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple `CASE <subject> WHEN <value> THEN ... END`, started from
/// [`NumberExpr::cases`]
#[derive(Debug, Clone)]
pub struct SimpleCaseBuilder<E> {
    subject: Expr,
    arms: Vec<CaseArm>,
    _result: PhantomData<E>,
}

impl<E: TypedExpr> SimpleCaseBuilder<E> {
    pub(crate) fn new(subject: Expr) -> Self {
        Self {
            subject,
            arms: Vec::new(),
            _result: PhantomData,
        }
    }

    pub fn when(mut self, value: impl Into<NumberExpr>, then: impl Into<E>) -> Self {
        self.arms.push(CaseArm::Match(
            value.into().into_expr(),
            then.into().into_expr(),
        ));
        self
    }

    pub fn otherwise(self, value: impl Into<E>) -> E {
        if self.arms.is_empty() {
            return value.into();
        }
        E::from_expr(Expr::Case {
            subject: Some(Box::new(self.subject)),
            arms: self.arms,
            otherwise: Box::new(value.into().into_expr()),
        })
    }
}
