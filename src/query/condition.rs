use sqlx::{QueryBuilder, Sqlite};

use super::predicate::Predicate;

/// Accumulates predicates into a single optional filter
///
/// An empty condition means "no constraint": it renders no clause at all
/// and acts as the identity of [`Condition::and`]. This is what makes
/// composing optional search parameters safe when every one of them is
/// absent.
///
/// # Example
/// ```
/// use roster_api::query::{Condition, QMember};
///
/// let m = QMember::member();
/// let username: Option<&str> = None;
/// let age = Some(10);
///
/// let condition = Condition::new()
///     .and(username.map(|u| m.username.eq(u)))
///     .and(age.map(|a| m.age.eq(a)));
///
/// assert_eq!(condition.predicate(), Some(&m.age.eq(10)));
/// assert!(Condition::new().is_unconstrained());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    predicate: Option<Predicate>,
}

impl Condition {
    /// The always-true condition
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(self, other: impl Into<Option<Predicate>>) -> Self {
        let predicate = match (self.predicate, other.into()) {
            (Some(current), other) => Some(current.and(other)),
            (None, other) => other,
        };
        Self { predicate }
    }

    pub fn and_not(self, other: impl Into<Option<Predicate>>) -> Self {
        self.and(other.into().map(Predicate::not))
    }

    /// Disjunction
    ///
    /// On an empty condition the operand simply becomes the condition.
    pub fn or(self, other: impl Into<Option<Predicate>>) -> Self {
        let predicate = match (self.predicate, other.into()) {
            (Some(current), other) => Some(current.or(other)),
            (None, other) => other,
        };
        Self { predicate }
    }

    /// True when no predicate has been added
    pub fn is_unconstrained(&self) -> bool {
        self.predicate.is_none()
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    pub fn into_predicate(self) -> Option<Predicate> {
        self.predicate
    }

    /// Renders `<keyword><predicate>`, or nothing when unconstrained
    pub(crate) fn push_clause<'args>(&self, qb: &mut QueryBuilder<'args, Sqlite>, keyword: &str) {
        if let Some(predicate) = &self.predicate {
            qb.push(keyword);
            predicate.push_sql(qb);
        }
    }
}

impl From<Predicate> for Condition {
    fn from(predicate: Predicate) -> Self {
        Self {
            predicate: Some(predicate),
        }
    }
}

impl From<Option<Predicate>> for Condition {
    fn from(predicate: Option<Predicate>) -> Self {
        Self { predicate }
    }
}

impl FromIterator<Option<Predicate>> for Condition {
    fn from_iter<I: IntoIterator<Item = Option<Predicate>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Condition::new(), |condition, predicate| condition.and(predicate))
    }
}

impl FromIterator<Predicate> for Condition {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        iter.into_iter().map(Some).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::path::QMember;

    fn render(condition: &Condition) -> String {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT 1");
        condition.push_clause(&mut qb, " WHERE ");
        qb.sql().to_string()
    }

    #[test]
    fn empty_condition_renders_nothing() {
        assert_eq!(render(&Condition::new()), "SELECT 1");
    }

    #[test]
    fn all_absent_operands_stay_unconstrained() {
        let condition: Condition = vec![None::<Predicate>, None].into_iter().collect();

        assert!(condition.is_unconstrained());
    }

    #[test]
    fn first_absent_operand_does_not_poison_the_chain() {
        let m = QMember::member();
        let condition: Condition = vec![None, Some(m.age.eq(10))].into_iter().collect();

        assert_eq!(condition.predicate(), Some(&m.age.eq(10)));
        assert_eq!(render(&condition), "SELECT 1 WHERE m.age = ?");
    }

    #[test]
    fn present_operands_are_conjoined() {
        let m = QMember::member();
        let condition = Condition::new()
            .and(m.username.eq("member1"))
            .and(None::<Predicate>)
            .and(m.age.eq(10));

        assert_eq!(
            render(&condition),
            "SELECT 1 WHERE (m.username = ? AND m.age = ?)"
        );
    }

    #[test]
    fn or_on_empty_condition_adopts_operand() {
        let m = QMember::member();
        let condition = Condition::new().or(m.age.eq(10));

        assert_eq!(condition.into_predicate(), Some(m.age.eq(10)));
    }

    #[test]
    fn and_not_negates_operand() {
        let m = QMember::member();
        let condition = Condition::new().and_not(m.age.eq(10));

        assert_eq!(render(&condition), "SELECT 1 WHERE NOT (m.age = ?)");
    }
}
