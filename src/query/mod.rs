// Typed query builder over the member/team schema
// Renders to SQL through sqlx::QueryBuilder; every value is bound, never inlined

pub mod case;
pub mod clause;
pub mod condition;
pub mod dynamic;
pub mod expr;
pub mod order;
pub mod path;
pub mod predicate;
pub mod results;
pub mod rows;
pub mod select;
pub mod subquery;

pub use case::{CaseBuilder, SimpleCaseBuilder};
pub use clause::{delete_member, update_member, DeleteClause, UpdateClause};
pub use condition::Condition;
pub use expr::{Expr, Expressions, IdExpr, NumberExpr, StringExpr, TypedExpr, Value};
pub use order::{Direction, NullHandling, OrderSpecifier};
pub use path::{QMember, QTeam};
pub use predicate::Predicate;
pub use results::{Page, QueryResults};
pub use rows::MemberWithTeam;
pub use select::{
    select, select_from_member, select_member_and_team, select_value, JoinKind, JoinTarget, Query,
};
pub use subquery::SubQuery;
