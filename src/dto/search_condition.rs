use serde::Deserialize;

use crate::query::dynamic::{age_goe, age_loe, team_name_eq, username_eq};
use crate::query::Condition;

/// Optional member search filters, combined conjunctively
///
/// Every field is optional; blank strings count as absent so an empty
/// query-string parameter does not filter on `''`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    /// Inclusive minimum age
    pub age_goe: Option<i32>,
    /// Inclusive maximum age
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn to_condition(&self) -> Condition {
        [
            username_eq(non_blank(&self.username)),
            team_name_eq(non_blank(&self.team_name)),
            age_goe(self.age_goe),
            age_loe(self.age_loe),
        ]
        .into_iter()
        .collect()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QMember, QTeam};

    #[test]
    fn empty_condition_is_unconstrained() {
        assert!(MemberSearchCondition::default()
            .to_condition()
            .is_unconstrained());
    }

    #[test]
    fn blank_strings_are_ignored() {
        let condition = MemberSearchCondition {
            username: Some("  ".to_string()),
            team_name: Some(String::new()),
            ..Default::default()
        };

        assert!(condition.to_condition().is_unconstrained());
    }

    #[test]
    fn present_fields_are_conjoined_in_order() {
        let m = QMember::member();
        let t = QTeam::team();
        let condition = MemberSearchCondition {
            team_name: Some("teamB".to_string()),
            age_goe: Some(35),
            age_loe: Some(40),
            ..Default::default()
        };

        let expected = t.name.eq("teamB").and(m.age.goe(35)).and(m.age.loe(40));
        assert_eq!(condition.to_condition().into_predicate(), Some(expected));
    }

    #[test]
    fn deserializes_from_partial_input() {
        let condition: MemberSearchCondition =
            serde_json::from_str(r#"{"username":"member1"}"#).unwrap();

        assert_eq!(condition.username.as_deref(), Some("member1"));
        assert_eq!(condition.age_goe, None);
    }
}
