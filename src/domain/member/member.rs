use std::fmt;

use uuid::Uuid;

use crate::domain::team::Team;

/// Member entity
///
/// Owning side of the Member/Team association: `team_id` is what gets
/// persisted. The team reference is only set through
/// [`Member::with_team`] or the [`Roster`](crate::domain::roster::Roster),
/// both of which keep the team's back-reference in step.
///
/// # Example
/// ```
/// use roster_api::domain::member::Member;
/// use roster_api::domain::team::Team;
///
/// let mut team = Team::new("TeamA");
/// let member = Member::with_team("member1", 10, &mut team);
///
/// assert_eq!(member.team_id(), Some(team.id()));
/// assert!(team.contains(member.id()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    id: Uuid,
    username: Option<String>,
    age: i32,
    team_id: Option<Uuid>,
}

impl Member {
    /// Creates a member without a team
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// Creates a member with age 0
    pub fn named(username: impl Into<String>) -> Self {
        Self::new(username, 0)
    }

    /// Creates a member whose username is null
    pub fn anonymous(age: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: None,
            age,
            team_id: None,
        }
    }

    /// Creates a member already linked to `team` on both sides
    pub fn with_team(username: impl Into<String>, age: i32, team: &mut Team) -> Self {
        let mut member = Self::new(username, age);
        member.change_team(team);
        member
    }

    /// Links this member into `team`, returning the previous team id if it differed.
    ///
    /// The previous team's back-reference is not touched here; the
    /// [`Roster`](crate::domain::roster::Roster) owns the unlink step.
    pub(crate) fn change_team(&mut self, team: &mut Team) -> Option<Uuid> {
        let previous = self.team_id.replace(team.id());
        team.register(self.id);
        previous.filter(|id| *id != team.id())
    }

    pub(crate) fn clear_team(&mut self) -> Option<Uuid> {
        self.team_id.take()
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the owning team's id, if any
    pub fn team_id(&self) -> Option<Uuid> {
        self.team_id
    }

    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(
        id: Uuid,
        username: Option<String>,
        age: i32,
        team_id: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }
}

// Own fields only: printing the team would walk back into its members.
impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Member(id={}, username={}, age={})",
            self.id,
            self.username.as_deref().unwrap_or("null"),
            self.age
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_has_no_team() {
        let member = Member::new("member1", 10);

        assert_eq!(member.username(), Some("member1"));
        assert_eq!(member.age(), 10);
        assert_eq!(member.team_id(), None);
    }

    #[test]
    fn named_member_defaults_age_to_zero() {
        assert_eq!(Member::named("TeamA").age(), 0);
    }

    #[test]
    fn anonymous_member_has_null_username() {
        assert_eq!(Member::anonymous(100).username(), None);
    }

    #[test]
    fn with_team_links_both_sides() {
        let mut team = Team::new("TeamA");
        let member = Member::with_team("member1", 10, &mut team);

        assert_eq!(member.team_id(), Some(team.id()));
        assert_eq!(team.members(), &[member.id()]);
    }

    #[test]
    fn change_team_reports_previous_team() {
        let mut team_a = Team::new("TeamA");
        let mut team_b = Team::new("TeamB");
        let mut member = Member::with_team("member1", 10, &mut team_a);

        let previous = member.change_team(&mut team_b);

        assert_eq!(previous, Some(team_a.id()));
        assert!(team_b.contains(member.id()));
        // The link-only mutator leaves the old side alone.
        assert!(team_a.contains(member.id()));
    }

    #[test]
    fn change_team_to_same_team_reports_nothing() {
        let mut team = Team::new("TeamA");
        let mut member = Member::with_team("member1", 10, &mut team);

        assert_eq!(member.change_team(&mut team), None);
        assert_eq!(team.members().len(), 1);
    }

    #[test]
    fn display_omits_team() {
        let member = Member::anonymous(100);
        let rendered = member.to_string();

        assert!(rendered.contains("username=null"));
        assert!(rendered.contains("age=100"));
        assert!(!rendered.contains("team"));
    }
}
