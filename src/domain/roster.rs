use uuid::Uuid;

use super::errors::{DomainError, DomainResult};
use super::member::Member;
use super::repositories::{MemberRepository, RepositoryResult, TeamRepository};
use super::team::Team;

/// In-memory graph of staged teams and members
///
/// Plays the role of a persistence context: entities are staged with
/// `persist_*`, written out with [`Roster::flush`] and dropped with
/// [`Roster::clear`]. It is also the one place where a member can be
/// moved between teams, so both sides of the association change together.
///
/// Bulk updates run straight against the database and leave a staged
/// roster stale; clear it and re-read afterwards.
///
/// # Example
/// ```
/// use roster_api::domain::{member::Member, roster::Roster, team::Team};
///
/// let mut roster = Roster::new();
/// let team_a = roster.persist_team(Team::new("TeamA"));
/// let team_b = roster.persist_team(Team::new("TeamB"));
/// let member = roster.persist_member(Member::new("member1", 10)).unwrap();
///
/// roster.assign(member, team_a).unwrap();
/// roster.assign(member, team_b).unwrap();
///
/// assert!(!roster.team(team_a).unwrap().contains(member));
/// assert!(roster.team(team_b).unwrap().contains(member));
/// ```
#[derive(Debug, Default)]
pub struct Roster {
    teams: Vec<Team>,
    members: Vec<Member>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a team, replacing any staged team with the same id
    ///
    /// The back-reference is rebuilt from the staged members, so staging a
    /// stale copy of a team never drops or resurrects a link.
    pub fn persist_team(&mut self, mut team: Team) -> Uuid {
        let id = team.id();
        for member in &self.members {
            if member.team_id() == Some(id) {
                team.register(member.id());
            } else {
                team.unregister(member.id());
            }
        }

        match self.teams.iter_mut().find(|t| t.id() == id) {
            Some(existing) => *existing = team,
            None => self.teams.push(team),
        }
        id
    }

    /// Stages a member
    ///
    /// If the member already references a team, that team must be staged;
    /// its back-reference is filled in when missing. Re-staging a member under
    /// a different team (or none) unlinks it from the team it was staged in.
    pub fn persist_member(&mut self, member: Member) -> DomainResult<Uuid> {
        let id = member.id();
        let team_id = member.team_id();
        if let Some(team_id) = team_id {
            if !self.teams.iter().any(|t| t.id() == team_id) {
                return Err(DomainError::UnstagedTeam {
                    member_id: id,
                    team_id,
                });
            }
        }

        let previous = self
            .members
            .iter()
            .find(|m| m.id() == id)
            .and_then(|m| m.team_id());
        if let Some(previous) = previous.filter(|p| Some(*p) != team_id) {
            if let Some(old) = self.teams.iter_mut().find(|t| t.id() == previous) {
                old.unregister(id);
                tracing::debug!(
                    member_id = %id,
                    team_id = %previous,
                    "Unlinked re-staged member"
                );
            }
        }
        if let Some(team_id) = team_id {
            if let Some(team) = self.teams.iter_mut().find(|t| t.id() == team_id) {
                team.register(id);
            }
        }

        match self.members.iter_mut().find(|m| m.id() == id) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
        Ok(id)
    }

    /// Moves a member into a team, unlinking it from its previous team
    ///
    /// Both ids are checked before anything changes, so a failed call
    /// leaves the graph untouched.
    pub fn assign(&mut self, member_id: Uuid, team_id: Uuid) -> DomainResult<()> {
        let member_idx = self.member_index(member_id)?;
        let team_idx = self.team_index(team_id)?;

        let member = &mut self.members[member_idx];
        if let Some(previous) = member.change_team(&mut self.teams[team_idx]) {
            if let Some(old) = self.teams.iter_mut().find(|t| t.id() == previous) {
                old.unregister(member_id);
            }
        }

        tracing::debug!(%member_id, %team_id, "Member assigned to team");
        Ok(())
    }

    /// Detaches a member from its team on both sides
    ///
    /// Returns the id of the team the member left, if it had one.
    pub fn release(&mut self, member_id: Uuid) -> DomainResult<Option<Uuid>> {
        let member_idx = self.member_index(member_id)?;
        let previous = self.members[member_idx].clear_team();

        if let Some(team_id) = previous {
            if let Some(team) = self.teams.iter_mut().find(|t| t.id() == team_id) {
                team.unregister(member_id);
            }
        }

        Ok(previous)
    }

    pub fn team(&self, id: Uuid) -> Option<&Team> {
        self.teams.iter().find(|t| t.id() == id)
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|m| m.id() == id)
    }

    pub fn member_mut(&mut self, id: Uuid) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id() == id)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members registered in the given team, in staging order
    pub fn members_of(&self, team_id: Uuid) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|m| m.team_id() == Some(team_id))
            .collect()
    }

    /// Writes every staged entity, teams before members
    pub async fn flush(
        &self,
        teams: &dyn TeamRepository,
        members: &dyn MemberRepository,
    ) -> RepositoryResult<()> {
        for team in &self.teams {
            teams.save(team).await?;
        }
        for member in &self.members {
            members.save(member).await?;
        }

        tracing::info!(
            teams = self.teams.len(),
            members = self.members.len(),
            "Roster flushed"
        );
        Ok(())
    }

    /// Drops every staged entity
    pub fn clear(&mut self) {
        self.teams.clear();
        self.members.clear();
    }

    fn member_index(&self, id: Uuid) -> DomainResult<usize> {
        self.members
            .iter()
            .position(|m| m.id() == id)
            .ok_or(DomainError::MemberNotFound(id))
    }

    fn team_index(&self, id: Uuid) -> DomainResult<usize> {
        self.teams
            .iter()
            .position(|t| t.id() == id)
            .ok_or(DomainError::TeamNotFound(id))
    }
}
