use uuid::Uuid;

/// Team entity
///
/// The non-owning side of the Member/Team association. The persisted
/// source of truth is each member's `team_id`; `members` is the
/// in-memory back-reference and is only changed through
/// [`Member`](crate::domain::member::Member) and
/// [`Roster`](crate::domain::roster::Roster).
///
/// # Example
/// ```
/// use roster_api::domain::team::Team;
///
/// let team = Team::new("TeamA");
/// assert_eq!(team.name(), "TeamA");
/// assert!(team.members().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: Uuid,
    name: String,
    members: Vec<Uuid>,
}

impl Team {
    /// Creates a new team with a fresh identity and no members
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    // ===== Getters =====

    /// Returns the team's ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the IDs of the members registered in this team
    pub fn members(&self) -> &[Uuid] {
        &self.members
    }

    /// Returns true when the member is registered in this team
    pub fn contains(&self, member_id: Uuid) -> bool {
        self.members.contains(&member_id)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Registers a member in the back-reference. Idempotent.
    pub(crate) fn register(&mut self, member_id: Uuid) {
        if !self.contains(member_id) {
            self.members.push(member_id);
        }
    }

    /// Drops a member from the back-reference, returning whether it was present
    pub(crate) fn unregister(&mut self, member_id: Uuid) -> bool {
        let before = self.members.len();
        self.members.retain(|id| *id != member_id);
        self.members.len() != before
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(id: Uuid, name: String, members: Vec<Uuid>) -> Self {
        Self { id, name, members }
    }
}
