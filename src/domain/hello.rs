use uuid::Uuid;

/// Identity-only entity used to smoke-test the persistence wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hello {
    id: Uuid,
}

impl Hello {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn from_persistence(id: Uuid) -> Self {
        Self { id }
    }
}

impl Default for Hello {
    fn default() -> Self {
        Self::new()
    }
}
