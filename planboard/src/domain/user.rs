use super::UserId;

/// Reference data from the external user directory. Read-only for this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub position: Option<String>,
    pub email: Option<String>,
}

impl User {
    /// "Name (Position)" when a position is known.
    pub fn label(&self) -> String {
        match &self.position {
            Some(position) => format!("{} ({})", self.name, position),
            None => self.name.clone(),
        }
    }
}
