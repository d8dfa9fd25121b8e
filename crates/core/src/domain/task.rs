// Task Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::record::{require_text, Record, RecordId, RecordKind, UserId};

/// Task Entity (the earlier record kind, no voting)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(
        id: RecordId,
        user_id: UserId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            user_id,
            name: name.into(),
            description: description.into(),
            completed: false,
        }
    }
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> RecordId {
        self.id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)
    }

    fn set_details(&mut self, name: String, description: String) {
        self.name = name;
        self.description = description;
    }
}
