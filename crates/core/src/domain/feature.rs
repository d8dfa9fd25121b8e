// Feature Domain Model

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, Result};
use crate::domain::record::{require_text, Record, RecordId, RecordKind, UserId};

/// Feature Entity (a feature request with its upvotes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: RecordId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    /// Voters in the order their votes landed
    #[serde(default)]
    pub votes: Vec<UserId>,
}

impl Feature {
    /// Create a feature with no votes
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
            votes: Vec::new(),
        }
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn has_voted(&self, voter: &UserId) -> bool {
        self.votes.contains(voter)
    }

    /// Record one upvote from `voter`
    ///
    /// Self-vote is checked before duplicate-vote. On error the vote list is
    /// left untouched.
    pub fn add_vote(&mut self, voter: UserId) -> Result<usize> {
        if voter == self.user_id {
            return Err(DomainError::SelfVote {
                voter,
                feature: self.id,
            });
        }
        if self.has_voted(&voter) {
            return Err(DomainError::DuplicateVote {
                voter,
                feature: self.id,
            });
        }
        self.votes.push(voter);
        Ok(self.votes.len())
    }
}

impl Record for Feature {
    const KIND: RecordKind = RecordKind::Feature;

    fn id(&self) -> RecordId {
        self.id
    }

    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn validate(&self) -> Result<()> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;

        if self.votes.contains(&self.user_id) {
            return Err(DomainError::Validation(
                "votes must not contain the owner".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::with_capacity(self.votes.len());
        if !self.votes.iter().all(|voter| seen.insert(*voter)) {
            return Err(DomainError::Validation(
                "votes must not contain duplicates".to_string(),
            ));
        }
        Ok(())
    }

    fn set_details(&mut self, name: String, description: String) {
        self.name = name;
        self.description = description;
    }
}
