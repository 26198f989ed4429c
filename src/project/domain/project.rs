//! Project aggregate root.

use super::{ProjectId, ProjectName, ProjectStatus};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A validated project that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    name: ProjectName,
    description: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    owner_id: UserId,
}

impl NewProject {
    /// Creates a new project in [`ProjectStatus::Planning`].
    #[must_use]
    pub fn new(
        name: ProjectName,
        description: impl Into<String>,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        owner_id: UserId,
    ) -> Self {
        Self {
            name,
            description: description.into(),
            start_date,
            end_date,
            owner_id,
        }
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Returns the end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the initial status of every new project.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        ProjectStatus::Planning
    }

    /// Binds the store-generated identifier, producing the stored project.
    #[must_use]
    pub fn with_id(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: ProjectStatus::Planning,
            start_date: self.start_date,
            end_date: self.end_date,
            owner_id: self.owner_id,
        }
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: String,
    status: ProjectStatus,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    owner_id: UserId,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted project name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Persisted start date.
    pub start_date: DateTime<Utc>,
    /// Persisted end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Persisted owner reference.
    pub owner_id: UserId,
}

impl Project {
    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            start_date: data.start_date,
            end_date: data.end_date,
            owner_id: data.owner_id,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    /// Returns the end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Replaces name, description, and schedule. Owner and status are left
    /// untouched.
    pub fn replace_details(
        &mut self,
        name: ProjectName,
        description: String,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) {
        self.name = name;
        self.description = description;
        self.start_date = start_date;
        self.end_date = end_date;
    }
}
