//! [`ProjectRepository`] implementation for the `PostgreSQL` store.

use super::{
    models::{MemberRow, NewMemberRow, NewProjectRow, ProjectChangeset, ProjectRow},
    relations,
    schema::{project_members, projects},
    store::{
        MEMBERS_PAIR_KEY, MEMBERS_PROJECT_FKEY, MEMBERS_USER_FKEY, PROJECTS_OWNER_FKEY,
        PostgresStore, violated_constraint,
    },
};
use crate::project::{
    domain::{
        NewProject, NewProjectMember, Project, ProjectDetails, ProjectId, ProjectInclude,
        ProjectMember,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;

#[async_trait]
impl ProjectRepository for PostgresStore {
    async fn insert(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let owner_id = project.owner_id();
        let new_row = NewProjectRow::from(project);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .map_err(|err| match violated_constraint(&err) {
                    Some(PROJECTS_OWNER_FKEY) => ProjectRepositoryError::OwnerNotFound(owner_id),
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Project::try_from(row).map_err(ProjectRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let id = project.id();
        let changeset = ProjectChangeset::from(project);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(projects::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if updated_count == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ProjectId,
        include: ProjectInclude,
    ) -> ProjectRepositoryResult<Option<ProjectDetails>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            let details = relations::project_details(connection, rows, include)?;
            Ok(details.into_iter().next())
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        include: ProjectInclude,
    ) -> ProjectRepositoryResult<Vec<ProjectDetails>> {
        let user = user_id.value();
        self.run_blocking(move |connection| {
            let member_projects = project_members::table
                .filter(project_members::user_id.eq(user))
                .select(project_members::project_id);
            let rows = projects::table
                .filter(
                    projects::owner_id
                        .eq(user)
                        .or(projects::id.eq_any(member_projects)),
                )
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(relations::project_details(connection, rows, include)?)
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(projects::table.find(id.value()))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(deleted_count > 0)
        })
        .await
    }

    async fn add_member(
        &self,
        member: &NewProjectMember,
    ) -> ProjectRepositoryResult<ProjectMember> {
        let project_id = member.project_id();
        let user_id = member.user_id();
        let new_row = NewMemberRow::from(member);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(project_members::table)
                .values(&new_row)
                .returning(MemberRow::as_returning())
                .get_result::<MemberRow>(connection)
                .map_err(|err| match violated_constraint(&err) {
                    Some(MEMBERS_PAIR_KEY) => ProjectRepositoryError::DuplicateMember {
                        project_id,
                        user_id,
                    },
                    Some(MEMBERS_PROJECT_FKEY) => ProjectRepositoryError::NotFound(project_id),
                    Some(MEMBERS_USER_FKEY) => ProjectRepositoryError::UserNotFound(user_id),
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(ProjectMember::from(row))
        })
        .await
    }

    async fn remove_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(
                project_members::table
                    .filter(project_members::project_id.eq(project_id.value()))
                    .filter(project_members::user_id.eq(user_id.value())),
            )
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;
            Ok(deleted_count > 0)
        })
        .await
    }
}
