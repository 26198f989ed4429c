//! [`UserRepository`] implementation for the `PostgreSQL` store.

use super::{
    models::{NewUserRow, UserChangeset, UserRow},
    schema::users,
    store::{PROJECTS_OWNER_FKEY, PostgresStore, USERS_EMAIL_KEY, violated_constraint},
};
use crate::user::{
    domain::{EmailAddress, NewUser, User, UserId},
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

#[async_trait]
impl UserRepository for PostgresStore {
    async fn insert(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let email = user.email().clone();
        let new_row = NewUserRow::from(user);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .map_err(|err| map_write_error(err, &email))?;
            User::try_from(row).map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let id = user.id();
        let email = user.email().clone();
        let changeset = UserChangeset::from(user);

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(users::table.find(id.value()))
                .set(&changeset)
                .execute(connection)
                .map_err(|err| map_write_error(err, &email))?;
            if updated_count == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(User::try_from)
                .transpose()
                .map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter()
                .map(User::try_from)
                .collect::<Result<_, _>>()
                .map_err(UserRepositoryError::invalid_persisted_data)
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted_count = diesel::delete(users::table.find(id.value()))
                .execute(connection)
                .map_err(|err| match violated_constraint(&err) {
                    Some(PROJECTS_OWNER_FKEY) => UserRepositoryError::OwnsProjects(id),
                    _ => UserRepositoryError::persistence(err),
                })?;
            Ok(deleted_count > 0)
        })
        .await
    }
}

fn map_write_error(err: DieselError, email: &EmailAddress) -> UserRepositoryError {
    match violated_constraint(&err) {
        Some(USERS_EMAIL_KEY) => UserRepositoryError::DuplicateEmail(email.clone()),
        _ => UserRepositoryError::persistence(err),
    }
}
