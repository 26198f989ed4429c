//! Diesel schema for users, projects, memberships, and tasks.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Store-generated user identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Email address, unique ignoring case.
        #[max_length = 254]
        email -> Varchar,
        /// Free-text role label.
        role -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Projects owned by a user.
    projects (id) {
        /// Store-generated project identifier.
        id -> Int8,
        /// Project name.
        #[max_length = 200]
        name -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Start date.
        start_date -> Timestamptz,
        /// Optional end date.
        end_date -> Nullable<Timestamptz>,
        /// Owning user; deletion of the owner is restricted.
        owner_id -> Int8,
    }
}

diesel::table! {
    /// Membership rows granting users access to projects.
    project_members (id) {
        /// Store-generated membership identifier.
        id -> Int8,
        /// Project reference, cascade-deleted.
        project_id -> Int8,
        /// User reference, cascade-deleted.
        user_id -> Int8,
        /// Free-text membership role.
        role -> Text,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks scoped to a project.
    tasks (id) {
        /// Store-generated task identifier.
        id -> Int8,
        /// Owning project, cascade-deleted.
        project_id -> Int8,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// First-completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Optional assignee, nulled when the user is deleted.
        assignee_id -> Nullable<Int8>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, projects, project_members, tasks);
