//! Diesel schema for task force persistence.

diesel::table! {
    /// Task forces.
    task_forces (id) {
        /// Internal task force identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 200]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Reason given on the latest rejection.
        rejection_reason -> Nullable<Text>,
        /// Workload weightage.
        weightage -> Int4,
        /// Optional chairman.
        chairman_id -> Nullable<Uuid>,
        /// Creating account.
        created_by -> Uuid,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task force to department associations.
    task_force_departments (task_force_id, department_id) {
        /// Owning task force.
        task_force_id -> Uuid,
        /// Associated department.
        department_id -> Uuid,
    }
}

diesel::table! {
    /// Task force memberships.
    task_force_members (task_force_id, staff_id) {
        /// Owning task force.
        task_force_id -> Uuid,
        /// Member staff account.
        staff_id -> Uuid,
    }
}

diesel::joinable!(task_force_departments -> task_forces (task_force_id));
diesel::joinable!(task_force_members -> task_forces (task_force_id));
diesel::allow_tables_to_appear_in_same_query!(
    task_forces,
    task_force_departments,
    task_force_members
);
