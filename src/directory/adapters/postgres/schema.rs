//! Diesel schema for staff directory persistence.

diesel::table! {
    /// University departments.
    departments (id) {
        /// Internal department identifier.
        id -> Uuid,
        /// Unique department name.
        #[max_length = 100]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Staff accounts.
    staff_members (id) {
        /// Internal staff identifier.
        id -> Uuid,
        /// Unique sign-in name.
        #[max_length = 150]
        username -> Varchar,
        /// Given name.
        #[max_length = 150]
        first_name -> Varchar,
        /// Family name.
        #[max_length = 150]
        last_name -> Varchar,
        /// Notification address.
        #[max_length = 254]
        email -> Varchar,
        /// Role code (ADMIN, HOD, PSM, DEAN, LECTURER).
        #[max_length = 20]
        role -> Varchar,
        /// Optional department affiliation.
        department_id -> Nullable<Uuid>,
        /// Active flag.
        is_active -> Bool,
        /// Locked flag.
        is_locked -> Bool,
        /// Consecutive failed sign-in attempts.
        failed_login_attempts -> Int4,
        /// Forced password change flag.
        must_change_password -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(staff_members -> departments (department_id));
diesel::allow_tables_to_appear_in_same_query!(departments, staff_members);
