//! Diesel schema for audit log persistence.

diesel::table! {
    /// Append-only audit events.
    audit_events (id) {
        /// Internal event identifier.
        id -> Uuid,
        /// Acting staff identifier, absent for anonymous actions.
        actor_id -> Nullable<Uuid>,
        /// Acting username captured at record time.
        #[max_length = 150]
        actor_username -> Nullable<Varchar>,
        /// Action code.
        #[max_length = 40]
        action -> Varchar,
        /// Affected record kind.
        #[max_length = 100]
        target_model -> Nullable<Varchar>,
        /// Affected record identifier.
        #[max_length = 100]
        target_id -> Nullable<Varchar>,
        /// Free-text detail.
        detail -> Nullable<Text>,
        /// Resolved client address.
        #[max_length = 45]
        source_ip -> Nullable<Varchar>,
        /// Record timestamp.
        recorded_at -> Timestamptz,
    }
}
