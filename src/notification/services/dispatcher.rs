//! Rendering and best-effort delivery of task force notifications.

use crate::directory::domain::StaffMember;
use crate::notification::{
    domain::{Email, NotificationKind},
    ports::Notifier,
};
use crate::task_force::domain::TaskForce;
use minijinja::{Environment, context};
use std::sync::Arc;
use tracing::{debug, warn};

const SUBMITTED_SUBJECT: &str = "Task Force Submitted: {{ task_force }}";
const SUBMITTED_BODY: &str = "Dear {{ recipient }},

The task force \"{{ task_force }}\" has been submitted for approval by {{ actor }}.

Weightage: {{ weightage }}
{% if description %}
Description:
{{ description }}
{% endif %}
Please review it from your dashboard.";

const APPROVED_SUBJECT: &str = "Task Force Approved: {{ task_force }}";
const APPROVED_BODY: &str = "Dear {{ recipient }},

Your task force \"{{ task_force }}\" has been approved by {{ actor }}.";

const REJECTED_SUBJECT: &str = "Task Force Rejected: {{ task_force }}";
const REJECTED_BODY: &str = "Dear {{ recipient }},

Your task force \"{{ task_force }}\" has been rejected by {{ actor }}.

Reason: {{ reason }}";

const fn templates(kind: NotificationKind) -> (&'static str, &'static str) {
    match kind {
        NotificationKind::Submitted => (SUBMITTED_SUBJECT, SUBMITTED_BODY),
        NotificationKind::Approved => (APPROVED_SUBJECT, APPROVED_BODY),
        NotificationKind::Rejected => (REJECTED_SUBJECT, REJECTED_BODY),
    }
}

/// Renders lifecycle notifications and hands them to a [`Notifier`].
///
/// Delivery is best effort: failures are logged and returned as warning
/// messages, never as errors.
#[derive(Clone)]
pub struct NotificationDispatcher<N>
where
    N: Notifier,
{
    notifier: Arc<N>,
}

impl<N> NotificationDispatcher<N>
where
    N: Notifier,
{
    /// Creates a dispatcher over the given transport.
    #[must_use]
    pub const fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }

    /// Notifies each recipient about a task force event.
    ///
    /// Returns one warning per recipient that could not be notified.
    pub async fn notify(
        &self,
        kind: NotificationKind,
        task_force: &TaskForce,
        actor: &StaffMember,
        recipients: &[StaffMember],
    ) -> Vec<String> {
        let mut warnings = Vec::new();
        for recipient in recipients {
            let outcome = match render(kind, task_force, actor, recipient) {
                Ok(email) => self
                    .notifier
                    .send(&email)
                    .await
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            match outcome {
                Ok(()) => debug!(
                    kind = %kind,
                    task_force_id = %task_force.id(),
                    recipient = %recipient.email(),
                    "notification sent"
                ),
                Err(reason) => {
                    warn!(
                        kind = %kind,
                        task_force_id = %task_force.id(),
                        recipient = %recipient.email(),
                        %reason,
                        "notification failed"
                    );
                    warnings.push(format!(
                        "Could not notify {} about {kind} task force: {reason}",
                        recipient.email()
                    ));
                }
            }
        }
        warnings
    }
}

/// Renders the email for one recipient.
///
/// # Errors
///
/// Returns [`minijinja::Error`] when a template fails to render.
pub fn render(
    kind: NotificationKind,
    task_force: &TaskForce,
    actor: &StaffMember,
    recipient: &StaffMember,
) -> Result<Email, minijinja::Error> {
    let environment = Environment::new();
    let values = context! {
        recipient => recipient.display_name(),
        actor => actor.display_name(),
        task_force => task_force.name().as_str(),
        weightage => task_force.weightage(),
        description => task_force.description(),
        reason => task_force.rejection_reason(),
    };
    let (subject_template, body_template) = templates(kind);
    let subject = environment.render_str(subject_template, &values)?;
    let body = environment.render_str(body_template, &values)?;
    Ok(Email::new(recipient.email().clone(), subject, body))
}
