use crate::mail::Mailer;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Schedule a one-shot reminder email.
///
/// Best effort by design: the timer lives in process memory, so a restart
/// before it fires loses the reminder, there is no retry on send failure,
/// and deleting the owning task does not cancel it. An unparsable
/// `reminder_time` is logged and swallowed so task creation still succeeds;
/// a past instant schedules nothing.
pub fn schedule_reminder(
    mailer: Arc<dyn Mailer>,
    user_email: &str,
    title: &str,
    description: &str,
    reminder_time: &str,
) {
    let target = match DateTime::parse_from_rfc3339(reminder_time) {
        Ok(t) => t.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!("Invalid reminderTime format: {}", e);
            return;
        }
    };

    let delay = match (target - Utc::now()).to_std() {
        Ok(d) => d,
        // Negative duration: the instant is already in the past.
        Err(_) => return,
    };

    let to = user_email.to_string();
    let subject = format!("Task Reminder: {}", title);
    let body = format!(
        "Hey! This is your reminder for:\n\nTitle: {}\nDescription: {}\nTime: {}",
        title, description, reminder_time
    );

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = mailer.send(&to, &subject, &body).await {
            tracing::error!("Failed to send reminder email: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::mock::MockMailer;
    use chrono::Duration as ChronoDuration;
    use std::time::Duration;

    #[tokio::test]
    async fn test_future_reminder_fires_exactly_once() {
        let mailer = Arc::new(MockMailer::new());
        let reminder_time = (Utc::now() + ChronoDuration::milliseconds(50)).to_rfc3339();

        schedule_reminder(
            mailer.clone(),
            "u@x.com",
            "Buy milk",
            "Two liters",
            &reminder_time,
        );

        tokio::time::sleep(Duration::from_millis(300)).await;

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "u@x.com");
        assert_eq!(sent[0].subject, "Task Reminder: Buy milk");
        assert!(sent[0].body.contains("Buy milk"));
        assert!(sent[0].body.contains("Two liters"));
    }

    #[tokio::test]
    async fn test_past_reminder_sends_nothing() {
        let mailer = Arc::new(MockMailer::new());
        let reminder_time = (Utc::now() - ChronoDuration::minutes(10)).to_rfc3339();

        schedule_reminder(mailer.clone(), "u@x.com", "Old", "Stale", &reminder_time);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_reminder_is_swallowed() {
        let mailer = Arc::new(MockMailer::new());

        schedule_reminder(mailer.clone(), "u@x.com", "Bad", "Garbage time", "next tuesday");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(mailer.sent().is_empty());
    }
}
