//! Push delivery for nudges.

use crate::error::TriptiResult;
use crate::model::{Nudge, User};

/// Delivers a push notification for a nudge to its recipient.
pub trait PushSender {
    fn send(&self, recipient: &User, nudge: &Nudge) -> TriptiResult<()>;
}

/// Writes each push to the log instead of a device. Used by the CLI.
#[derive(Debug, Default)]
pub struct LogPushSender;

impl PushSender for LogPushSender {
    fn send(&self, recipient: &User, nudge: &Nudge) -> TriptiResult<()> {
        tracing::info!(
            recipient = %recipient.id,
            email = %recipient.email,
            nudge = %nudge.id,
            nudge_type = %nudge.nudge_type,
            trip = %nudge.trip_id,
            "push sent"
        );
        Ok(())
    }
}
