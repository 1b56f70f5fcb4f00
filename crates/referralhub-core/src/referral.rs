//! Optimistic status editing for one row of the HR referral table.

use crate::models::{Referral, ReferralStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFeedback {
    Updated,
    Error(String),
}

impl RowFeedback {
    pub fn is_error(&self) -> bool {
        matches!(self, RowFeedback::Error(_))
    }

    pub fn text(&self) -> String {
        match self {
            RowFeedback::Updated => "Updated!".to_string(),
            RowFeedback::Error(message) => format!("Error: {message}"),
        }
    }
}

/// A status change that has been applied locally and still has to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub referral_id: String,
    pub previous: ReferralStatus,
    pub status: ReferralStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub referral: Referral,
    /// Status shown in the select, may be ahead of the server.
    pub selected: ReferralStatus,
    pub pending: bool,
    pub feedback: Option<RowFeedback>,
}

impl StatusRow {
    pub fn new(referral: Referral) -> Self {
        Self {
            selected: referral.status,
            referral,
            pending: false,
            feedback: None,
        }
    }

    /// Last status the server agreed to.
    pub fn committed(&self) -> ReferralStatus {
        self.referral.status
    }

    /// Applies `status` right away and returns the change to send, or None
    /// when nothing changed or a previous change is still in flight.
    pub fn choose(&mut self, status: ReferralStatus) -> Option<StatusChange> {
        if self.pending || status == self.selected {
            return None;
        }

        let change = StatusChange {
            referral_id: self.referral.id.clone(),
            previous: self.committed(),
            status,
        };

        self.selected = status;
        self.pending = true;
        self.feedback = None;

        Some(change)
    }

    pub fn confirm(&mut self, change: &StatusChange) {
        if !self.owns(change) {
            return;
        }
        self.referral.status = change.status;
        self.selected = change.status;
        self.pending = false;
        self.feedback = Some(RowFeedback::Updated);
    }

    /// Server refused the change, go back to the last agreed status.
    pub fn reject(&mut self, change: &StatusChange, message: String) {
        if !self.owns(change) {
            return;
        }
        self.selected = self.committed();
        self.pending = false;
        self.feedback = Some(RowFeedback::Error(message));
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// Takes a fresh copy of the referral from a refetch. A change still in
    /// flight keeps its selection.
    pub fn sync(&mut self, referral: Referral) {
        if referral.id != self.referral.id {
            warn!(
                "ignoring refetched referral {} on row {}",
                referral.id, self.referral.id
            );
            return;
        }
        if !self.pending {
            self.selected = referral.status;
        }
        self.referral = referral;
    }

    fn owns(&self, change: &StatusChange) -> bool {
        if change.referral_id != self.referral.id || !self.pending {
            warn!(
                "ignoring status completion for {} on row {}",
                change.referral_id, self.referral.id
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::referral::referral;

    #[test]
    fn test_choose_applies_immediately() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        let change = row.choose(ReferralStatus::Hired).unwrap();

        assert_eq!(row.selected, ReferralStatus::Hired);
        assert_eq!(row.committed(), ReferralStatus::Pending);
        assert!(row.pending);
        assert_eq!(
            change,
            StatusChange {
                referral_id: "r1".to_string(),
                previous: ReferralStatus::Pending,
                status: ReferralStatus::Hired,
            }
        );
    }

    #[test]
    fn test_choose_same_status_is_noop() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        assert_eq!(row.choose(ReferralStatus::Pending), None);
        assert!(!row.pending);
    }

    #[test]
    fn test_choose_while_pending_is_refused() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        row.choose(ReferralStatus::Hired).unwrap();
        assert_eq!(row.choose(ReferralStatus::Rejected), None);
        assert_eq!(row.selected, ReferralStatus::Hired);
    }

    #[test]
    fn test_confirm_commits() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        let change = row.choose(ReferralStatus::Hired).unwrap();
        row.confirm(&change);

        assert_eq!(row.committed(), ReferralStatus::Hired);
        assert_eq!(row.selected, ReferralStatus::Hired);
        assert!(!row.pending);
        assert_eq!(row.feedback.as_ref().map(RowFeedback::text).as_deref(), Some("Updated!"));

        row.clear_feedback();
        assert_eq!(row.feedback, None);
    }

    #[test]
    fn test_reject_rolls_back() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        let change = row.choose(ReferralStatus::Hired).unwrap();
        row.reject(&change, "forbidden".to_string());

        assert_eq!(row.selected, ReferralStatus::Pending);
        assert_eq!(row.committed(), ReferralStatus::Pending);
        assert!(!row.pending);
        let feedback = row.feedback.clone().unwrap();
        assert!(feedback.is_error());
        assert_eq!(feedback.text(), "Error: forbidden");
    }

    #[test]
    fn test_completion_for_other_row_is_ignored() {
        let mut first = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        let mut second = StatusRow::new(referral("r2", "c2", ReferralStatus::Pending));
        let first_change = first.choose(ReferralStatus::Hired).unwrap();
        let second_change = second.choose(ReferralStatus::Rejected).unwrap();

        second.confirm(&first_change);
        assert!(second.pending);
        assert_eq!(second.committed(), ReferralStatus::Pending);

        second.reject(&second_change, "nope".to_string());
        first.confirm(&first_change);
        assert_eq!(first.committed(), ReferralStatus::Hired);
        assert_eq!(second.selected, ReferralStatus::Pending);
    }

    #[test]
    fn test_sync_takes_server_copy() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        row.sync(referral("r1", "c1", ReferralStatus::Rejected));

        assert_eq!(row.committed(), ReferralStatus::Rejected);
        assert_eq!(row.selected, ReferralStatus::Rejected);
    }

    #[test]
    fn test_sync_keeps_selection_in_flight() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        let change = row.choose(ReferralStatus::Hired).unwrap();
        row.sync(referral("r1", "c1", ReferralStatus::Pending));

        assert!(row.pending);
        assert_eq!(row.selected, ReferralStatus::Hired);

        row.confirm(&change);
        assert_eq!(row.committed(), ReferralStatus::Hired);
    }

    #[test]
    fn test_sync_ignores_other_referral() {
        let mut row = StatusRow::new(referral("r1", "c1", ReferralStatus::Pending));
        row.sync(referral("r2", "c2", ReferralStatus::Hired));
        assert_eq!(row.referral.id, "r1");
        assert_eq!(row.selected, ReferralStatus::Pending);
    }
}
