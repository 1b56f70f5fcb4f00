use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferralStatus {
    #[default]
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "HIRED")]
    Hired,
    #[serde(rename = "REJECTED")]
    Rejected,
}

impl ReferralStatus {
    pub const ALL: [ReferralStatus; 3] = [
        ReferralStatus::Pending,
        ReferralStatus::Hired,
        ReferralStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReferralStatus::Pending => "PENDING",
            ReferralStatus::Hired => "HIRED",
            ReferralStatus::Rejected => "REJECTED",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ReferralStatus::Pending => "⏳",
            ReferralStatus::Hired => "✅",
            ReferralStatus::Rejected => "❌",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ReferralStatus::Pending => "pending",
            ReferralStatus::Hired => "hired",
            ReferralStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReferralStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferralStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown referral status {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Not selected by every operation, `createReferral` leaves it out.
    pub experience_years: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referrer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub id: String,
    pub status: ReferralStatus,
    pub candidate: Candidate,
    pub referred_by: Referrer,
}

/// Candidates of `referrals` without duplicates, in order of first appearance.
pub fn unique_candidates(referrals: &[Referral]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    for referral in referrals {
        match candidates
            .iter_mut()
            .find(|c| c.id == referral.candidate.id)
        {
            Some(existing) => *existing = referral.candidate.clone(),
            None => candidates.push(referral.candidate.clone()),
        }
    }
    candidates
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReferralStats {
    pub total: usize,
    pub pending: usize,
    pub hired: usize,
    pub rejected: usize,
}

impl ReferralStats {
    pub fn tally(referrals: &[Referral]) -> Self {
        referrals
            .iter()
            .fold(Self::default(), |mut stats, referral| {
                stats.total += 1;
                match referral.status {
                    ReferralStatus::Pending => stats.pending += 1,
                    ReferralStatus::Hired => stats.hired += 1,
                    ReferralStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }
}

#[cfg(test)]
pub(crate) fn referral(id: &str, candidate_id: &str, status: ReferralStatus) -> Referral {
    Referral {
        id: id.to_string(),
        status,
        candidate: Candidate {
            id: candidate_id.to_string(),
            name: format!("candidate {candidate_id}"),
            email: format!("{candidate_id}@mail.com"),
            experience_years: Some(3),
        },
        referred_by: Referrer {
            id: "u1".to_string(),
            name: "Sam".to_string(),
            email: None,
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!("HIRED".parse::<ReferralStatus>(), Ok(ReferralStatus::Hired));
        assert!("hired".parse::<ReferralStatus>().is_err());
    }

    #[test]
    fn test_referral_json_shape() {
        let json = r#"{
            "id": "r1",
            "status": "REJECTED",
            "candidate": {"id": "c1", "name": "Jane", "email": "jane@mail.com", "experienceYears": 4},
            "referredBy": {"id": "u1", "name": "Sam"}
        }"#;
        let referral: Referral = serde_json::from_str(json).unwrap();
        assert_eq!(referral.status, ReferralStatus::Rejected);
        assert_eq!(referral.candidate.experience_years, Some(4));
        assert_eq!(referral.referred_by.email, None);
    }

    #[test]
    fn test_unique_candidates_keeps_first_position() {
        let referrals = vec![
            referral("r1", "c1", ReferralStatus::Pending),
            referral("r2", "c2", ReferralStatus::Hired),
            referral("r3", "c1", ReferralStatus::Rejected),
        ];
        let candidates = unique_candidates(&referrals);
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn test_tally() {
        let referrals = vec![
            referral("r1", "c1", ReferralStatus::Pending),
            referral("r2", "c2", ReferralStatus::Hired),
            referral("r3", "c3", ReferralStatus::Pending),
        ];
        assert_eq!(
            ReferralStats::tally(&referrals),
            ReferralStats {
                total: 3,
                pending: 2,
                hired: 1,
                rejected: 0,
            }
        );
        assert_eq!(ReferralStats::tally(&[]), ReferralStats::default());
    }
}
