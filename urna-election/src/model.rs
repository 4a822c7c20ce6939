use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered voter. The public key is the base64 SPKI transport string
/// produced by `urna_crypto::encode_public_key`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voter {
    pub id: String,
    pub name: String,
    pub email: String,
    pub public_key: String,
    /// Identity confirmed by the registrar.
    pub verified: bool,
    /// Flipped once, on the voter's first admitted vote.
    pub has_voted: bool,
}

impl Voter {
    /// A freshly registered voter: unverified, has not voted.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            public_key: public_key.into(),
            verified: false,
            has_voted: false,
        }
    }
}

/// A candidate standing in one election.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub election_id: String,
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        election_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            election_id: election_id.into(),
            vote_count: 0,
        }
    }

    pub fn increment_vote_count(&mut self) {
        self.vote_count += 1;
    }
}

/// An election with its lifecycle window and candidate roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Election {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds, set when the election is started.
    pub start_millis: Option<i64>,
    /// Unix epoch milliseconds, set when the election is ended.
    pub end_millis: Option<i64>,
    pub active: bool,
    pub candidate_ids: Vec<String>,
}

impl Election {
    /// A freshly created election: inactive, no candidates.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            start_millis: None,
            end_millis: None,
            active: false,
            candidate_ids: Vec::new(),
        }
    }

    pub fn add_candidate_id(&mut self, candidate_id: impl Into<String>) {
        self.candidate_ids.push(candidate_id.into());
    }
}

/// A cast vote as submitted by a client.
///
/// The signature covers the canonical transcript (see [`Vote::transcript`]),
/// so `timestamp_millis` must be the value the client signed, not a
/// server-side stamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vote {
    pub voter_id: String,
    pub candidate_id: String,
    pub election_id: String,
    pub timestamp_millis: i64,
    /// Base64 RSA signature over the transcript.
    pub signature: String,
}

impl Vote {
    /// An unsigned vote stamped with the current time.
    pub fn new(
        voter_id: impl Into<String>,
        candidate_id: impl Into<String>,
        election_id: impl Into<String>,
    ) -> Self {
        Self {
            voter_id: voter_id.into(),
            candidate_id: candidate_id.into(),
            election_id: election_id.into(),
            timestamp_millis: chrono::Utc::now().timestamp_millis(),
            signature: String::new(),
        }
    }

    /// The canonical transcript: the exact bytes that are signed by the
    /// voter, verified at admission, and embedded as the ledger transaction.
    ///
    /// Format (fixed field order, labels, and braces):
    /// `Vote{voter=<voter_id>, candidate=<candidate_id>, election=<election_id>, timestamp=<timestamp_millis>}`
    pub fn transcript(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vote{{voter={}, candidate={}, election={}, timestamp={}}}",
            self.voter_id, self.candidate_id, self.election_id, self.timestamp_millis
        )
    }
}
