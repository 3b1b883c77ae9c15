//! The generated case: crime details, suspects, and the hidden criminal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Identifier of a suspect within one case, in the canonical `s1..sN` form.
///
/// Ids are assigned by [`Scenario::validate`] in generation order; ids
/// supplied by a generator are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuspectId(String);

impl SuspectId {
    /// The canonical id for the 1-based position `index`.
    pub fn from_index(index: usize) -> Self {
        Self(format!("s{index}"))
    }

    /// The raw string form, e.g. `"s3"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SuspectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for SuspectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One suspect in a case. Immutable after validation.
///
/// Guilt is not stored here; it is derived from [`Scenario::criminal_id`]
/// via [`Scenario::is_criminal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    /// Canonical id, `s1..sN`.
    pub id: SuspectId,
    /// Display name.
    pub name: String,
    /// Occupation shown to the player.
    pub occupation: String,
    /// Short background used to flavor replies.
    pub bio: String,
    /// The suspect's claimed whereabouts during the crime.
    pub alibi: String,
}

/// Crime details attached to a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDetails {
    /// What happened.
    #[serde(default)]
    pub crime: String,
    /// Where it happened.
    #[serde(default)]
    pub location: String,
    /// When it happened.
    #[serde(default)]
    pub time_window: String,
    /// Concrete clues the player can probe with questions.
    #[serde(default)]
    pub clues: Vec<String>,
}

/// A suspect as supplied by a generator, before validation.
///
/// `id` and `role` are advisory: the id is always rewritten, and `role` is
/// consulted only while resolving a missing `criminal_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSuspect {
    /// Generator-supplied id, discarded by validation.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Occupation.
    #[serde(default)]
    pub occupation: String,
    /// Background blurb.
    #[serde(default)]
    pub bio: String,
    /// Claimed alibi.
    #[serde(default)]
    pub alibi: String,
    /// `"suspect"` or `"criminal"`; unreliable, see [`Scenario::validate`].
    #[serde(default)]
    pub role: Option<String>,
}

/// A whole case as supplied by a generator, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScenario {
    /// Case summary shown to the player.
    #[serde(default)]
    pub summary: String,
    /// Crime details.
    #[serde(default)]
    pub details: CaseDetails,
    /// Suspects in generation order.
    #[serde(default)]
    pub suspects: Vec<RawSuspect>,
    /// Claimed criminal id; validated against the rewritten suspect set.
    #[serde(default)]
    pub criminal_id: Option<String>,
}

impl RawScenario {
    /// Parse generator output. Malformed JSON or a non-object payload is a
    /// [`CoreError::Schema`], which is fatal to game creation.
    pub fn from_json(s: &str) -> CoreResult<Self> {
        serde_json::from_str(s).map_err(|e| CoreError::Schema(e.to_string()))
    }
}

/// A validated case: suspects with canonical ids and a resolved criminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Case summary shown to the player.
    pub summary: String,
    /// Crime details.
    pub details: CaseDetails,
    /// Suspects in generation order, ids `s1..sN`.
    pub suspects: Vec<Suspect>,
    /// The single authoritative marker of guilt.
    pub criminal_id: SuspectId,
}

impl Scenario {
    /// Validate and normalize a generated case.
    ///
    /// Suspect ids are rewritten to `s{i}` (1-based, input order) regardless
    /// of what the generator supplied. The criminal is resolved from a
    /// supplied non-empty `criminal_id`: if it exists in the rewritten set
    /// it wins, otherwise `s1`. Only when no `criminal_id` was supplied is
    /// the first raw suspect whose `role` is `"criminal"` consulted, again
    /// falling back to `s1`. The result always has exactly one well-defined
    /// criminal. An empty suspect set is rejected outright.
    pub fn validate(raw: RawScenario, requested: usize) -> CoreResult<Self> {
        if raw.suspects.len() != requested {
            return Err(CoreError::CountMismatch {
                expected: requested,
                found: raw.suspects.len(),
            });
        }
        if raw.suspects.is_empty() {
            return Err(CoreError::Schema("case has no suspects".to_string()));
        }

        let mut suspects = Vec::with_capacity(raw.suspects.len());
        let mut role_criminal: Option<SuspectId> = None;
        for (i, s) in raw.suspects.into_iter().enumerate() {
            let id = SuspectId::from_index(i + 1);
            if role_criminal.is_none() && s.role.as_deref() == Some("criminal") {
                role_criminal = Some(id.clone());
            }
            suspects.push(Suspect {
                id,
                name: s.name,
                occupation: s.occupation,
                bio: s.bio,
                alibi: s.alibi,
            });
        }

        let criminal_id = match raw.criminal_id.filter(|c| !c.is_empty()) {
            // A supplied id is authoritative: invalid ids fall back to s1
            // without consulting the role markers.
            Some(c) => {
                let id = SuspectId::from(c.as_str());
                if suspects.iter().any(|s| s.id == id) {
                    id
                } else {
                    SuspectId::from_index(1)
                }
            }
            None => role_criminal.unwrap_or_else(|| SuspectId::from_index(1)),
        };

        Ok(Self {
            summary: raw.summary,
            details: raw.details,
            suspects,
            criminal_id,
        })
    }

    /// Look up a suspect by id.
    pub fn suspect(&self, id: &SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| &s.id == id)
    }

    /// Whether `id` names the criminal. This is the derived role; no
    /// per-suspect role field is stored.
    pub fn is_criminal(&self, id: &SuspectId) -> bool {
        &self.criminal_id == id
    }
}
