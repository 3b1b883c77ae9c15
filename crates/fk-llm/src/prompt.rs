//! Prompt text and reply-parsing helpers shared by every chat provider.

use std::sync::LazyLock;

use fk_core::{Scenario, Suspect};
use regex::Regex;

/// System prompt for case generation. Demands strict JSON in the shape
/// [`fk_core::RawScenario`] deserializes.
pub const CASE_SYSTEM: &str = "You are generating a grounded detective interrogation case for a web game. \
Output STRICT JSON ONLY (no markdown, no commentary). Schema:\n\
{\n  \"summary\": string,\n  \"details\": {\n    \"crime\": string,\n    \"location\": string,\n    \"time_window\": string,\n    \"clues\": [string, ...]\n  },\n  \"suspects\": [\n    { \"id\": \"s1\", \"name\": string, \"occupation\": string, \"bio\": string, \"alibi\": string, \"role\": \"suspect\"|\"criminal\" }\n  ],\n  \"criminal_id\": \"sX\"\n}\n\
Choose one suspect as the criminal. Keep facts consistent and plausible.";

/// System prompt for suspicion scoring. The reply is expected to be a single
/// float; anything else fails open to a zero delta.
pub const SCORE_SYSTEM: &str = "You are scoring interrogation answers for suspicion. \
Return ONLY a single float delta in the range [-0.5, 0.8] based on whether the answer increases suspicion. \
Small values are preferred; 0.0 if neutral.";

/// User message for case generation.
pub fn case_user(requested_suspects: usize) -> String {
    format!(
        "Create a case with {requested_suspects} suspects. \
         Avoid randomness; use consistent narrative and realistic names/occupations. \
         Keep bios 1-2 sentences, alibis 1 sentence. Clues should be concrete and checkable."
    )
}

/// Persona system prompt for a suspect reply.
///
/// Keeps the suspect in first person, forbids outright confession, and
/// bounds the length to 2-5 sentences. The criminal is steered toward
/// evasion, everyone else toward cooperation.
pub fn reply_system(suspect: &Suspect, scenario: &Scenario, is_criminal: bool) -> String {
    let stance = if is_criminal {
        "As the criminal, be evasive, plausible, and deflect; avoid obvious contradictions."
    } else {
        "As an innocent suspect, be cooperative and consistent."
    };
    format!(
        "You are role-playing as a suspect in an interrogation game. \
         Stay in character, use first person, and defend yourself. \
         Do NOT confess unless the evidence is overwhelming and directly proves guilt. \
         Keep responses concise (2-5 sentences). \
         Your name is {name}. Persona: {bio}. Alibi: {alibi}. \
         Case: {summary}. Crime: {crime} at {location}, {time_window}. {stance}",
        name = suspect.name,
        bio = suspect.bio,
        alibi = suspect.alibi,
        summary = scenario.summary,
        crime = scenario.details.crime,
        location = scenario.details.location,
        time_window = scenario.details.time_window,
    )
}

/// User message for suspicion scoring.
pub fn score_user(
    question: &str,
    answer: &str,
    bio: &str,
    summary: &str,
    current_score: f64,
) -> String {
    format!(
        "Question: {question}\nAnswer: {answer}\n\
         Suspect persona: {bio}\nScenario summary: {summary}\n\
         Current suspicion: {current_score:.2}"
    )
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```(?:json)?\s*\n(.*?)\n?```\s*$").expect("valid regex"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d*\.\d+|[-+]?\d+").expect("valid regex"));

/// Remove a surrounding markdown code fence, if the reply carries one.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    match CODE_FENCE.captures(trimmed) {
        Some(caps) => caps.get(1).map_or(trimmed, |m| m.as_str()),
        None => trimmed,
    }
}

/// Extract the first signed decimal or integer literal from a reply.
pub fn first_number(text: &str) -> Option<f64> {
    NUMBER.find(text)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fk_core::{RawScenario, RawSuspect};

    fn scenario() -> Scenario {
        let raw = RawScenario {
            summary: "A necklace vanished.".to_string(),
            suspects: vec![
                RawSuspect {
                    name: "Maya Kim".to_string(),
                    bio: "Meticulous curator.".to_string(),
                    alibi: "Stepped out to call a vendor.".to_string(),
                    ..RawSuspect::default()
                },
                RawSuspect::default(),
            ],
            criminal_id: Some("s1".to_string()),
            ..RawScenario::default()
        };
        Scenario::validate(raw, 2).unwrap()
    }

    #[test]
    fn strips_json_fence() {
        let fenced = "```json\n{\"summary\": \"x\"}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"summary\": \"x\"}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_passes_through() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn first_number_finds_floats_and_ints() {
        assert_eq!(first_number("delta: 0.3"), Some(0.3));
        assert_eq!(first_number("-0.5 because evasive"), Some(-0.5));
        assert_eq!(first_number("I'd say 1"), Some(1.0));
        assert_eq!(first_number("no number here"), None);
    }

    #[test]
    fn reply_system_mentions_persona_and_stance() {
        let scenario = scenario();
        let suspect = &scenario.suspects[0];

        let criminal = reply_system(suspect, &scenario, true);
        assert!(criminal.contains("Maya Kim"));
        assert!(criminal.contains("evasive"));

        let innocent = reply_system(suspect, &scenario, false);
        assert!(innocent.contains("cooperative"));
    }

    #[test]
    fn case_user_carries_count() {
        assert!(case_user(5).contains("5 suspects"));
    }
}
