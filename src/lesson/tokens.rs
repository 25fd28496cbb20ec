use std::collections::HashSet;

/// Separator used by every serialized token list.
pub const TOKEN_DELIMITER: &str = ", ";

pub fn parse_tokens(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split(TOKEN_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(TOKEN_DELIMITER)
}

/// Keep the first spelling of every token, comparing lowercase forms.
pub fn dedupe_case_insensitive(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedTokens {
    pub solution: String,
    pub distractors: String,
}

/// Canonicalize a solution/distractor pair so that no distractor can be
/// mistaken for a solution token.
pub fn sanitize_tokens(solution_raw: &str, distractor_raw: &str) -> SanitizedTokens {
    let solution = dedupe_case_insensitive(parse_tokens(solution_raw));
    let distractors = dedupe_case_insensitive(parse_tokens(distractor_raw));

    let solution_lower: HashSet<String> = solution.iter().map(|t| t.to_lowercase()).collect();
    let distractors: Vec<String> = distractors
        .into_iter()
        .filter(|d| !solution_lower.contains(&d.to_lowercase()))
        .collect();

    SanitizedTokens {
        solution: join_tokens(&solution),
        distractors: join_tokens(&distractors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_empty_and_whitespace() {
        assert!(parse_tokens("").is_empty());
        assert!(parse_tokens("   ").is_empty());
    }

    #[test]
    fn parse_trims_and_drops_empty_pieces() {
        assert_eq!(
            parse_tokens("  Ein,  Kaffee , , bitte "),
            vec!["Ein", "Kaffee", "bitte"]
        );
        assert_eq!(parse_tokens("Ein,Kaffee"), vec!["Ein,Kaffee"]);
        assert_eq!(parse_tokens("Ein, Kaffee, bitte"), vec!["Ein", "Kaffee", "bitte"]);
        assert_eq!(parse_tokens("Ein, , bitte"), vec!["Ein", "bitte"]);
    }

    #[test]
    fn join_skips_blank_tokens() {
        assert_eq!(join_tokens(&[" Ich ", "", "bin", "  "]), "Ich, bin");
        assert_eq!(join_tokens::<&str>(&[]), "");
    }

    #[test]
    fn dedupe_keeps_first_spelling() {
        let tokens = vec!["Tee".to_string(), "tee".to_string(), "TEE".to_string(), "und".to_string()];
        assert_eq!(dedupe_case_insensitive(tokens), vec!["Tee", "und"]);
    }

    #[test]
    fn sanitize_removes_colliding_distractors() {
        let out = sanitize_tokens("Ich, hätte, gerne, einen, Tee", "tee, Kaffee, kaffee, ICH, bitte");
        assert_eq!(out.solution, "Ich, hätte, gerne, einen, Tee");
        assert_eq!(out.distractors, "Kaffee, bitte");
    }

    #[test]
    fn sanitize_dedupes_solution() {
        let out = sanitize_tokens("das, ist, Das, gut", "");
        assert_eq!(out.solution, "das, ist, gut");
        assert_eq!(out.distractors, "");
    }

    proptest! {
        #[test]
        fn join_then_parse_round_trips(tokens in prop::collection::vec("[A-Za-zäöüß]{1,8}", 0..12)) {
            prop_assert_eq!(parse_tokens(&join_tokens(&tokens)), tokens);
        }
    }
}
