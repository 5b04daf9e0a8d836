//! Result rendering for the terminal.

use vibe_matcher::MatchResult;

/// Shown when nothing clears the threshold.
pub const NO_MATCH_MESSAGE: &str =
    "Sorry, couldn't find a strong match for that vibe. Please try another!";

const DIVIDER: &str = "----------------------------------------";

/// Human-readable listing, best match first.
pub fn render_text(results: &[MatchResult]) -> String {
    if results.is_empty() {
        return format!("{}\n", NO_MATCH_MESSAGE);
    }

    let mut out = String::from("Here are your top matches!\n\n");
    for result in results {
        out.push_str(&format!("{}. {}\n", result.rank, result.name));
        out.push_str(&format!("   Vibe Match Score: {:.2}\n", result.score));
        out.push_str(&format!("   Description: {}\n", result.description));
        out.push_str(DIVIDER);
        out.push('\n');
    }
    out
}

/// JSON array of match records.
pub fn render_json(results: &[MatchResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
