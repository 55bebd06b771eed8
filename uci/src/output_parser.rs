use once_cell::sync::Lazy;
use regex::Regex;

use engine::Score;

static SCORE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bscore\s+(cp|mate)\s+(-?\d+)").unwrap());

/// Extracts the relative score from a `info ... score (cp|mate) N ...` line.
/// Non-info lines and info lines without a score yield `None`.
pub fn parse_info_score(line: &str) -> Option<Score> {
    if !line.starts_with("info") {
        return None;
    }

    let cap = SCORE_RE.captures(line)?;
    let value: i64 = cap[2].parse().ok()?;

    match &cap[1] {
        "cp" => Some(Score::Cp(value)),
        _ => Some(Score::Mate(value as i32)),
    }
}

pub fn is_bestmove(line: &str) -> bool {
    line.starts_with("bestmove")
}
