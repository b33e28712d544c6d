//! Human-readable and JSON rendering of match reports

use shared::MatchReport;

/// Renders one report as an indented text block
///
/// ```text
/// game_1: 3 kills
///   players: A, B
///   A          2
///   B          1
/// ```
pub fn render_report(report: &MatchReport) -> String {
    let mut out = format!("{}: {} kills\n", report.name, report.total_kills);

    if report.players.is_empty() {
        out.push_str("  players: none\n");
        return out;
    }

    let players: Vec<&str> = report.players.iter().map(String::as_str).collect();
    out.push_str(&format!("  players: {}\n", players.join(", ")));

    let width = report.kills.keys().map(|p| p.chars().count()).max().unwrap_or(0);
    for (player, score) in report.ranking() {
        out.push_str(&format!("  {:<width$}  {:>4}\n", player, score, width = width));
    }

    out
}

pub fn render_reports(reports: &[MatchReport]) -> String {
    if reports.is_empty() {
        return "No matches found in log\n".to_string();
    }

    reports
        .iter()
        .map(render_report)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
