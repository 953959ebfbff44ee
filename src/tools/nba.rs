//! NBA domain data fetch from basketball-reference.com.
//!
//! Two datasets: the per-team roster/stats page and the league-wide injury
//! report. Team pages are keyed by abbreviation; the tool resolves one from
//! whatever team name, nickname, or abbreviation appears in the query.

use crate::types::{AppError, NbaDataset, Result};
use chrono::Datelike;
use scraper::{Html, Selector};

const INJURY_URL: &str = "https://www.basketball-reference.com/friv/injuries.html";

/// Cap on unfiltered injury report lines fed back to the worker.
const MAX_REPORT_LINES: usize = 40;

/// (abbreviation, full name, nickname) for every franchise, using
/// basketball-reference abbreviations.
const TEAMS: &[(&str, &str, &str)] = &[
    ("ATL", "atlanta hawks", "hawks"),
    ("BOS", "boston celtics", "celtics"),
    ("BRK", "brooklyn nets", "nets"),
    ("CHO", "charlotte hornets", "hornets"),
    ("CHI", "chicago bulls", "bulls"),
    ("CLE", "cleveland cavaliers", "cavaliers"),
    ("DAL", "dallas mavericks", "mavericks"),
    ("DEN", "denver nuggets", "nuggets"),
    ("DET", "detroit pistons", "pistons"),
    ("GSW", "golden state warriors", "warriors"),
    ("HOU", "houston rockets", "rockets"),
    ("IND", "indiana pacers", "pacers"),
    ("LAC", "los angeles clippers", "clippers"),
    ("LAL", "los angeles lakers", "lakers"),
    ("MEM", "memphis grizzlies", "grizzlies"),
    ("MIA", "miami heat", "heat"),
    ("MIL", "milwaukee bucks", "bucks"),
    ("MIN", "minnesota timberwolves", "timberwolves"),
    ("NOP", "new orleans pelicans", "pelicans"),
    ("NYK", "new york knicks", "knicks"),
    ("OKC", "oklahoma city thunder", "thunder"),
    ("ORL", "orlando magic", "magic"),
    ("PHI", "philadelphia 76ers", "76ers"),
    ("PHO", "phoenix suns", "suns"),
    ("POR", "portland trail blazers", "blazers"),
    ("SAC", "sacramento kings", "kings"),
    ("SAS", "san antonio spurs", "spurs"),
    ("TOR", "toronto raptors", "raptors"),
    ("UTA", "utah jazz", "jazz"),
    ("WAS", "washington wizards", "wizards"),
];

/// Fetches NBA data for one dataset.
pub struct NbaDataTool {
    dataset: NbaDataset,
    http: reqwest::Client,
}

impl NbaDataTool {
    /// Create a fetch tool for one dataset, sharing the given HTTP client.
    pub fn new(dataset: NbaDataset, http: reqwest::Client) -> Self {
        Self { dataset, http }
    }

    /// Stable capability name, distinct per dataset.
    pub fn name(&self) -> &str {
        match self.dataset {
            NbaDataset::TeamStats => "fetch_nba_stats",
            NbaDataset::InjuryReport => "fetch_nba_injuries",
        }
    }

    /// Description advertised to the completion engine.
    pub fn description(&self) -> &str {
        match self.dataset {
            NbaDataset::TeamStats => {
                "Fetch the current roster and player list for an NBA team from \
                 basketball-reference.com. Input: a team name or abbreviation."
            }
            NbaDataset::InjuryReport => {
                "Fetch the current league-wide NBA injury report from \
                 basketball-reference.com. Input: a player or team name to filter by, \
                 or empty for the full report."
            }
        }
    }

    /// Fetch and format the dataset, filtered by the query where it applies.
    pub async fn invoke(&self, query: &str) -> Result<String> {
        match self.dataset {
            NbaDataset::TeamStats => self.fetch_team_stats(query).await,
            NbaDataset::InjuryReport => self.fetch_injury_report(query).await,
        }
    }

    async fn fetch_team_stats(&self, query: &str) -> Result<String> {
        let abbr = resolve_team(query)
            .ok_or_else(|| self.error(format!("no NBA team recognized in '{}'", query)))?;
        let season = current_season();
        let url = format!(
            "https://www.basketball-reference.com/teams/{}/{}.html",
            abbr, season
        );

        tracing::debug!(team = abbr, season, "fetching team page");
        let html = self.get(&url).await?;
        let roster = parse_roster(&html)?;
        if roster.is_empty() {
            return Err(self.error(format!("no roster table found for {} ({})", abbr, season)));
        }

        Ok(format!(
            "{} roster, {} season ({} players):\n{}",
            abbr,
            season,
            roster.len(),
            roster.join("\n")
        ))
    }

    async fn fetch_injury_report(&self, query: &str) -> Result<String> {
        let html = self.get(INJURY_URL).await?;
        let entries = parse_injuries(&html)?;
        if entries.is_empty() {
            return Err(self.error("injury report table missing or empty".to_string()));
        }

        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.len() > 2)
            .map(String::from)
            .collect();

        let matching: Vec<&InjuryEntry> = entries
            .iter()
            .filter(|entry| {
                terms.iter().any(|term| {
                    entry.player.to_lowercase().contains(term)
                        || entry.team.to_lowercase().contains(term)
                })
            })
            .collect();

        // No filter hit: fall back to the (bounded) league-wide report.
        let lines: Vec<String> = if matching.is_empty() {
            entries
                .iter()
                .take(MAX_REPORT_LINES)
                .map(InjuryEntry::render)
                .collect()
        } else {
            matching.into_iter().map(InjuryEntry::render).collect()
        };

        Ok(lines.join("\n"))
    }

    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error(format!("{} returned {}", url, response.status())));
        }

        response.text().await.map_err(|e| self.error(e.to_string()))
    }

    fn error(&self, message: String) -> AppError {
        AppError::Tool {
            name: self.name().to_string(),
            message,
        }
    }
}

/// One row of the league injury report.
struct InjuryEntry {
    player: String,
    team: String,
    update: String,
    note: String,
}

impl InjuryEntry {
    fn render(&self) -> String {
        format!(
            "{} ({}): {} [updated {}]",
            self.player, self.team, self.note, self.update
        )
    }
}

/// The season year basketball-reference keys team pages by (a season that
/// tips off in October belongs to the following calendar year).
fn current_season() -> i32 {
    let now = chrono::Utc::now();
    if now.month() >= 10 {
        now.year() + 1
    } else {
        now.year()
    }
}

/// Resolve a team abbreviation from free text: exact uppercase abbreviation
/// token first, then full name or nickname substring. Lowercase three-letter
/// words ("was", "min") are too ambiguous to treat as abbreviations.
fn resolve_team(query: &str) -> Option<&'static str> {
    let lower = query.to_lowercase();

    for token in query.split(|c: char| !c.is_ascii_alphanumeric()) {
        if token.len() == 3 && token.chars().all(|c| c.is_ascii_uppercase()) {
            if let Some(entry) = TEAMS.iter().find(|entry| entry.0 == token) {
                return Some(entry.0);
            }
        }
    }

    TEAMS
        .iter()
        .find(|entry| lower.contains(entry.1) || lower.contains(entry.2))
        .map(|entry| entry.0)
}

fn selector(tool: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AppError::Tool {
        name: tool.to_string(),
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Extract "Name (POS)" lines from a team page's roster table.
fn parse_roster(html: &str) -> Result<Vec<String>> {
    let rows = selector("fetch_nba_stats", "table#roster tbody tr")?;
    let player = selector("fetch_nba_stats", "td[data-stat=\"player\"]")?;
    let position = selector("fetch_nba_stats", "td[data-stat=\"pos\"]")?;

    let document = Html::parse_document(html);
    let mut players = Vec::new();
    for row in document.select(&rows) {
        let name = cell_text(row, &player);
        if name.is_empty() {
            continue;
        }

        let pos = cell_text(row, &position);
        if pos.is_empty() {
            players.push(name);
        } else {
            players.push(format!("{} ({})", name, pos));
        }
    }

    Ok(players)
}

fn cell_text(row: scraper::ElementRef<'_>, sel: &Selector) -> String {
    row.select(sel)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extract rows from the league injury report table.
fn parse_injuries(html: &str) -> Result<Vec<InjuryEntry>> {
    let rows = selector("fetch_nba_injuries", "table#injuries tbody tr")?;
    let player = selector("fetch_nba_injuries", "th[data-stat=\"player\"]")?;
    let team = selector("fetch_nba_injuries", "td[data-stat=\"team_name\"]")?;
    let update = selector("fetch_nba_injuries", "td[data-stat=\"date_update\"]")?;
    let note = selector("fetch_nba_injuries", "td[data-stat=\"note\"]")?;

    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    for row in document.select(&rows) {
        let entry = InjuryEntry {
            player: cell_text(row, &player),
            team: cell_text(row, &team),
            update: cell_text(row, &update),
            note: cell_text(row, &note),
        };
        if !entry.player.is_empty() {
            entries.push(entry);
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_team_by_nickname() {
        assert_eq!(resolve_team("current roster of the Lakers"), Some("LAL"));
        assert_eq!(resolve_team("Celtics injury list"), Some("BOS"));
    }

    #[test]
    fn test_resolve_team_by_full_name() {
        assert_eq!(
            resolve_team("stats for the Golden State Warriors this season"),
            Some("GSW")
        );
    }

    #[test]
    fn test_resolve_team_by_abbreviation() {
        assert_eq!(resolve_team("LAL"), Some("LAL"));
        assert_eq!(resolve_team("roster for PHI tonight"), Some("PHI"));
    }

    #[test]
    fn test_resolve_team_ignores_lowercase_abbreviation_words() {
        // "was" must not resolve to Washington.
        assert_eq!(resolve_team("who was hurt last night"), None);
    }

    #[test]
    fn test_resolve_team_no_match() {
        assert_eq!(resolve_team("who won the world series"), None);
    }

    #[test]
    fn test_parse_roster_from_fixture() {
        let html = r#"
            <table id="roster">
              <tbody>
                <tr>
                  <th data-stat="number">23</th>
                  <td data-stat="player">LeBron James</td>
                  <td data-stat="pos">SF</td>
                </tr>
                <tr>
                  <th data-stat="number">3</th>
                  <td data-stat="player">Anthony Davis</td>
                  <td data-stat="pos">C</td>
                </tr>
              </tbody>
            </table>"#;

        let roster = parse_roster(html).unwrap();
        assert_eq!(roster, vec!["LeBron James (SF)", "Anthony Davis (C)"]);
    }

    #[test]
    fn test_parse_roster_missing_table() {
        let roster = parse_roster("<html><body>no tables here</body></html>").unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_parse_injuries_from_fixture() {
        let html = r#"
            <table id="injuries">
              <tbody>
                <tr>
                  <th data-stat="player"><a href="/p/x.html">Joel Embiid</a></th>
                  <td data-stat="team_name">Philadelphia 76ers</td>
                  <td data-stat="date_update">Mon, Feb 2, 2026</td>
                  <td data-stat="note">Out (knee) - expected back next week</td>
                </tr>
              </tbody>
            </table>"#;

        let entries = parse_injuries(html).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player, "Joel Embiid");
        assert_eq!(entries[0].team, "Philadelphia 76ers");

        let line = entries[0].render();
        assert!(line.contains("Joel Embiid"));
        assert!(line.contains("knee"));
    }

    #[test]
    fn test_current_season_rolls_over_in_october() {
        // Sanity bound only; the season year always lands on "this year" or "next year".
        let season = current_season();
        let year = chrono::Utc::now().year();
        assert!(season == year || season == year + 1);
    }

    #[test]
    fn test_tool_names_by_dataset() {
        let http = reqwest::Client::new();
        let stats = NbaDataTool::new(NbaDataset::TeamStats, http.clone());
        assert_eq!(stats.name(), "fetch_nba_stats");

        let injuries = NbaDataTool::new(NbaDataset::InjuryReport, http);
        assert_eq!(injuries.name(), "fetch_nba_injuries");
    }
}
