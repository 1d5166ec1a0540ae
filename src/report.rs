use crate::models::ReportEntry;

const DESCRIPTION_WIDTH: usize = 150;

/// Render the numbered terminal report. The description is cut to 150
/// characters and always followed by `...`.
pub fn render_report(entries: &[ReportEntry]) -> String {
    let mut out = format!(
        "\nFound projects with buffer overflow potential ({}):\n",
        entries.len()
    );

    for (i, entry) in entries.iter().enumerate() {
        let description: String = entry.description.chars().take(DESCRIPTION_WIDTH).collect();
        out.push_str(&format!(
            "\n{}. {}/{}\n   Language: {}\n   Stars: {} | Forks: {}\n   Last update: {}\n   URL: {}\n   Description: {}...\n",
            i + 1,
            entry.owner,
            entry.name,
            entry.language,
            entry.stars,
            entry.forks,
            entry.last_updated,
            entry.url,
            description
        ));
    }

    out
}
