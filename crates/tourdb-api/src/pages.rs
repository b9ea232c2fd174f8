//! Server-rendered HTML pages.

use tourdb_common::config::EnvVarStatus;

const DASHBOARD_TEMPLATE: &str = include_str!("../assets/dashboard.html");
const DIAGNOSTIC_TEMPLATE: &str = include_str!("../assets/diagnostic.html");

/// Dashboard for a configured server. `database_label` must already be redacted.
pub fn dashboard_page(database_label: &str) -> String {
    DASHBOARD_TEMPLATE.replace("{{DATABASE}}", &escape_html(database_label))
}

/// Page served on `/` when no connection string is configured.
pub fn diagnostic_page(diagnostics: &[EnvVarStatus]) -> String {
    let rows: String = diagnostics
        .iter()
        .map(|var| {
            let shown = match (&var.value, var.present) {
                (Some(value), _) => escape_html(value),
                (None, true) => "set (hidden)".to_string(),
                (None, false) => "not set".to_string(),
            };
            format!("        <tr><td>{}</td><td>{shown}</td></tr>\n", var.name)
        })
        .collect();

    DIAGNOSTIC_TEMPLATE.replace("{{VARIABLES}}", rows.trim_end())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
