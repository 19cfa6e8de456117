use crate::model::{Classification, Finding, ScanResult};
use crate::scanner::ReportSink;
use std::io::{self, Write};
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct HitRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Installed")]
    installed: String,
    #[tabled(rename = "Affected Range")]
    range: String,
    #[tabled(rename = "Location")]
    location: String,
}

/// Writes one human-readable line per finding as the audit runs.
pub struct CliReporter<W> {
    out: W,
}

impl CliReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CliReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for CliReporter<W> {
    fn begin_location(&mut self, location: &Path) -> io::Result<()> {
        writeln!(self.out, "\nChecking modules in dir: {}\n", location.display())
    }

    fn finding(&mut self, finding: &Finding) -> io::Result<()> {
        writeln!(self.out, "{}", format_finding(finding))
    }
}

/// `name: (min/max): <verdict>`
pub fn format_finding(finding: &Finding) -> String {
    let range = &finding.range;
    let installed = finding.installed.as_deref().unwrap_or("-");
    let verdict = match &finding.classification {
        Classification::InRange => {
            format!("⛔️ ({} in affected range {})", installed, range)
        }
        Classification::OutOfRange => {
            format!("✅ ({} not in range {})", installed, range)
        }
        Classification::NotInstalled => "✅ (not used)".to_string(),
        Classification::Unreadable(reason) => format!("⚠️ ({})", reason),
    };

    format!(
        "{}: ({}/{}): {}",
        finding.package, range.min, range.max, verdict
    )
}

/// Prints the affected packages table and the totals.
pub fn print_summary<W: Write>(out: &mut W, result: &ScanResult) -> io::Result<()> {
    writeln!(out)?;

    if result.has_hits() {
        writeln!(out, "Found {} affected packages:", result.hits.len())?;
        writeln!(out)?;

        let rows: Vec<HitRow> = result
            .hits
            .iter()
            .map(|hit| HitRow {
                package: hit.package.clone(),
                installed: hit.installed.clone().unwrap_or_else(|| "-".to_string()),
                range: hit.range.to_string(),
                location: hit.location.display().to_string(),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        writeln!(out, "{}", table)?;
        writeln!(out)?;
    } else {
        writeln!(out, "No affected packages found.")?;
    }

    let counts = &result.counts;
    writeln!(
        out,
        "{} affected, {} unaffected, {} not used, {} unreadable",
        counts.in_range, counts.out_of_range, counts.not_installed, counts.unreadable
    )?;
    writeln!(
        out,
        "Checked modules in {} directories ({})",
        result.directories_checked,
        result.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    Ok(())
}
