mod error;
mod expand;
mod holidays;
mod ics;
mod model;
mod parser;
mod select;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use model::Schedule;
use parser::TitlePolicy;

#[derive(Parser)]
#[command(name = "kursplan", about = "Course-catalog text to .ics schedule exporter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Truncate titles at the first hyphen only for two-component module ids
    Depth,
    /// Always truncate titles at the first hyphen
    Truncate,
}

impl From<PolicyArg> for TitlePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Depth => TitlePolicy::DepthSensitive,
            PolicyArg::Truncate => TitlePolicy::AlwaysTruncate,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse catalog text and list the extracted session records
    Parse {
        /// Catalog text file ('-' for stdin)
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = PolicyArg::Depth)]
        policy: PolicyArg,
        /// Dump records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show ISO weeks inside the semester range with no dated session
    Holidays {
        /// Catalog text file ('-' for stdin)
        input: PathBuf,
        /// Semester start (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Semester end (YYYY-MM-DD), inclusive
        #[arg(long)]
        end: NaiveDate,
        #[arg(long, value_enum, default_value_t = PolicyArg::Depth)]
        policy: PolicyArg,
    },
    /// Grouped selection view: one line per distinct time-slot per course
    List {
        /// Catalog text file ('-' for stdin)
        input: PathBuf,
        /// Comma-separated identifier prefixes, e.g. "1.3, 4.2"
        #[arg(short, long)]
        query: String,
        #[arg(long, value_enum, default_value_t = PolicyArg::Depth)]
        policy: PolicyArg,
    },
    /// Expand matching sessions and write an .ics calendar
    Export {
        /// Catalog text file ('-' for stdin)
        input: PathBuf,
        /// Comma-separated identifier prefixes, e.g. "1.3, 4.2"
        #[arg(short, long)]
        query: String,
        /// Semester start (defaults to the earliest dated session)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Semester end, inclusive (defaults to the latest dated session)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Expand recurring sessions through inferred holiday weeks
        #[arg(long)]
        no_holidays: bool,
        #[arg(long, value_enum, default_value_t = PolicyArg::Depth)]
        policy: PolicyArg,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse { input, policy, json } => {
            let records = parser::parse_catalog(&read_input(&input)?, policy.into())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            if records.is_empty() {
                println!("No session records found.");
                return Ok(());
            }
            println!(
                "{:<8} | {:<32} | {:<8} | {:<16} | {}",
                "Id", "Title", "Kind", "When", "Location"
            );
            println!("{}", "-".repeat(90));
            for r in &records {
                let (kind, when) = match &r.schedule {
                    Schedule::OneOff { date } => {
                        ("one-off", format!("{} {}-{}", date, r.start, r.end))
                    }
                    Schedule::Recurring => {
                        ("weekly", format!("{} {}-{}", r.weekday, r.start, r.end))
                    }
                };
                println!(
                    "{:<8} | {:<32} | {:<8} | {:<16} | {}",
                    r.id.to_string(),
                    truncate(&r.title, 32),
                    kind,
                    when,
                    r.location
                );
            }
            println!("\n{} session records", records.len());
            Ok(())
        }
        Commands::Holidays { input, start, end, policy } => {
            let records = parser::parse_catalog(&read_input(&input)?, policy.into())?;
            if !records.iter().any(|r| r.schedule.date().is_some()) {
                println!("No dated sessions in the catalog; holiday weeks cannot be inferred.");
                return Ok(());
            }
            let weeks = holidays::infer_holiday_weeks(&records, start, end);
            if weeks.is_empty() {
                println!("No holiday weeks detected in {start}..{end}.");
            } else {
                let list: Vec<String> = weeks.iter().map(u32::to_string).collect();
                println!("Holiday weeks (ISO): {}", list.join(", "));
            }
            Ok(())
        }
        Commands::List { input, query, policy } => {
            let records = parser::parse_catalog(&read_input(&input)?, policy.into())?;
            let matched = select::filter_by_prefix(&records, &query);
            if matched.is_empty() {
                println!("No matches for '{query}'.");
                return Ok(());
            }
            let groups = select::group_for_selection(&matched);
            for group in &groups {
                if group.slots.len() == 1 {
                    println!("{} {}", group.id, group.title);
                } else {
                    println!(
                        "{} {}  ({} time slots, refine the query to pick)",
                        group.id,
                        group.title,
                        group.slots.len()
                    );
                }
                for slot in &group.slots {
                    println!("    {}", slot.slot_signature());
                }
            }
            println!("\n{} courses matched", groups.len());
            Ok(())
        }
        Commands::Export {
            input,
            query,
            start,
            end,
            out,
            no_holidays,
            policy,
        } => {
            let records = parser::parse_catalog(&read_input(&input)?, policy.into())?;
            let matched = select::filter_by_prefix(&records, &query);
            if matched.is_empty() {
                println!("No matches for '{query}'.");
                return Ok(());
            }
            let unique = select::dedup_records(&matched);

            let (start, end) = match (start, end) {
                (Some(s), Some(e)) => (s, e),
                (s, e) => {
                    let (lo, hi) = holidays::derive_semester_range(&records)
                        .context("no dated sessions to derive the semester range from; pass --start and --end")?;
                    (s.unwrap_or(lo), e.unwrap_or(hi))
                }
            };

            let weeks = if no_holidays {
                Vec::new()
            } else {
                holidays::infer_holiday_weeks(&records, start, end)
            };
            let occurrences = expand::expand(&unique, start, end, &weeks);
            let calendar = ics::serialize(&occurrences);

            match out {
                Some(path) => {
                    fs::write(&path, calendar)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!(
                        "Wrote {} events to {} ({} sessions, holiday weeks: {:?})",
                        occurrences.len(),
                        path.display(),
                        unique.len(),
                        weeks
                    );
                }
                None => print!("{calendar}"),
            }
            Ok(())
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate("Softwaretechnik", 32), "Softwaretechnik");
        assert_eq!(truncate("Softwaretechnik", 8), "Softw...");
    }

    #[test]
    fn truncate_handles_tiny_widths() {
        assert_eq!(truncate("abcdef", 2), "...");
        assert_eq!(truncate("abcdef", 0), "...");
        assert_eq!(truncate("ab", 2), "ab");
    }
}
