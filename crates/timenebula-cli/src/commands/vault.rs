use clap::Subcommand;
use timenebula_core::error::Result;
use timenebula_core::ledger::UNKNOWN_PROJECT;
use timenebula_core::time::{format_clock, format_day, format_duration};
use timenebula_core::{Database, HourChunk, Ledger, VaultSummary};

#[derive(Subcommand)]
pub enum VaultAction {
    /// Claimed hour chunks, newest first
    List {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Totals per project
    Summary,
    /// Work sessions, most recent first
    Sessions,
}

fn render_chunk(chunk: &HourChunk) -> String {
    format!(
        "{} • {}  {:<12} +¥{}",
        format_day(chunk.timestamp),
        format_clock(chunk.timestamp),
        chunk.project.as_deref().unwrap_or(UNKNOWN_PROJECT),
        chunk.amount
    )
}

fn render_list(chunks: &[HourChunk]) -> String {
    if chunks.is_empty() {
        return "No capsules yet.".to_string();
    }
    let summary = VaultSummary::from_chunks(chunks);
    let mut out: Vec<String> = chunks.iter().map(render_chunk).collect();
    out.push(String::new());
    out.push(format!("TOTAL COLLECTED: ¥{}", summary.total_collected));
    out.join("\n")
}

pub fn run(action: VaultAction) -> Result<()> {
    let db = Database::open()?;

    match action {
        VaultAction::List { json } => {
            let chunks = db.list_hour_chunks()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&chunks)?);
            } else {
                println!("{}", render_list(&chunks));
            }
        }
        VaultAction::Summary => {
            let summary = db.vault_summary()?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        VaultAction::Sessions => {
            let sessions: Vec<serde_json::Value> = db
                .list_sessions()?
                .into_iter()
                .map(|s| {
                    let worked_ms = s.end_time.map(|end| end.saturating_sub(s.start_time));
                    serde_json::json!({
                        "id": s.id,
                        "start_time": s.start_time,
                        "end_time": s.end_time,
                        "worked": worked_ms.map(format_duration),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
    }
    Ok(())
}
