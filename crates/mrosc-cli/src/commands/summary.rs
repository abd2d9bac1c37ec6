//! `mrosc summary`: dashboard for one organization.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueHint};
use mrosc_common_config::vars;
use mrosc_common_core::format_date;
use mrosc_common_log::spans::owner_span;
use mrosc_documents::{DashboardSummary, DocumentStatus, InMemoryDocumentStore};
use serde::Serialize;

use super::{load_export, parse_owner, status_color};
use crate::cli::{resolve_today, CommandContext};
use crate::error::CliError;
use crate::output::{paint, print_output, Alignment, Column, FormattedOutput, Table, TableStyle};

/// Dashboard summary for one organization
#[derive(Debug, Parser)]
pub struct SummaryCommand {
    /// Export file (.yaml, .yml or .json) with document rows
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Organization id
    #[arg(long)]
    pub owner: String,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(long, env = vars::MROSC_TODAY)]
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
    #[serde(flatten)]
    summary: DashboardSummary,
    compliant: bool,
}

impl FormattedOutput for SummaryOutput {
    fn format_text(&self, color: bool) -> String {
        let s = &self.summary;
        let mut out = format!("{} em {}\n\n", s.owner_id, format_date(s.as_of));

        let mut counts = Table::new(vec![
            Column::new("Status").painted(status_color),
            Column::new("Qtd").align(Alignment::Right),
        ])
        .style(TableStyle::Bordered);
        for (status, n) in [
            (DocumentStatus::Valid, s.counts.valid),
            (DocumentStatus::Expiring, s.counts.expiring),
            (DocumentStatus::Expired, s.counts.expired),
        ] {
            counts.add_row(vec![status.label().to_string(), n.to_string()]);
        }
        counts.add_row(vec![DocumentStatus::Pending.label().to_string(), s.missing.len().to_string()]);
        counts.add_row(vec!["Enviados".to_string(), s.counts.total.to_string()]);
        out.push_str(&counts.render(color));

        if !s.attention.is_empty() {
            out.push_str("\nRequer atenção:\n");
            for view in &s.attention {
                let when = match view.days_until_expiry {
                    Some(d) if d < 0 => format!("vencido há {} dias", -d),
                    Some(0) => "vence hoje".to_string(),
                    Some(d) => format!("vence em {d} dias"),
                    None => String::new(),
                };
                let name = view.type_name.as_deref().unwrap_or(&view.document.document_type);
                let label = paint(view.status.label(), status_color(view.status.label()).unwrap_or("0"), color);
                out.push_str(&format!("  {label}  {name} ({when})\n"));
            }
        }

        if !s.missing.is_empty() {
            out.push_str("\nPendentes:\n");
            for t in &s.missing {
                let marker = if t.required { "" } else { " (opcional)" };
                out.push_str(&format!("  {} - {}{marker}\n", t.id, t.name));
            }
        }

        let verdict = if self.compliant {
            paint("Regular", "32", color)
        } else {
            paint("Irregular", "31", color)
        };
        out.push_str(&format!("\nSituação: {verdict}\n"));
        out
    }
}

impl SummaryCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let today = resolve_today(self.today.as_deref())?;
        let owner = parse_owner(&self.owner)?;
        let _span = owner_span(&owner.to_string()).entered();

        let store = Arc::new(InMemoryDocumentStore::with_documents(load_export(&self.file)?));
        let summary = ctx.service(store)?.dashboard(owner, today)?;
        let compliant = summary.is_compliant();

        print_output(ctx, &SummaryOutput { summary, compliant })
    }
}
