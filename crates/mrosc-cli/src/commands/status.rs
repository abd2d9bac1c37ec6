//! `mrosc status`: document status from an export file.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, ValueHint};
use mrosc_common_config::vars;
use mrosc_common_core::format_date;
use mrosc_common_log::spans::owner_span;
use mrosc_documents::{DocumentError, DocumentStore, DocumentView, InMemoryDocumentStore};
use serde::Serialize;

use super::{load_export, parse_owner, status_color};
use crate::cli::{resolve_today, CommandContext};
use crate::error::CliError;
use crate::output::{print_output, Alignment, Column, FormattedOutput, Table};

/// Show the status of documents in an export file
#[derive(Debug, Parser)]
pub struct StatusCommand {
    /// Export file (.yaml, .yml or .json) with document rows
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Only show one organization
    #[arg(long)]
    pub owner: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(long, env = vars::MROSC_TODAY)]
    pub today: Option<String>,

    /// Only show expiring and expired documents
    #[arg(long)]
    pub attention: bool,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    as_of: NaiveDate,
    documents: Vec<DocumentView>,
    #[serde(skip)]
    show_owner: bool,
}

impl FormattedOutput for StatusReport {
    fn format_text(&self, color: bool) -> String {
        if self.documents.is_empty() {
            return format!("No documents as of {}.", format_date(self.as_of));
        }

        let mut columns = Vec::new();
        if self.show_owner {
            columns.push(Column::new("OSC"));
        }
        columns.extend([
            Column::new("Tipo"),
            Column::new("Emissão"),
            Column::new("Vencimento"),
            Column::new("Dias").align(Alignment::Right),
            Column::new("Status").painted(status_color),
        ]);

        let mut table = Table::new(columns);
        for view in &self.documents {
            let doc = &view.document;
            let mut row = Vec::new();
            if self.show_owner {
                row.push(doc.owner_id.to_string());
            }
            row.extend([
                doc.document_type.clone(),
                doc.issue_date.map(format_date).unwrap_or_default(),
                doc.expiry_date.map(format_date).unwrap_or_else(|| "-".to_string()),
                view.days_until_expiry.map(|d| d.to_string()).unwrap_or_default(),
                view.status.label().to_string(),
            ]);
            table.add_row(row);
        }

        format!("Situação em {}\n\n{}", format_date(self.as_of), table.render(color))
    }
}

impl StatusCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let today = resolve_today(self.today.as_deref())?;
        let owner = self.owner.as_deref().map(parse_owner).transpose()?;
        let _span = owner.map(|o| owner_span(&o.to_string()).entered());

        let store = Arc::new(InMemoryDocumentStore::with_documents(load_export(&self.file)?));
        let service = ctx.service(store.clone())?;

        let mut documents = match owner {
            Some(owner) => service.list(owner, today)?,
            None => {
                let catalog = service.catalog();
                let mut views: Vec<DocumentView> = store
                    .list_all()
                    .map_err(DocumentError::from)?
                    .into_iter()
                    .map(|d| DocumentView::new(d, catalog, today))
                    .collect();
                views.sort_by_key(|v| {
                    (
                        v.document.owner_id,
                        catalog.position(&v.document.document_type).unwrap_or(usize::MAX),
                    )
                });
                views
            }
        };
        if self.attention {
            documents.retain(|v| v.status.needs_attention());
        }

        print_output(
            ctx,
            &StatusReport {
                as_of: today,
                documents,
                show_owner: owner.is_none(),
            },
        )
    }
}
