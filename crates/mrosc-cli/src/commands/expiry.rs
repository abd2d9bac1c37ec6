//! `mrosc expiry`: default expiry date for an issue date.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Parser;
use mrosc_common_config::ExpiryRule;
use mrosc_common_core::{format_date, parse_date};
use mrosc_documents::{DocumentError, InMemoryDocumentStore};
use serde::Serialize;

use super::similar_type_ids;
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Compute the default expiry date of a document type
#[derive(Debug, Parser)]
pub struct ExpiryCommand {
    /// Document type id, e.g. cnd_fgts
    pub document_type: String,

    /// Issue date (YYYY-MM-DD)
    #[arg(long)]
    pub issued: String,
}

#[derive(Debug, Serialize)]
struct ExpiryOutput {
    document_type: String,
    issue_date: NaiveDate,
    expiry_date: Option<NaiveDate>,
    rule: ExpiryRule,
}

impl FormattedOutput for ExpiryOutput {
    fn format_text(&self, _color: bool) -> String {
        match self.expiry_date {
            Some(expiry) => format!(
                "{} issued {} expires {}",
                self.document_type,
                format_date(self.issue_date),
                format_date(expiry)
            ),
            None => format!("{} does not expire", self.document_type),
        }
    }
}

impl ExpiryCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let issue_date = parse_date("issued", &self.issued)
            .map_err(|e| CliError::invalid_field("issued", e.to_string()))?;

        let service = ctx.service(Arc::new(InMemoryDocumentStore::new()))?;
        let expiry_date = match service.suggest_expiry(&self.document_type, issue_date) {
            Ok(expiry) => expiry,
            Err(DocumentError::UnknownDocumentType { id }) => {
                let suggestions = similar_type_ids(service.catalog(), &id);
                return Err(CliError::not_found_with_suggestions("document type", id, suggestions));
            }
            Err(e) => return Err(e.into()),
        };

        print_output(
            ctx,
            &ExpiryOutput {
                document_type: self.document_type.clone(),
                issue_date,
                expiry_date,
                rule: service.expiry_rule(),
            },
        )
    }
}
