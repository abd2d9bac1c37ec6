//! `mrosc catalog`: list document types.

use clap::Parser;
use mrosc_documents::{DocumentCategory, DocumentTypeConfig};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, Alignment, Column, FormattedOutput, Table};

/// List the document types an organization must keep on file
#[derive(Debug, Parser)]
pub struct CatalogCommand {
    /// Only show one category (institutional, fiscal, labor, operational)
    #[arg(long)]
    pub category: Option<String>,

    /// Only show required types
    #[arg(long)]
    pub required: bool,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct CatalogListing {
    types: Vec<DocumentTypeConfig>,
}

impl FormattedOutput for CatalogListing {
    fn format_text(&self, color: bool) -> String {
        if self.types.is_empty() {
            return "No document types.".to_string();
        }
        let mut table = Table::new(vec![
            Column::new("Tipo"),
            Column::new("Nome").max_width(48),
            Column::new("Categoria"),
            Column::new("Validade").align(Alignment::Right),
            Column::new("Obrigatório"),
        ]);
        for t in &self.types {
            let validity = match t.validity_months.filter(|_| t.has_validity) {
                Some(1) => "1 mês".to_string(),
                Some(m) => format!("{m} meses"),
                None => "Permanente".to_string(),
            };
            table.add_row(vec![
                t.id.clone(),
                t.name.clone(),
                t.category.label().to_string(),
                validity,
                if t.required { "Sim" } else { "Não" }.to_string(),
            ]);
        }
        table.render(color)
    }
}

impl CatalogCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let category = match &self.category {
            Some(value) => Some(DocumentCategory::parse(value).ok_or_else(|| {
                CliError::invalid_field(
                    "category",
                    format!("unknown category {value:?}: expected institutional, fiscal, labor or operational"),
                )
            })?),
            None => None,
        };

        let catalog = ctx.catalog()?;
        let types = catalog
            .iter()
            .filter(|t| category.map_or(true, |c| t.category == c))
            .filter(|t| !self.required || t.required)
            .cloned()
            .collect();

        print_output(ctx, &CatalogListing { types })
    }
}
