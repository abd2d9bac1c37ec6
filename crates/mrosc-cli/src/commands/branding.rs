//! `mrosc branding`: show or change console branding.

use clap::{Parser, Subcommand};
use mrosc_common_config::{BrandingConfig, BrandingStore, BrandingUpdate, FileBrandingStore};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, StatusOutput};

/// Show or change console branding
#[derive(Debug, Subcommand)]
pub enum BrandingCommand {
    /// Print the current branding
    Show,

    /// Update branding fields; omitted fields keep their value
    Set(BrandingSetArgs),
}

#[derive(Debug, Parser)]
pub struct BrandingSetArgs {
    /// Government body shown in headers
    #[arg(long)]
    pub name: Option<String>,

    /// Product name shown next to the logo
    #[arg(long)]
    pub system_name: Option<String>,

    /// Primary color (#RRGGBB)
    #[arg(long)]
    pub primary_color: Option<String>,

    /// Secondary color (#RRGGBB)
    #[arg(long)]
    pub secondary_color: Option<String>,

    /// Logo URL; an empty value removes the logo
    #[arg(long)]
    pub logo_url: Option<String>,

    /// Footer text; an empty value removes it
    #[arg(long)]
    pub footer: Option<String>,
}

impl BrandingSetArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.system_name.is_none()
            && self.primary_color.is_none()
            && self.secondary_color.is_none()
            && self.logo_url.is_none()
            && self.footer.is_none()
    }

    fn to_update(&self) -> BrandingUpdate {
        BrandingUpdate {
            organization_name: self.name.clone(),
            system_name: self.system_name.clone(),
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            logo_url: self.logo_url.clone(),
            footer_text: self.footer.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct BrandingOutput(BrandingConfig);

impl FormattedOutput for BrandingOutput {
    fn format_text(&self, _color: bool) -> String {
        let b = &self.0;
        let mut out = format!(
            "organization_name: {}\nsystem_name: {}\nprimary_color: {}\nsecondary_color: {}\n",
            b.organization_name, b.system_name, b.primary_color, b.secondary_color
        );
        if let Some(url) = &b.logo_url {
            out.push_str(&format!("logo_url: {url}\n"));
        }
        if let Some(footer) = &b.footer_text {
            out.push_str(&format!("footer_text: {footer}\n"));
        }
        out
    }
}

impl BrandingCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let store = FileBrandingStore::new(&ctx.project_dir);
        match self {
            Self::Show => print_output(ctx, &BrandingOutput(store.load()?)),
            Self::Set(args) => {
                if args.is_empty() {
                    return Err(CliError::validation("nothing to change: pass at least one branding option"));
                }
                let branding = store.update(args.to_update())?;
                tracing::debug!(path = %store.path().display(), "branding updated");
                match ctx.format {
                    crate::cli::OutputFormat::Json => print_output(ctx, &BrandingOutput(branding)),
                    crate::cli::OutputFormat::Text => print_output(
                        ctx,
                        &StatusOutput::success(format!("Branding saved to {}", store.path().display())),
                    ),
                }
            }
        }
    }
}
