//! Catalog of document types an OSC keeps on file.

use crate::types::{DocumentCategory, DocumentTypeConfig};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Catalog loading and validation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("document type id must not be empty")]
    EmptyId,

    #[error("duplicate document type: {id}")]
    DuplicateType { id: String },

    #[error("invalid validity for {id}: {message}")]
    InvalidValidity { id: String, message: String },

    #[error("invalid catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Deserialize)]
struct CatalogFile {
    document_types: Vec<DocumentTypeConfig>,
}

/// Ordered set of document types, indexed by id.
#[derive(Debug, Clone)]
pub struct DocumentCatalog {
    types: Vec<DocumentTypeConfig>,
    index: HashMap<String, usize>,
}

impl DocumentCatalog {
    /// Build a catalog, rejecting duplicate ids and inconsistent validity.
    pub fn new(types: Vec<DocumentTypeConfig>) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            types: Vec::with_capacity(types.len()),
            index: HashMap::with_capacity(types.len()),
        };
        for config in types {
            catalog.add(config)?;
        }
        Ok(catalog)
    }

    /// The standard MROSC document set.
    pub fn mrosc_default() -> Self {
        let types = vec![
            DocumentTypeConfig::permanent("estatuto", "Estatuto Social", DocumentCategory::Institutional)
                .with_description("Estatuto registrado em cartório, com as alterações vigentes"),
            DocumentTypeConfig::permanent(
                "ata_eleicao",
                "Ata de Eleição e Posse da Diretoria",
                DocumentCategory::Institutional,
            ),
            DocumentTypeConfig::permanent(
                "cartao_cnpj",
                "Comprovante de Inscrição no CNPJ",
                DocumentCategory::Institutional,
            ),
            DocumentTypeConfig::permanent(
                "relacao_dirigentes",
                "Relação Nominal dos Dirigentes",
                DocumentCategory::Institutional,
            )
            .with_description("Com endereço, RG e CPF de cada dirigente"),
            DocumentTypeConfig::expiring(
                "comprovante_endereco",
                "Comprovante de Endereço da Sede",
                DocumentCategory::Operational,
                3,
            ),
            DocumentTypeConfig::expiring(
                "cnd_federal",
                "Certidão Negativa de Débitos Federais",
                DocumentCategory::Fiscal,
                6,
            )
            .with_description("Receita Federal e PGFN, inclui contribuições previdenciárias"),
            DocumentTypeConfig::expiring(
                "cnd_estadual",
                "Certidão Negativa de Débitos Estaduais",
                DocumentCategory::Fiscal,
                3,
            ),
            DocumentTypeConfig::expiring(
                "cnd_municipal",
                "Certidão Negativa de Débitos Municipais",
                DocumentCategory::Fiscal,
                3,
            ),
            DocumentTypeConfig::expiring(
                "cnd_fgts",
                "Certificado de Regularidade do FGTS",
                DocumentCategory::Labor,
                1,
            ),
            DocumentTypeConfig::expiring(
                "cnd_trabalhista",
                "Certidão Negativa de Débitos Trabalhistas",
                DocumentCategory::Labor,
                6,
            ),
            DocumentTypeConfig::expiring(
                "alvara_funcionamento",
                "Alvará de Funcionamento",
                DocumentCategory::Operational,
                12,
            ),
            DocumentTypeConfig::expiring(
                "registro_conselho",
                "Registro no Conselho Municipal de Direitos",
                DocumentCategory::Operational,
                12,
            )
            .optional(),
        ];

        let index = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
        Self { types, index }
    }

    /// Parse a catalog from YAML with a top-level `document_types` list.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.document_types)
    }

    /// Read a catalog file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_yaml_str(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), types = catalog.len(), "document catalog loaded");
        Ok(catalog)
    }

    /// Add a type at the end of the catalog.
    pub fn add(&mut self, config: DocumentTypeConfig) -> Result<(), CatalogError> {
        validate_type(&config)?;
        if self.index.contains_key(&config.id) {
            return Err(CatalogError::DuplicateType { id: config.id });
        }
        self.index.insert(config.id.clone(), self.types.len());
        self.types.push(config);
        Ok(())
    }

    /// Look up a type by id.
    pub fn get(&self, id: &str) -> Option<&DocumentTypeConfig> {
        self.index.get(id).map(|&i| &self.types[i])
    }

    /// Whether `id` is in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of `id` in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Types in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentTypeConfig> {
        self.types.iter()
    }

    /// Types in one category.
    pub fn by_category(&self, category: DocumentCategory) -> Vec<&DocumentTypeConfig> {
        self.types.iter().filter(|t| t.category == category).collect()
    }

    /// Types an OSC must keep on file.
    pub fn required(&self) -> Vec<&DocumentTypeConfig> {
        self.types.iter().filter(|t| t.required).collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for DocumentCatalog {
    fn default() -> Self {
        Self::mrosc_default()
    }
}

fn validate_type(config: &DocumentTypeConfig) -> Result<(), CatalogError> {
    if config.id.trim().is_empty() {
        return Err(CatalogError::EmptyId);
    }
    match (config.has_validity, config.validity_months) {
        (true, Some(0)) => Err(CatalogError::InvalidValidity {
            id: config.id.clone(),
            message: "validity_months must be positive".to_string(),
        }),
        (true, None) => Err(CatalogError::InvalidValidity {
            id: config.id.clone(),
            message: "validity_months is required when has_validity is true".to_string(),
        }),
        (false, Some(_)) => Err(CatalogError::InvalidValidity {
            id: config.id.clone(),
            message: "validity_months is only allowed when has_validity is true".to_string(),
        }),
        _ => Ok(()),
    }
}
