//! End-to-end document lifecycle scenarios.

use chrono::{NaiveDate, TimeZone, Utc};
use mrosc_common_core::OrganizationId;
use mrosc_documents::{
    classify, compute_default_expiry, count_by_status, missing_document_types, parse_records,
    DocumentCatalog, DocumentError, DocumentRecord, DocumentService, DocumentStatus,
    InMemoryDocumentStore, UploadRequest,
};
use std::sync::Arc;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_fgts_certificate_expiring_soon() {
    let catalog = DocumentCatalog::mrosc_default();
    let fgts = catalog.get("cnd_fgts").unwrap();

    let expiry = compute_default_expiry(fgts, ymd(2024, 12, 15));
    assert_eq!(expiry, Some(ymd(2025, 1, 14)));

    let service = DocumentService::new(Arc::new(InMemoryDocumentStore::new()), catalog.clone());
    let doc = service
        .upload(
            UploadRequest::new(OrganizationId::new(), "cnd_fgts", "analista").issued(ymd(2024, 12, 15)),
            Utc.with_ymd_and_hms(2024, 12, 15, 10, 0, 0).unwrap(),
        )
        .unwrap();

    assert_eq!(classify(&doc, fgts, ymd(2025, 1, 10)), DocumentStatus::Expiring);
}

#[test]
fn test_labor_certificate_expired() {
    let catalog = DocumentCatalog::mrosc_default();
    let record = DocumentRecord {
        id: "7d3f1e2a-9b8c-4d5e-8f6a-1b2c3d4e5f60".to_string(),
        owner_id: "c0ffee00-1234-4abc-9def-0123456789ab".to_string(),
        document_type: "cnd_trabalhista".to_string(),
        issue_date: Some("2024-06-01".to_string()),
        expiry_date: Some("2024-12-01".to_string()),
        file_name: None,
        file_url: None,
        notes: None,
        uploaded_at: "2024-06-01T12:00:00Z".to_string(),
        uploaded_by: "analista".to_string(),
        status: Some("valid".to_string()),
    };

    let docs = parse_records(vec![record]).unwrap();
    let cndt = catalog.get("cnd_trabalhista").unwrap();
    assert_eq!(classify(&docs[0], cndt, ymd(2025, 1, 1)), DocumentStatus::Expired);
}

#[test]
fn test_statute_valid_forever() {
    let catalog = DocumentCatalog::mrosc_default();
    let service = DocumentService::new(Arc::new(InMemoryDocumentStore::new()), catalog.clone());
    let doc = service
        .upload(
            UploadRequest::new(OrganizationId::new(), "estatuto", "analista").issued(ymd(2010, 3, 1)),
            Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
        )
        .unwrap();
    assert!(doc.expiry_date.is_none());

    let estatuto = catalog.get("estatuto").unwrap();
    for today in [ymd(1999, 1, 1), ymd(2025, 1, 1), ymd(2100, 12, 31)] {
        assert_eq!(classify(&doc, estatuto, today), DocumentStatus::Valid);
    }
}

#[test]
fn test_eight_of_twelve_uploaded() {
    let catalog = DocumentCatalog::mrosc_default();
    assert_eq!(catalog.len(), 12);

    let store = Arc::new(InMemoryDocumentStore::new());
    let service = DocumentService::new(store, catalog.clone());
    let owner = OrganizationId::new();
    let uploaded_at = Utc.with_ymd_and_hms(2024, 12, 20, 9, 0, 0).unwrap();

    let uploaded = [
        "estatuto",
        "ata_eleicao",
        "cartao_cnpj",
        "cnd_federal",
        "cnd_estadual",
        "cnd_fgts",
        "cnd_trabalhista",
        "alvara_funcionamento",
    ];
    for doc_type in uploaded {
        service
            .upload(
                UploadRequest::new(owner, doc_type, "analista").issued(ymd(2024, 12, 20)),
                uploaded_at,
            )
            .unwrap();
    }
    // A second upload of the same type replaces the first
    service
        .upload(UploadRequest::new(owner, "cnd_fgts", "analista").issued(ymd(2024, 12, 28)), uploaded_at)
        .unwrap();

    let today = ymd(2025, 1, 10);
    let views = service.list(owner, today).unwrap();
    assert_eq!(views.len(), 8);

    let docs: Vec<_> = views.into_iter().map(|v| v.document).collect();
    let missing: Vec<&str> = missing_document_types(&docs, &catalog)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(
        missing,
        vec!["relacao_dirigentes", "comprovante_endereco", "cnd_municipal", "registro_conselho"]
    );

    let counts = count_by_status(&docs, &catalog, today);
    assert_eq!(counts.total, 8);
    assert_eq!(counts.pending, 0);
    assert_eq!(counts.valid + counts.expiring + counts.expired, 8);

    let summary = service.dashboard(owner, today).unwrap();
    assert_eq!(summary.counts, counts);
    assert_eq!(summary.missing.len(), 4);
}

#[test]
fn test_malformed_persisted_date_is_not_valid() {
    let record = DocumentRecord {
        id: "7d3f1e2a-9b8c-4d5e-8f6a-1b2c3d4e5f60".to_string(),
        owner_id: "c0ffee00-1234-4abc-9def-0123456789ab".to_string(),
        document_type: "cnd_municipal".to_string(),
        issue_date: None,
        expiry_date: Some("2025-02-30".to_string()),
        file_name: None,
        file_url: None,
        notes: None,
        uploaded_at: "2025-01-01T00:00:00Z".to_string(),
        uploaded_by: "analista".to_string(),
        status: None,
    };

    match parse_records(vec![record]) {
        Err(DocumentError::MalformedDate(err)) => assert_eq!(err.field, "expiry_date"),
        other => panic!("Expected MalformedDate, got {other:?}"),
    }
}
