use sjed_core::collab::upload::{STORE_FAILED_ERROR, UNSUPPORTED_TYPE_ERROR};
use sjed_core::collab::{
    ingest_uploads, mailto_link, release_document, send_email, DirectoryDocumentStore,
    DocumentStore, EmailDraft, EmailError, EmailSettings, SendRequest, UploadError, UploadFile,
};
use sjed_core::model::{EmailType, FileType, Jurisdiction};
use sjed_core::{CaseStore, FixedClock, MemoryBlobStore};
use std::cell::RefCell;
use std::io;

fn clock() -> FixedClock {
    FixedClock::at_date(2026, 1, 10).unwrap()
}

/// Records stored names; fails for names containing `fail`.
#[derive(Default)]
struct RecordingDocuments {
    stored: RefCell<Vec<String>>,
}

impl DocumentStore for RecordingDocuments {
    fn put(&self, name: &str, _bytes: &[u8]) -> io::Result<String> {
        if name.contains("fail") {
            return Err(io::Error::new(io::ErrorKind::Other, "bucket offline"));
        }
        self.stored.borrow_mut().push(name.to_string());
        Ok(format!("https://blob.example/documents/{name}"))
    }

    fn list(&self) -> io::Result<Vec<String>> {
        Ok(self
            .stored
            .borrow()
            .iter()
            .map(|name| format!("https://blob.example/documents/{name}"))
            .collect())
    }

    fn remove(&self, url: &str) -> io::Result<bool> {
        let mut stored = self.stored.borrow_mut();
        let before = stored.len();
        stored.retain(|name| !url.ends_with(name.as_str()));
        Ok(stored.len() != before)
    }
}

#[test]
fn empty_upload_batch_is_rejected() {
    let documents = RecordingDocuments::default();
    let err = ingest_uploads(&[], &documents, &clock()).unwrap_err();
    assert!(matches!(err, UploadError::NoFiles));
}

#[test]
fn uploads_degrade_per_file() {
    let documents = RecordingDocuments::default();
    let files = vec![
        UploadFile::new("2025-11-26_Default-FJ_Brevard.pdf", "application/pdf", vec![1; 10]),
        UploadFile::new("archive.zip", "application/zip", vec![0; 4]),
        UploadFile::new("fail-upload-notice.txt", "text/plain", vec![2; 3]),
        UploadFile::new("Tennessee-Order.docx", "", vec![3; 7]),
    ];

    let records = ingest_uploads(&files, &documents, &clock()).unwrap();
    assert_eq!(records.len(), 4);

    assert_eq!(records[0].file_type, FileType::Judgment);
    assert_eq!(records[0].jurisdiction, Some(Jurisdiction::Fl));
    assert_eq!(records[0].size, 10);
    assert!(records[0].url.is_some());

    assert_eq!(records[1].error, Some(UNSUPPORTED_TYPE_ERROR));
    assert_eq!(records[1].url, None);
    assert_eq!(records[1].file_type, FileType::Other);

    assert_eq!(records[2].error, Some(STORE_FAILED_ERROR));
    assert_eq!(records[2].jurisdiction, None);

    assert_eq!(records[3].file_type, FileType::Order);
    assert_eq!(records[3].jurisdiction, Some(Jurisdiction::Tn));
    assert_eq!(documents.stored.borrow().len(), 2);
}

#[test]
fn upload_records_become_case_files() {
    let documents = RecordingDocuments::default();
    let files = [UploadFile::new("Colorado-Affidavit.pdf", "application/pdf", vec![9; 5])];
    let record = ingest_uploads(&files, &documents, &clock())
        .unwrap()
        .remove(0);

    let mut store = CaseStore::load_with_clock(MemoryBlobStore::new(), Box::new(clock()));
    let file = store.add_file(record.into_new_case_file()).unwrap();
    assert_eq!(file.file_type, FileType::Affidavit);
    assert_eq!(file.jurisdiction, Some(Jurisdiction::Co));
    assert_eq!(file.size, Some(5));
    assert_eq!(file.date, chrono::NaiveDate::from_ymd_opt(2026, 1, 10));
    assert_eq!(store.snapshot().files.len(), 6);
}

#[test]
fn directory_store_writes_bytes_under_documents() {
    let dir = tempfile::tempdir().unwrap();
    let documents = DirectoryDocumentStore::new(dir.path());
    let url = documents.put("../escape/notes.txt", b"hello").unwrap();

    assert!(url.starts_with("file://"));
    assert!(url.ends_with("notes.txt"));
    let entries: Vec<_> = std::fs::read_dir(dir.path().join("documents"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn directory_store_lists_and_removes_only_its_own_documents() {
    let dir = tempfile::tempdir().unwrap();
    let documents = DirectoryDocumentStore::new(dir.path());
    assert!(documents.list().unwrap().is_empty());

    let first = documents.put("Default-FJ.pdf", b"fj").unwrap();
    let second = documents.put("TN-Order.pdf", b"order").unwrap();
    let mut expected = vec![first.clone(), second.clone()];
    expected.sort();
    assert_eq!(documents.list().unwrap(), expected);

    assert!(documents.remove(&first).unwrap());
    assert!(!documents.remove(&first).unwrap());
    assert!(!documents.remove("https://blob.example/documents/TN-Order.pdf").unwrap());

    let outside = dir.path().join("keep.txt");
    std::fs::write(&outside, b"keep").unwrap();
    assert!(!documents
        .remove(&format!("file://{}", outside.display()))
        .unwrap());
    assert!(outside.exists());
    assert_eq!(documents.list().unwrap(), vec![second]);
}

#[test]
fn deleting_an_uploaded_file_releases_its_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let documents = DirectoryDocumentStore::new(dir.path());
    let files = [UploadFile::new("Indiana-Notice.pdf", "application/pdf", vec![4; 8])];
    let record = ingest_uploads(&files, &documents, &clock())
        .unwrap()
        .remove(0);

    let mut store = CaseStore::load_with_clock(MemoryBlobStore::new(), Box::new(clock()));
    let file = store.add_file(record.into_new_case_file()).unwrap();
    assert_eq!(documents.list().unwrap().len(), 1);

    assert!(store.delete_file(&file.id));
    assert!(release_document(&documents, &file).unwrap());
    assert!(documents.list().unwrap().is_empty());

    let seeded = store.snapshot().file("f1").unwrap().clone();
    assert_eq!(seeded.url, None);
    assert!(!release_document(&documents, &seeded).unwrap());
}

#[test]
fn send_email_validates_required_fields_and_address() {
    let settings = EmailSettings::default();
    let blank = SendRequest::default();
    match send_email(&blank, &settings, &clock()).unwrap_err() {
        EmailError::MissingFields(fields) => assert_eq!(fields, vec!["to", "subject", "body"]),
        other => panic!("unexpected error: {other}"),
    }

    let bad = SendRequest {
        to: "counsel@firm".to_string(),
        subject: "Hello".to_string(),
        body: "Body".to_string(),
        ..SendRequest::default()
    };
    assert_eq!(
        send_email(&bad, &settings, &clock()).unwrap_err(),
        EmailError::InvalidAddress("counsel@firm".to_string())
    );
}

#[test]
fn sent_counsel_email_is_logged_as_opposing_counsel() {
    let mut request = SendRequest::new(
        "jporteous@uslegalteam.com",
        EmailDraft::counsel_assignment("Josh A. Porteous", "Domesticate judgment in Indiana"),
    );
    request.counsel_id = Some("c1".to_string());
    request.task_ids = vec!["t6".to_string()];
    request.body.push_str(&"x".repeat(300));

    let sent = send_email(&request, &EmailSettings::default(), &clock()).unwrap();
    assert_eq!(sent.kind, EmailType::OpposingCounsel);
    assert_eq!(sent.from, "dashboard@gooddogg.com");
    assert_eq!(sent.summary.chars().count(), 203);
    assert_eq!(sent.linked_party_ids, vec!["c1".to_string()]);
    assert_eq!(sent.date, chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());

    let mut store = CaseStore::load_with_clock(MemoryBlobStore::new(), Box::new(clock()));
    let email = store.add_email(sent.into_new_email_log()).unwrap();
    assert!(store.record_counsel_email("c1", &email.id));
    assert_eq!(
        store.snapshot().counsel_by_id("c1").unwrap().last_contact,
        email.date
    );
    assert_eq!(email.subject, "Task Assignment: Domesticate judgment in Indiana");
}

#[test]
fn client_email_without_counsel_and_mailto_fallback() {
    let request = SendRequest {
        to: "client@gooddogg.com".to_string(),
        subject: "Update".to_string(),
        body: "All good".to_string(),
        ..SendRequest::default()
    };
    let sent = send_email(&request, &EmailSettings::default(), &clock()).unwrap();
    assert_eq!(sent.kind, EmailType::Client);
    assert!(sent.linked_party_ids.is_empty());
    assert_eq!(
        mailto_link(&request),
        "mailto:client@gooddogg.com?subject=Update&body=All%20good"
    );
}
