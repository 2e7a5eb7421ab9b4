// Rust guideline compliant 2026-10-16

//! Integration tests for the query and mutation services against an
//! in-memory backend.

use sen2_app::{
    apply, create_inference, execute, update_records, AppError, Page, QueryOutcome,
    ResourceClient, TransportError, INFERENCE_RESOURCE,
};
use sen2_core::{
    build_predicate, combine, compose_query, FilterExpression, FilterRequirement, InferenceDraft,
    InferenceRecord, QueryParam, QuerySpec, Status, TransitionTarget,
};
use std::cell::RefCell;

/// Backend serving fixed pages linked by `page-N` continuation links.
#[derive(Default)]
struct FakeBackend {
    pages: Vec<Vec<InferenceRecord>>,
    total: Option<u64>,
    fail_writes: bool,
    fetches: RefCell<usize>,
    queries: RefCell<Vec<QuerySpec>>,
    updates: RefCell<Vec<(u64, Status)>>,
    deletes: RefCell<Vec<u64>>,
    created: RefCell<Vec<serde_json::Value>>,
}

impl FakeBackend {
    fn with_pages(sizes: &[usize]) -> Self {
        let mut next_id = 1u64;
        let pages = sizes
            .iter()
            .map(|size| {
                (0..*size)
                    .map(|_| {
                        let record = InferenceRecord::new(next_id, Status::Failed);
                        next_id += 1;
                        record
                    })
                    .collect()
            })
            .collect();
        Self {
            pages,
            total: Some(sizes.iter().sum::<usize>() as u64),
            ..Self::default()
        }
    }

    fn with_records(records: Vec<InferenceRecord>) -> Self {
        let total = records.len() as u64;
        Self {
            pages: vec![records],
            total: Some(total),
            ..Self::default()
        }
    }

    fn page(&self, index: usize) -> Page {
        *self.fetches.borrow_mut() += 1;
        Page {
            records: self.pages.get(index).cloned().unwrap_or_default(),
            total: self.total,
            next: (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1)),
        }
    }

    fn commits(&self) -> usize {
        self.updates.borrow().len() + self.deletes.borrow().len()
    }
}

impl ResourceClient for FakeBackend {
    fn fetch(&self, _resource: &str, query: &QuerySpec) -> Result<Page, TransportError> {
        self.queries.borrow_mut().push(query.clone());
        Ok(self.page(0))
    }

    fn fetch_next(&self, next: &str) -> Result<Page, TransportError> {
        let index = next
            .strip_prefix("page-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| TransportError::Document(format!("unknown link {}", next)))?;
        Ok(self.page(index))
    }

    fn update_status(&self, _resource: &str, id: u64, status: Status) -> Result<(), TransportError> {
        if self.fail_writes {
            return Err(TransportError::Status {
                status: 500,
                message: "boom".to_string(),
            });
        }
        self.updates.borrow_mut().push((id, status));
        Ok(())
    }

    fn delete(&self, _resource: &str, id: u64) -> Result<(), TransportError> {
        self.deletes.borrow_mut().push(id);
        Ok(())
    }

    fn create(&self, _resource: &str, document: &serde_json::Value) -> Result<u64, TransportError> {
        self.created.borrow_mut().push(document.clone());
        Ok(9001)
    }
}

/// Backend whose every call fails with the same error.
struct DownBackend;

impl ResourceClient for DownBackend {
    fn fetch(&self, _: &str, _: &QuerySpec) -> Result<Page, TransportError> {
        Err(TransportError::Timeout)
    }

    fn fetch_next(&self, _: &str) -> Result<Page, TransportError> {
        Err(TransportError::Timeout)
    }

    fn update_status(&self, _: &str, _: u64, _: Status) -> Result<(), TransportError> {
        Err(TransportError::Timeout)
    }

    fn delete(&self, _: &str, _: u64) -> Result<(), TransportError> {
        Err(TransportError::Timeout)
    }

    fn create(&self, _: &str, _: &serde_json::Value) -> Result<u64, TransportError> {
        Err(TransportError::Timeout)
    }
}

fn id_query(ids: Vec<i64>) -> QuerySpec {
    let filter = combine(
        vec![build_predicate("id", ids).unwrap()],
        FilterRequirement::Required,
    )
    .unwrap();
    compose_query(filter, Some("-id".to_string()), None, None, None)
}

#[test]
fn test_follows_all_pages_in_order() {
    let backend = FakeBackend::with_pages(&[30, 30, 5]);

    let outcome = execute(&backend, INFERENCE_RESOURCE, &QuerySpec::default(), false, true).unwrap();

    let records = outcome.into_records();
    assert_eq!(records.len(), 65);
    assert_eq!(*backend.fetches.borrow(), 3);
    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, (1..=65).collect::<Vec<u64>>());
}

#[test]
fn test_single_page_when_not_following() {
    let backend = FakeBackend::with_pages(&[30, 30, 5]);

    let outcome = execute(&backend, INFERENCE_RESOURCE, &QuerySpec::default(), false, false).unwrap();

    assert_eq!(outcome.into_records().len(), 30);
    assert_eq!(*backend.fetches.borrow(), 1);
}

#[test]
fn test_count_only_fetches_once() {
    for sizes in [&[][..], &[3][..], &[30, 30, 5][..], &[10; 12][..]] {
        let backend = FakeBackend::with_pages(sizes);

        let outcome = execute(&backend, INFERENCE_RESOURCE, &QuerySpec::default(), true, true).unwrap();

        assert_eq!(outcome, QueryOutcome::Count(sizes.iter().sum::<usize>() as u64));
        assert_eq!(*backend.fetches.borrow(), 1);
    }
}

#[test]
fn test_transport_failure_is_not_empty_result() {
    let result = execute(&DownBackend, INFERENCE_RESOURCE, &QuerySpec::default(), false, true);
    assert!(matches!(
        result,
        Err(AppError::Transport(TransportError::Timeout))
    ));
}

#[test]
fn test_dry_run_stages_without_committing() {
    let backend = FakeBackend::default();
    let records = vec![InferenceRecord::new(1, Status::Failed)];

    let staged = apply(
        &backend,
        INFERENCE_RESOURCE,
        records.clone(),
        Status::Created.into(),
        true,
    )
    .unwrap();
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].id, 1);
    assert_eq!(backend.commits(), 0);

    let committed = apply(&backend, INFERENCE_RESOURCE, records, Status::Created.into(), false).unwrap();
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].status, Some(Status::Created));
    assert_eq!(*backend.updates.borrow(), vec![(1, Status::Created)]);
}

#[test]
fn test_forbidden_transition_is_excluded() {
    let backend = FakeBackend::default();
    let records = vec![InferenceRecord::new(2, Status::Started)];

    let changed = apply(&backend, INFERENCE_RESOURCE, records, Status::Created.into(), false).unwrap();

    assert!(changed.is_empty());
    assert_eq!(backend.commits(), 0);
}

#[test]
fn test_mixed_batch_keeps_only_allowed() {
    let backend = FakeBackend::default();
    let mut no_status = InferenceRecord::new(5, Status::Created);
    no_status.status = None;
    let records = vec![
        InferenceRecord::new(1, Status::Created),
        InferenceRecord::new(2, Status::Succeeded),
        InferenceRecord::new(3, Status::Started),
        InferenceRecord::new(4, Status::Unknown),
        no_status,
    ];

    let changed = apply(&backend, INFERENCE_RESOURCE, records, Status::Aborted.into(), false).unwrap();

    let ids: Vec<u64> = changed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(
        *backend.updates.borrow(),
        vec![(1, Status::Aborted), (3, Status::Aborted)]
    );
}

#[test]
fn test_delete_uses_delete_call() {
    let backend = FakeBackend::default();
    let records = vec![
        InferenceRecord::new(1, Status::Succeeded),
        InferenceRecord::new(2, Status::Scheduled),
    ];

    let deleted = apply(&backend, INFERENCE_RESOURCE, records, TransitionTarget::Delete, false).unwrap();

    assert_eq!(deleted.len(), 1);
    assert_eq!(*backend.deletes.borrow(), vec![1]);
    assert!(backend.updates.borrow().is_empty());
}

#[test]
fn test_ungoverned_target_fails_closed() {
    let backend = FakeBackend::default();
    let records = vec![InferenceRecord::new(1, Status::Created)];

    let result = apply(&backend, INFERENCE_RESOURCE, records, Status::Succeeded.into(), false);

    assert!(matches!(result, Err(AppError::UnsupportedTransition(_))));
    assert_eq!(backend.commits(), 0);
}

#[test]
fn test_commit_failure_aborts_batch() {
    let backend = FakeBackend {
        fail_writes: true,
        ..FakeBackend::default()
    };
    let records = vec![
        InferenceRecord::new(1, Status::Failed),
        InferenceRecord::new(2, Status::Failed),
    ];

    let result = apply(&backend, INFERENCE_RESOURCE, records, Status::Created.into(), false);

    assert!(matches!(
        result,
        Err(AppError::Transport(TransportError::Status { status: 500, .. }))
    ));
}

#[test]
fn test_update_records_fetches_then_applies() {
    let backend = FakeBackend::with_records(vec![
        InferenceRecord::new(10, Status::Failed),
        InferenceRecord::new(11, Status::Started),
    ]);

    let changed = update_records(
        &backend,
        INFERENCE_RESOURCE,
        &id_query(vec![10, 11]),
        Status::Created.into(),
        false,
    )
    .unwrap();

    assert_eq!(changed.len(), 1);
    assert_eq!(*backend.updates.borrow(), vec![(10, Status::Created)]);
    let queries = backend.queries.borrow();
    assert_eq!(
        queries[0].to_string(),
        r#"filter=[{"name":"id","op":"in","val":[10,11]}]&sort=-id"#
    );
}

#[test]
fn test_update_records_explicit_page_is_not_followed() {
    let backend = FakeBackend::with_pages(&[30, 30, 5]);
    let filter = combine(
        vec![build_predicate("status", vec![Status::Failed]).unwrap()],
        FilterRequirement::Required,
    )
    .unwrap();
    let query = compose_query(filter, None, None, Some(30), Some(1));

    let changed =
        update_records(&backend, INFERENCE_RESOURCE, &query, TransitionTarget::Delete, true).unwrap();

    assert_eq!(changed.len(), 30);
    assert_eq!(*backend.fetches.borrow(), 1);
    assert_eq!(backend.commits(), 0);
}

#[test]
fn test_update_records_refuses_empty_filter() {
    let backend = FakeBackend::with_records(vec![InferenceRecord::new(1, Status::Failed)]);
    let query = compose_query(FilterExpression::match_all(), None, None, None, None);

    let result = update_records(&backend, INFERENCE_RESOURCE, &query, Status::Created.into(), false);

    assert!(result.is_err());
    assert_eq!(*backend.fetches.borrow(), 0);
}

#[test]
fn test_count_only_end_to_end() {
    let backend = FakeBackend {
        pages: vec![vec![InferenceRecord::new(8366, Status::Failed)]],
        total: Some(42),
        ..FakeBackend::default()
    };
    let filter = combine(
        vec![
            build_predicate("id", vec![8366i64]).unwrap(),
            build_predicate("status", vec![Status::Failed]).unwrap(),
        ],
        FilterRequirement::Optional,
    )
    .unwrap();
    let raw = r#"filter=[{"and":[{"name":"owner","op":"eq","val":"alice"}]}]"#;
    let query = compose_query(filter, Some("-id".to_string()), Some(raw.to_string()), None, None);

    let outcome = execute(&backend, INFERENCE_RESOURCE, &query, true, true).unwrap();

    assert_eq!(outcome, QueryOutcome::Count(42));
    assert_eq!(*backend.fetches.borrow(), 1);

    let params = backend.queries.borrow()[0].params();
    let filters = params.iter().filter(|p| p.key() == Some("filter")).count();
    assert_eq!(filters, 1);
    assert!(params.contains(&QueryParam::Raw(raw.to_string())));
}

#[test]
fn test_create_returns_backend_id() {
    let backend = FakeBackend::default();
    let draft = InferenceDraft::new(
        1,
        2,
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
        r#"{"type":"Point","coordinates":[13.0,47.8]}"#,
        None,
        None,
    )
    .unwrap();

    let id = create_inference(&backend, INFERENCE_RESOURCE, &draft).unwrap();

    assert_eq!(id, 9001);
    let created = backend.created.borrow();
    assert_eq!(created[0]["data"]["type"], "inference");
}

#[test]
fn test_create_propagates_transport_error() {
    let draft = InferenceDraft::new(
        1,
        2,
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        "{}",
        None,
        None,
    )
    .unwrap();

    let result = create_inference(&DownBackend, INFERENCE_RESOURCE, &draft);
    assert!(matches!(result, Err(AppError::Transport(_))));
}
