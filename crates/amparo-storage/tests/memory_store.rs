use std::sync::Arc;

use uuid::Uuid;

use amparo_core::models::assessment::AssessmentRecord;
use amparo_core::models::interaction::InteractionRecord;
use amparo_core::models::score::{Dass21Score, Severity, SeverityBands};
use amparo_core::models::risk::RiskLevel;
use amparo_core::models::session::CrisisSession;
use amparo_storage::error::StorageError;
use amparo_storage::memory::MemoryStore;
use amparo_storage::store::{SessionStore, update_session};

fn zero_score() -> Dass21Score {
    Dass21Score {
        depression: 0,
        anxiety: 0,
        stress: 0,
        total: 0,
        risk_level: RiskLevel::Low,
        severity: SeverityBands {
            depression: Severity::Normal,
            anxiety: Severity::Normal,
            stress: Severity::Normal,
        },
    }
}

#[tokio::test]
async fn get_returns_none_for_unknown_session() {
    let store = MemoryStore::new();
    assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn stale_version_is_rejected() {
    let store = MemoryStore::new();
    let session = CrisisSession::new(None, "web");
    let v1 = store.create(&session).await.unwrap();

    let mut first = session.clone();
    first.answers[0] = Some(2);
    store.replace_if_version(&first, &v1).await.unwrap();

    let mut second = session.clone();
    second.answers[1] = Some(3);
    let err = store.replace_if_version(&second, &v1).await.unwrap_err();
    assert!(matches!(err, StorageError::VersionConflict { .. }));

    let stored = store.get(session.id).await.unwrap().unwrap().value;
    assert_eq!(stored.answers[0], Some(2));
    assert_eq!(stored.answers[1], None);
}

#[tokio::test]
async fn update_session_reports_missing_session() {
    let store = MemoryStore::new();
    let err = update_session(&store, Uuid::new_v4(), |_| ()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_do_not_lose_answers() {
    let store = Arc::new(MemoryStore::new());
    let session = CrisisSession::new(Some("u".to_string()), "web");
    store.create(&session).await.unwrap();

    let mut handles = Vec::new();
    for index in 0..4usize {
        let store = Arc::clone(&store);
        let id = session.id;
        handles.push(tokio::spawn(async move {
            update_session(store.as_ref(), id, |s| s.answers[index] = Some(1)).await
        }));
    }
    for handle in handles {
        // Each conflict means another writer landed, so nobody needs more
        // than four attempts.
        handle.await.unwrap().unwrap();
    }

    let stored = store.get(session.id).await.unwrap().unwrap().value;
    assert_eq!(&stored.answers[..4], &[Some(1); 4]);
}

#[tokio::test]
async fn interactions_are_scoped_to_their_session() {
    let store = MemoryStore::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    store
        .append_interaction(&InteractionRecord::negotiation(a, "hola", "respuesta", false))
        .await
        .unwrap();
    store
        .append_interaction(&InteractionRecord::negotiation(b, "otro", "respuesta", true))
        .await
        .unwrap();

    let found = store.interactions(a).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].user_message, "hola");
}

#[tokio::test]
async fn assessment_history_is_newest_first_and_limited() {
    let store = MemoryStore::new();
    let base = jiff::Timestamp::from_second(1_700_000_000).unwrap();
    for offset in 0..5i64 {
        let record = AssessmentRecord {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            instrument_id: "dass21".to_string(),
            score: zero_score(),
            created_at: base + jiff::SignedDuration::from_secs(offset * 60),
        };
        store.save_assessment(&record).await.unwrap();
    }

    let history = store.assessment_history("user-1", 3).await.unwrap();
    assert_eq!(history.len(), 3);
    assert!(history[0].created_at > history[1].created_at);
    assert!(history[1].created_at > history[2].created_at);
    assert!(store.assessment_history("someone-else", 3).await.unwrap().is_empty());
}

#[tokio::test]
async fn therapists_are_listed_after_registration() {
    use amparo_core::models::therapist::TherapistRecord;
    use amparo_storage::directory::TherapistDirectory;

    let store = MemoryStore::new();
    assert!(store.therapists().await.unwrap().is_empty());

    let record = TherapistRecord {
        id: Uuid::new_v4(),
        name: "Dra. Ana".to_string(),
        license: "CED-12345".to_string(),
        specialties: vec!["ansiedad".to_string()],
        regions: vec!["CDMX".to_string()],
        convenio: true,
        contact_email: None,
        created_at: jiff::Timestamp::now(),
    };
    store.add_therapist(&record).await.unwrap();
    assert_eq!(store.therapists().await.unwrap(), vec![record]);
}
