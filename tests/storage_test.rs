use medication_registry::{Medication, MedicationStore, MemoryStore, RegistryError};
use std::sync::Arc;

#[tokio::test]
async fn test_add_then_get_round_trips() {
    let store = MemoryStore::new();
    let med = Medication::new("Aspirin", 10, "500mg");

    store.add(med.clone()).await.unwrap();

    assert_eq!(store.get("Aspirin").await.unwrap(), med);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_duplicate_add_fails() {
    let store = MemoryStore::new();
    store
        .add(Medication::new("Aspirin", 10, "500mg"))
        .await
        .unwrap();

    let err = store
        .add(Medication::new("Aspirin", 99, "1g"))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::AlreadyExists(ref name) if name == "Aspirin"));
    assert_eq!(err.status(), 409);

    let stored = store.get("Aspirin").await.unwrap();
    assert_eq!(stored.count, 10);
    assert_eq!(stored.dosage, "500mg");
}

#[tokio::test]
async fn test_missing_names_are_not_found() {
    let store = MemoryStore::new();

    assert!(matches!(
        store.get("Ghost").await,
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        store.update_count("Ghost", 1).await,
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        store.delete("Ghost").await,
        Err(RegistryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_count_only_touches_count() {
    let store = MemoryStore::new();
    store
        .add(Medication::new("Insulin", 4, "10u"))
        .await
        .unwrap();

    store.update_count("Insulin", -7).await.unwrap();

    assert_eq!(
        store.get("Insulin").await.unwrap(),
        Medication::new("Insulin", -7, "10u")
    );
}

#[tokio::test]
async fn test_delete_is_not_repeatable() {
    let store = MemoryStore::new();
    store
        .add(Medication::new("Aspirin", 10, "500mg"))
        .await
        .unwrap();

    store.delete("Aspirin").await.unwrap();

    assert!(store.is_empty().await);
    assert!(matches!(
        store.get("Aspirin").await,
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        store.delete("Aspirin").await,
        Err(RegistryError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_list() {
    let store = MemoryStore::new();
    assert!(store.list().await.unwrap().is_empty());

    let meds = vec![
        Medication::new("A", 1, "1mg"),
        Medication::new("B", 2, "2mg"),
        Medication::new("C", 3, "3mg"),
    ];
    for med in &meds {
        store.add(med.clone()).await.unwrap();
    }

    let mut listed = store.list().await.unwrap();
    listed.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(listed, meds);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds() {
    let store = Arc::new(MemoryStore::new());

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .add(Medication::new(format!("med-{}", i % 8), i, "1mg"))
                    .await
                    .is_ok()
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap() {
            successes += 1;
        }
    }

    assert_eq!(successes, 8);
    assert_eq!(store.len().await, 8);
}
