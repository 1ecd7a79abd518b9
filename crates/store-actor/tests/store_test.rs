use std::cmp::Ordering;
use std::str::FromStr;
use std::time::Duration;

use store_actor::mock::MockStore;
use store_actor::{
    InsertOutcome, PageRequest, PatchOutcome, RetryPolicy, SortField, StoreActor, StoreConfig,
    StoreEntity, StoreError, UnknownSortField,
};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u64,
    holder: String,
    priority: u8,
    open: bool,
}

#[derive(Debug)]
struct TicketDraft {
    holder: String,
    priority: u8,
}

#[derive(Debug)]
struct TicketPatch {
    priority: Option<u8>,
    close: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
enum TicketSort {
    #[default]
    Id,
    Priority,
}

impl FromStr for TicketSort {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "priority" => Ok(Self::Priority),
            other => Err(UnknownSortField(other.to_owned())),
        }
    }
}

impl SortField for TicketSort {
    fn names() -> &'static [&'static str] {
        &["id", "priority"]
    }
}

#[derive(Clone, Debug)]
enum TicketFilter {
    Open,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("ticket is closed")]
struct TicketClosed;

impl StoreEntity for Ticket {
    type Id = u64;
    type Draft = TicketDraft;
    type Patch = TicketPatch;
    type SortField = TicketSort;
    type Filter = TicketFilter;
    type UniqueKey = String;
    type Error = TicketClosed;

    fn from_draft(id: u64, draft: TicketDraft) -> Self {
        Self {
            id,
            holder: draft.holder,
            priority: draft.priority,
            open: true,
        }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn apply_patch(&mut self, patch: TicketPatch) -> Result<(), Self::Error> {
        if !self.open {
            return Err(TicketClosed);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if patch.close {
            self.open = false;
        }
        Ok(())
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.holder.clone())
    }

    fn matches(&self, filter: &TicketFilter) -> bool {
        match filter {
            TicketFilter::Open => self.open,
        }
    }

    fn compare(&self, other: &Self, field: TicketSort) -> Ordering {
        match field {
            TicketSort::Id => self.id.cmp(&other.id),
            TicketSort::Priority => self.priority.cmp(&other.priority),
        }
    }
}

fn draft(holder: &str, priority: u8) -> TicketDraft {
    TicketDraft {
        holder: holder.to_owned(),
        priority,
    }
}

async fn spawn_store() -> store_actor::StoreClient<Ticket> {
    let (actor, client) = StoreActor::<Ticket>::new(&StoreConfig::default());
    tokio::spawn(actor.run());
    client
}

async fn create(client: &store_actor::StoreClient<Ticket>, d: TicketDraft) -> Ticket {
    match client.insert(d).await.unwrap() {
        InsertOutcome::Created(ticket) => ticket,
        InsertOutcome::Duplicate { key } => panic!("unexpected duplicate holder {key}"),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let client = spawn_store().await;

    // 1. Insert
    let ticket = create(&client, draft("alice", 3)).await;
    assert_eq!(ticket.id, 1); // First ID should be 1

    // 2. Patch
    let outcome = client
        .patch(
            ticket.id,
            TicketPatch {
                priority: Some(1),
                close: false,
            },
        )
        .await
        .unwrap();
    let updated = match outcome {
        PatchOutcome::Updated(t) => t,
        other => panic!("expected update, got {other:?}"),
    };
    assert_eq!(updated.priority, 1);

    // 3. Close, then further patches are rejected
    let outcome = client
        .patch(
            ticket.id,
            TicketPatch {
                priority: None,
                close: true,
            },
        )
        .await
        .unwrap();
    assert!(matches!(outcome, PatchOutcome::Updated(t) if !t.open));

    let outcome = client
        .patch(
            ticket.id,
            TicketPatch {
                priority: Some(5),
                close: false,
            },
        )
        .await
        .unwrap();
    assert!(matches!(outcome, PatchOutcome::Rejected(TicketClosed)));

    // The rejected patch left the record untouched
    let current = client.get(ticket.id).await.unwrap().unwrap();
    assert_eq!(current.priority, 1);
    assert!(!current.open);

    // 4. Delete
    assert!(client.delete(ticket.id).await.unwrap());
    assert!(client.get(ticket.id).await.unwrap().is_none());
    assert!(!client.delete(ticket.id).await.unwrap());
}

#[tokio::test]
async fn patching_a_missing_id_reports_missing() {
    let client = spawn_store().await;

    let outcome = client
        .patch(
            42,
            TicketPatch {
                priority: Some(1),
                close: false,
            },
        )
        .await
        .unwrap();
    assert!(matches!(outcome, PatchOutcome::Missing));
}

#[tokio::test]
async fn duplicate_holder_is_refused_until_deleted() {
    let client = spawn_store().await;

    let first = create(&client, draft("alice", 3)).await;
    assert_eq!(first.id, 1);

    // Second insert under the same holder loses
    let outcome = client.insert(draft("alice", 5)).await.unwrap();
    assert!(matches!(outcome, InsertOutcome::Duplicate { key } if key == "alice"));

    // A refused insert does not burn an id
    let bob = create(&client, draft("bob", 2)).await;
    assert_eq!(bob.id, 2);

    // Deleting the winner frees the key for a fresh insert
    assert!(client.delete(first.id).await.unwrap());
    let again = create(&client, draft("alice", 5)).await;
    assert_eq!(again.id, 3);
}

#[tokio::test]
async fn paging_is_ordered_and_sliced() {
    let client = spawn_store().await;

    for (i, priority) in [5u8, 4, 7, 1, 3, 9, 2].into_iter().enumerate() {
        create(&client, draft(&format!("user{i}"), priority)).await;
    }

    // Ascending by priority, three per page
    let priorities = |page: Vec<Ticket>| page.into_iter().map(|t| t.priority).collect::<Vec<_>>();

    let page0 = client
        .page(PageRequest::from_raw(0, 3, "priority").unwrap())
        .await
        .unwrap();
    assert_eq!(priorities(page0), vec![1, 2, 3]);

    let page1 = client
        .page(PageRequest::from_raw(1, 3, "priority").unwrap())
        .await
        .unwrap();
    assert_eq!(priorities(page1), vec![4, 5, 7]);

    let page2 = client
        .page(PageRequest::from_raw(2, 3, "priority").unwrap())
        .await
        .unwrap();
    assert_eq!(priorities(page2), vec![9]);

    // Past the end: empty page, not an error
    let page3 = client
        .page(PageRequest::from_raw(3, 3, "priority").unwrap())
        .await
        .unwrap();
    assert!(page3.is_empty());

    // Defaults: first five records in id order
    let defaults = client.page(PageRequest::default()).await.unwrap();
    let ids: Vec<u64> = defaults.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn equal_sort_values_fall_back_to_id_order() {
    let client = spawn_store().await;

    create(&client, draft("alice", 5)).await;
    create(&client, draft("bob", 5)).await;
    create(&client, draft("carol", 5)).await;

    let page = client
        .page(PageRequest::from_raw(0, 5, "priority").unwrap())
        .await
        .unwrap();
    let ids: Vec<u64> = page.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn find_where_returns_matches_in_id_order() {
    let client = spawn_store().await;

    for name in ["alice", "bob", "carol", "dave"] {
        create(&client, draft(name, 1)).await;
    }
    for id in [2u64, 3] {
        let outcome = client
            .patch(
                id,
                TicketPatch {
                    priority: None,
                    close: true,
                },
            )
            .await
            .unwrap();
        assert!(matches!(outcome, PatchOutcome::Updated(_)));
    }

    let open = client.find_where(TicketFilter::Open).await.unwrap();
    let ids: Vec<u64> = open.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[tokio::test]
async fn find_by_key_resolves_live_holders_only() {
    let client = spawn_store().await;

    let alice = create(&client, draft("alice", 1)).await;
    create(&client, draft("bob", 2)).await;

    let found = client.find_by_key("alice".to_owned()).await.unwrap();
    assert_eq!(found.map(|t| t.id), Some(alice.id));

    assert!(client.find_by_key("carol".to_owned()).await.unwrap().is_none());

    client.delete(alice.id).await.unwrap();
    assert!(client.find_by_key("alice".to_owned()).await.unwrap().is_none());
}

#[tokio::test]
async fn exists_reflects_liveness() {
    let client = spawn_store().await;

    let ticket = create(&client, draft("alice", 1)).await;
    assert!(client.exists(ticket.id).await.unwrap());

    client.delete(ticket.id).await.unwrap();
    assert!(!client.exists(ticket.id).await.unwrap());
}

#[tokio::test]
async fn store_exits_when_all_clients_drop() {
    let (actor, client) = StoreActor::<Ticket>::new(&StoreConfig::default());
    let handle = tokio::spawn(actor.run());

    create(&client, draft("alice", 1)).await;

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn stuck_store_surfaces_timeout() {
    let config = StoreConfig {
        buffer: 8,
        op_timeout: Duration::from_millis(50),
        retry: RetryPolicy::none(),
    };
    // Never spawned: requests queue in the channel unanswered
    let (_actor, client) = StoreActor::<Ticket>::new(&config);

    let result = client.get(1).await;
    assert!(matches!(result, Err(StoreError::Timeout(_))));
}

#[tokio::test]
async fn reads_retry_after_transient_timeouts() {
    let config = StoreConfig {
        buffer: 8,
        op_timeout: Duration::from_millis(100),
        retry: RetryPolicy {
            max_retries: 2,
            initial_delay: Duration::from_millis(10),
            ..RetryPolicy::default()
        },
    };
    let mut mock = MockStore::<Ticket>::with_config(&config);
    let client = mock.client();

    // First reply lands after the client gave up, the retry is answered
    // promptly
    mock.expect_get(1)
        .after(Duration::from_millis(120))
        .return_missing();
    mock.expect_get(1).return_found(Ticket {
        id: 1,
        holder: "alice".to_owned(),
        priority: 3,
        open: true,
    });

    let fetched = client.get(1).await.unwrap();
    assert_eq!(fetched.unwrap().holder, "alice");
    mock.verify();
}
