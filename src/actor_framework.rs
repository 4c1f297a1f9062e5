use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any stored collection item must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Debug;
    type Patch: Send + Debug;

    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    /// Domain error returned by the hooks below
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from a generated ID and the payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a collection-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failure of a repository request. `Entity` carries the domain rejection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E> {
    #[error("{0}")]
    Entity(E),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Operation not supported by this collection: {0}")]
    Unsupported(&'static str),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Predicate shipped to the actor for `List` requests.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send>;

pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
    },
    Insert {
        item: T,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        filter: Option<Filter<T>>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

type IdGenerator<Id> = Box<dyn Fn() -> Id + Send + Sync>;

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Option<IdGenerator<T::Id>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, Some(Box::new(next_id_fn)))
    }

    /// Actor for collections whose items carry their own id (carts, address books).
    /// Only `insert` can add items.
    pub fn keyed(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, None)
    }

    fn build(buffer_size: usize, next_id_fn: Option<IdGenerator<T::Id>>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn,
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Insert { item, respond_to } => {
                    let _ = respond_to.send(self.handle_insert(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self
                        .store
                        .values()
                        .filter(|item| filter.as_ref().map_or(true, |f| f(item)))
                        .cloned()
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let result = self.apply(&id, |item| item.on_update(patch).map(|_| item.clone()));
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let result = self.apply(&id, |item| item.handle_action(action));
                    let _ = respond_to.send(result);
                }
            }
        }
        debug!("Resource actor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        let next_id = self.next_id_fn.as_ref().ok_or(FrameworkError::Unsupported("create"))?;
        let id = next_id();
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Entity)?;
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    fn handle_insert(&mut self, mut item: T) -> Result<T::Id, FrameworkError<T::Error>> {
        let id = item.id().clone();
        if self.store.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        item.on_create().map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        let item = self.store.get(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete().map_err(FrameworkError::Entity)?;
        self.store.remove(&id);
        Ok(())
    }

    /// Runs a mutation against a copy and commits it only when it succeeds.
    fn apply<R>(
        &mut self,
        id: &T::Id,
        op: impl FnOnce(&mut T) -> Result<R, T::Error>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let current = self.store.get(id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut draft = current.clone();
        let result = op(&mut draft).map_err(FrameworkError::Entity)?;
        self.store.insert(id.clone(), draft);
        Ok(result)
    }
}

/// Sequential `<prefix>_<n>` ids starting at 1.
pub fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = AtomicU64::new(1);
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The `<n>` of an id produced by [`sequential_ids`]; 0 for anything else.
pub fn id_sequence(id: &str) -> u64 {
    id.rsplit('_').next().and_then(|n| n.parse().ok()).unwrap_or(0)
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: derive would require `T: Clone` bounds on the associated types too.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

type ClientResult<T, E> = Result<T, FrameworkError<E>>;

impl<T: Entity> ResourceClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> ClientResult<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> ClientResult<T::Id, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn insert(&self, item: T) -> ClientResult<T::Id, T::Error> {
        self.request(|respond_to| ResourceRequest::Insert { item, respond_to }).await
    }

    /// Inserts `item` unless its id is already stored.
    pub async fn ensure(&self, item: T) -> ClientResult<(), T::Error> {
        match self.insert(item).await {
            Ok(_) | Err(FrameworkError::AlreadyExists(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, id: T::Id) -> ClientResult<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self, filter: Option<Filter<T>>) -> ClientResult<Vec<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> ClientResult<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> ClientResult<(), T::Error> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> ClientResult<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Collection Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Wishlist {
        id: String,
        title: String,
        items: Vec<String>,
    }

    #[derive(Debug)]
    struct WishlistCreate {
        title: String,
    }

    #[derive(Debug)]
    struct WishlistPatch {
        title: Option<String>,
    }

    #[derive(Debug)]
    enum WishlistAction {
        Add(String),
        AddBatch(Vec<String>),
    }

    #[derive(Debug, Clone, PartialEq, Error)]
    enum WishlistError {
        #[error("blank title")]
        BlankTitle,
        #[error("duplicate item: {0}")]
        Duplicate(String),
    }

    impl Entity for Wishlist {
        type Id = String;
        type CreatePayload = WishlistCreate;
        type Patch = WishlistPatch;
        type Action = WishlistAction;
        type ActionResult = usize;
        type Error = WishlistError;

        fn id(&self) -> &String { &self.id }

        fn from_create(id: String, payload: WishlistCreate) -> Result<Self, WishlistError> {
            if payload.title.trim().is_empty() {
                return Err(WishlistError::BlankTitle);
            }
            Ok(Self { id, title: payload.title, items: Vec::new() })
        }

        fn on_update(&mut self, patch: WishlistPatch) -> Result<(), WishlistError> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: WishlistAction) -> Result<usize, WishlistError> {
            let incoming = match action {
                WishlistAction::Add(item) => vec![item],
                WishlistAction::AddBatch(items) => items,
            };
            for item in incoming {
                if self.items.contains(&item) {
                    return Err(WishlistError::Duplicate(item));
                }
                self.items.push(item);
            }
            Ok(self.items.len())
        }
    }

    fn spawn_wishlists() -> ResourceClient<Wishlist> {
        let (actor, client) = ResourceActor::new(10, sequential_ids("wishlist"));
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_create_get_and_action() {
        let client = spawn_wishlists();

        let id = client.create(WishlistCreate { title: "Lebaran".into() }).await.unwrap();
        assert_eq!(id, "wishlist_1");

        let count = client.perform_action(id.clone(), WishlistAction::Add("kemeja".into())).await.unwrap();
        assert_eq!(count, 1);

        let list = client.get(id).await.unwrap().unwrap();
        assert_eq!(list.items, vec!["kemeja".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_action_leaves_item_untouched() {
        let client = spawn_wishlists();
        let id = client.create(WishlistCreate { title: "Kantor".into() }).await.unwrap();
        client.perform_action(id.clone(), WishlistAction::Add("blazer".into())).await.unwrap();

        let err = client
            .perform_action(id.clone(), WishlistAction::AddBatch(vec!["rok".into(), "blazer".into()]))
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::Entity(WishlistError::Duplicate("blazer".into())));

        let list = client.get(id).await.unwrap().unwrap();
        assert_eq!(list.items, vec!["blazer".to_string()]);
    }

    #[tokio::test]
    async fn test_create_rejected_by_entity() {
        let client = spawn_wishlists();
        let err = client.create(WishlistCreate { title: "  ".into() }).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(WishlistError::BlankTitle));
        assert!(client.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_list_update_delete() {
        let (actor, client) = ResourceActor::<Wishlist>::keyed(10);
        tokio::spawn(actor.run());

        for (id, title) in [("b", "Bayi"), ("a", "Anak")] {
            let item = Wishlist { id: id.into(), title: title.into(), items: Vec::new() };
            client.insert(item).await.unwrap();
        }

        let duplicate = Wishlist { id: "a".into(), title: "Lagi".into(), items: Vec::new() };
        assert_eq!(client.insert(duplicate).await.unwrap_err(), FrameworkError::AlreadyExists("a".into()));

        let ids: Vec<String> = client.list(None).await.unwrap().into_iter().map(|w| w.id).collect();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);

        let filtered = client.list(Some(Box::new(|w: &Wishlist| w.title.starts_with('B')))).await.unwrap();
        assert_eq!(filtered.len(), 1);

        let updated = client.update("a".into(), WishlistPatch { title: Some("Anak-anak".into()) }).await.unwrap();
        assert_eq!(updated.title, "Anak-anak");

        client.delete("a".into()).await.unwrap();
        assert_eq!(client.delete("a".into()).await.unwrap_err(), FrameworkError::NotFound("a".into()));

        let create = client.create(WishlistCreate { title: "x".into() }).await.unwrap_err();
        assert_eq!(create, FrameworkError::Unsupported("create"));
    }

    #[tokio::test]
    async fn test_ensure_keeps_existing_item() {
        let (actor, client) = ResourceActor::<Wishlist>::keyed(10);
        tokio::spawn(actor.run());

        let first = Wishlist { id: "sari".into(), title: "Pertama".into(), items: vec!["tas".into()] };
        client.ensure(first).await.unwrap();
        let second = Wishlist { id: "sari".into(), title: "Kedua".into(), items: Vec::new() };
        client.ensure(second).await.unwrap();

        let stored = client.get("sari".into()).await.unwrap().unwrap();
        assert_eq!(stored.title, "Pertama");
    }

    #[test]
    fn test_id_sequence() {
        let next = sequential_ids("order");
        assert_eq!(next(), "order_1");
        assert_eq!(id_sequence(&next()), 2);
        assert_eq!(id_sequence("sari"), 0);
    }
}
