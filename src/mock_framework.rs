//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_get`] or [`expect_action`] to assert behavior
//! and answer each request the way the actor would.

use crate::actor_framework::{Entity, Filter, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

type Requests<T> = mpsc::Receiver<ResourceRequest<T>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// No `ResourceActor` runs behind the client: every request lands on the
/// returned receiver, so a test can check the orchestration order and reply
/// with success, failure, or a stale value.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, Requests<T>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message must be a Create request
pub async fn expect_create<T: Entity>(receiver: &mut Requests<T>) -> Option<(T::CreatePayload, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Next message must be an Insert request
pub async fn expect_insert<T: Entity>(receiver: &mut Requests<T>) -> Option<(T, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Insert { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Next message must be a Get request
pub async fn expect_get<T: Entity>(receiver: &mut Requests<T>) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be a List request
pub async fn expect_list<T: Entity>(receiver: &mut Requests<T>) -> Option<(Option<Filter<T>>, Response<Vec<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next message must be an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut Requests<T>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::domain::{Product, ProductCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let create_task = tokio::spawn(async move {
            let product = ProductCreate { name: "Kaos Polos".to_string(), price: 59_000, stock: 3, ..Default::default() };
            client.create(product).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Kaos Polos");
        responder.send(Ok("product_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("product_1".to_string()));
    }

    #[tokio::test]
    async fn test_list_filter_reaches_the_actor() {
        use crate::clients::ProductClient;
        use crate::domain::ProductQuery;

        let (inner, mut receiver) = create_mock_client::<Product>(10);
        let client = ProductClient::new(inner);
        let list_task = tokio::spawn(async move {
            let query = ProductQuery { search: Some("linen".to_string()), ..ProductQuery::default() };
            client.list_products(query).await
        });

        let (filter, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        let filter = filter.expect("Expected a filter");
        let linen = Product {
            id: "product_1".to_string(),
            name: "Kemeja Linen".to_string(),
            category: "Atasan".to_string(),
            description: String::new(),
            price: 200_000,
            stock: 2,
            images: vec![],
            rating: 0.0,
            reviews_count: 0,
            sizes: vec![],
            colors: vec![],
            discount_percent: None,
        };
        let denim = Product { id: "product_2".to_string(), name: "Jaket Denim".to_string(), ..linen.clone() };
        let matching: Vec<Product> = [linen, denim].into_iter().filter(|p| filter(p)).collect();
        responder.send(Ok(matching)).unwrap();

        let listed = list_task.await.unwrap().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "product_1");
    }

    #[tokio::test]
    async fn test_mock_client_relays_errors() {
        let (client, mut receiver) = create_mock_client::<Product>(10);

        let delete_task = tokio::spawn(async move { client.delete("product_9".to_string()).await });
        match receiver.recv().await {
            Some(ResourceRequest::Delete { id, respond_to }) => {
                assert_eq!(id, "product_9");
                respond_to.send(Err(FrameworkError::NotFound(id))).unwrap();
            }
            _ => panic!("Expected Delete request"),
        }

        let result = delete_task.await.unwrap();
        assert_eq!(result, Err(FrameworkError::NotFound("product_9".to_string())));
    }
}
