//! Persistence Scenario Tests
//!
//! Save/preload flows against a scripted API and in-memory storage.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::basket::BasketStore;
    use crate::commands::{search_activities, ApiError, ApiResult, JourneyApi};
    use crate::itinerary::{Itinerary, JourneyDraft, SaveError};
    use crate::models::{Activity, Journey, SlotKey};
    use crate::persistence::{PersistenceBridge, SaveOutcome};
    use crate::storage::{JourneyArchive, MemoryStorage, StorageBackend};

    const PH: &str = "/static/img/no-image.jpg";

    /// Scripted API that records every call
    struct ScriptedApi {
        search: ApiResult<Vec<Value>>,
        fetch: ApiResult<Value>,
        update: ApiResult<Value>,
        save: ApiResult<Value>,
        create: ApiResult<Value>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedApi {
        fn offline() -> Self {
            let down = || Err(ApiError::Network("offline".into()));
            Self {
                search: Err(ApiError::Network("offline".into())),
                fetch: down(),
                update: down(),
                save: down(),
                create: down(),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    #[async_trait(?Send)]
    impl JourneyApi for ScriptedApi {
        async fn search(&self, query: &str) -> ApiResult<Vec<Value>> {
            self.record(format!("GET /search?query={}", query));
            self.search.clone()
        }

        async fn fetch_journey(&self, id: &str) -> ApiResult<Value> {
            self.record(format!("GET /journeys/{}", id));
            self.fetch.clone()
        }

        async fn update_journey(&self, id: &str, payload: &Journey) -> ApiResult<Value> {
            self.record(format!("PUT /journeys/{} id={:?}", id, payload.id));
            self.update.clone()
        }

        async fn save_journey(&self, payload: &Journey) -> ApiResult<Value> {
            self.record(format!("POST /journeys/save id={:?}", payload.id));
            self.save.clone()
        }

        async fn create_journey(&self, payload: &Journey) -> ApiResult<Value> {
            self.record(format!("POST /journeys id={:?}", payload.id));
            self.create.clone()
        }
    }

    fn bridge(api: ScriptedApi, mem: &Rc<MemoryStorage>) -> PersistenceBridge<ScriptedApi, Rc<MemoryStorage>> {
        PersistenceBridge::new(api, JourneyArchive::new(mem.clone(), "journeys"))
    }

    fn journey(id: Option<&str>) -> Journey {
        Journey { id: id.map(str::to_string), name: "Trip".into(), ..Default::default() }
    }

    #[tokio::test]
    async fn test_existing_id_uses_put() {
        let mem = Rc::new(MemoryStorage::new());
        let api = ScriptedApi { update: Ok(json!({"status": "updated", "id": "abc"})), ..ScriptedApi::offline() };
        let b = bridge(api, &mem);

        let outcome = b.save(&journey(Some("abc")), 1).await;

        assert_eq!(outcome, SaveOutcome::Remote { id: Some("abc".into()) });
        assert_eq!(b.api().calls(), vec!["PUT /journeys/abc id=Some(\"abc\")"]);
        assert!(!mem.contains("journeys"));
    }

    #[tokio::test]
    async fn test_unrecognized_put_falls_through_to_save_with_id() {
        let mem = Rc::new(MemoryStorage::new());
        let api = ScriptedApi {
            update: Ok(json!({"status": "not_found"})),
            save: Ok(json!({"status": "ok"})),
            ..ScriptedApi::offline()
        };
        let b = bridge(api, &mem);

        let outcome = b.save(&journey(Some("abc")), 1).await;

        assert_eq!(outcome, SaveOutcome::Remote { id: Some("abc".into()) });
        assert_eq!(
            b.api().calls(),
            vec!["PUT /journeys/abc id=Some(\"abc\")", "POST /journeys/save id=Some(\"abc\")"]
        );
    }

    #[tokio::test]
    async fn test_new_journey_tries_save_then_collection() {
        let mem = Rc::new(MemoryStorage::new());
        let api = ScriptedApi {
            save: Err(ApiError::Status(404)),
            create: Ok(json!({"status": "ok", "id": "srv1"})),
            ..ScriptedApi::offline()
        };
        let b = bridge(api, &mem);

        let outcome = b.save(&journey(None), 1).await;

        assert_eq!(outcome, SaveOutcome::Remote { id: Some("srv1".into()) });
        assert_eq!(b.api().calls(), vec!["POST /journeys/save id=None", "POST /journeys id=None"]);
    }

    #[tokio::test]
    async fn test_offline_new_journey_saved_locally() {
        let mem = Rc::new(MemoryStorage::new());
        let b = bridge(ScriptedApi::offline(), &mem);

        let outcome = b.save(&journey(None), 36).await;

        assert_eq!(outcome, SaveOutcome::Local { id: "j_10".into() });
        assert_eq!(outcome.message(), "Voyage sauvegardé (local) !");
        let list = JourneyArchive::new(mem.clone(), "journeys").list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["name"], "Trip");
    }

    #[tokio::test]
    async fn test_offline_existing_journey_replaces_local_entry() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("journeys", &json!([{"id": "abc", "name": "Old"}, {"id": "x"}]).to_string()).unwrap();
        let b = bridge(ScriptedApi::offline(), &mem);

        let outcome = b.save(&journey(Some("abc")), 1).await;

        assert_eq!(outcome, SaveOutcome::Local { id: "abc".into() });
        let list = JourneyArchive::new(mem.clone(), "journeys").list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "Trip");
    }

    #[tokio::test]
    async fn test_empty_name_blocks_everything() {
        let mem = Rc::new(MemoryStorage::new());
        let b = bridge(ScriptedApi::offline(), &mem);
        let draft = JourneyDraft { id: None, name: "   ".into(), location: "Lyon".into() };

        let result = b.submit(&draft, &Itinerary::default(), &[], PH, 1).await;

        assert_eq!(result, Err(SaveError::MissingName));
        assert_eq!(result.unwrap_err().to_string(), "Veuillez saisir un nom de voyage");
        assert!(b.api().calls().is_empty());
        assert!(!mem.contains("journeys"));
    }

    #[tokio::test]
    async fn test_submit_sends_serialized_itinerary() {
        let mem = Rc::new(MemoryStorage::new());
        let b = bridge(ScriptedApi::offline(), &mem);
        let mut it = Itinerary::default();
        it.add_day();
        let museum = Activity { id: "1".into(), name: "Musée".into(), image: String::new(), types: vec![] };
        it.place(2, SlotKey::Morning, &museum);
        let draft = JourneyDraft { id: None, name: " Trip ".into(), location: String::new() };

        let outcome = b.submit(&draft, &it, &[museum], PH, 36).await.unwrap();

        assert_eq!(outcome, SaveOutcome::Local { id: "j_10".into() });
        let saved = JourneyArchive::new(mem.clone(), "journeys").find("j_10").unwrap();
        assert_eq!(saved.name, "Trip");
        assert_eq!(saved.days.len(), 2);
        assert_eq!(saved.days[1].slots.morning[0].image, PH);
        assert_eq!(saved.basket.len(), 1);
    }

    #[tokio::test]
    async fn test_preload_falls_back_to_local_list() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("journeys", &json!([{"id": "abc", "name": "Trip"}]).to_string()).unwrap();
        let b = bridge(ScriptedApi::offline(), &mem);

        let loaded = b.load("abc").await.unwrap();

        assert_eq!(loaded.name, "Trip");
        assert_eq!(b.api().calls(), vec!["GET /journeys/abc"]);
    }

    #[tokio::test]
    async fn test_preload_prefers_remote() {
        let mem = Rc::new(MemoryStorage::new());
        mem.set_item("journeys", &json!([{"id": "abc", "name": "Local"}]).to_string()).unwrap();
        let api = ScriptedApi {
            fetch: Ok(json!({"id": "abc", "name": "Remote", "location": null, "days": "[]"})),
            ..ScriptedApi::offline()
        };
        let b = bridge(api, &mem);

        assert_eq!(b.load("abc").await.unwrap().name, "Remote");
    }

    #[tokio::test]
    async fn test_preload_unknown_id_is_none() {
        let mem = Rc::new(MemoryStorage::new());
        let b = bridge(ScriptedApi { fetch: Err(ApiError::Status(404)), ..ScriptedApi::offline() }, &mem);
        assert!(b.load("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_preload_restores_basket() {
        let mem = Rc::new(MemoryStorage::new());
        let api = ScriptedApi {
            fetch: Ok(json!({"id": "abc", "name": "T", "basket": [{"id": 3, "name": "C", "image": "i"}]})),
            ..ScriptedApi::offline()
        };
        let b = bridge(api, &mem);
        let basket = BasketStore::new(mem.clone(), "wish_basket_v1", PH);

        let loaded = b.load("abc").await.unwrap();
        basket.set(&loaded.basket).unwrap();

        assert_eq!(basket.get()[0].id, "3");
    }

    #[tokio::test]
    async fn test_search_then_add_then_remove() {
        let mem = Rc::new(MemoryStorage::new());
        let api = ScriptedApi { search: Ok(vec![json!({"id": "1", "name": "Musée"})]), ..ScriptedApi::offline() };
        let basket = BasketStore::new(mem.clone(), "wish_basket_v1", PH);

        let hits = search_activities(&api, " mus ", PH).await.unwrap();
        assert_eq!(api.calls(), vec!["GET /search?query=mus"]);
        assert!(basket.add(&hits[0].activity).unwrap());
        assert_eq!(basket.get().len(), 1);

        basket.remove("1").unwrap();
        assert!(basket.get().is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_request() {
        let api = ScriptedApi::offline();
        let hits = search_activities(&api, "   ", PH).await.unwrap();
        assert!(hits.is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_is_reported() {
        let api = ScriptedApi { search: Err(ApiError::Decode("not json".into())), ..ScriptedApi::offline() };
        let err = search_activities(&api, "a", PH).await.unwrap_err();
        assert_eq!(err, ApiError::Decode("not json".into()));
    }
}
