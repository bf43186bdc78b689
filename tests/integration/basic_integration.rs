/// Basic integration tests
use chrono::NaiveDate;
use habit_tracker::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    parse_date(s).expect("valid test date")
}

fn open_store(dir: &TempDir, identity: Option<&str>, today: &str) -> CompletionStore<SqliteStorage> {
    let storage = SqliteStorage::new(dir.path().join("habits.db")).expect("Failed to open database");
    CompletionStore::with_clock(storage, identity, FixedClock(date(today)))
}

fn request(id: u64, method: &str, params: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }).to_string()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    request(id, "tools/call", json!({ "name": name, "arguments": arguments }))
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_starts_empty() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let server = HabitTrackerServer::new(dir.path().join("habits.db"), None, Some(date("2024-01-03")))
            .await
            .expect("Failed to create server");

        assert!(server.store().habits().is_empty());
        assert!(server.store().key().is_guest());
        assert_eq!(server.store().today(), date("2024-01-03"));
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = dir.path().join("habits.db");

        let id = {
            let mut server = HabitTrackerServer::new(db_path.clone(), None, Some(date("2024-01-03")))
                .await
                .expect("Failed to create first server");
            let store = server.store_mut();
            let id = store.create(NewHabit::new("Read", Frequency::Daily)).id;
            store.toggle_completion(&id, date("2024-01-02"));
            store.toggle_completion(&id, date("2024-01-03"));
            id
        };

        let server = HabitTrackerServer::new(db_path, None, Some(date("2024-01-03")))
            .await
            .expect("Failed to create second server");
        let habit = server.store().get(&id).expect("habit survives reopen");

        assert_eq!(habit.name, "Read");
        assert_eq!(habit.streak, 2);
        assert_eq!(habit.completions.len(), 2);
    }

    #[test]
    fn test_cached_streak_is_not_refreshed_on_load() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let id = {
            let mut store = open_store(&dir, None, "2024-01-03");
            let id = store.create(NewHabit::new("Run", Frequency::Daily)).id;
            store.toggle_completion(&id, date("2024-01-03"));
            id
        };

        // A week later the run is stale, but nothing has touched the habit.
        let store = open_store(&dir, None, "2024-01-10");
        assert_eq!(store.get(&id).map(|h| h.streak), Some(1));
        assert_eq!(store.stats().current_streak, 1);
        assert_eq!(store.stats().completed_today, 0);
    }

    #[test]
    fn test_identities_are_isolated() {
        let dir = TempDir::new().expect("Failed to create temp dir");

        {
            let mut guest = open_store(&dir, None, "2024-01-03");
            guest.create(NewHabit::new("Guest habit", Frequency::Daily));
        }
        {
            let mut ada = open_store(&dir, Some("ada@example.com"), "2024-01-03");
            assert!(ada.habits().is_empty());
            ada.create(NewHabit::new("Ada habit", Frequency::Weekly));
            ada.create(NewHabit::new("Another", Frequency::Daily));
        }

        let mut store = open_store(&dir, None, "2024-01-03");
        assert_eq!(store.habits().len(), 1);

        store.switch_identity(Some("ada@example.com"));
        assert_eq!(store.habits().len(), 2);

        let keys = store.storage().keys().expect("list keys");
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = SqliteStorage::new(dir.path().join("habits.db")).expect("Failed to open database");
        storage
            .put(StorageKey::guest().as_str(), "{not json")
            .expect("write raw value");

        let mut store = CompletionStore::with_clock(storage, None, FixedClock(date("2024-01-03")));
        assert!(store.habits().is_empty());

        // The next command overwrites the corrupt value with a valid snapshot.
        store.create(NewHabit::new("Fresh", Frequency::Daily));
        let raw = store
            .storage()
            .get(StorageKey::guest().as_str())
            .expect("read snapshot")
            .expect("snapshot present");
        let parsed: Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(parsed[0]["name"], "Fresh");
        assert!(parsed[0]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_json_rpc_session() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&dir, None, "2024-01-03");
        let mut server = McpServer::new(store);

        let mut input = vec![
            request(1, "initialize", json!({})),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
            tool_call(2, "habit_create", json!({ "name": "Stretch", "color": "#10b981" })),
        ]
        .join("\n");
        input.push('\n');

        let mut output = Vec::new();
        server
            .serve(input.as_bytes(), &mut output)
            .await
            .expect("serve requests");

        let responses: Vec<Value> = String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json response"))
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"]["isError"], false);
        assert!(server.is_initialized());

        let habit = &server.store().habits()[0];
        assert_eq!(habit.color, "#10b981");

        let id = habit.id.to_string();
        let mut input = [
            tool_call(3, "habit_toggle", json!({ "habit_id": id, "date": "2024-01-02" })),
            tool_call(4, "habit_toggle", json!({ "habit_id": id })),
            tool_call(5, "habit_stats", json!({})),
            tool_call(6, "habit_toggle", json!({ "habit_id": id, "date": "01/02/2024" })),
        ]
        .join("\n");
        input.push('\n');

        let mut output = Vec::new();
        server
            .serve(input.as_bytes(), &mut output)
            .await
            .expect("serve requests");

        let responses: Vec<Value> = String::from_utf8(output)
            .expect("utf8 output")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json response"))
            .collect();

        assert_eq!(responses[1]["result"]["structuredContent"]["outcome"]["streak"], 2);
        let stats = &responses[2]["result"]["structuredContent"]["stats"];
        assert_eq!(stats["completed_today"], 1);
        assert_eq!(stats["longest_streak"], 2);
        assert_eq!(responses[3]["result"]["isError"], true);

        // Everything written through the server is on disk.
        let reopened = open_store(&dir, None, "2024-01-03");
        assert_eq!(reopened.habits()[0].streak, 2);
    }
}
