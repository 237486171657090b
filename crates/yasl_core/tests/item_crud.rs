use rusqlite::Connection;
use std::sync::Arc;
use std::thread;
use yasl_core::{Item, RepoError, ShoppingRepository, SqliteShoppingRepository};

#[test]
fn create_and_get_items_in_creation_order() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let list_id = repo.create_list("Test List").unwrap();
    let input = [
        ("Item 1", "Category 1"),
        ("Item 2", "Category 2"),
        ("Item 3", "Category 1"),
    ];

    let mut ids = Vec::new();
    for (name, category) in input {
        let id = repo.create_item(list_id, name, category).unwrap();
        assert!(id > 0);
        ids.push(id);
    }

    let items = repo.get_items(list_id).unwrap();
    assert_eq!(items.len(), input.len());
    for ((item, id), (name, category)) in items.iter().zip(&ids).zip(input) {
        assert_eq!(item.id, *id);
        assert_eq!(item.list_id, list_id);
        assert_eq!(item.name, name);
        assert_eq!(item.category, category);
        assert!(!item.checked);
    }
}

#[test]
fn get_items_only_returns_items_of_requested_list() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let groceries = repo.create_list("Groceries").unwrap();
    let hardware = repo.create_list("Hardware").unwrap();
    repo.create_item(groceries, "Apples", "Fruit").unwrap();
    let screws = repo.create_item(hardware, "Screws", "").unwrap();

    let items = repo.get_items(hardware).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, screws);
    assert_eq!(items[0].category, "");
}

#[test]
fn get_items_for_missing_list_is_empty() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    assert!(repo.get_items(999).unwrap().is_empty());
}

#[test]
fn create_item_for_missing_list_is_referential_integrity_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yasl.db");
    let repo = SqliteShoppingRepository::open(&path).unwrap();

    let err = repo.create_item(777, "Milch", "Milchprodukte").unwrap_err();
    assert!(matches!(err, RepoError::ReferentialIntegrity(_)));
    repo.close().unwrap();

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM items;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn updates_change_only_their_field() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let list_id = repo.create_list("Test List").unwrap();
    let item_id = repo.create_item(list_id, "Test Item", "Test Category").unwrap();

    repo.update_item_checked(item_id, true).unwrap();
    assert_eq!(
        single_item(&repo, list_id),
        Item {
            id: item_id,
            list_id,
            name: "Test Item".to_string(),
            category: "Test Category".to_string(),
            checked: true,
        }
    );

    repo.update_item_category(item_id, "New Category").unwrap();
    let item = single_item(&repo, list_id);
    assert_eq!(item.category, "New Category");
    assert_eq!(item.name, "Test Item");
    assert!(item.checked);

    repo.update_item_name(item_id, "New Name").unwrap();
    let item = single_item(&repo, list_id);
    assert_eq!(item.name, "New Name");
    assert_eq!(item.category, "New Category");
    assert!(item.checked);

    repo.update_item_checked(item_id, false).unwrap();
    assert!(!single_item(&repo, list_id).checked);
}

#[test]
fn updates_on_missing_item_are_silent_noops() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let list_id = repo.create_list("Test List").unwrap();
    let item_id = repo.create_item(list_id, "Test Item", "Test Category").unwrap();
    let missing = item_id + 50;

    repo.update_item_checked(missing, true).unwrap();
    repo.update_item_category(missing, "x").unwrap();
    repo.update_item_name(missing, "y").unwrap();
    repo.move_item_to_list(missing, list_id).unwrap();
    repo.delete_item(missing).unwrap();

    let item = single_item(&repo, list_id);
    assert_eq!(item.name, "Test Item");
    assert_eq!(item.category, "Test Category");
    assert!(!item.checked);
}

#[test]
fn delete_item_removes_only_that_item() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let list_id = repo.create_list("Test List").unwrap();
    let doomed = repo.create_item(list_id, "Doomed", "").unwrap();
    let kept = repo.create_item(list_id, "Kept", "").unwrap();

    repo.delete_item(doomed).unwrap();

    let items = repo.get_items(list_id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, kept);
}

#[test]
fn clear_checked_items_keeps_unchecked_items() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let list_id = repo.create_list("Test List").unwrap();
    let other_list = repo.create_list("Other").unwrap();

    let a = repo.create_item(list_id, "A", "Category").unwrap();
    let b = repo.create_item(list_id, "B", "Category").unwrap();
    let c = repo.create_item(list_id, "C", "Category").unwrap();
    let elsewhere = repo.create_item(other_list, "D", "Category").unwrap();
    repo.update_item_checked(a, true).unwrap();
    repo.update_item_checked(c, true).unwrap();
    repo.update_item_checked(elsewhere, true).unwrap();

    repo.clear_checked_items(list_id).unwrap();

    let remaining = repo.get_items(list_id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b);
    assert_eq!(remaining[0].name, "B");

    let untouched = repo.get_items(other_list).unwrap();
    assert_eq!(untouched.len(), 1);
    assert_eq!(untouched[0].id, elsewhere);
}

#[test]
fn move_item_to_list_preserves_fields() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let from = repo.create_list("List 1").unwrap();
    let to = repo.create_list("List 2").unwrap();
    let item_id = repo.create_item(from, "Test Item", "Test Category").unwrap();
    repo.update_item_checked(item_id, true).unwrap();
    let before = single_item(&repo, from);

    repo.move_item_to_list(item_id, to).unwrap();

    assert!(repo.get_items(from).unwrap().is_empty());
    let after = single_item(&repo, to);
    assert_eq!(after, Item { list_id: to, ..before });
}

#[test]
fn move_item_to_missing_list_is_referential_integrity() {
    let repo = SqliteShoppingRepository::open_in_memory().unwrap();
    let list_id = repo.create_list("List 1").unwrap();
    let item_id = repo.create_item(list_id, "Test Item", "").unwrap();

    let err = repo.move_item_to_list(item_id, list_id + 10).unwrap_err();
    assert!(matches!(err, RepoError::ReferentialIntegrity(_)));

    assert_eq!(single_item(&repo, list_id).id, item_id);
}

#[test]
fn null_category_reads_back_as_empty() {
    let conn = Connection::open_in_memory().unwrap();
    let repo = {
        conn.execute_batch(
            "CREATE TABLE lists (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL);
             CREATE TABLE items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                list_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                category TEXT,
                checked BOOLEAN NOT NULL DEFAULT 0,
                FOREIGN KEY(list_id) REFERENCES lists(id) ON DELETE CASCADE
             );
             INSERT INTO lists (id, name) VALUES (1, 'Imported');
             INSERT INTO items (list_id, name, category) VALUES (1, 'Salt', NULL);",
        )
        .unwrap();
        SqliteShoppingRepository::from_connection(conn).unwrap()
    };

    let items = repo.get_items(1).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "");
}

#[test]
fn shared_handle_serializes_writes_from_threads() {
    let repo = Arc::new(SqliteShoppingRepository::open_in_memory().unwrap());
    let list_id = repo.create_list("Shared").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for n in 0..25 {
                    repo.create_item(list_id, &format!("item-{worker}-{n}"), "")
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let items = repo.get_items(list_id).unwrap();
    assert_eq!(items.len(), 100);
    assert!(items.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn separate_handles_on_same_file_wait_for_table_locks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yasl.db");
    let setup = SqliteShoppingRepository::open(&path).unwrap();
    let list_id = setup.create_list("Shared file").unwrap();

    let handles: Vec<_> = (0..2)
        .map(|worker| {
            let repo = SqliteShoppingRepository::open(&path).unwrap();
            thread::spawn(move || {
                for n in 0..300 {
                    repo.create_item(list_id, &format!("item-{worker}-{n}"), "")
                        .unwrap();
                    repo.get_items(list_id).unwrap();
                }
                repo.close().unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(setup.get_items(list_id).unwrap().len(), 600);
    setup.close().unwrap();
}

fn single_item(repo: &SqliteShoppingRepository, list_id: i64) -> Item {
    let mut items = repo.get_items(list_id).unwrap();
    assert_eq!(items.len(), 1, "expected exactly one item in list {list_id}");
    items.remove(0)
}
