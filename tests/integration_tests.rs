//! Integration tests for lightsplit-core

use lightsplit_core::{
    utils::{MemoryStorage, StrictExpenseValidator},
    CreateRoomRequest, CreateRoomResponse, DefaultRoomValidator, DeleteExpenseRequest,
    EditExpenseRequest, RoomStorage, SplitError, Splitter, SubmitExpense, SubmitExpenseRequest,
    Transfer,
};
use bigdecimal::BigDecimal;
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn transfer(from: &str, to: &str, amount: &str) -> Transfer {
    Transfer {
        from: from.to_string(),
        to: to.to_string(),
        amount: dec(amount),
    }
}

#[tokio::test]
async fn test_complete_room_workflow() {
    let storage = MemoryStorage::new();
    let mut splitter = Splitter::new(storage.clone());

    let create: CreateRoomRequest =
        serde_json::from_str(r#"{"title": "Lisbon", "members": ["Alice", "Bob", "Carol"]}"#)
            .unwrap();
    let (title, members) = create.into_parts().unwrap();
    let room = splitter.create_room(title, members).await.unwrap();

    let response = serde_json::to_value(CreateRoomResponse::from(&room)).unwrap();
    assert_eq!(response["room_id"], room.id.as_str());

    // Alice covers dinner for two, Bob covers a taxi shared with Carol
    let dinner: SubmitExpenseRequest = serde_json::from_str(
        r#"{"name": "Alice", "amount": 100, "description": "Dinner", "involved_members": ["Alice", "Bob"]}"#,
    )
    .unwrap();
    let taxi: SubmitExpenseRequest = serde_json::from_str(
        r#"{"name": "Bob", "amount": "60", "involved_members": ["Bob", "Carol"]}"#,
    )
    .unwrap();

    splitter
        .submit_expense(&room.id, dinner.try_into().unwrap())
        .await
        .unwrap();
    splitter
        .submit_expense(&room.id, taxi.try_into().unwrap())
        .await
        .unwrap();

    let result = splitter.room_result(&room.id).await.unwrap();
    assert_eq!(result.balances["Alice"], dec("50"));
    assert_eq!(result.balances["Bob"], dec("-20"));
    assert_eq!(result.balances["Carol"], dec("-30"));
    assert_eq!(
        result.transactions,
        vec![
            transfer("Carol", "Alice", "30"),
            transfer("Bob", "Alice", "20"),
        ]
    );
    assert_eq!(result.total_spent, dec("160"));
    assert_eq!(result.average_per_person, dec("53.33"));
    assert_eq!(result.payment_records[0].description, "Dinner");

    // The storage handle shared with the splitter sees the same records
    assert_eq!(storage.get_expenses(&room.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_edit_and_delete_through_requests() {
    let mut splitter = Splitter::new(MemoryStorage::new());
    let room = splitter
        .create_room(
            "Groceries".to_string(),
            vec!["Alice".to_string(), "Bob".to_string()],
        )
        .await
        .unwrap();

    let record = splitter
        .submit_expense(&room.id, SubmitExpense::new("Alice", dec("30")))
        .await
        .unwrap();

    let edit: EditExpenseRequest = serde_json::from_str(&format!(
        r#"{{"id": "{}", "name": "Bob", "amount": "50", "description": "Weekly shop"}}"#,
        record.id
    ))
    .unwrap();
    let (expense_id, revision) = edit.into_parts().unwrap();
    let edited = splitter
        .edit_expense(&room.id, &expense_id, revision)
        .await
        .unwrap();
    assert!(edited.edited);
    assert_eq!(edited.participants, vec!["Alice", "Bob"]);

    let result = splitter.room_result(&room.id).await.unwrap();
    assert_eq!(result.transactions, vec![transfer("Alice", "Bob", "25")]);

    let delete: DeleteExpenseRequest =
        serde_json::from_str(&format!(r#"{{"id": "{}"}}"#, record.id)).unwrap();
    splitter.delete_expense(&room.id, &delete.id).await.unwrap();

    let result = splitter.room_result(&room.id).await.unwrap();
    assert!(result.transactions.is_empty());
    assert!(result.payment_records.is_empty());
    assert_eq!(result.balances["Alice"], BigDecimal::from(0));
}

#[tokio::test]
async fn test_unknown_participants_never_reach_balances() {
    let mut splitter = Splitter::new(MemoryStorage::new());
    let room = splitter
        .create_room(
            "Concert".to_string(),
            vec!["Alice".to_string(), "Bob".to_string()],
        )
        .await
        .unwrap();

    splitter
        .submit_expense(
            &room.id,
            SubmitExpense::new("Alice", dec("80")).participants(["Bob", "Mallory"]),
        )
        .await
        .unwrap();

    let result = splitter.room_result(&room.id).await.unwrap();
    assert!(!result.balances.contains_key("Mallory"));
    assert_eq!(result.balances["Bob"], dec("-80"));
    assert_eq!(result.transactions, vec![transfer("Bob", "Alice", "80")]);
}

#[tokio::test]
async fn test_strict_validation_rejects_unknown_participants() {
    let mut splitter = Splitter::with_validators(
        MemoryStorage::new(),
        Box::new(DefaultRoomValidator),
        Box::new(StrictExpenseValidator),
    );
    let room = splitter
        .create_room("Gym".to_string(), vec!["Alice".to_string(), "Bob".to_string()])
        .await
        .unwrap();

    let result = splitter
        .submit_expense(
            &room.id,
            SubmitExpense::new("Alice", dec("15")).participants(["Mallory"]),
        )
        .await;
    assert!(matches!(result, Err(SplitError::Validation(_))));
}

#[tokio::test]
async fn test_uneven_split_settles_within_a_cent() {
    let mut splitter = Splitter::new(MemoryStorage::new());
    let room = splitter
        .create_room(
            "Pizza".to_string(),
            vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
        )
        .await
        .unwrap();

    splitter
        .submit_expense(&room.id, SubmitExpense::new("Alice", dec("100")))
        .await
        .unwrap();

    let result = splitter.room_result(&room.id).await.unwrap();
    assert_eq!(result.balances["Alice"], dec("66.67"));
    assert_eq!(
        result.transactions,
        vec![
            transfer("Bob", "Alice", "33.33"),
            transfer("Carol", "Alice", "33.33"),
        ]
    );

    let sum: BigDecimal = result.balances.values().sum();
    assert!(sum.abs() <= dec("0.01"));
}

#[tokio::test]
async fn test_result_serializes_to_wire_format() {
    let mut splitter = Splitter::new(MemoryStorage::new());
    let room = splitter
        .create_room(
            "Museum".to_string(),
            vec!["Alice".to_string(), "Bob".to_string()],
        )
        .await
        .unwrap();
    splitter
        .submit_expense(&room.id, SubmitExpense::new("Bob", dec("24")))
        .await
        .unwrap();

    let result = splitter.room_result(&room.id).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["title"], "Museum");
    assert_eq!(json["transactions"][0]["from"], "Alice");
    assert_eq!(json["transactions"][0]["to"], "Bob");
    assert!(json["balances"].get("Alice").is_some());
    assert_eq!(json["payment_records"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_missing_room_and_record() {
    let mut splitter = Splitter::new(MemoryStorage::new());

    assert!(matches!(
        splitter
            .submit_expense("4242", SubmitExpense::new("Alice", dec("1")))
            .await,
        Err(SplitError::RoomNotFound(_))
    ));

    let room = splitter
        .create_room("Bills".to_string(), vec!["Alice".to_string()])
        .await
        .unwrap();
    assert!(matches!(
        splitter.delete_expense(&room.id, "nope").await,
        Err(SplitError::ExpenseNotFound(_))
    ));
}

#[tokio::test]
async fn test_out_of_range_amounts_never_reach_the_room() {
    let mut splitter = Splitter::new(MemoryStorage::new());
    let room = splitter
        .create_room("Snacks".to_string(), vec!["A".to_string(), "B".to_string()])
        .await
        .unwrap();

    let tiny: SubmitExpenseRequest =
        serde_json::from_str(r#"{"name": "A", "amount": "0.001"}"#).unwrap();
    let command: SubmitExpense = tiny.try_into().unwrap();
    assert!(matches!(
        splitter.submit_expense(&room.id, command).await,
        Err(SplitError::Validation(_))
    ));

    let huge: SubmitExpenseRequest =
        serde_json::from_str(r#"{"name": "A", "amount": "1e200"}"#).unwrap();
    assert!(SubmitExpense::try_from(huge).is_err());
    assert!(matches!(
        splitter
            .submit_expense(&room.id, SubmitExpense::new("A", dec("1e200")))
            .await,
        Err(SplitError::Validation(_))
    ));

    let result = splitter.room_result(&room.id).await.unwrap();
    assert!(result.payment_records.is_empty());
    assert_eq!(result.total_spent, BigDecimal::from(0));
}
