//! Weekend trip example: three friends log expenses and settle up

use bigdecimal::BigDecimal;
use lightsplit_core::utils::MemoryStorage;
use lightsplit_core::{Splitter, SubmitExpense};
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🧾 LightSplit Core - Trip Split Example\n");

    let mut splitter = Splitter::new(MemoryStorage::new());

    // 1. Create the room
    let room = splitter
        .create_room(
            "Weekend in Porto".to_string(),
            vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
        )
        .await?;
    println!("🏠 Created room {} - {}\n", room.id, room.title);

    // 2. Log what everyone paid
    println!("💰 Recording Expenses...\n");

    let hotel = splitter
        .submit_expense(
            &room.id,
            SubmitExpense::new("Alice", BigDecimal::from(240)).description("Hotel"),
        )
        .await?;
    println!("  ✓ {} paid {} for {}", hotel.payer, hotel.amount, hotel.description);

    let dinner = splitter
        .submit_expense(
            &room.id,
            SubmitExpense::new("Bob", BigDecimal::from_str("86.40")?)
                .description("Dinner")
                .participants(["Bob", "Carol"]),
        )
        .await?;
    println!(
        "  ✓ {} paid {} for {} (split with {})",
        dinner.payer,
        dinner.amount,
        dinner.description,
        dinner.participants.join(", ")
    );

    let tickets = splitter
        .submit_expense(
            &room.id,
            SubmitExpense::new("Carol", BigDecimal::from(45)).description("Museum tickets"),
        )
        .await?;
    println!(
        "  ✓ {} paid {} for {}\n",
        tickets.payer, tickets.amount, tickets.description
    );

    // 3. Settle up
    let result = splitter.room_result(&room.id).await?;

    println!("📊 Balances");
    for (member, balance) in &result.balances {
        println!("  {:<8} {:>10}", member, balance);
    }

    println!("\n🔁 Transfers");
    for transfer in &result.transactions {
        println!(
            "  {} pays {} {}",
            transfer.from, transfer.to, transfer.amount
        );
    }

    println!(
        "\nTotal spent: {} (about {} per person)",
        result.total_spent, result.average_per_person
    );

    Ok(())
}
