//! Integration tests for the order lifecycle over the JSON order file.
//!
//! Each test gets its own temporary directory so the order file starts absent.

use std::{fs, io::Cursor, path::Path};

use rust_decimal::Decimal;
use rusty_money::iso::USD;
use testresult::TestResult;

use cafe_till::{prelude::*, shell::Shell};

const PASSWORD: &str = "flat-white";

fn fixture_catalog() -> TestResult<Catalog> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/products/cafe.yml");

    Ok(Catalog::load(path)?)
}

fn service_at(path: &Path) -> TestResult<OrderService<JsonFileStore>> {
    Ok(OrderService::new(
        fixture_catalog()?,
        JsonFileStore::new(path),
        PasswordGate::new(PASSWORD),
    ))
}

#[test]
fn fixture_catalog_matches_built_in_menu() -> TestResult {
    assert_eq!(fixture_catalog()?.list(), Catalog::cafe().list());

    Ok(())
}

#[test]
fn two_coffees_lifecycle() -> TestResult {
    let dir = tempfile::tempdir()?;
    let service = service_at(&dir.path().join("orders.json"))?;
    let mut order = Order::new(OrderDay::Monday);

    let added = service.add_item(&mut order, 1, 2)?;

    assert_eq!(added.to_string(), "2 x Coffee added to your order.");

    let totals = Totals::of(&order)?;

    assert_eq!(totals.subtotal, Decimal::new(500, 2));
    assert_eq!(totals.tax, Decimal::new(50, 2));
    assert_eq!(totals.total, Decimal::new(550, 2));

    let finalized = service.finalize(&order)?;

    assert_eq!(finalized.number, 1);
    assert_eq!(service.pending_orders()?.len(), 1);

    service.fulfill(0)?;

    let again = service.fulfill(0);

    assert!(
        matches!(again, Err(OrderError::AlreadyFulfilled { number: 1 })),
        "expected AlreadyFulfilled, got {again:?}"
    );
    assert!(service.pending_orders()?.is_empty());

    Ok(())
}

#[test]
fn orders_survive_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.json");

    {
        let service = service_at(&path)?;

        for (day, product, quantity) in [
            (OrderDay::Monday, 1, 2),
            (OrderDay::Tuesday, 5, 1),
            (OrderDay::Monday, 2, 3),
        ] {
            let mut order = Order::new(day);
            service.add_item(&mut order, product, quantity)?;
            service.finalize(&order)?;
        }

        service.fulfill(1)?;
    }

    let service = service_at(&path)?;
    let orders = service.all_orders()?;

    let summary: Vec<(OrderDay, bool)> = orders
        .iter()
        .map(|order| (order.day(), order.is_fulfilled()))
        .collect();

    assert_eq!(
        summary,
        vec![
            (OrderDay::Monday, false),
            (OrderDay::Tuesday, true),
            (OrderDay::Monday, false),
        ]
    );

    let monday = service.day_summary(OrderDay::Monday)?;
    let numbers: Vec<usize> = monday.iter().map(|line| line.number).collect();

    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(service.orders_for_day(OrderDay::Sunday)?.len(), 0);

    Ok(())
}

#[test]
fn save_then_load_keeps_lines() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("orders.json");
    let service = service_at(&path)?;

    let mut order = Order::new(OrderDay::Saturday);
    service.add_item(&mut order, 3, 1)?;
    service.add_item(&mut order, 6, 2)?;
    service.add_item(&mut order, 3, 4)?;
    service.finalize(&order)?;

    let reloaded = JsonFileStore::new(&path).load_all()?;
    let saved = reloaded.first().ok_or("missing order")?;

    assert_eq!(saved, &order);
    assert_eq!(saved.line(3).map(OrderLine::quantity), Some(5));
    assert_eq!(saved.line(6).map(OrderLine::quantity), Some(2));
    assert_eq!(Totals::of(saved)?.subtotal, Decimal::new(3400, 2));

    Ok(())
}

#[test]
fn corrupt_order_file_is_a_storage_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.json");

    fs::write(&path, "[{\"items\": ")?;

    let service = service_at(&path)?;
    let result = service.pending_orders();

    assert!(
        matches!(result, Err(OrderError::Storage(StoreError::Decode { .. }))),
        "expected Decode error, got {result:?}"
    );

    Ok(())
}

#[test]
fn scripted_session_persists_orders() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("orders.json");

    let script = "1\n4\n2\n2\n4\n1\n5\nflat-white\n4\n6\n";
    let mut shell = Shell::new(
        service_at(&path)?,
        ReceiptPrinter::new(USD),
        OrderDay::Thursday,
        Cursor::new(script.as_bytes().to_vec()),
        Vec::new(),
    );

    shell.run()?;

    let text = String::from_utf8(shell.into_output())?;

    assert!(text.contains("2 x Yerba Mate added to your order."), "{text}");
    assert!(text.contains("Order #1 has been finalized and saved."), "{text}");
    assert!(text.contains("Order #1 has been marked as fulfilled."), "{text}");
    assert!(text.contains("Orders for Thursday:"), "{text}");
    assert!(text.contains("$3.30"), "{text}");

    let orders = service_at(&path)?.all_orders()?;

    assert_eq!(orders.len(), 1);
    assert!(orders.first().is_some_and(Order::is_fulfilled));

    Ok(())
}
