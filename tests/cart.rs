use babyland_api::cart::Cart;
use babyland_api::models::Product;
use chrono::Utc;
use uuid::Uuid;

fn product(id: Uuid, code: &str, price: i64) -> Product {
    Product {
        id,
        code: code.to_string(),
        name: format!("Product {code}"),
        description: None,
        price,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn add_merges_repeated_products_into_one_line() {
    let id = Uuid::new_v4();
    let mut cart = Cart::new();

    cart.add(product(id, "BL-1", 10), 2);
    cart.add(product(id, "BL-1", 10), 3);
    cart.add(product(id, "BL-1", 10), 1);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 6);
    assert_eq!(cart.total_items(), 6);
}

#[test]
fn add_keeps_first_occurrence_order() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let mut cart = Cart::new();

    cart.add(product(a, "BL-A", 10), 1);
    cart.add(product(b, "BL-B", 20), 1);
    cart.add(product(c, "BL-C", 30), 1);
    cart.add(product(b, "BL-B", 20), 5);

    let codes: Vec<&str> = cart.lines().iter().map(|l| l.product.code.as_str()).collect();
    assert_eq!(codes, ["BL-A", "BL-B", "BL-C"]);
}

#[test]
fn add_clamps_quantity_below_one() {
    let id = Uuid::new_v4();
    let mut cart = Cart::new();

    cart.add(product(id, "BL-1", 10), 0);
    assert_eq!(cart.lines()[0].quantity, 1);

    cart.add(product(id, "BL-1", 10), -3);
    assert_eq!(cart.lines()[0].quantity, 2);
}

#[test]
fn add_keeps_the_original_product_snapshot() {
    let id = Uuid::new_v4();
    let mut cart = Cart::new();

    cart.add(product(id, "BL-1", 10), 1);

    // A re-add after a catalog edit must not rewrite the embedded snapshot.
    let mut edited = product(id, "BL-1", 99);
    edited.name = "Renamed".to_string();
    cart.add(edited, 1);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[0].product.price, 10);
    assert_eq!(cart.lines()[0].product.name, "Product BL-1");
}

#[test]
fn update_quantity_sets_and_clamps() {
    let id = Uuid::new_v4();
    let mut cart = Cart::new();
    cart.add(product(id, "BL-1", 10), 2);

    cart.update_quantity(id, 7);
    assert_eq!(cart.lines()[0].quantity, 7);

    cart.update_quantity(id, 0);
    assert_eq!(cart.lines()[0].quantity, 1);

    cart.update_quantity(id, -4);
    assert_eq!(cart.lines()[0].quantity, 1);
}

#[test]
fn update_quantity_is_a_noop_for_unknown_products() {
    let id = Uuid::new_v4();
    let mut cart = Cart::new();
    cart.add(product(id, "BL-1", 10), 2);

    cart.update_quantity(Uuid::new_v4(), 9);

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
}

#[test]
fn update_quantity_does_not_move_the_line() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut cart = Cart::new();
    cart.add(product(a, "BL-A", 10), 1);
    cart.add(product(b, "BL-B", 20), 1);

    cart.update_quantity(a, 9);

    let codes: Vec<&str> = cart.lines().iter().map(|l| l.product.code.as_str()).collect();
    assert_eq!(codes, ["BL-A", "BL-B"]);
}

#[test]
fn remove_preserves_relative_order_of_the_rest() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let mut cart = Cart::new();
    cart.add(product(a, "BL-A", 10), 1);
    cart.add(product(b, "BL-B", 20), 1);
    cart.add(product(c, "BL-C", 30), 1);

    cart.remove(b);

    let codes: Vec<&str> = cart.lines().iter().map(|l| l.product.code.as_str()).collect();
    assert_eq!(codes, ["BL-A", "BL-C"]);

    // Removing an absent product is a no-op.
    cart.remove(b);
    assert_eq!(cart.lines().len(), 2);
}

#[test]
fn removed_then_re_added_product_goes_to_the_end() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut cart = Cart::new();
    cart.add(product(a, "BL-A", 10), 1);
    cart.add(product(b, "BL-B", 20), 1);

    cart.remove(a);
    cart.add(product(a, "BL-A", 10), 1);

    let codes: Vec<&str> = cart.lines().iter().map(|l| l.product.code.as_str()).collect();
    assert_eq!(codes, ["BL-B", "BL-A"]);
}

#[test]
fn totals_follow_the_line_sums() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut cart = Cart::new();
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_amount(), 0);

    cart.add(product(a, "BL-A", 1500), 2);
    cart.add(product(b, "BL-B", 2200), 3);

    assert_eq!(cart.total_items(), 5);
    assert_eq!(cart.total_amount(), 2 * 1500 + 3 * 2200);
}

#[test]
fn clear_empties_any_cart_and_is_idempotent() {
    let mut cart = Cart::new();
    cart.add(product(Uuid::new_v4(), "BL-A", 10), 4);

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
    assert_eq!(cart.total_amount(), 0);

    cart.clear();
    assert!(cart.is_empty());
}

#[test]
fn review_screen_scenario() {
    let p1 = Uuid::new_v4();
    let mut cart = Cart::new();

    cart.add(product(p1, "p1", 10), 2);
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_amount(), 20);

    cart.add(product(p1, "p1", 10), 3);
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.total_items(), 5);
    assert_eq!(cart.total_amount(), 50);

    cart.update_quantity(p1, 0);
    assert_eq!(cart.lines()[0].quantity, 1);
    assert_eq!(cart.total_amount(), 10);

    cart.remove(p1);
    assert!(cart.is_empty());

    cart.clear();
    assert!(cart.is_empty());
}

#[test]
fn snapshot_round_trip() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut cart = Cart::new();
    cart.add(product(a, "BL-A", 1500), 2);
    cart.add(product(b, "BL-B", 2200), 1);

    let restored = Cart::from_snapshot(&cart.to_snapshot());

    assert_eq!(restored, cart);
    assert_eq!(restored.total_amount(), cart.total_amount());
}

#[test]
fn corrupt_snapshots_fall_back_to_an_empty_cart() {
    for text in ["", "not json", "{", "123", r#"{"items":[]}"#, r#"[{"quantity":2}]"#] {
        let cart = Cart::from_snapshot(text);
        assert!(cart.is_empty(), "expected empty cart for {text:?}");
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_amount(), 0);
    }
}

#[test]
fn empty_snapshot_array_is_an_empty_cart() {
    let cart = Cart::from_snapshot("[]");
    assert!(cart.is_empty());
}
