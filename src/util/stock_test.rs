use super::*;

fn product(id: &str, name: &str, sku: &str, quantity: u32) -> Product {
    Product {
        id: id.to_owned(),
        organization_id: String::new(),
        name: name.to_owned(),
        sku: sku.to_owned(),
        description: None,
        quantity_on_hand: quantity,
        cost_price: None,
        selling_price: None,
        low_stock_threshold: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

// =============================================================================
// is_low_stock
// =============================================================================

#[test]
fn at_threshold_is_low() {
    assert!(is_low_stock(5, Some(5)));
}

#[test]
fn below_threshold_is_low() {
    assert!(is_low_stock(3, Some(5)));
}

#[test]
fn above_threshold_is_not_low() {
    assert!(!is_low_stock(6, Some(5)));
}

#[test]
fn missing_threshold_defaults_to_five() {
    assert!(is_low_stock(5, None));
    assert!(!is_low_stock(6, None));
}

#[test]
fn zero_threshold_falls_back_to_five() {
    assert_eq!(threshold_or_default(Some(0)), 5);
    assert!(is_low_stock(3, Some(0)));
    assert!(!is_low_stock(6, Some(0)));
}

#[test]
fn nonzero_threshold_is_kept() {
    assert_eq!(threshold_or_default(Some(1)), 1);
    assert_eq!(threshold_or_default(None), 5);
}

// =============================================================================
// format_price
// =============================================================================

#[test]
fn format_price_two_decimals() {
    assert_eq!(format_price(Some(49.5)), "$49.50");
    assert_eq!(format_price(Some(3.0)), "$3.00");
}

#[test]
fn format_price_missing_is_zero() {
    assert_eq!(format_price(None), "$0.00");
}

// =============================================================================
// filter_products
// =============================================================================

#[test]
fn empty_query_matches_everything() {
    let products = vec![product("1", "Mouse", "WM-001", 3), product("2", "Keyboard", "KB-1", 9)];
    assert_eq!(filter_products(&products, "").len(), 2);
    assert_eq!(filter_products(&products, "   ").len(), 2);
}

#[test]
fn query_matches_name_case_insensitively() {
    let products = vec![product("1", "Wireless Mouse", "WM-001", 3), product("2", "Keyboard", "KB-1", 9)];
    let hits = filter_products(&products, "mOuSe");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
}

#[test]
fn query_matches_sku() {
    let products = vec![product("1", "Mouse", "WM-001", 3), product("2", "Keyboard", "KB-1", 9)];
    let hits = filter_products(&products, "kb-");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "2");
}

#[test]
fn query_without_hits_is_empty() {
    let products = vec![product("1", "Mouse", "WM-001", 3)];
    assert!(filter_products(&products, "monitor").is_empty());
}

#[test]
fn filter_preserves_order() {
    let products = vec![
        product("1", "USB cable", "C-1", 1),
        product("2", "Mouse", "M-1", 1),
        product("3", "HDMI cable", "C-2", 1),
    ];
    let ids: Vec<&str> = filter_products(&products, "cable").iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}
