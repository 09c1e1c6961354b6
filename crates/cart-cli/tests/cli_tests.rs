use cart_cli::{run_from, EXIT_EMPTY_CART};
use pretty_assertions::assert_eq;
use std::path::Path;

fn cart(store: &Path, args: &[&str]) -> (i32, String) {
    let mut argv = vec!["cart", "--store", store.to_str().unwrap()];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let code = run_from(argv, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn add_show_and_adjust() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("storage.json");

    let (code, out) = cart(&store, &["add", "--name", "Shoe", "--price", "₦5,000", "--id", "1"]);
    assert_eq!(code, 0);
    assert_eq!(out, "Shoe added to your cart!\n");

    cart(&store, &["add", "--name", "Shoe", "--price", "₦5,000", "--id", "1"]);
    cart(&store, &["add", "--name", "Sock", "--price", "₦500"]);

    let (_, out) = cart(&store, &["show"]);
    assert_eq!(out, "1. Shoe  ₦5,000 x 2\n2. Sock  ₦500 x 1\nSubtotal: ₦10,500\n");

    let (_, out) = cart(&store, &["dec", "1"]);
    assert!(out.contains("1. Shoe  ₦5,000 x 1\n"));
    let (_, out) = cart(&store, &["set", "2", "4.8"]);
    assert!(out.ends_with("Subtotal: ₦7,000\n"));

    let (_, out) = cart(&store, &["remove", "1"]);
    assert!(out.starts_with("Removed Shoe\n1. Sock  ₦500 x 4\n"));
}

#[test]
fn show_json_prints_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("storage.json");
    cart(&store, &["add", "--name", "Hat", "--price", "₦1,500", "--element-id", "hat-card"]);

    let (_, out) = cart(&store, &["show", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value[0]["id"], "hat-card");
    assert_eq!(value[0]["quantity"], 1);
}

#[test]
fn checkout_empty_and_filled() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("storage.json");

    let (code, out) = cart(&store, &["checkout"]);
    assert_eq!(code, EXIT_EMPTY_CART);
    assert_eq!(out, "! Your cart is empty!\n");

    cart(&store, &["add", "--name", "Shoe", "--price", "₦5,000"]);
    cart(&store, &["inc", "1"]);
    let (code, out) = cart(&store, &["checkout"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Opening https://wa.me/2347061724876?text=Hello!%20I'd%20like"));
    assert!(out.contains("1.%20Shoe%20-%202%20x%20%E2%82%A65%2C000"));
}

#[test]
fn config_file_changes_key_and_contact() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("storage.json");
    let config = dir.path().join("cart.toml");
    std::fs::write(
        &config,
        "storage_key = \"basket\"\n[handoff]\ncontact_number = \"15550001111\"\n",
    )
    .unwrap();
    let config = config.to_str().unwrap();

    cart(&store, &["--config", config, "add", "--name", "Sock", "--price", "₦500"]);
    let (_, out) = cart(&store, &["--config", config, "checkout"]);
    assert!(out.starts_with("Opening https://wa.me/15550001111?text="));

    let raw = std::fs::read_to_string(&store).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(entries.get("basket").is_some());
    assert!(entries.get("cart").is_none());
}

#[test]
fn row_out_of_range_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("storage.json");
    cart(&store, &["add", "--name", "Sock", "--price", "₦500"]);
    for command in ["inc", "dec", "remove"] {
        let argv = vec!["cart", "--store", store.to_str().unwrap(), command, "2"];
        let err = run_from(argv, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "row 2 is not in the cart (1 rows listed)");
    }
    let argv = vec!["cart", "--store", store.to_str().unwrap(), "set", "3", "4"];
    let err = run_from(argv, &mut Vec::new()).unwrap_err();
    assert_eq!(err.to_string(), "row 3 is not in the cart (1 rows listed)");
}

#[test]
fn row_zero_is_rejected_by_parser() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("storage.json");
    let argv = vec!["cart", "--store", store.to_str().unwrap(), "inc", "0"];
    assert!(run_from(argv, &mut Vec::new()).is_err());
}
