use super::*;

fn pair(source: &str, target: &str) -> Relation {
    Relation::new(source, target)
}

// =============================================================================
// RELATION SET
// =============================================================================

#[test]
fn insert_rejects_repeated_pairs() {
    let mut set = RelationSet::new();
    assert!(set.insert(pair("a", "b")));
    assert!(!set.insert(pair("a", "b")));
    assert!(set.insert(pair("b", "a")));
    assert_eq!(set.len(), 2);
}

#[test]
fn iteration_follows_first_insertion() {
    let mut set = RelationSet::new();
    set.extend([pair("z", "y"), pair("a", "b"), pair("z", "y")]);
    let order: Vec<&Relation> = set.iter().collect();
    assert_eq!(order, [&pair("z", "y"), &pair("a", "b")]);
}

#[test]
fn merge_keeps_pass_order_and_dedups_across_passes() {
    let set = merge(
        vec![pair("Billing", "Orders")],
        vec![pair("Order", "User"), pair("Billing", "Orders")],
        vec![pair("Order", "User"), pair("A", "B")],
    );
    let order: Vec<&Relation> = set.iter().collect();
    assert_eq!(order, [&pair("Billing", "Orders"), &pair("Order", "User"), &pair("A", "B")]);
}

#[test]
fn merged_set_does_not_depend_on_pass_order() {
    let deps = vec![pair("a", "b"), pair("c", "d")];
    let table = vec![pair("c", "d"), pair("e", "f")];
    let arrows = vec![pair("a", "b"), pair("g", "h")];

    let forward = merge(deps.clone(), table.clone(), arrows.clone());
    let backward = merge(arrows, table, deps);

    let mut forward: Vec<Relation> = forward.iter().cloned().collect();
    let mut backward: Vec<Relation> = backward.iter().cloned().collect();
    forward.sort();
    backward.sort();
    assert_eq!(forward, backward);
}

// =============================================================================
// DEPENDENCY LISTS
// =============================================================================

#[test]
fn dependency_targets_strip_descriptions() {
    assert_eq!(dependency_targets("- **dependency**: Orders (desc), Ledger"), ["Orders", "Ledger"]);
}

#[test]
fn dependency_targets_keep_commas_inside_parentheses() {
    assert_eq!(
        dependency_targets("- **dependency**: Orders (lookup, refunds), `Ledger`"),
        ["Orders", "Ledger"]
    );
}

#[test]
fn dependency_targets_accept_korean_label_and_indentation() {
    assert_eq!(dependency_targets("  - **의존성**: device (단말기), **user**"), ["device", "user"]);
}

#[test]
fn dependency_labels_are_case_insensitive() {
    assert_eq!(dependency_targets("- **Dependencies**: Orders"), ["Orders"]);
}

#[test]
fn dependency_sentinels_yield_nothing() {
    for line in [
        "- **dependency**: none",
        "- **dependency**: None",
        "- **dependency**: 없음",
        "- **dependency**: —",
        "- **dependency**: -",
        "- **dependency**:",
    ] {
        assert!(dependency_targets(line).is_empty(), "{line}");
    }
}

#[test]
fn sentinel_items_inside_a_list_are_skipped() {
    assert_eq!(dependency_targets("- **dependency**: Orders, none, , Ledger"), ["Orders", "Ledger"]);
}

#[test]
fn other_bullets_are_not_dependency_lines() {
    assert!(dependency_targets("- **responsibility**: Orders").is_empty());
    assert!(dependency_targets("-**dependency**: Orders").is_empty());
    assert!(dependency_targets("dependency: Orders").is_empty());
}

// =============================================================================
// RELATION TABLES
// =============================================================================

#[test]
fn relation_header_matches_korean_and_english() {
    assert!(is_relation_header("| 관계 | 대상 | 타입 | FK | 삭제 시 |"));
    assert!(is_relation_header("| Relation | Target |"));
    assert!(!is_relation_header("| Field | Type |"));
    assert!(!is_relation_header("| relation |"));
}

#[test]
fn separator_rows_are_recognized() {
    assert!(is_separator_row("|---|---|"));
    assert!(is_separator_row("| :--- | ---: |"));
    assert!(!is_separator_row("| id | int |"));
}

#[test]
fn table_target_reads_second_column() {
    assert_eq!(table_target("| placed_by | User | N:1 |").as_deref(), Some("User"));
    assert_eq!(table_target("| owner | `Account` |").as_deref(), Some("Account"));
}

#[test]
fn table_target_keeps_entities_named_like_english_headers() {
    assert_eq!(table_target("| aims_at | Target |").as_deref(), Some("Target"));
    assert_eq!(table_target("| groups | `Targets` |").as_deref(), Some("Targets"));
}

#[test]
fn table_target_rejects_non_identifiers_and_headers() {
    assert_eq!(table_target("| owner | User (FK) |"), None);
    assert_eq!(table_target("|---|---|"), None);
    assert_eq!(table_target("| 관계 | 대상 |"), None);
    assert_eq!(table_target("| owner | User"), None);
    assert_eq!(table_target("|| User |"), None);
}

// =============================================================================
// ARROWS
// =============================================================================

#[test]
fn arrow_pairs_find_unicode_and_ascii_arrows() {
    let pairs = arrow_pairs("OrderService → PaymentService\nCart->Checkout");
    assert_eq!(pairs, [pair("OrderService", "PaymentService"), pair("Cart", "Checkout")]);
}

#[test]
fn arrow_pairs_follow_chains() {
    assert_eq!(arrow_pairs("A -> B -> C"), [pair("A", "B"), pair("B", "C")]);
}

#[test]
fn arrow_pairs_ignore_other_arrow_shapes() {
    assert!(arrow_pairs("A --> B").is_empty());
    assert!(arrow_pairs("A ->> B").is_empty());
    assert!(arrow_pairs("-> B").is_empty());
    assert!(arrow_pairs("A ->").is_empty());
}

#[test]
fn arrow_pairs_may_span_line_breaks() {
    assert_eq!(arrow_pairs("Gateway\n  → Auth"), [pair("Gateway", "Auth")]);
}

#[test]
fn arrow_pairs_take_only_adjacent_words() {
    assert_eq!(arrow_pairs("calls the api.Gateway → Auth service"), [pair("Gateway", "Auth")]);
}
