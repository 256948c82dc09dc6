//! End-to-end allocation scenarios.

use colfit_layout::{Allocator, AllocatorConfig, ColumnSpec, Fit, allocate};

#[test]
fn fixed_column_with_two_grow_columns() {
    let columns = [
        ColumnSpec::fixed("a", 100),
        ColumnSpec::grow("b"),
        ColumnSpec::grow("c"),
    ];
    let alloc = allocate(&columns, 400).expect("valid columns");
    assert_eq!(alloc.get("a"), Some(100));
    assert_eq!(alloc.get("b"), Some(150));
    assert_eq!(alloc.get("c"), Some(150));
    assert_eq!(alloc.fit(), Fit::Exact);
}

#[test]
fn percentage_column_with_grow_column() {
    let columns = [
        ColumnSpec::percentage("a", 20.0),
        ColumnSpec::grow("b").min(50),
    ];
    let alloc = allocate(&columns, 500).expect("valid columns");
    assert_eq!(alloc.get("a"), Some(100));
    assert_eq!(alloc.get("b"), Some(400));
}

#[test]
fn floors_larger_than_container_overflow() {
    let columns = [
        ColumnSpec::grow("a").min(300),
        ColumnSpec::grow("b").min(300),
    ];
    let alloc = allocate(&columns, 400).expect("valid columns");
    assert_eq!(alloc.get("a"), Some(300));
    assert_eq!(alloc.get("b"), Some(300));
    assert_eq!(alloc.fit(), Fit::Overflow { overflow: 200 });
    assert_eq!(alloc.overflow(), 200);
}

#[test]
fn unmeasured_container_gives_zero_widths() {
    let columns = [
        ColumnSpec::fixed("a", 100),
        ColumnSpec::percentage("b", 30.0),
        ColumnSpec::grow("c"),
    ];
    let alloc = allocate(&columns, 0).expect("valid columns");
    assert_eq!(alloc.widths(), vec![0, 0, 0]);
    assert_eq!(alloc.fit(), Fit::Exact);
}

#[test]
fn odd_leftover_goes_to_first_grow_column() {
    let columns = [
        ColumnSpec::fixed("a", 99),
        ColumnSpec::grow("b"),
        ColumnSpec::grow("c"),
    ];
    let alloc = allocate(&columns, 200).expect("valid columns");
    assert_eq!(alloc.get("b"), Some(51));
    assert_eq!(alloc.get("c"), Some(50));
    assert_eq!(alloc.total(), 200);
}

#[test]
fn output_keeps_input_order() {
    let columns = [
        ColumnSpec::grow("z"),
        ColumnSpec::fixed("m", 10),
        ColumnSpec::percentage("a", 10.0),
    ];
    let alloc = allocate(&columns, 100).expect("valid columns");
    let ids: Vec<&str> = alloc.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["z", "m", "a"]);
}

#[test]
fn demo_column_set_across_widths() {
    // name/info grow, age fixed 100, message 20% with min 100.
    let columns = [
        ColumnSpec::grow("name"),
        ColumnSpec::grow("info"),
        ColumnSpec::fixed("age", 100),
        ColumnSpec::percentage("message", 20.0).min(100),
    ];

    let wide = allocate(&columns, 1000).expect("valid columns");
    assert_eq!(wide.widths(), vec![350, 350, 100, 200]);

    // 20% of 1001 is 200.2, leaving 700.8 for two grow columns (350.4 each).
    let odd = allocate(&columns, 1001).expect("valid columns");
    assert_eq!(odd.widths(), vec![351, 350, 100, 200]);
    assert_eq!(odd.total(), 1001);

    // 20% of 400 is 80, raised to the 100 floor.
    let narrow = allocate(&columns, 400).expect("valid columns");
    assert_eq!(narrow.widths(), vec![100, 100, 100, 100]);

    let cramped = allocate(&columns, 150).expect("valid columns");
    assert_eq!(cramped.widths(), vec![0, 0, 100, 100]);
    assert_eq!(cramped.fit(), Fit::Overflow { overflow: 50 });
}

#[test]
fn floors_honored_under_overflow() {
    let columns = [
        ColumnSpec::fixed("a", 200),
        ColumnSpec::grow("b").min(120),
        ColumnSpec::percentage("c", 50.0).min(60),
    ];
    let alloc = allocate(&columns, 250).expect("valid columns");
    assert_eq!(alloc.widths(), vec![200, 120, 125]);
    assert_eq!(alloc.fit(), Fit::Overflow { overflow: 195 });
}

#[test]
fn tolerance_is_configurable() {
    let allocator = Allocator::with_config(AllocatorConfig::default().overflow_tolerance(10));
    assert_eq!(allocator.config().overflow_tolerance, 10);

    let columns = [ColumnSpec::grow("a").min(55), ColumnSpec::grow("b")];
    let alloc = allocator.allocate(&columns, 100).expect("valid columns");
    assert_eq!(alloc.widths(), vec![55, 45]);
    assert_eq!(alloc.fit(), Fit::Exact);
    assert_eq!(alloc.overflow(), 0);
}

#[test]
fn allocation_serializes_for_debug_dump() {
    let columns = [ColumnSpec::fixed("a", 100), ColumnSpec::grow("b")];
    let alloc = allocate(&columns, 300).expect("valid columns");
    let json = serde_json::to_value(&alloc).expect("serialize");
    assert_eq!(json["containerWidth"], 300);
    assert_eq!(json["fit"]["status"], "exact");
    assert_eq!(json["columns"][1]["id"], "b");
    assert_eq!(json["columns"][1]["width"], 200);
}
