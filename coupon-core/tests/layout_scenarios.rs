use coupon_core::{
    Gap, LayoutConfig, LayoutError, LayoutPlan, MarkKind, Margins, Size, SheetCursor, fit,
    paginate, solve,
};

fn a3_coupons() -> LayoutConfig {
    LayoutConfig::new(Size::new(297.0, 420.0), Size::new(42.0, 75.0)).unwrap()
}

#[test]
fn a3_sheet_of_coupons_end_to_end() {
    let plan = LayoutPlan::new(a3_coupons()).unwrap();
    let grid = plan.grid();
    assert_eq!((grid.columns, grid.rows, grid.capacity), (7, 5, 35));
    assert!(grid.feasible);

    let records: Vec<usize> = (0..77).collect();
    let sheets = plan.paginate(&records).unwrap();
    assert_eq!(
        sheets.iter().map(|s| s.labels.len()).collect::<Vec<_>>(),
        vec![35, 35, 7]
    );
    assert_eq!(
        sheets
            .iter()
            .map(|s| s.starting_label_offset)
            .collect::<Vec<_>>(),
        vec![0, 35, 70]
    );

    let primaries = plan
        .trim_marks()
        .iter()
        .filter(|m| m.kind == MarkKind::Primary)
        .count();
    assert_eq!(primaries, 2 * (7 + 1) + 2 * (5 + 1));
}

#[test]
fn oversized_label_is_infeasible_not_an_error() {
    let config = LayoutConfig::new(Size::new(297.0, 420.0), Size::new(300.0, 75.0)).unwrap();
    let plan = LayoutPlan::new(config).unwrap();
    assert!(!plan.grid().feasible);
    assert_eq!(plan.grid().capacity, 0);
    assert!(plan.trim_marks().is_empty());
}

#[test]
fn pagination_against_zero_capacity_fails_loudly() {
    assert_eq!(paginate(&["a", "b"], 0), Err(LayoutError::ZeroCapacity));
}

#[test]
fn fit_is_maximal_across_gapped_configs() {
    let sheet = Size::new(841.89, 1190.55);
    for (w, h, gx, gy) in [
        (119.06, 212.6, 0.0, 0.0),
        (119.06, 212.6, 2.83, 2.83),
        (170.08, 85.04, 5.67, 0.0),
        (56.69, 56.69, 1.42, 8.5),
    ] {
        let label = Size::new(w, h);
        let gap = Gap::new(gx, gy);
        let grid = fit(sheet, label, gap, &Margins::ZERO);
        let cols = f64::from(grid.columns);
        let rows = f64::from(grid.rows);
        assert!(cols * w + (cols - 1.0).max(0.0) * gx <= sheet.width);
        assert!((cols + 1.0) * w + cols * gx > sheet.width);
        assert!(rows * h + (rows - 1.0).max(0.0) * gy <= sheet.height);
        assert!((rows + 1.0) * h + rows * gy > sheet.height);
    }
}

#[test]
fn auto_margins_are_idempotent() {
    let config = a3_coupons().with_gap(Gap::new(1.5, 3.0)).unwrap();
    let once = config.resolved().unwrap();
    let twice = once.resolved().unwrap();
    assert_eq!(once.margins, twice.margins);
    assert_eq!(once.margins, solve(&config));
}

#[test]
fn two_jobs_share_running_sheet_numbers() {
    let plan = LayoutPlan::new(a3_coupons()).unwrap();
    let first: Vec<u16> = (0..50).collect();
    let second: Vec<u16> = (0..10).collect();

    let (a, cursor) = plan.paginate_from(&first, SheetCursor::default()).unwrap();
    let (b, _) = plan.paginate_from(&second, cursor).unwrap();
    let numbers: Vec<usize> = a.iter().chain(b.iter()).map(|s| s.number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(b[0].starting_label_offset, 50);
}

#[test]
fn plan_serializes_for_renderers() {
    let plan = LayoutPlan::new(a3_coupons()).unwrap();
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["grid"]["capacity"], 35);
    assert_eq!(json["trim_marks"][0]["kind"], "primary");
    assert_eq!(json["trim_marks"][0]["edge"], "bottom");
}
