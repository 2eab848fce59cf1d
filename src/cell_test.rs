use super::*;

type TestCell = Cell<u32>;

fn grid(n: u32) -> Vec<TestCell> {
    (0..n).map(|id| Cell::new(id, format!("Slot {id}"))).collect()
}

fn with_image(mut cell: TestCell, image: &str) -> TestCell {
    cell.image = Some(image.to_owned());
    cell
}

// =============================================================
// Cell
// =============================================================

#[test]
fn new_cell_is_empty() {
    let cell = TestCell::new(3, "Best Story");
    assert_eq!(cell.id, 3);
    assert_eq!(cell.title, "Best Story");
    assert!(cell.image.is_none());
    assert!(cell.name.is_none());
    assert!(cell.image_object.is_none());
}

#[test]
fn needs_load_only_with_source_and_no_object() {
    let mut cell = with_image(TestCell::new(0, "t"), "a.png");
    assert!(cell.needs_load());
    cell.image_object = Some(7);
    assert!(!cell.needs_load());
    assert!(!TestCell::new(1, "t").needs_load());
}

#[test]
fn set_image_to_new_source_clears_object() {
    let mut cell = with_image(TestCell::new(0, "t"), "a.png");
    cell.image_object = Some(1);
    cell.set_image(Some("b.png".into()));
    assert_eq!(cell.image.as_deref(), Some("b.png"));
    assert!(cell.image_object.is_none());
}

#[test]
fn set_image_to_same_source_keeps_object() {
    let mut cell = with_image(TestCell::new(0, "t"), "a.png");
    cell.image_object = Some(1);
    cell.set_image(Some("a.png".into()));
    assert_eq!(cell.image_object, Some(1));
}

#[test]
fn clearing_image_clears_object() {
    let mut cell = with_image(TestCell::new(0, "t"), "a.png");
    cell.image_object = Some(1);
    cell.set_image(None);
    assert!(cell.image.is_none());
    assert!(cell.image_object.is_none());
}

#[test]
fn record_omits_title_and_object() {
    let mut cell = with_image(TestCell::new(4, "t"), "a.png");
    cell.name = Some("Celeste".into());
    cell.image_object = Some(9);
    assert_eq!(cell.record(), CellRecord { id: 4, image: Some("a.png".into()), name: Some("Celeste".into()) });
}

// =============================================================
// Initial grid
// =============================================================

#[test]
fn initial_cells_numbers_titles_in_order() {
    let cells: Vec<TestCell> = initial_cells(&DEFAULT_CELL_TITLES);
    assert_eq!(cells.len(), 15);
    for (index, cell) in cells.iter().enumerate() {
        assert_eq!(cell.id as usize, index);
        assert_eq!(cell.title, DEFAULT_CELL_TITLES[index]);
        assert!(cell.image.is_none());
    }
}

#[test]
fn initial_cells_accepts_owned_titles() {
    let titles = vec![String::from("A"), String::from("B")];
    let cells: Vec<TestCell> = initial_cells(&titles);
    assert_eq!(cells[1].title, "B");
}

#[test]
fn default_titles_are_distinct() {
    let mut titles = DEFAULT_CELL_TITLES.to_vec();
    titles.sort_unstable();
    titles.dedup();
    assert_eq!(titles.len(), DEFAULT_CELL_TITLES.len());
}

// =============================================================
// Records
// =============================================================

#[test]
fn merge_records_applies_by_id() {
    let mut cells = grid(3);
    let records = vec![CellRecord { id: 2, image: Some("x.png".into()), name: Some("Hades".into()) }];
    assert_eq!(merge_records(&mut cells, &records), 1);
    assert_eq!(cells[2].image.as_deref(), Some("x.png"));
    assert_eq!(cells[2].name.as_deref(), Some("Hades"));
    assert!(cells[0].image.is_none());
    assert!(cells[1].image.is_none());
}

#[test]
fn merge_records_skips_unknown_ids() {
    let mut cells = grid(2);
    let records = vec![
        CellRecord { id: 9, image: Some("x.png".into()), name: None },
        CellRecord { id: 0, image: None, name: Some("Tetris".into()) },
    ];
    assert_eq!(merge_records(&mut cells, &records), 1);
    assert_eq!(cells[0].name.as_deref(), Some("Tetris"));
}

#[test]
fn merge_records_overwrites_with_absent_fields() {
    let mut cells = grid(1);
    cells[0].image = Some("old.png".into());
    cells[0].name = Some("Old".into());
    cells[0].image_object = Some(1);
    merge_records(&mut cells, &[CellRecord { id: 0, image: None, name: None }]);
    assert!(cells[0].image.is_none());
    assert!(cells[0].name.is_none());
    assert!(cells[0].image_object.is_none());
}

#[test]
fn record_json_omits_empty_fields() {
    let record = CellRecord { id: 1, image: None, name: None };
    assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"id":1}"#);
}

#[test]
fn record_json_accepts_missing_fields() {
    let record: CellRecord = serde_json::from_str(r#"{"id":5,"name":"Okami"}"#).unwrap();
    assert_eq!(record, CellRecord { id: 5, image: None, name: Some("Okami".into()) });
}

// =============================================================
// Image patches
// =============================================================

#[test]
fn patch_sets_only_the_target_cell() {
    let mut cells: Vec<TestCell> = grid(3).into_iter().map(|c| with_image(c, "a.png")).collect();
    let before = cells.clone();
    let outcome = apply_image_patch(&mut cells, ImagePatch { id: 1, image: "a.png".into(), image_object: 42 });
    assert_eq!(outcome, PatchOutcome::Applied);
    assert_eq!(cells[1].image_object, Some(42));
    assert_eq!(cells[0], before[0]);
    assert_eq!(cells[2], before[2]);
}

#[test]
fn patch_for_replaced_source_is_stale() {
    let mut cells = vec![with_image(TestCell::new(0, "t"), "new.png")];
    let outcome = apply_image_patch(&mut cells, ImagePatch { id: 0, image: "old.png".into(), image_object: 1 });
    assert_eq!(outcome, PatchOutcome::Stale);
    assert!(cells[0].image_object.is_none());
}

#[test]
fn patch_for_cleared_source_is_stale() {
    let mut cells = grid(1);
    let outcome = apply_image_patch(&mut cells, ImagePatch { id: 0, image: "a.png".into(), image_object: 1 });
    assert_eq!(outcome, PatchOutcome::Stale);
    assert!(cells[0].image_object.is_none());
}

#[test]
fn patch_for_unknown_cell_changes_nothing() {
    let mut cells = grid(2);
    let before = cells.clone();
    let outcome = apply_image_patch(&mut cells, ImagePatch { id: 7, image: "a.png".into(), image_object: 1 });
    assert_eq!(outcome, PatchOutcome::UnknownCell);
    assert_eq!(cells, before);
}

#[test]
fn reapplying_the_same_patch_is_idempotent() {
    let mut cells = vec![with_image(TestCell::new(0, "t"), "a.png")];
    let patch = ImagePatch { id: 0, image: "a.png".into(), image_object: 3 };
    apply_image_patch(&mut cells, patch.clone());
    let once = cells.clone();
    apply_image_patch(&mut cells, patch);
    assert_eq!(cells, once);
}
