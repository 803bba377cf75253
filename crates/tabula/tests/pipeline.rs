//! Scenario tests for the full filter → sort → group → paginate pipeline.

use std::collections::HashSet;

use tabula::{
    apply_filters, ColumnCatalog, ColumnDef, DataType, Dir, DisplayRow, Filter, FilterSet, Number,
    Op, Pipeline, Record, SortKey, Value, ViewConfig,
};

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Debug, PartialEq)]
struct Employee {
    name: &'static str,
    dept: Option<&'static str>,
    salary: f64,
    hired: &'static str,
    active: bool,
    skills: Vec<&'static str>,
}

impl Record for Employee {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => Value::String(self.name),
            "dept" => self.dept.map(Value::String).unwrap_or(Value::Null),
            "salary" => Value::Number(Number::F64(self.salary)),
            "hired" => Value::String(self.hired),
            "active" => Value::Bool(self.active),
            "skills" => Value::List(self.skills.iter().map(|s| Value::String(*s)).collect()),
            _ => Value::Missing,
        }
    }
}

fn employee(
    name: &'static str,
    dept: Option<&'static str>,
    salary: f64,
    hired: &'static str,
    active: bool,
    skills: &[&'static str],
) -> Employee {
    Employee {
        name,
        dept,
        salary,
        hired,
        active,
        skills: skills.to_vec(),
    }
}

fn staff() -> Vec<Employee> {
    vec![
        employee("Ada", Some("Eng"), 120_000.0, "2019-04-01", true, &["rust", "go"]),
        employee("Bob", Some("Ops"), 80_000.0, "2021-06-15", true, &["bash"]),
        employee("Cy", Some("Eng"), 95_000.0, "2020-01-10", false, &["rust"]),
        employee("Di", Some("Ops"), 105_000.0, "2018-11-30", true, &["go", "bash", "rust"]),
        employee("Ed", None, 70_000.0, "2022-02-01", false, &[]),
        employee("Fay", Some("Eng"), 95_000.0, "2021-06-15", true, &["python", "rust"]),
    ]
}

fn catalog() -> ColumnCatalog {
    ColumnCatalog::new(vec![
        ColumnDef::new("name", DataType::String).header("Name"),
        ColumnDef::new("dept", DataType::String).header("Department"),
        ColumnDef::new("salary", DataType::Currency),
        ColumnDef::new("hired", DataType::Date),
        ColumnDef::new("active", DataType::Boolean),
        ColumnDef::new("skills", DataType::Collection),
    ])
    .unwrap()
}

fn pipeline(view: ViewConfig) -> Pipeline<Employee> {
    Pipeline::new(catalog(), view, staff())
}

fn names(rows: &[&Employee]) -> Vec<&'static str> {
    rows.iter().map(|e| e.name).collect()
}

fn filtered(field: &str, op: Op, value: &str, second: Option<&str>) -> Vec<&'static str> {
    let mut p = pipeline(ViewConfig::new());
    p.set_filter(field, op, value, second);
    names(&p.processed_rows())
}

/// `#path(count)` for headers, the name for rows.
fn render(display: &[DisplayRow<'_, Employee>]) -> Vec<String> {
    display
        .iter()
        .map(|r| match r {
            DisplayRow::Group(g) => format!("#{}({})", g.path, g.count),
            DisplayRow::Row(e) => e.name.to_string(),
        })
        .collect()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn string_filters_are_case_insensitive() {
    assert_eq!(filtered("name", Op::Contains, "A", None), vec!["Ada", "Fay"]);
    assert_eq!(filtered("name", Op::StartsWith, "c", None), vec!["Cy"]);
    assert_eq!(filtered("dept", Op::Equals, "OPS", None), vec!["Bob", "Di"]);
}

#[test]
fn is_empty_matches_null_values() {
    assert_eq!(filtered("dept", Op::IsEmpty, "", None), vec!["Ed"]);
    assert_eq!(filtered("skills", Op::IsEmpty, "", None), vec!["Ed"]);
}

#[test]
fn number_filters() {
    assert_eq!(filtered("salary", Op::Gte, "105000", None), vec!["Ada", "Di"]);
    assert_eq!(filtered("salary", Op::Eq, "95000", None), vec!["Cy", "Fay"]);
    assert_eq!(
        filtered("salary", Op::Between, "95000", Some("105000")),
        vec!["Cy", "Di", "Fay"]
    );
}

#[test]
fn malformed_number_filter_admits_every_row() {
    let everyone = vec!["Ada", "Bob", "Cy", "Di", "Ed", "Fay"];
    assert_eq!(filtered("salary", Op::Gt, "abc", None), everyone);
    assert_eq!(filtered("salary", Op::Between, "90000", Some("")), everyone);
    assert_eq!(filtered("salary", Op::Between, "90000", None), everyone);
}

#[test]
fn date_filters_compare_calendar_days() {
    assert_eq!(filtered("hired", Op::IsBefore, "2020-01-10", None), vec!["Ada", "Di"]);
    assert_eq!(filtered("hired", Op::IsAfter, "2021-06-15", None), vec!["Ed"]);
    assert_eq!(filtered("hired", Op::Is, "2021-06-15T17:45:00", None), vec!["Bob", "Fay"]);
    assert_eq!(
        filtered("hired", Op::DateRange, "2020-01-01", Some("2021-06-15")),
        vec!["Bob", "Cy", "Fay"]
    );
    assert_eq!(filtered("hired", Op::IsBefore, "soon", None).len(), 6);
}

#[test]
fn boolean_filters() {
    assert_eq!(filtered("active", Op::Is, "TRUE", None), vec!["Ada", "Bob", "Di", "Fay"]);
    assert_eq!(filtered("active", Op::Equals, "false", None), vec!["Cy", "Ed"]);
    assert_eq!(filtered("active", Op::Is, "yes", None).len(), 6);
}

#[test]
fn collection_filters() {
    assert_eq!(filtered("skills", Op::Contains, "go", None), vec!["Ada", "Di"]);
    assert_eq!(filtered("skills", Op::DoesNotContain, "rust", None), vec!["Bob", "Ed"]);
    assert_eq!(
        filtered("skills", Op::ContainsAny, "python, bash", None),
        vec!["Bob", "Di", "Fay"]
    );
}

#[test]
fn collection_contains_all_requires_every_tag() {
    assert_eq!(filtered("skills", Op::ContainsAll, "rust,go", None), vec!["Ada", "Di"]);
    assert_eq!(filtered("skills", Op::ContainsAll, "go, rust, bash", None), vec!["Di"]);
    assert!(filtered("skills", Op::ContainsAll, "rust,haskell", None).is_empty());
}

#[test]
fn operator_outside_type_family_admits_every_row() {
    assert_eq!(filtered("name", Op::Gt, "M", None).len(), 6);
    assert_eq!(filtered("salary", Op::Contains, "9", None).len(), 6);
}

#[test]
fn filters_combine_with_and() {
    let mut p = pipeline(ViewConfig::new());
    p.set_filter("dept", Op::Equals, "eng", None);
    p.set_filter("active", Op::Is, "true", None);
    p.set_filter("skills", Op::Contains, "rust", None);
    assert_eq!(names(&p.processed_rows()), vec!["Ada", "Fay"]);
}

#[test]
fn filtering_is_idempotent() {
    let rows = staff();
    let catalog = catalog();
    let filters = FilterSet::from(vec![
        Filter::new("salary", Op::Lt, "110000"),
        Filter::new("skills", Op::ContainsAny, "rust,bash"),
    ]);

    let once = apply_filters(&rows, &filters, &catalog, Employee::accessor);
    let twice = apply_filters(once.iter().copied(), &filters, &catalog, Employee::accessor);
    assert_eq!(once, twice);
    assert_eq!(names(&once), vec!["Bob", "Cy", "Di", "Fay"]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn sort_is_stable_in_both_directions() {
    let mut p = pipeline(ViewConfig::new());
    p.set_sort("salary", false);
    assert_eq!(names(&p.processed_rows()), vec!["Ed", "Bob", "Cy", "Fay", "Di", "Ada"]);

    p.set_sort("salary", false);
    assert_eq!(p.sort_direction("salary"), Some(Dir::Desc));
    assert_eq!(names(&p.processed_rows()), vec!["Ada", "Di", "Cy", "Fay", "Bob", "Ed"]);
}

#[test]
fn multi_key_sort_breaks_ties_with_later_keys() {
    let mut p = pipeline(ViewConfig::new().sort(SortKey::desc("salary")));
    p.set_sort("name", true);
    p.set_sort("name", true);

    assert_eq!(p.sort_index("salary"), Some(1));
    assert_eq!(p.sort_index("name"), Some(2));
    assert_eq!(names(&p.processed_rows()), vec!["Ada", "Di", "Fay", "Cy", "Bob", "Ed"]);
}

#[test]
fn null_values_sort_first_ascending() {
    let mut p = pipeline(ViewConfig::new());
    p.set_sort("dept", false);
    assert_eq!(names(&p.processed_rows()), vec!["Ed", "Ada", "Cy", "Fay", "Bob", "Di"]);
}

#[test]
fn dates_sort_chronologically() {
    let mut p = pipeline(ViewConfig::new());
    p.set_sort("hired", false);
    assert_eq!(names(&p.processed_rows()), vec!["Di", "Ada", "Cy", "Bob", "Fay", "Ed"]);
}

#[test]
fn collections_sort_by_size_then_first_tag() {
    let mut p = pipeline(ViewConfig::new());
    p.set_sort("skills", false);
    assert_eq!(names(&p.processed_rows()), vec!["Ed", "Bob", "Cy", "Fay", "Ada", "Di"]);
}

#[test]
fn single_sort_replaces_multi_sort() {
    let mut p = pipeline(ViewConfig::new());
    p.set_sort("dept", true);
    p.set_sort("salary", true);
    p.set_sort("name", false);
    assert_eq!(p.sort_keys(), &[SortKey::asc("name")]);
    assert_eq!(p.sort_direction("dept"), None);
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn grouping_orders_values_byte_wise() {
    let p = pipeline(ViewConfig::new().group_by(["dept"]));
    assert_eq!(
        render(&p.display_rows()),
        vec!["#Eng(3)", "Ada", "Cy", "Fay", "#Ops(2)", "Bob", "Di", "#null(1)", "Ed"]
    );
}

#[test]
fn grouping_preserves_every_processed_row() {
    let mut p = pipeline(ViewConfig::new().group_by(["dept", "active"]));
    p.set_sort("salary", false);
    p.set_filter("salary", Op::Gt, "75000", None);

    let processed = p.processed_rows();
    let display = p.display_rows();
    let grouped: Vec<&Employee> = display.iter().filter_map(DisplayRow::as_row).collect();

    assert_eq!(grouped.len(), processed.len());
    let grouped_names: HashSet<_> = names(&grouped).into_iter().collect();
    let processed_names: HashSet<_> = names(&processed).into_iter().collect();
    assert_eq!(grouped_names, processed_names);

    let top_level: usize = display
        .iter()
        .filter_map(DisplayRow::as_group)
        .filter(|g| g.level == 0)
        .map(|g| g.count)
        .sum();
    assert_eq!(top_level, processed.len());
}

#[test]
fn rows_keep_sorted_order_inside_groups() {
    let mut p = pipeline(ViewConfig::new().group_by(["dept"]));
    p.set_sort("salary", false);
    p.set_sort("salary", false);
    assert_eq!(
        render(&p.display_rows()),
        vec!["#Eng(3)", "Ada", "Cy", "Fay", "#Ops(2)", "Di", "Bob", "#null(1)", "Ed"]
    );
}

#[test]
fn nested_groups_use_slash_paths() {
    let p = pipeline(ViewConfig::new().group_by(["dept", "active"]));
    assert_eq!(
        render(&p.display_rows()),
        vec![
            "#Eng(3)",
            "#Eng/false(1)",
            "Cy",
            "#Eng/true(2)",
            "Ada",
            "Fay",
            "#Ops(2)",
            "#Ops/true(2)",
            "Bob",
            "Di",
            "#null(1)",
            "#null/false(1)",
            "Ed",
        ]
    );
}

#[test]
fn collapsed_group_keeps_its_header() {
    let mut p = pipeline(ViewConfig::new().group_by(["dept", "active"]));
    p.toggle_group("Eng");
    p.toggle_group("Ops/true");

    assert_eq!(
        render(&p.display_rows()),
        vec!["#Eng(3)", "#Ops(2)", "#Ops/true(2)", "#null(1)", "#null/false(1)", "Ed"]
    );
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn pages_partition_the_display_sequence() {
    let mut p = pipeline(ViewConfig::new().group_by(["dept"]).page_size(4));
    let display = render(&p.display_rows());
    let summary = p.summary();
    assert_eq!(summary.total_items, 9);
    assert_eq!(summary.total_pages, 3);

    let mut paged = Vec::new();
    for page in 1..=summary.total_pages {
        p.set_page(page);
        let window = p.page_rows();
        assert!(window.len() <= 4);
        paged.extend(render(&window));
    }
    assert_eq!(paged, display);

    p.set_page(summary.total_pages + 1);
    assert!(p.page_rows().is_empty());
}

#[test]
fn empty_result_has_no_pages() {
    let mut p = pipeline(ViewConfig::new());
    p.set_filter("name", Op::Equals, "Nobody", None);
    let summary = p.summary();
    assert_eq!(summary.total_items, 0);
    assert_eq!(summary.total_pages, 0);
    assert!(p.page_rows().is_empty());
}

// ============================================================================
// State resets
// ============================================================================

#[test]
fn filter_and_sort_changes_return_to_first_page() {
    let mut p = pipeline(ViewConfig::new().page_size(2));
    p.set_page(3);
    p.set_filter("salary", Op::Gt, "1", None);
    assert_eq!(p.page(), 1);

    p.next_page();
    assert_eq!(p.page(), 2);
    p.set_sort("name", false);
    assert_eq!(p.page(), 1);

    p.set_page(2);
    p.set_filter("salary", Op::Gt, "", None);
    assert_eq!(p.page(), 1);
    assert!(p.filters().is_empty());
}

#[test]
fn grouping_change_clears_collapsed_groups() {
    let mut p = pipeline(ViewConfig::new().group_by(["dept"]).page_size(2));
    p.toggle_group("Eng");
    p.set_page(2);

    p.set_group_by(vec!["active".to_string()]);
    assert_eq!(p.page(), 1);
    assert!(p.collapsed_groups().is_empty());
    assert!(!p.is_collapsed("Eng"));
}

#[test]
fn new_initial_view_replaces_sort_and_filters() {
    let mut p = pipeline(ViewConfig::new());
    p.set_sort("name", false);
    p.set_filter("dept", Op::Equals, "eng", None);

    let view = ViewConfig::new()
        .sort(SortKey::desc("salary"))
        .filter(Filter::new("active", Op::Is, "true"));
    p.apply_view(view);

    assert_eq!(p.sort_keys(), &[SortKey::desc("salary")]);
    assert!(p.filters().get("dept").is_none());
    assert_eq!(names(&p.processed_rows()), vec!["Ada", "Di", "Fay", "Bob"]);
}

#[test]
fn replacing_rows_keeps_view_state() {
    let mut p = pipeline(ViewConfig::new().group_by(["dept"]));
    p.set_filter("active", Op::Is, "true", None);
    p.toggle_group("Ops");

    p.set_rows(vec![
        employee("Gus", Some("Ops"), 60_000.0, "2023-01-01", true, &[]),
        employee("Hal", Some("Eng"), 65_000.0, "2023-02-01", false, &[]),
    ]);
    assert!(p.is_collapsed("Ops"));
    assert_eq!(render(&p.display_rows()), vec!["#Ops(1)"]);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn view_loaded_from_json_drives_the_pipeline() {
    let view = ViewConfig::from_json(
        r#"{
            "visibleColumns": ["name", "salary"],
            "groupBy": ["dept"],
            "sort": [{"field": "salary", "dir": "desc"}],
            "filters": [
                {"field": "skills", "op": "containsAny", "value": "rust"},
                {"field": "salary", "op": "between", "value": "90000", "secondValue": "200000"}
            ],
            "pageSize": 3
        }"#,
    )
    .unwrap();
    let p = pipeline(view);

    let headers: Vec<_> = p.visible_columns().iter().map(|c| c.title()).collect();
    assert_eq!(headers, vec!["Name", "salary"]);
    assert_eq!(
        render(&p.display_rows()),
        vec!["#Eng(3)", "Ada", "Cy", "Fay", "#Ops(1)", "Di"]
    );
    assert_eq!(render(&p.page_rows()), vec!["#Eng(3)", "Ada", "Cy"]);
    assert_eq!(p.summary().total_pages, 2);
}

#[test]
fn catalog_loaded_from_json() {
    let catalog: ColumnCatalog = serde_json::from_str(
        r#"[
            {"accessor": "name", "header": "Name"},
            {"accessor": "salary", "dataType": "currency", "sortable": false}
        ]"#,
    )
    .unwrap();

    assert_eq!(catalog.data_type("name"), DataType::String);
    assert_eq!(catalog.data_type("salary"), DataType::Currency);

    let mut p = Pipeline::new(catalog, ViewConfig::new(), staff());
    p.set_sort("salary", false);
    assert!(p.sort_keys().is_empty());
}

#[test]
fn duplicate_columns_in_json_are_rejected() {
    let result: Result<ColumnCatalog, _> =
        serde_json::from_str(r#"[{"accessor": "a"}, {"accessor": "a"}]"#);
    assert!(result.is_err());
}
