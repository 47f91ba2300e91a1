//! Tests for HierarchyBuilder: identifiers, parents and row acceptance

use rstest::{fixture, rstest};

use divid::domain::{
    derive, DomainError, Hierarchy, HierarchyBuilder, IdentifierDeriver, TypeRegistry,
};
use divid::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const HEADERS: [&str; 3] = ["Pays", "Region", "Commune"];

#[fixture]
fn registry() -> TypeRegistry {
    TypeRegistry::builtin()
}

fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
    values
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn build(registry: &TypeRegistry, headers: &[&str], values: &[&[&str]]) -> Hierarchy {
    HierarchyBuilder::new(registry, IdentifierDeriver::default())
        .build(headers, &rows(values))
        .expect("build hierarchy")
}

// ============================================================
// Identifiers
// ============================================================

#[rstest]
fn given_full_row_when_building_then_derives_id_slug_and_parent(registry: TypeRegistry) {
    let hierarchy = build(&registry, &HEADERS, &[&["Togo", "Maritime", "Lomé"]]);

    let division = &hierarchy.records[0].division;
    assert_eq!(division.division_slug, "togo.maritime.lome");
    assert_eq!(division.division_id, "CM-3CKPSE");
    assert_eq!(division.parent_id.as_deref(), Some("RG-BR37WJ"));
    assert_eq!(division.name, "Lomé");
    assert_eq!(division.type_id, 3);
}

#[rstest]
fn given_padded_labels_when_building_then_name_is_trimmed(registry: TypeRegistry) {
    let hierarchy = build(&registry, &HEADERS, &[&[" Togo ", " Maritime", "Lomé  "]]);

    let record = &hierarchy.records[0];
    assert_eq!(record.division.name, "Lomé");
    assert_eq!(record.division.division_id, "CM-3CKPSE");
    // raw cells are kept for the enriched output
    assert_eq!(record.cells[0], " Togo ");
}

#[rstest]
fn given_root_row_when_building_then_has_no_parent(registry: TypeRegistry) {
    let hierarchy = build(&registry, &HEADERS, &[&["Togo", "", ""]]);

    let division = &hierarchy.records[0].division;
    assert_eq!(division.division_id, "PA-PVVWQB");
    assert_eq!(division.parent_id, None);
    assert_eq!(division.type_id, 1);
}

#[rstest]
#[case(&["Togo", "Maritime", "Lomé"])]
#[case(&["Togo", "Plateaux", "Kpalimé"])]
#[case(&["Bénin", "Littoral", "Cotonou"])]
#[case(&["Côte d'Ivoire", "Lagunes", "Abidjan"])]
fn given_any_row_when_building_then_parent_equals_fresh_derivation(
    registry: TypeRegistry,
    #[case] path: &[&str],
) {
    let hierarchy = build(&registry, &HEADERS, &[path]);

    let division = &hierarchy.records[0].division;
    let own = derive("CM", path, "-");
    let parent = derive("RG", &path[..2], "-");
    assert_eq!(division.division_id, own.division_id);
    assert_eq!(division.division_slug, own.division_slug);
    assert_eq!(division.parent_id, Some(parent.division_id));
}

#[rstest]
fn given_parent_row_absent_when_building_then_parent_id_unchanged(registry: TypeRegistry) {
    let with_parent = build(
        &registry,
        &HEADERS,
        &[&["Togo", "", ""], &["Togo", "Maritime", ""], &["Togo", "Maritime", "Lomé"]],
    );
    let without_parent = build(&registry, &HEADERS, &[&["Togo", "Maritime", "Lomé"]]);

    assert_eq!(
        with_parent.records[2].division.parent_id,
        without_parent.records[0].division.parent_id
    );
    assert_eq!(
        with_parent.records[1].division.division_id,
        without_parent.records[0].division.parent_id.clone().unwrap()
    );
}

#[rstest]
fn given_same_path_in_different_spellings_when_building_then_same_id(registry: TypeRegistry) {
    let hierarchy = build(
        &registry,
        &HEADERS,
        &[
            &["Côte d'Ivoire", "Lagunes", ""],
            &["COTE D'IVOIRE", "lagunes", ""],
            &["Cote-d-Ivoire", "LAGUNES", ""],
        ],
    );

    let ids: Vec<&str> = hierarchy
        .divisions()
        .map(|d| d.division_id.as_str())
        .collect();
    assert_eq!(ids[0], ids[1]);
    assert_eq!(ids[1], ids[2]);
}

#[rstest]
fn given_same_leaf_under_different_parents_when_building_then_ids_differ(registry: TypeRegistry) {
    let hierarchy = build(
        &registry,
        &HEADERS,
        &[&["Togo", "Maritime", "Golfe"], &["Togo", "Plateaux", "Golfe"]],
    );
    assert_ne!(
        hierarchy.records[0].division.division_id,
        hierarchy.records[1].division.division_id
    );
}

// ============================================================
// Row acceptance
// ============================================================

#[rstest]
fn given_gap_row_when_building_then_row_discarded(registry: TypeRegistry) {
    let hierarchy = build(&registry, &HEADERS, &[&["Togo", "", "Lomé"]]);

    assert!(hierarchy.records.is_empty());
    assert_eq!(hierarchy.skipped_malformed, 1);
}

#[rstest]
fn given_blank_rows_when_building_then_skipped_and_counted(registry: TypeRegistry) {
    let hierarchy = build(
        &registry,
        &HEADERS,
        &[&["", "", ""], &["  ", ""], &["Togo", "", ""]],
    );

    assert_eq!(hierarchy.records.len(), 1);
    assert_eq!(hierarchy.skipped_blank, 2);
    assert_eq!(hierarchy.skipped_malformed, 0);
}

#[rstest]
fn given_duplicate_rows_when_building_then_both_kept(registry: TypeRegistry) {
    let hierarchy = build(
        &registry,
        &HEADERS,
        &[&["Togo", "Maritime", ""], &["Togo", "Maritime", ""]],
    );

    assert_eq!(hierarchy.records.len(), 2);
    assert_eq!(
        hierarchy.records[0].division,
        hierarchy.records[1].division
    );
}

#[rstest]
fn given_leading_blank_cell_when_building_then_path_shifts_to_shallower_levels(
    registry: TypeRegistry,
) {
    let hierarchy = build(&registry, &HEADERS, &[&["", "Maritime", "Lomé"]]);

    let division = &hierarchy.records[0].division;
    assert_eq!(division.division_slug, "maritime.lome");
    assert_eq!(division.type_id, 2);
    assert!(division.division_id.starts_with("RG-"));
}

#[rstest]
fn given_mixed_depths_when_building_then_max_depth_is_longest_path(registry: TypeRegistry) {
    let hierarchy = build(
        &registry,
        &["Pays", "Region", "Commune", "Village"],
        &[&["Togo", "", "", ""], &["Togo", "Maritime", "Lomé", ""], &["Togo", "Maritime"]],
    );

    assert_eq!(hierarchy.max_depth, 3);
    let levels: Vec<&str> = hierarchy.used_levels().collect();
    assert_eq!(levels, vec!["Pays", "Region", "Commune"]);
}

// ============================================================
// Header resolution
// ============================================================

#[rstest]
fn given_unknown_header_when_building_then_fails_before_rows(registry: TypeRegistry) {
    let result = HierarchyBuilder::new(&registry, IdentifierDeriver::default())
        .build(&["Pays", "Hameau"], &rows(&[&["Togo", "Tsévié"]]));

    assert_eq!(
        result.unwrap_err(),
        DomainError::UnknownDivisionType {
            token: "hameau".into(),
            header: "Hameau".into(),
        }
    );
}

#[rstest]
fn given_extended_registry_when_building_then_custom_type_resolves() {
    let registry = TypeRegistry::builtin()
        .with_entries([("Hameau", "HM")])
        .unwrap();
    let hierarchy = build(&registry, &["Pays", "Hameau"], &[&["Togo", "Agbodrafo"]]);

    let division = &hierarchy.records[0].division;
    assert!(division.division_id.starts_with("HM-"));
    assert_eq!(division.parent_id.as_deref(), Some("PA-PVVWQB"));
}

#[rstest]
fn given_custom_delimiter_when_building_then_ids_use_it(registry: TypeRegistry) {
    let hierarchy = HierarchyBuilder::new(&registry, IdentifierDeriver::new("", '-'))
        .build(&HEADERS, &rows(&[&["Togo", "Maritime", "Lomé"]]))
        .unwrap();

    let division = &hierarchy.records[0].division;
    assert_eq!(division.division_id, "CM3CKPSE");
    assert_eq!(division.parent_id.as_deref(), Some("RGBR37WJ"));
}
