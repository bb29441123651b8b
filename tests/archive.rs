//! Black-box scenarios covering `Archive::open`/`insert`/`extract`/
//! `describe`/`replace`/`remove`/`probe`/`labels`/`update_object(s)`.

use std::collections::BTreeMap;

use ndarray::ArrayD;
use sda::{Archive, OpenMode, ShapedArray, Value, WriteOptions};
use tempfile::tempdir;

fn scratch_path(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    dir.path().join(name)
}

#[test]
fn create_then_reopen_preserves_header() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "fresh.sda");

    {
        let archive = Archive::open(&path, OpenMode::Create).unwrap();
        assert_eq!(archive.file_format().unwrap(), "SDA");
        assert_eq!(archive.format_version().unwrap(), "1.1");
        assert!(archive.writable().unwrap());
    }

    let archive = Archive::open(&path, OpenMode::Read).unwrap();
    assert_eq!(archive.file_format().unwrap(), "SDA");
}

#[test]
fn insert_then_extract_scalar_roundtrips() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "scalar.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    archive
        .insert("answer", &Value::scalar(42.0), "the answer", WriteOptions::default())
        .unwrap();

    let value = archive.extract("answer").unwrap();
    match value {
        Value::Numeric(sda::NumericArray::Real(arr)) => {
            assert_eq!(arr.len(), 1);
            assert_eq!(*arr.iter().next().unwrap(), 42.0);
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn probe_reports_record_type_and_description() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "describe.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("x", &Value::scalar(1.0), "a scalar", WriteOptions::default())
        .unwrap();

    let table = archive.probe(None).unwrap();
    assert_eq!(table.rows[0].record_type, "numeric");
    assert_eq!(table.rows[0].description, "a scalar");
}

#[test]
fn describe_updates_description_in_place() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "describe_set.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("x", &Value::scalar(1.0), "original", WriteOptions::default())
        .unwrap();

    archive.describe("x", "revised").unwrap();

    let table = archive.probe(None).unwrap();
    assert_eq!(table.rows[0].description, "revised");
}

#[test]
fn extract_missing_label_errors() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "missing.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    assert!(archive.extract("nope").is_err());
}

#[test]
fn insert_duplicate_label_errors() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "dup.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("x", &Value::scalar(1.0), "", WriteOptions::default())
        .unwrap();
    let result = archive.insert("x", &Value::scalar(2.0), "", WriteOptions::default());
    assert!(result.is_err());
}

#[test]
fn replace_with_equivalent_shape_succeeds() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "replace.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("x", &Value::scalar(1.0), "", WriteOptions::default())
        .unwrap();

    archive.replace("x", &Value::scalar(2.0)).unwrap();

    let value = archive.extract("x").unwrap();
    match value {
        Value::Numeric(sda::NumericArray::Real(arr)) => {
            assert_eq!(*arr.iter().next().unwrap(), 2.0);
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn replace_preserves_description_and_deflate() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "replace_preserve.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert(
            "x",
            &Value::scalar(1.0),
            "kept description",
            WriteOptions::default().with_deflate(6),
        )
        .unwrap();

    archive.replace("x", &Value::scalar(2.0)).unwrap();

    let table = archive.probe(None).unwrap();
    assert_eq!(table.rows[0].description, "kept description");
    assert_eq!(table.rows[0].deflate, "6");
}

#[test]
fn replace_with_incompatible_record_type_fails() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "replace_bad.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("x", &Value::scalar(1.0), "", WriteOptions::default())
        .unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("a".to_string(), Value::scalar(1.0));
    let result = archive.replace("x", &Value::Structure(fields));
    assert!(result.is_err());
}

#[test]
fn remove_reclaims_label_but_keeps_others() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "remove.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("keep", &Value::scalar(1.0), "", WriteOptions::default())
        .unwrap();
    archive
        .insert("drop", &Value::scalar(2.0), "", WriteOptions::default())
        .unwrap();

    archive.remove("drop").unwrap();

    assert!(archive.extract("drop").is_err());
    assert!(archive.extract("keep").is_ok());
}

#[test]
fn probe_lists_every_top_level_object() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "probe.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("a", &Value::scalar(1.0), "first", WriteOptions::default())
        .unwrap();
    archive
        .insert("b", &Value::scalar(2.0), "second", WriteOptions::default())
        .unwrap();

    let table = archive.probe(None).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].label, "a");
    assert_eq!(table.rows[1].label, "b");
}

#[test]
fn probe_filters_by_pattern() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "probe_pattern.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("alpha_1", &Value::scalar(1.0), "", WriteOptions::default())
        .unwrap();
    archive
        .insert("beta_1", &Value::scalar(2.0), "", WriteOptions::default())
        .unwrap();

    let table = archive.probe(Some("^alpha")).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows[0].label, "alpha_1");
}

#[test]
fn labels_filters_by_pattern() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "labels.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();
    archive
        .insert("alpha_1", &Value::scalar(1.0), "", WriteOptions::default())
        .unwrap();
    archive
        .insert("beta_1", &Value::scalar(2.0), "", WriteOptions::default())
        .unwrap();

    let all = archive.labels(None).unwrap();
    assert_eq!(all, vec!["alpha_1".to_string(), "beta_1".to_string()]);

    let filtered = archive.labels(Some("^alpha")).unwrap();
    assert_eq!(filtered, vec!["alpha_1".to_string()]);
}

#[test]
fn update_object_preserves_description_and_class() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "update.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("value".to_string(), Value::scalar(1.0));
    archive
        .insert_object(
            "x",
            &Value::Structure(fields),
            "original description",
            "MyClass",
            WriteOptions::default(),
        )
        .unwrap();

    let mut replacement = BTreeMap::new();
    replacement.insert("value".to_string(), Value::scalar(9.0));
    archive
        .update_object("x", &Value::Structure(replacement))
        .unwrap();

    let table = archive.probe(None).unwrap();
    assert_eq!(table.rows[0].description, "original description");
    assert_eq!(table.rows[0].record_type, "object");
    assert_eq!(table.rows[0].class.as_deref(), Some("MyClass"));
}

#[test]
fn update_object_rejects_plain_structure() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "update_plain.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("value".to_string(), Value::scalar(1.0));
    archive
        .insert("x", &Value::Structure(fields), "", WriteOptions::default())
        .unwrap();

    let mut replacement = BTreeMap::new();
    replacement.insert("value".to_string(), Value::scalar(9.0));
    let result = archive.update_object("x", &Value::Structure(replacement));
    assert!(result.is_err());
}

#[test]
fn structure_roundtrips_nested_fields() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "structure.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    let mut fields = BTreeMap::new();
    fields.insert("alpha".to_string(), Value::scalar(1.0));
    fields.insert("beta".to_string(), Value::scalar(2.0));
    archive
        .insert("record", &Value::Structure(fields), "", WriteOptions::default())
        .unwrap();

    let value = archive.extract("record").unwrap();
    match value {
        Value::Structure(fields) => {
            assert_eq!(fields.len(), 2);
            assert!(fields.contains_key("alpha"));
            assert!(fields.contains_key("beta"));
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn cell_roundtrips_heterogeneous_items() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "cell.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    let items = vec![Value::scalar(1.0), Value::scalar(2.0), Value::scalar(3.0)];
    archive
        .insert(
            "items",
            &Value::Cell(ShapedArray::vector(items)),
            "",
            WriteOptions::default(),
        )
        .unwrap();

    let value = archive.extract("items").unwrap();
    match value {
        Value::Cell(cells) => {
            assert_eq!(cells.len(), 3);
            assert_eq!(cells.shape, vec![3]);
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn cell_with_more_than_nine_items_preserves_order() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "cell_wide.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    let items: Vec<Value> = (0..12).map(|i| Value::scalar(f64::from(i))).collect();
    archive
        .insert(
            "items",
            &Value::Cell(ShapedArray::vector(items)),
            "",
            WriteOptions::default(),
        )
        .unwrap();

    let value = archive.extract("items").unwrap();
    match value {
        Value::Cell(cells) => {
            let values: Vec<f64> = cells
                .items
                .into_iter()
                .map(|v| match v {
                    Value::Numeric(sda::NumericArray::Real(arr)) => *arr.iter().next().unwrap(),
                    other => panic!("unexpected value: {other:?}"),
                })
                .collect();
            assert_eq!(values, (0..12).map(f64::from).collect::<Vec<_>>());
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn character_array_roundtrips() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "character.sda");
    let archive = Archive::open(&path, OpenMode::Create).unwrap();

    let array = ArrayD::from_shape_vec(
        ndarray::IxDyn(&[2]),
        vec!["hello".to_string(), "world".to_string()],
    )
    .unwrap();
    archive
        .insert("text", &Value::Character(array), "", WriteOptions::default())
        .unwrap();

    let value = archive.extract("text").unwrap();
    match value {
        Value::Character(arr) => {
            let strings: Vec<&String> = arr.iter().collect();
            assert_eq!(strings, vec!["hello", "world"]);
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn read_only_archive_rejects_insert() {
    let dir = tempdir().unwrap();
    let path = scratch_path(&dir, "readonly.sda");
    {
        let archive = Archive::open(&path, OpenMode::Create).unwrap();
        archive
            .insert("x", &Value::scalar(1.0), "", WriteOptions::default())
            .unwrap();
    }

    let archive = Archive::open(&path, OpenMode::Read).unwrap();
    let result = archive.insert("y", &Value::scalar(2.0), "", WriteOptions::default());
    assert!(result.is_err());
}
