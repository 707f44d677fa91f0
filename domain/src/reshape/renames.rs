//! Field renames: flatten nested identifiers onto the record.

use serde_json::{Map, Value};

use super::records_mut;
use crate::tool::{FieldRename, ResultShape};

/// Apply `renames` in order to the entity, or to every record of a list.
///
/// A rename moves the value at `from` (dotted path) to the top-level key
/// `to`. Parents emptied by the move are dropped, so `status.id → status_id`
/// followed by `status.name → status` turns `{status: {id, name}}` into
/// `{status_id, status}`. Missing sources are skipped.
pub fn apply_renames(value: &mut Value, renames: &[FieldRename], shape: ResultShape) {
    if renames.is_empty() {
        return;
    }

    match shape {
        ResultShape::Single => rename_record(value, renames),
        ResultShape::List => {
            if let Some(items) = records_mut(value) {
                for item in items {
                    rename_record(item, renames);
                }
            }
        }
    }
}

fn rename_record(record: &mut Value, renames: &[FieldRename]) {
    let Some(map) = record.as_object_mut() else {
        return;
    };
    for rename in renames {
        if let Some(v) = take_path(map, &rename.from) {
            map.insert(rename.to.clone(), v);
        }
    }
}

fn take_path(map: &mut Map<String, Value>, path: &str) -> Option<Value> {
    match path.split_once('.') {
        None => map.remove(path),
        Some((head, rest)) => {
            let child = map.get_mut(head)?.as_object_mut()?;
            let taken = take_path(child, rest);
            let emptied = child.is_empty();
            if emptied {
                map.remove(head);
            }
            taken
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_renames() -> Vec<FieldRename> {
        vec![
            FieldRename::new("status.id", "status_id"),
            FieldRename::new("status.name", "status"),
        ]
    }

    #[test]
    fn test_flattens_nested_status_on_single_entity() {
        let mut order = json!({"order_num": "1", "status": {"id": "3", "name": "Vybavená"}});
        apply_renames(&mut order, &status_renames(), ResultShape::Single);

        assert_eq!(order, json!({"order_num": "1", "status_id": "3", "status": "Vybavená"}));
    }

    #[test]
    fn test_renames_every_record_of_paged_list() {
        let mut page = json!({
            "data": [
                {"status": {"id": "1", "name": "Nová"}},
                {"status": {"id": "2", "name": "Storno"}}
            ],
            "pageInfo": {"hasNextPage": false}
        });
        apply_renames(&mut page, &status_renames(), ResultShape::List);

        assert_eq!(page["data"][0], json!({"status_id": "1", "status": "Nová"}));
        assert_eq!(page["data"][1]["status"], "Storno");
        assert_eq!(page["pageInfo"], json!({"hasNextPage": false}));
    }

    #[test]
    fn test_keeps_partially_consumed_parent() {
        let mut item = json!([{"warehouse_status": {"id": "5", "name": "Skladom"}}]);
        apply_renames(
            &mut item,
            &[FieldRename::new("warehouse_status.id", "warehouse_status_id")],
            ResultShape::List,
        );
        assert_eq!(
            item[0],
            json!({"warehouse_status": {"name": "Skladom"}, "warehouse_status_id": "5"})
        );
    }

    #[test]
    fn test_missing_source_is_ignored() {
        let mut order = json!({"order_num": "1", "status": null});
        apply_renames(&mut order, &status_renames(), ResultShape::Single);
        assert_eq!(order, json!({"order_num": "1", "status": null}));
    }
}
