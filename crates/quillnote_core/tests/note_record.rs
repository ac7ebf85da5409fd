use chrono::NaiveDate;
use quillnote_core::{today, NoteRecord, StoreError};
use serde_json::json;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn full_record_roundtrips_through_document() {
    let record = NoteRecord::new("  spaced content  ")
        .with_label("Errand")
        .with_characters(["Alex", "Kevin"])
        .with_date(day(2024, 1, 1))
        .with_order(12);

    let doc = record.to_document();
    assert_eq!(
        doc,
        json!({
            "content": "  spaced content  ",
            "label": "Errand",
            "character": ["Alex", "Kevin"],
            "date": "2024-01-01",
            "order": 12
        })
    );
    assert_eq!(NoteRecord::from_document(&doc).unwrap(), record);
}

#[test]
fn record_without_optional_fields_roundtrips() {
    let record = NoteRecord::new("").with_date(day(2023, 12, 31));
    let decoded = NoteRecord::from_document(&record.to_document()).unwrap();
    assert_eq!(decoded, record);
    assert_eq!(decoded.label, None);
    assert_eq!(decoded.order, None);
    assert!(decoded.character.is_empty());
}

#[test]
fn missing_content_is_malformed() {
    let err = NoteRecord::from_document(&json!({"label": "x", "date": "2024-01-01"})).unwrap_err();
    assert!(matches!(err, StoreError::MalformedRecord(_)));

    let err = NoteRecord::from_document(&json!({"content": 5})).unwrap_err();
    assert!(err.to_string().contains("`content` must be text"));

    let err = NoteRecord::from_document(&json!(["content"])).unwrap_err();
    assert!(matches!(err, StoreError::MalformedRecord(_)));
}

#[test]
fn only_content_is_required() {
    let decoded = NoteRecord::from_document(&json!({"content": "bare"})).unwrap();
    assert_eq!(decoded.content, "bare");
    assert_eq!(decoded.label, None);
    assert!(decoded.character.is_empty());
    assert_eq!(decoded.order, None);
    assert_eq!(decoded.date, today());
}

#[test]
fn unparsable_date_falls_back_to_today() {
    let decoded =
        NoteRecord::from_document(&json!({"content": "x", "date": "sometime"})).unwrap();
    assert_eq!(decoded.date, today());
}

#[test]
fn legacy_shapes_are_accepted() {
    let decoded = NoteRecord::from_document(&json!({
        "content": "Test note",
        "label": "Test label",
        "character": "Test character",
        "date": "2024-09-25T14:03:00",
        "order": "7"
    }))
    .unwrap();

    assert_eq!(decoded.character, vec!["Test character".to_string()]);
    assert_eq!(decoded.date, day(2024, 9, 25));
    assert_eq!(decoded.order, None);

    let mixed = NoteRecord::from_document(&json!({
        "content": "x",
        "character": ["PP", 3, null, "DM"]
    }))
    .unwrap();
    assert_eq!(mixed.character, vec!["PP".to_string(), "DM".to_string()]);
}

#[test]
fn serde_embedding_uses_document_shape() {
    let record = NoteRecord::new("embedded")
        .with_date(day(2024, 9, 27))
        .with_order(3);

    let text = serde_json::to_string(&vec![record.clone()]).unwrap();
    assert!(text.contains("\"date\":\"2024-09-27\""));

    let decoded: Vec<NoteRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, vec![record]);

    let err = serde_json::from_str::<NoteRecord>(r#"{"label": "no content"}"#).unwrap_err();
    assert!(err.to_string().contains("missing `content`"));
}
