use serde_json::{json, Value};
use symon_query::{translate, QueryArgs, QueryTranslator};

fn descriptor(searchable: &[&str], query: &str) -> Value {
    let args = QueryArgs::from_query_str(query);
    serde_json::to_value(translate(Some(searchable), Some(&args))).unwrap()
}

#[test]
fn no_input_defaults_to_take_ten() {
    let value = serde_json::to_value(translate(None, None)).unwrap();
    assert_eq!(value, json!({ "take": 10 }));
}

#[test]
fn fields_become_select_map() {
    assert_eq!(
        descriptor(&[], "fields=a,%20b"),
        json!({ "select": { "a": true, "b": true }, "take": 10 })
    );
}

#[test]
fn filter_clauses_are_and_joined_with_typed_values() {
    assert_eq!(
        descriptor(&[], "filter=firstName+equals+john+and+age+gte+21"),
        json!({
            "where": { "AND": [
                { "firstName": { "equals": "john" } },
                { "age": { "gte": 21 } }
            ] },
            "take": 10
        })
    );
}

#[test]
fn bracket_fields_nest() {
    assert_eq!(
        descriptor(&[], "filter=name%5Bfirst%5D+equals+john"),
        json!({
            "where": { "AND": [{ "name": { "first": { "equals": "john" } } }] },
            "take": 10
        })
    );
}

#[test]
fn search_expands_over_searchable_fields() {
    assert_eq!(
        descriptor(&["firstName", "lastName"], "search=john"),
        json!({
            "where": { "AND": [
                { "firstName": { "contains": "john" } },
                { "lastName": { "contains": "john" } }
            ] },
            "take": 10
        })
    );
    assert_eq!(descriptor(&[], "search=john"), json!({ "take": 10 }));
}

#[test]
fn limit_sets_take_with_fallback() {
    assert_eq!(descriptor(&[], "limit=30"), json!({ "take": 30 }));
    assert_eq!(descriptor(&[], "limit=notanumber"), json!({ "take": 10 }));
}

#[test]
fn cursor_adds_skip_and_id() {
    assert_eq!(
        descriptor(&[], "cursor=5&sort=name"),
        json!({
            "orderBy": { "name": "asc" },
            "cursor": { "id": 5 },
            "skip": 1,
            "take": 10
        })
    );
}

#[test]
fn sort_direction_defaults_to_ascending() {
    assert_eq!(
        descriptor(&[], "sort=firstName"),
        json!({ "orderBy": { "firstName": "asc" }, "take": 10 })
    );
    assert_eq!(
        descriptor(&[], "sort=firstName%20desc"),
        json!({ "orderBy": { "firstName": "desc" }, "take": 10 })
    );
}

#[test]
fn translation_is_pure() {
    let args = QueryArgs {
        fields: Some("id,name".into()),
        filter: Some("status equals up and interval gte 30".into()),
        search: Some("api".into()),
        sort: Some("name desc".into()),
        cursor: Some("12".into()),
        limit: Some("25".into()),
    };
    let searchable = ["name", "description"];

    let first = translate(Some(&searchable[..]), Some(&args));
    let second = translate(Some(&searchable[..]), Some(&args));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn value_coercion_precedence() {
    let clause = |query: &str| descriptor(&[], query)["where"]["AND"][0].clone();

    assert_eq!(clause("filter=flag+equals+true"), json!({ "flag": { "equals": true } }));
    assert_eq!(clause("filter=count+equals+42"), json!({ "count": { "equals": 42 } }));
    assert_eq!(clause("filter=name+equals+bob"), json!({ "name": { "equals": "bob" } }));
    assert_eq!(clause("filter=deletedAt+equals+null"), json!({ "deletedAt": { "equals": null } }));
}

#[test]
fn every_sub_language_together() {
    let translator = QueryTranslator::new().with_max_take(20);
    let args = QueryArgs::from_query_str(
        "fields=id,name&filter=interval+lte+60&search=web&sort=createdAt+desc,name&cursor=3&limit=100",
    );
    let value = serde_json::to_value(translator.translate(Some(&["name"][..]), Some(&args))).unwrap();

    assert_eq!(
        value,
        json!({
            "select": { "id": true, "name": true },
            "where": { "AND": [
                { "interval": { "lte": 60 } },
                { "name": { "contains": "web" } }
            ] },
            "orderBy": { "createdAt": "desc", "name": "asc" },
            "cursor": { "id": 3 },
            "skip": 1,
            "take": 20
        })
    );
}
