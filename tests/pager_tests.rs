mod common;

use common::{MockTransport, item, page, url};
use crestwalk::{FetchError, fetch_all, resolve_node};
use crestwalk::{Level, Node};
use serde_json::json;

// --- fetch_all ---

#[test]
fn test_fetch_all_concatenates_pages_in_order() {
    let p1 = url("types/");
    let p2 = url("types/?page=2");
    let p3 = url("types/?page=3");
    let mock = MockTransport::new()
        .with_json(&p1, page(vec![item(1, "a", "h1"), item(2, "b", "h2")], Some(&p2)))
        .with_json(&p2, page(vec![item(3, "c", "h3")], Some(&p3)))
        .with_json(&p3, page(vec![item(4, "d", "h4")], None));

    let ids: Vec<u64> = fetch_all(&mock, &p1).map(|r| r.unwrap().id).collect();

    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(mock.requests(), vec![p1, p2, p3]);
}

#[test]
fn test_fetch_all_empty_next_href_ends() {
    let p1 = url("types/");
    let mut body = page(vec![item(1, "a", "h1")], None);
    body["next"] = json!({ "href": "" });
    let mock = MockTransport::new().with_json(&p1, body);

    let items: Vec<_> = fetch_all(&mock, &p1).collect();

    assert_eq!(items.len(), 1);
    assert_eq!(mock.requests().len(), 1);
}

#[test]
fn test_fetch_all_counts_do_not_stop_pagination() {
    let p1 = url("types/");
    let p2 = url("types/?page=2");
    // pageCount/totalCount claim one page; the next link says otherwise.
    let mut first = page(vec![item(1, "a", "h1")], Some(&p2));
    first["pageCount"] = json!(1);
    first["totalCount"] = json!(1);
    let mock = MockTransport::new()
        .with_json(&p1, first)
        .with_json(&p2, page(vec![item(2, "b", "h2")], None));

    let ids: Vec<u64> = fetch_all(&mock, &p1).map(|r| r.unwrap().id).collect();

    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_fetch_all_mid_pagination_failure() {
    let p1 = url("types/");
    let p2 = url("types/?page=2");
    let p3 = url("types/?page=3");
    let mock = MockTransport::new()
        .with_json(&p1, page(vec![item(1, "a", "h1"), item(2, "b", "h2")], Some(&p2)))
        .with_refused(&p2)
        .with_json(&p3, page(vec![item(3, "c", "h3")], None));

    let mut pager = fetch_all(&mock, &p1);
    assert_eq!(pager.next().unwrap().unwrap().id, 1);
    assert_eq!(pager.next().unwrap().unwrap().id, 2);
    let err = pager.next().unwrap().unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
    assert_eq!(err.url(), p2);
    assert!(pager.next().is_none());
    assert!(pager.next().is_none());
    assert!(!mock.requested(&p3));
}

#[test]
fn test_fetch_all_is_lazy() {
    let p1 = url("types/");
    let p2 = url("types/?page=2");
    let mock = MockTransport::new()
        .with_json(&p1, page(vec![item(1, "a", "h1")], Some(&p2)))
        .with_json(&p2, page(vec![item(2, "b", "h2")], None));

    let mut pager = fetch_all(&mock, &p1);
    assert!(mock.requests().is_empty());

    pager.next();
    assert_eq!(mock.requests(), vec![p1.clone()]);
    assert_eq!(pager.pages_fetched(), 1);
}

#[test]
fn test_fetch_all_skips_empty_page() {
    let p1 = url("types/");
    let p2 = url("types/?page=2");
    let p3 = url("types/?page=3");
    let mock = MockTransport::new()
        .with_json(&p1, page(vec![item(1, "a", "h1")], Some(&p2)))
        .with_json(&p2, page(vec![], Some(&p3)))
        .with_json(&p3, page(vec![item(3, "c", "h3")], None));

    let ids: Vec<u64> = fetch_all(&mock, &p1).map(|r| r.unwrap().id).collect();

    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_fetch_all_decode_error_on_missing_name() {
    let p1 = url("types/");
    let mock = MockTransport::new().with_json(
        &p1,
        json!({ "items": [{ "href": "h1", "id": 1 }] }),
    );

    let results: Vec<_> = fetch_all(&mock, &p1).collect();

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(FetchError::Decode { .. })));
}

#[test]
fn test_fetch_all_malformed_body() {
    let p1 = url("types/");
    let mock = MockTransport::new().with_body(&p1, "<html>oops</html>");

    let results: Vec<_> = fetch_all(&mock, &p1).collect();

    assert!(matches!(results.as_slice(), [Err(FetchError::Decode { .. })]));
}

#[test]
fn test_fetch_all_http_status_error() {
    let p1 = url("types/");
    let mock = MockTransport::new().with_status(&p1, 503);

    let results: Vec<_> = fetch_all(&mock, &p1).collect();

    assert!(matches!(
        results.as_slice(),
        [Err(FetchError::Status { status: 503, .. })]
    ));
}

#[test]
fn test_fetch_all_ignores_unknown_fields_and_keeps_id_str() {
    let p1 = url("types/");
    let mock = MockTransport::new().with_json(
        &p1,
        json!({
            "items": [{ "href": "h1", "id": 587, "id_str": "587", "name": "Rifter", "icon": {} }],
            "extra": true
        }),
    );

    let item = fetch_all(&mock, &p1).next().unwrap().unwrap();

    assert_eq!(item.id, 587);
    assert_eq!(item.id_str.as_deref(), Some("587"));
    assert_eq!(item.href, "h1");
}

// --- resolve_node ---

#[test]
fn test_resolve_category_reads_groups() {
    let href = url("inventory/categories/6/");
    let mock = MockTransport::new().with_json(
        &href,
        json!({ "published": true, "groups": [item(25, "Frigate", "g25")], "types": [] }),
    );

    let node = resolve_node(&mock, &href, Level::Category).unwrap();

    assert!(node.published);
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].name, "Frigate");
}

#[test]
fn test_resolve_group_reads_types() {
    let href = url("inventory/groups/25/");
    let mock = MockTransport::new().with_json(
        &href,
        json!({ "published": false, "types": [item(587, "Rifter", "t587")] }),
    );

    let node = resolve_node(&mock, &href, Level::Group).unwrap();

    assert!(!node.published);
    assert_eq!(node.children[0].id, 587);
}

#[test]
fn test_resolve_missing_children_field_is_decode_error() {
    let href = url("inventory/groups/25/");
    // A category-shaped body where a group is expected.
    let mock = MockTransport::new()
        .with_json(&href, json!({ "published": true, "groups": [] }));

    let err = resolve_node(&mock, &href, Level::Group).unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
}

#[test]
fn test_resolve_missing_published_is_unpublished() {
    let href = url("inventory/categories/6/");
    let mock = MockTransport::new().with_json(&href, json!({ "groups": [] }));

    let node = resolve_node(&mock, &href, Level::Category).unwrap();

    assert_eq!(node, Node::default());
}

#[test]
fn test_resolve_type_makes_no_request() {
    let mock = MockTransport::new();

    let node = resolve_node(&mock, "t587", Level::Type).unwrap();

    assert!(node.children.is_empty());
    assert!(mock.requests().is_empty());
}

#[test]
fn test_resolve_transport_failure() {
    let href = url("inventory/groups/25/");
    let mock = MockTransport::new().with_refused(&href);

    let err = resolve_node(&mock, &href, Level::Group).unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
    assert!(err.to_string().contains("connection refused"));
}
