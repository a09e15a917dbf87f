use super::*;

fn query() -> CollectionQuery {
    CollectionQuery {
        username: "sai".to_string(),
        subject_type: SubjectType::All,
        collection_type: CollectionType::All,
        limit: None,
        offset: None,
    }
}

#[test]
fn all_filters_are_omitted() {
    assert_eq!(
        query().api_url().unwrap().as_str(),
        "https://api.bgm.tv/v0/users/sai/collections?limit=50&offset=0"
    );
}

#[test]
fn filters_use_api_codes() {
    let q = CollectionQuery {
        subject_type: SubjectType::Real,
        collection_type: CollectionType::OnHold,
        limit: Some(30),
        offset: Some(60),
        ..query()
    };
    assert_eq!(
        q.api_url().unwrap().as_str(),
        "https://api.bgm.tv/v0/users/sai/collections?limit=30&offset=60&subject_type=6&type=4"
    );
}

#[test]
fn username_is_percent_encoded() {
    let q = CollectionQuery {
        username: "a b/c".to_string(),
        ..query()
    };
    let url = q.api_url().unwrap();
    assert!(url.as_str().contains("/users/a%20b%2Fc/collections"));
    assert_eq!(url.path_segments().unwrap().nth(2), Some("a%20b%2Fc"));
}

#[test]
fn enum_names_parse_case_insensitively() {
    assert_eq!(SubjectType::from_name("Anime"), Some(SubjectType::Anime));
    assert_eq!(SubjectType::from_name("movie"), None);
    assert_eq!(CollectionType::from_name("on_hold"), Some(CollectionType::OnHold));
    assert_eq!(CollectionType::Wish.code(), Some(1));
    assert_eq!(SubjectType::Game.code(), Some(4));
}

#[test]
fn response_decodes_ids_images_and_dedups() {
    let body = r#"{
        "total": 120,
        "data": [
            {"subject": {"id": 12, "images": {"common": "https://img/12.jpg", "large": "l"}, "name": "A"}},
            {"subject": {"id": "34", "images": {"common": "", "large": "https://img/34-l.jpg"}}},
            {"subject": {"id": 12, "images": {"common": "https://img/12b.jpg"}}},
            {"subject": {"images": {"common": "https://img/none.jpg"}}},
            {"subject": {"id": 56}}
        ]
    }"#;
    let page = parse_collection_response(body).unwrap();
    assert_eq!(page.total, 120);
    let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["12", "34"]);
    assert_eq!(page.items[0].image, "https://img/12.jpg");
    assert_eq!(page.items[1].image, "https://img/34-l.jpg");
    assert_eq!(page.items[0].meta["name"], "A");
}

#[test]
fn malformed_response_is_a_collection_error() {
    let err = parse_collection_response("{\"data\": 5}").unwrap_err();
    assert!(matches!(err, WallError::Collection(_)));
}

#[test]
fn item_list_accepts_both_shapes() {
    let plain = parse_item_list(r#"[{"id": "a", "image": "a.jpg"}]"#).unwrap();
    assert_eq!(plain, vec![Item::new("a", "a.jpg")]);

    let listing = parse_item_list(
        r#"{"total": 1, "data": [{"subject": {"id": 1, "images": {"common": "c.jpg"}}}]}"#,
    )
    .unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id.as_str(), "1");

    assert!(parse_item_list("42").is_err());
}

#[test]
fn subject_url_deep_links_by_id() {
    assert_eq!(
        subject_url(&ItemId::from("12")).unwrap().as_str(),
        "https://bgm.tv/subject/12"
    );
    assert_eq!(
        subject_url(&ItemId::from("a/b")).unwrap().as_str(),
        "https://bgm.tv/subject/a%2Fb"
    );
}
