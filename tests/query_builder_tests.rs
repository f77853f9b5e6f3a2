//! Integration tests for the query builder.
//!
//! These tests verify the sequencing rules (action before options, one action
//! per query, no overwritten options), the per-action restrictions and the
//! wire encoding of every option.

use std::sync::Mutex;

use prestashop_webservice_extra::{
    Action, OptionValue, PriceParameter, QueryBuilder, QueryError, QueryOptions, Webservice,
    WebserviceError, XmlDocument,
};

/// A webservice double that records executed queries.
#[derive(Debug, Default)]
struct MockWebservice {
    executed: Mutex<Vec<(Action, QueryOptions)>>,
}

impl MockWebservice {
    fn answer(
        &self,
        action: Action,
        options: &QueryOptions,
    ) -> Result<XmlDocument, WebserviceError> {
        self.executed
            .lock()
            .unwrap()
            .push((action, options.clone()));
        Ok(XmlDocument::new("<prestashop><products/></prestashop>"))
    }
}

impl Webservice for MockWebservice {
    fn base_url(&self) -> &str {
        "https://shop.com"
    }

    async fn get(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        self.answer(Action::Get, options)
    }

    async fn add(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        self.answer(Action::Add, options)
    }

    async fn edit(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        self.answer(Action::Edit, options)
    }

    async fn delete(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        self.answer(Action::Delete, options)
    }
}

fn create_builder() -> QueryBuilder<MockWebservice> {
    QueryBuilder::new(MockWebservice::default())
}

fn expected(pairs: &[(&str, OptionValue)]) -> QueryOptions {
    pairs.iter().cloned().collect()
}

// ============================================================================
// Sequencing Tests
// ============================================================================

#[test]
fn test_option_before_action_is_rejected() {
    let mut query = create_builder();

    assert!(matches!(query.id(2), Err(QueryError::InvalidQueryState)));
    assert!(matches!(query.id_shop(1), Err(QueryError::InvalidQueryState)));
    assert!(query.query_options().is_empty());
}

#[test]
fn test_option_forbidden_for_action_is_rejected() {
    let mut query = create_builder();
    query.add("products").unwrap();

    assert!(matches!(
        query.id(2),
        Err(QueryError::ForbiddenAction {
            current: Action::Add,
            ..
        })
    ));
}

#[test]
fn test_second_action_is_rejected() {
    let mut query = create_builder();
    query.get("products").unwrap();

    let result = query.get("products");

    assert!(matches!(
        result,
        Err(QueryError::DuplicateAction {
            current: Action::Get,
            requested: Action::Get,
        })
    ));
}

#[test]
fn test_schema_shortcut_counts_as_an_action() {
    let mut query = create_builder();
    query.get("products").unwrap();

    assert!(matches!(
        query.get_blank_schema("products"),
        Err(QueryError::DuplicateAction { .. })
    ));
}

#[test]
fn test_overwritten_option_is_rejected() {
    let mut query = create_builder();
    query.get("products").unwrap().id(2).unwrap();

    let result = query.id(3);

    assert!(matches!(
        result,
        Err(QueryError::DuplicateOption { ref option }) if option == "id"
    ));
    assert_eq!(query.query_options().get("id"), Some(&OptionValue::Integer(2)));
}

#[test]
fn test_display_and_display_full_share_one_option() {
    let mut query = create_builder();
    query.get("products").unwrap().display(["id"]).unwrap();

    assert!(matches!(
        query.display_full(),
        Err(QueryError::DuplicateOption { .. })
    ));
}

#[test]
fn test_init_query_abandons_pending_query() {
    let mut query = create_builder();
    query.get("products").unwrap().id(2).unwrap();

    query.init_query();

    assert_eq!(query.query_action(), None);
    assert!(query.query_options().is_empty());
    assert!(query.edit("products").is_ok());
}

// ============================================================================
// Action Tests
// ============================================================================

#[test]
fn test_resource_actions() {
    for action in [Action::Get, Action::Add, Action::Edit, Action::Delete] {
        let mut query = create_builder();
        match action {
            Action::Get => query.get("products"),
            Action::Add => query.add("products"),
            Action::Edit => query.edit("products"),
            Action::Delete => query.delete("products"),
        }
        .unwrap();

        assert_eq!(query.query_action(), Some(action));
        assert_eq!(query.pending_resource(), Some("products"));
        assert_eq!(
            query.query_options(),
            &expected(&[("resource", "products".into())])
        );
    }
}

#[test]
fn test_url_actions() {
    let mut query = create_builder();
    query.get_url("http://shop.com/api/products").unwrap();
    assert_eq!(query.query_action(), Some(Action::Get));
    assert_eq!(
        query.query_options(),
        &expected(&[("url", "http://shop.com/api/products".into())])
    );

    let mut query = create_builder();
    query.add_url("http://shop.com/api/products").unwrap();
    assert_eq!(query.query_action(), Some(Action::Add));

    let mut query = create_builder();
    query.edit_url("http://shop.com/api/products/2").unwrap();
    assert_eq!(query.query_action(), Some(Action::Edit));
    assert_eq!(
        query.query_options(),
        &expected(&[("url", "http://shop.com/api/products/2".into())])
    );

    let mut query = create_builder();
    query.delete_url("http://shop.com/api/products/2").unwrap();
    assert_eq!(query.query_action(), Some(Action::Delete));
    assert_eq!(query.pending_resource(), None);
}

#[test]
fn test_blank_schema_url() {
    let mut query = create_builder();
    query.get_blank_schema("products").unwrap();

    assert_eq!(query.query_action(), Some(Action::Get));
    assert_eq!(
        query.query_options(),
        &expected(&[("url", "https://shop.com/api/products?schema=blank".into())])
    );
    assert!(!query.query_options().contains_key("resource"));
}

#[test]
fn test_synopsis_schema_url() {
    let mut query = create_builder();
    query.get_synopsis_schema("customers").unwrap();

    assert_eq!(
        query.query_options(),
        &expected(&[("url", "https://shop.com/api/customers?schema=synopsis".into())])
    );
}

// ============================================================================
// Option Encoding Tests
// ============================================================================

#[test]
fn test_id_option() {
    let mut query = create_builder();
    query.get("products").unwrap().id(2).unwrap();

    assert_eq!(
        query.query_options(),
        &expected(&[("resource", "products".into()), ("id", 2_u32.into())])
    );
}

#[test]
fn test_id_allowed_for_edit_and_delete() {
    let mut query = create_builder();
    assert!(query.edit("products").unwrap().id(2).is_ok());

    let mut query = create_builder();
    assert!(query.delete("products").unwrap().id(2).is_ok());
}

#[test]
fn test_filters() {
    let mut query = create_builder();
    query
        .get("products")
        .unwrap()
        .add_value_filter("a", "value")
        .unwrap()
        .add_values_filter("b", ["value1", "value2"])
        .unwrap()
        .add_interval_filter("c", 1, 5)
        .unwrap()
        .add_begins_by_filter("d", "begin")
        .unwrap()
        .add_ends_by_filter("e", "end")
        .unwrap()
        .add_contains_filter("f", "middle")
        .unwrap();

    assert_eq!(
        query.query_options(),
        &expected(&[
            ("resource", "products".into()),
            ("filter[a]", "[value]".into()),
            ("filter[b]", "[value1|value2]".into()),
            ("filter[c]", "[1,5]".into()),
            ("filter[d]", "[begin]%".into()),
            ("filter[e]", "%[end]".into()),
            ("filter[f]", "%[middle]%".into()),
        ])
    );
}

#[test]
fn test_values_filter_with_empty_list() {
    let mut query = create_builder();
    query.get("products").unwrap();

    let result = query.add_values_filter("field", Vec::<String>::new());

    assert!(matches!(result, Err(QueryError::EmptyInput { .. })));
    assert!(!query.query_options().contains_key("filter[field]"));
}

#[test]
fn test_filters_are_get_only() {
    let mut query = create_builder();
    query.edit("products").unwrap();

    assert!(matches!(
        query.add_value_filter("field", "value"),
        Err(QueryError::ForbiddenAction { .. })
    ));
    assert!(matches!(
        query.limit(5, 0),
        Err(QueryError::ForbiddenAction { .. })
    ));
    assert!(matches!(
        query.schema("blank"),
        Err(QueryError::ForbiddenAction { .. })
    ));
}

#[test]
fn test_display_options() {
    let mut query = create_builder();
    query.get("products").unwrap().display(["field1", "field2"]).unwrap();
    assert_eq!(
        query.query_options().get("display"),
        Some(&OptionValue::from("[field1,field2]"))
    );

    let mut query = create_builder();
    query.get("products").unwrap().display_full().unwrap();
    assert_eq!(
        query.query_options().get("display"),
        Some(&OptionValue::from("full"))
    );

    let mut query = create_builder();
    query.get("products").unwrap();
    assert!(matches!(
        query.display(Vec::<&str>::new()),
        Err(QueryError::EmptyInput { .. })
    ));
}

#[test]
fn test_sort_without_date_fields() {
    let mut query = create_builder();
    query
        .get("products")
        .unwrap()
        .sort([("field1", "ASC"), ("field2", "DESC")])
        .unwrap();

    assert_eq!(
        query.query_options(),
        &expected(&[
            ("resource", "products".into()),
            ("sort", "[field1_ASC,field2_DESC]".into()),
        ])
    );
}

#[test]
fn test_sort_with_date_field_enables_date() {
    let mut query = create_builder();
    query.get("products").unwrap().sort([("date_add", "ASC")]).unwrap();

    assert_eq!(
        query.query_options(),
        &expected(&[
            ("resource", "products".into()),
            ("sort", "[date_add_ASC]".into()),
            ("date", 1_i64.into()),
        ])
    );
}

#[test]
fn test_sort_rejects_empty_and_invalid_input() {
    let mut query = create_builder();
    query.get("products").unwrap();

    assert!(matches!(
        query.sort(Vec::<(&str, &str)>::new()),
        Err(QueryError::EmptyInput { .. })
    ));
    assert!(matches!(
        query.sort([("field1", "DESC"), ("field2", "ACS")]),
        Err(QueryError::InvalidSortOrder { ref order }) if order == "ACS"
    ));
    assert!(!query.query_options().contains_key("sort"));
}

#[test]
fn test_limit_option() {
    let mut query = create_builder();
    query.get("products").unwrap().limit(5, 0).unwrap();
    assert_eq!(query.query_options().get("limit"), Some(&OptionValue::Integer(5)));

    let mut query = create_builder();
    query.get("products").unwrap().limit(5, 3).unwrap();
    assert_eq!(
        query.query_options().get("limit"),
        Some(&OptionValue::from("3,5"))
    );
}

#[test]
fn test_shop_context_options() {
    let mut query = create_builder();
    query
        .add("products")
        .unwrap()
        .id_shop(2)
        .unwrap()
        .id_group_shop(2)
        .unwrap();

    assert_eq!(
        query.query_options(),
        &expected(&[
            ("resource", "products".into()),
            ("id_shop", 2_u32.into()),
            ("id_group_shop", 2_u32.into()),
        ])
    );
}

#[test]
fn test_schema_option() {
    let mut query = create_builder();
    query.get("products").unwrap().schema("synopsis").unwrap();

    assert_eq!(
        query.query_options().get("schema"),
        Some(&OptionValue::from("synopsis"))
    );
}

#[test]
fn test_language_options() {
    let mut query = create_builder();
    query.get("products").unwrap().language_filter(2).unwrap();
    assert_eq!(
        query.query_options().get("language"),
        Some(&OptionValue::Integer(2))
    );

    let mut query = create_builder();
    query.get("products").unwrap().languages_filter([2, 3]).unwrap();
    assert_eq!(
        query.query_options().get("language"),
        Some(&OptionValue::from("[2|3]"))
    );

    let mut query = create_builder();
    query.get("products").unwrap().language_interval_filter(1, 4).unwrap();
    assert_eq!(
        query.query_options().get("language"),
        Some(&OptionValue::from("[1,4]"))
    );

    let mut query = create_builder();
    query.get("products").unwrap();
    assert!(matches!(
        query.languages_filter([]),
        Err(QueryError::EmptyInput { .. })
    ));
}

#[test]
fn test_send_xml_key_depends_on_action() {
    let document = XmlDocument::new("<prestashop><product/></prestashop>");

    let mut query = create_builder();
    query.add("products").unwrap().send_xml(document.clone()).unwrap();
    assert_eq!(
        query.query_options().get("postXml"),
        Some(&OptionValue::Xml(document.clone()))
    );

    let mut query = create_builder();
    query.edit("products").unwrap().send_xml(document.clone()).unwrap();
    assert_eq!(
        query.query_options().get("putXml"),
        Some(&OptionValue::Xml(document.clone()))
    );

    let mut query = create_builder();
    query.get("products").unwrap();
    assert!(matches!(
        query.send_xml(document),
        Err(QueryError::ForbiddenAction { .. })
    ));
}

// ============================================================================
// Price Parameter Tests
// ============================================================================

#[test]
fn test_price_parameters_on_products() {
    let mut query = create_builder();
    query
        .get("products")
        .unwrap()
        .add_country_price_parameter("field", 1)
        .unwrap()
        .add_state_price_parameter("field", 2)
        .unwrap()
        .add_postcode_price_parameter("field", "75001")
        .unwrap()
        .add_currency_price_parameter("field", 3)
        .unwrap()
        .add_group_price_parameter("field", 4)
        .unwrap()
        .add_quantity_price_parameter("field", 5)
        .unwrap()
        .add_product_attribute_price_parameter("field", 6)
        .unwrap()
        .add_decimals_price_parameter("field", 2)
        .unwrap()
        .add_use_tax_price_parameter("field", true)
        .unwrap()
        .add_use_reduction_price_parameter("field", false)
        .unwrap()
        .add_only_reduction_price_parameter("field", false)
        .unwrap()
        .add_use_ecotax_price_parameter("field", true)
        .unwrap();

    let options = query.query_options();
    assert_eq!(options.len(), 13);
    assert_eq!(options.get("price[field][country]"), Some(&OptionValue::Integer(1)));
    assert_eq!(
        options.get("price[field][postcode]"),
        Some(&OptionValue::from("75001"))
    );
    assert_eq!(
        options.get("price[field][product_attribute]"),
        Some(&OptionValue::Integer(6))
    );
    assert_eq!(options.get("price[field][use_tax]"), Some(&OptionValue::Bool(true)));
    assert_eq!(
        options.get("price[field][only_reduction]"),
        Some(&OptionValue::Bool(false))
    );
}

#[test]
fn test_price_parameters_on_combinations() {
    let mut query = create_builder();
    query
        .get("combinations")
        .unwrap()
        .price_parameter("my_price", PriceParameter::Currency, 1_u32)
        .unwrap();

    assert_eq!(
        query.query_options().get("price[my_price][currency]"),
        Some(&OptionValue::Integer(1))
    );
}

#[test]
fn test_price_parameters_on_other_resource() {
    let mut query = create_builder();
    query.get("category").unwrap();

    match query.add_country_price_parameter("field", 1) {
        Err(QueryError::ForbiddenResource { current, .. }) => {
            assert_eq!(current.as_deref(), Some("category"));
        }
        other => panic!("Expected ForbiddenResource error, got {other:?}"),
    }
}

#[test]
fn test_price_parameters_are_get_only() {
    let mut query = create_builder();
    query.edit("products").unwrap();

    assert!(matches!(
        query.add_country_price_parameter("field", 1),
        Err(QueryError::ForbiddenAction { .. })
    ));
}

// ============================================================================
// Execution Tests
// ============================================================================

#[tokio::test]
async fn test_execute_without_action() {
    let mut query = create_builder();

    assert!(matches!(
        query.execute_query().await,
        Err(QueryError::NoAction)
    ));
}

#[tokio::test]
async fn test_execute_hands_options_to_webservice_and_resets() {
    let mut query = create_builder();
    query
        .get("products")
        .unwrap()
        .display_full()
        .unwrap()
        .limit(10, 20)
        .unwrap();

    let document = query.execute_query().await.unwrap();

    assert_eq!(document.as_str(), "<prestashop><products/></prestashop>");
    assert_eq!(query.query_action(), None);
    assert_eq!(query.pending_resource(), None);
    assert!(query.query_options().is_empty());

    {
        let executed = query.webservice().executed.lock().unwrap();
        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].0, Action::Get);
        assert_eq!(
            executed[0].1,
            expected(&[
                ("resource", "products".into()),
                ("display", "full".into()),
                ("limit", "20,10".into()),
            ])
        );
    }

    // The next cycle starts from an empty state
    query.init_query();
    query.add("products").unwrap();
    assert_eq!(
        query.query_options(),
        &expected(&[("resource", "products".into())])
    );
}

#[tokio::test]
async fn test_execute_routes_each_action() {
    let mut query = create_builder();
    let body = XmlDocument::new("<prestashop/>");

    query.add("products").unwrap().send_xml(body.clone()).unwrap();
    query.execute_query().await.unwrap();
    query.edit("products").unwrap().id(1).unwrap().send_xml(body).unwrap();
    query.execute_query().await.unwrap();
    query.delete("products").unwrap().id(1).unwrap();
    query.execute_query().await.unwrap();

    let executed = query.webservice().executed.lock().unwrap();
    let actions: Vec<Action> = executed.iter().map(|(action, _)| *action).collect();
    assert_eq!(actions, vec![Action::Add, Action::Edit, Action::Delete]);
    assert!(executed[0].1.contains_key("postXml"));
    assert!(executed[1].1.contains_key("putXml"));
}
