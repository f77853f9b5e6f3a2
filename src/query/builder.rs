//! The fluent query builder.
//!
//! A query cycle is: set exactly one action, add zero or more validated
//! options, then execute. Executing hands the action and the options to the
//! [`Webservice`] client and resets the builder.

use crate::config::WebserviceConfig;
use crate::query::errors::QueryError;
use crate::query::options::{OptionValue, QueryOptions};
use crate::query::price::{PriceParameter, PRICE_RESOURCES};
use crate::query::sort::encode_sort;
use crate::query::Action;
use crate::webservice::{HttpWebservice, Webservice, WebserviceError, XmlDocument};

const GET_ONLY: &[Action] = &[Action::Get];
const TARGETED: &[Action] = &[Action::Get, Action::Edit, Action::Delete];
const WITH_BODY: &[Action] = &[Action::Add, Action::Edit];

/// Builds and executes webservice queries.
///
/// Every operation returns `&mut Self` so calls can be chained with `?`.
/// Contract violations (options before an action, duplicated options,
/// options forbidden for the pending action) fail immediately and leave the
/// builder unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use prestashop_webservice_extra::QueryBuilder;
///
/// let mut query = QueryBuilder::from_config(&config)?;
///
/// let products = query
///     .get("products")?
///     .add_value_filter("active", "1")?
///     .display(["id", "name"])?
///     .sort([("date_add", "DESC")])?
///     .limit(10, 0)?
///     .execute_query()
///     .await?;
/// ```
#[derive(Debug)]
pub struct QueryBuilder<W> {
    webservice: W,
    base_url: String,
    pending_action: Option<Action>,
    pending_resource: Option<String>,
    options: QueryOptions,
}

impl QueryBuilder<HttpWebservice> {
    /// Creates a builder backed by the HTTP webservice client.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::Network`] if the HTTP client cannot be created.
    pub fn from_config(config: &WebserviceConfig) -> Result<Self, WebserviceError> {
        Ok(Self::new(HttpWebservice::new(config)?))
    }
}

impl<W: Webservice> QueryBuilder<W> {
    /// Creates a builder for the given webservice client.
    #[must_use]
    pub fn new(webservice: W) -> Self {
        let base_url = webservice.base_url().trim_end_matches('/').to_string();
        Self {
            webservice,
            base_url,
            pending_action: None,
            pending_resource: None,
            options: QueryOptions::new(),
        }
    }

    /// Returns the root URL of the store.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying webservice client.
    #[must_use]
    pub const fn webservice(&self) -> &W {
        &self.webservice
    }

    /// Returns the pending action, if a query is in progress.
    #[must_use]
    pub const fn query_action(&self) -> Option<Action> {
        self.pending_action
    }

    /// Returns the named resource targeted by the pending query.
    #[must_use]
    pub fn pending_resource(&self) -> Option<&str> {
        self.pending_resource.as_deref()
    }

    /// Returns the options accumulated so far.
    #[must_use]
    pub const fn query_options(&self) -> &QueryOptions {
        &self.options
    }

    /// Abandons the pending query, if any.
    pub fn init_query(&mut self) -> &mut Self {
        self.pending_action = None;
        self.pending_resource = None;
        self.options.clear();
        self
    }

    // Actions

    /// Starts a query retrieving `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn get(&mut self, resource: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_resource_query(Action::Get, resource.into())
    }

    /// Starts a query retrieving the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn get_url(&mut self, url: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_url_query(Action::Get, url.into())
    }

    /// Starts a query retrieving the blank schema of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn get_blank_schema(&mut self, resource: &str) -> Result<&mut Self, QueryError> {
        let url = self.schema_url(resource, "blank");
        self.start_url_query(Action::Get, url)
    }

    /// Starts a query retrieving the synopsis schema of `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn get_synopsis_schema(&mut self, resource: &str) -> Result<&mut Self, QueryError> {
        let url = self.schema_url(resource, "synopsis");
        self.start_url_query(Action::Get, url)
    }

    /// Starts a query creating a `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn add(&mut self, resource: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_resource_query(Action::Add, resource.into())
    }

    /// Starts a query creating a resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn add_url(&mut self, url: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_url_query(Action::Add, url.into())
    }

    /// Starts a query updating a `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn edit(&mut self, resource: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_resource_query(Action::Edit, resource.into())
    }

    /// Starts a query updating the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn edit_url(&mut self, url: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_url_query(Action::Edit, url.into())
    }

    /// Starts a query deleting a `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn delete(&mut self, resource: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_resource_query(Action::Delete, resource.into())
    }

    /// Starts a query deleting the resource at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DuplicateAction`] if an action is already pending.
    pub fn delete_url(&mut self, url: impl Into<String>) -> Result<&mut Self, QueryError> {
        self.start_url_query(Action::Delete, url.into())
    }

    // Options

    /// Targets a single resource by ID. Usable with get, edit and delete.
    ///
    /// # Errors
    ///
    /// Fails if no action is pending, if the action is `add`, or if the ID
    /// was already set.
    pub fn id(&mut self, id: u32) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(TARGETED)?;
        self.add_option("id", id)
    }

    /// Keeps resources whose `field` equals `value`: `[value]`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the field is already filtered.
    pub fn add_value_filter(&mut self, field: &str, value: &str) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option(filter_key(field), format!("[{value}]"))
    }

    /// Keeps resources whose `field` equals any of `values`: `[v1|v2]`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInput`] if `values` is empty, and fails like
    /// [`add_value_filter`](Self::add_value_filter) otherwise.
    pub fn add_values_filter<I, V>(
        &mut self,
        field: &str,
        values: I,
    ) -> Result<&mut Self, QueryError>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        self.check_allowed_actions(GET_ONLY)?;
        let values = join_non_empty(values, "|", "Values")?;
        self.add_option(filter_key(field), format!("[{values}]"))
    }

    /// Keeps resources whose `field` lies between `min` and `max`: `[min,max]`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the field is already filtered.
    pub fn add_interval_filter(
        &mut self,
        field: &str,
        min: i64,
        max: i64,
    ) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option(filter_key(field), format!("[{min},{max}]"))
    }

    /// Keeps resources whose `field` starts with `value`: `[value]%`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the field is already filtered.
    pub fn add_begins_by_filter(
        &mut self,
        field: &str,
        value: &str,
    ) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option(filter_key(field), format!("[{value}]%"))
    }

    /// Keeps resources whose `field` ends with `value`: `%[value]`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the field is already filtered.
    pub fn add_ends_by_filter(
        &mut self,
        field: &str,
        value: &str,
    ) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option(filter_key(field), format!("%[{value}]"))
    }

    /// Keeps resources whose `field` contains `value`: `%[value]%`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the field is already filtered.
    pub fn add_contains_filter(
        &mut self,
        field: &str,
        value: &str,
    ) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option(filter_key(field), format!("%[{value}]%"))
    }

    /// Displays only the given fields: `[f1,f2]`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInput`] if `fields` is empty. Fails if the
    /// pending action is not `get` or the display was already chosen.
    pub fn display<I, F>(&mut self, fields: I) -> Result<&mut Self, QueryError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<str>,
    {
        self.check_allowed_actions(GET_ONLY)?;
        let fields = join_non_empty(fields, ",", "Display values")?;
        self.add_option("display", format!("[{fields}]"))
    }

    /// Displays every field.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the display was already chosen.
    pub fn display_full(&mut self) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option("display", "full")
    }

    /// Sorts results by `(field, direction)` pairs, in the given order.
    ///
    /// Directions must be `ASC` or `DESC`. Sorting on `date_add` or
    /// `date_upd` also sets `date = 1`, which the webservice requires for
    /// date sorting.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInput`] for no pairs and
    /// [`QueryError::InvalidSortOrder`] for an unknown direction.
    pub fn sort<I, F, O>(&mut self, fields: I) -> Result<&mut Self, QueryError>
    where
        I: IntoIterator<Item = (F, O)>,
        F: AsRef<str>,
        O: AsRef<str>,
    {
        self.check_allowed_actions(GET_ONLY)?;
        let encoded = encode_sort(fields)?;

        let mut keys = vec!["sort"];
        if encoded.sorts_by_date {
            keys.push("date");
        }
        self.ensure_absent(&keys)?;

        if encoded.sorts_by_date {
            self.add_option("date", 1_i64)?;
        }
        self.add_option("sort", encoded.value)
    }

    /// Limits the number of results, skipping the first `offset` ones.
    ///
    /// Encoded as `limit` alone, or `offset,limit` when `offset > 0`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the limit was already set.
    pub fn limit(&mut self, limit: u32, offset: u32) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        if offset > 0 {
            self.add_option("limit", format!("{offset},{limit}"))
        } else {
            self.add_option("limit", limit)
        }
    }

    /// Uses shop `id_shop` as the context of the query.
    ///
    /// # Errors
    ///
    /// Fails if no action is pending or the shop was already set.
    pub fn id_shop(&mut self, id_shop: u32) -> Result<&mut Self, QueryError> {
        self.require_action()?;
        self.add_option("id_shop", id_shop)
    }

    /// Uses shop group `id_group_shop` as the context of the query.
    ///
    /// # Errors
    ///
    /// Fails if no action is pending or the shop group was already set.
    pub fn id_group_shop(&mut self, id_group_shop: u32) -> Result<&mut Self, QueryError> {
        self.require_action()?;
        self.add_option("id_group_shop", id_group_shop)
    }

    /// Selects the kind of schema to retrieve (e.g. `blank`, `synopsis`).
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or the schema was already set.
    pub fn schema(&mut self, schema: &str) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option("schema", schema)
    }

    /// Displays localized fields in a single language.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or a language filter was already set.
    pub fn language_filter(&mut self, language_id: u32) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option("language", language_id)
    }

    /// Displays localized fields in the given languages: `[1|2]`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyInput`] if `language_ids` is empty, and fails
    /// like [`language_filter`](Self::language_filter) otherwise.
    pub fn languages_filter<I>(&mut self, language_ids: I) -> Result<&mut Self, QueryError>
    where
        I: IntoIterator<Item = u32>,
    {
        self.check_allowed_actions(GET_ONLY)?;
        let ids = join_non_empty(
            language_ids.into_iter().map(|id| id.to_string()),
            "|",
            "Languages ids",
        )?;
        self.add_option("language", format!("[{ids}]"))
    }

    /// Displays localized fields for languages `min` to `max`: `[min,max]`.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `get` or a language filter was already set.
    pub fn language_interval_filter(
        &mut self,
        min: u32,
        max: u32,
    ) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.add_option("language", format!("[{min},{max}]"))
    }

    /// Attaches the XML body of an add (`postXml`) or edit (`putXml`) query.
    ///
    /// # Errors
    ///
    /// Fails if the pending action is not `add` or `edit`, or a body was already attached.
    pub fn send_xml(&mut self, xml: XmlDocument) -> Result<&mut Self, QueryError> {
        let action = self.check_allowed_actions(WITH_BODY)?;
        let key = if action == Action::Add { "postXml" } else { "putXml" };
        self.add_option(key, xml)
    }

    // Price parameters

    /// Sets a parameter of the computed price field `field`:
    /// `price[field][parameter] = value`.
    ///
    /// Only usable with `get` on `products` or `combinations`.
    ///
    /// # Errors
    ///
    /// Fails like any get-only option, and with
    /// [`QueryError::ForbiddenResource`] for any other resource.
    pub fn price_parameter(
        &mut self,
        field: &str,
        parameter: PriceParameter,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, QueryError> {
        self.check_allowed_actions(GET_ONLY)?;
        self.check_allowed_resources(PRICE_RESOURCES)?;
        self.add_option(parameter.option_key(field), value)
    }

    /// Computes the price for the given country.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_country_price_parameter(
        &mut self,
        field: &str,
        country_id: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::Country, country_id)
    }

    /// Computes the price for the given state.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_state_price_parameter(
        &mut self,
        field: &str,
        state_id: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::State, state_id)
    }

    /// Computes the price for the given postcode.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_postcode_price_parameter(
        &mut self,
        field: &str,
        postcode: &str,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::Postcode, postcode)
    }

    /// Computes the price in the given currency.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_currency_price_parameter(
        &mut self,
        field: &str,
        currency_id: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::Currency, currency_id)
    }

    /// Computes the price for the given customer group.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_group_price_parameter(
        &mut self,
        field: &str,
        group_id: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::Group, group_id)
    }

    /// Computes the price for the given quantity.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_quantity_price_parameter(
        &mut self,
        field: &str,
        quantity: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::Quantity, quantity)
    }

    /// Computes the price of the given combination.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_product_attribute_price_parameter(
        &mut self,
        field: &str,
        product_attribute_id: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::ProductAttribute, product_attribute_id)
    }

    /// Rounds the price to `decimals` decimals.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_decimals_price_parameter(
        &mut self,
        field: &str,
        decimals: u32,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::Decimals, decimals)
    }

    /// Includes or excludes taxes.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_use_tax_price_parameter(
        &mut self,
        field: &str,
        use_tax: bool,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::UseTax, use_tax)
    }

    /// Applies or ignores specific price reductions.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_use_reduction_price_parameter(
        &mut self,
        field: &str,
        use_reduction: bool,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::UseReduction, use_reduction)
    }

    /// Returns only the reduction amount.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_only_reduction_price_parameter(
        &mut self,
        field: &str,
        only_reduction: bool,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::OnlyReduction, only_reduction)
    }

    /// Includes or excludes the ecotax.
    ///
    /// # Errors
    ///
    /// See [`price_parameter`](Self::price_parameter).
    pub fn add_use_ecotax_price_parameter(
        &mut self,
        field: &str,
        use_ecotax: bool,
    ) -> Result<&mut Self, QueryError> {
        self.price_parameter(field, PriceParameter::UseEcotax, use_ecotax)
    }

    // Execution

    /// Executes the pending query and resets the builder.
    ///
    /// On failure the builder keeps its pending action and options; call
    /// [`init_query`](Self::init_query) to abandon them.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NoAction`] if no action is pending, or
    /// [`QueryError::Webservice`] if the client fails.
    pub async fn execute_query(&mut self) -> Result<XmlDocument, QueryError> {
        let action = self.pending_action.ok_or(QueryError::NoAction)?;

        tracing::debug!(
            action = %action,
            resource = self.pending_resource.as_deref().unwrap_or("-"),
            options = self.options.len(),
            "Executing webservice query"
        );

        let document = match action {
            Action::Get => self.webservice.get(&self.options).await,
            Action::Add => self.webservice.add(&self.options).await,
            Action::Edit => self.webservice.edit(&self.options).await,
            Action::Delete => self.webservice.delete(&self.options).await,
        }?;

        self.init_query();
        Ok(document)
    }

    // Internals

    fn set_action(&mut self, action: Action) -> Result<(), QueryError> {
        if let Some(current) = self.pending_action {
            return Err(QueryError::DuplicateAction {
                current,
                requested: action,
            });
        }
        self.options.clear();
        self.pending_action = Some(action);
        Ok(())
    }

    fn start_resource_query(
        &mut self,
        action: Action,
        resource: String,
    ) -> Result<&mut Self, QueryError> {
        self.set_action(action)?;
        self.options.insert_unique("resource", resource.as_str())?;
        self.pending_resource = Some(resource);
        Ok(self)
    }

    fn start_url_query(&mut self, action: Action, url: String) -> Result<&mut Self, QueryError> {
        self.set_action(action)?;
        self.options.insert_unique("url", url)?;
        Ok(self)
    }

    fn schema_url(&self, resource: &str, schema: &str) -> String {
        format!("{}/api/{resource}?schema={schema}", self.base_url)
    }

    fn add_option(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self, QueryError> {
        self.options.insert_unique(key, value)?;
        Ok(self)
    }

    fn ensure_absent(&self, keys: &[&str]) -> Result<(), QueryError> {
        match keys.iter().find(|key| self.options.contains_key(key)) {
            Some(key) => Err(QueryError::DuplicateOption {
                option: (*key).to_string(),
            }),
            None => Ok(()),
        }
    }

    fn require_action(&self) -> Result<Action, QueryError> {
        self.pending_action.ok_or(QueryError::InvalidQueryState)
    }

    fn check_allowed_actions(&self, allowed: &'static [Action]) -> Result<Action, QueryError> {
        let current = self.require_action()?;
        if !allowed.contains(&current) {
            return Err(QueryError::ForbiddenAction { allowed, current });
        }
        Ok(current)
    }

    fn check_allowed_resources(&self, allowed: &'static [&'static str]) -> Result<(), QueryError> {
        match self.pending_resource.as_deref() {
            Some(resource) if allowed.iter().any(|r| *r == resource) => Ok(()),
            current => Err(QueryError::ForbiddenResource {
                allowed,
                current: current.map(ToString::to_string),
            }),
        }
    }
}

fn filter_key(field: &str) -> String {
    format!("filter[{field}]")
}

fn join_non_empty<I, V>(
    values: I,
    separator: &str,
    input: &'static str,
) -> Result<String, QueryError>
where
    I: IntoIterator<Item = V>,
    V: AsRef<str>,
{
    let values: Vec<V> = values.into_iter().collect();
    if values.is_empty() {
        return Err(QueryError::EmptyInput { input });
    }
    Ok(values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator))
}
