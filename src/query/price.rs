//! Price computation parameters.
//!
//! The webservice can compute extra price fields on `products` and
//! `combinations`. Each field is configured with options of the form
//! `price[field_name][parameter] = value`.

/// Resources that accept price parameters.
pub const PRICE_RESOURCES: &[&str] = &["products", "combinations"];

/// A parameter of a computed price field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceParameter {
    /// Country ID used for taxes.
    Country,
    /// State ID used for taxes.
    State,
    /// Postcode used for taxes.
    Postcode,
    /// Currency ID.
    Currency,
    /// Customer group ID.
    Group,
    /// Quantity used for quantity discounts.
    Quantity,
    /// Product attribute (combination) ID.
    ProductAttribute,
    /// Number of decimals of the result.
    Decimals,
    /// Include taxes.
    UseTax,
    /// Apply specific price reductions.
    UseReduction,
    /// Return only the reduction amount.
    OnlyReduction,
    /// Include the ecotax.
    UseEcotax,
}

impl PriceParameter {
    /// Returns the parameter name used in the wire key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::Postcode => "postcode",
            Self::Currency => "currency",
            Self::Group => "group",
            Self::Quantity => "quantity",
            Self::ProductAttribute => "product_attribute",
            Self::Decimals => "decimals",
            Self::UseTax => "use_tax",
            Self::UseReduction => "use_reduction",
            Self::OnlyReduction => "only_reduction",
            Self::UseEcotax => "use_ecotax",
        }
    }

    /// Builds the wire key `price[field][parameter]`.
    #[must_use]
    pub fn option_key(&self, field: &str) -> String {
        format!("price[{field}][{}]", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_key_format() {
        assert_eq!(
            PriceParameter::Country.option_key("field"),
            "price[field][country]"
        );
        assert_eq!(
            PriceParameter::ProductAttribute.option_key("my_price"),
            "price[my_price][product_attribute]"
        );
        assert_eq!(
            PriceParameter::UseEcotax.option_key("my_price"),
            "price[my_price][use_ecotax]"
        );
    }
}
