//! Catalog page: filter sidebar and product list.
//!
//! Filter state lives in the query string so filtered views can be
//! bookmarked and shared. Each query parameter is turned into the matching
//! reducer action and applied over default filters.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use corner_shop_core::{
    CategoryFilter, Filters, MAX_STARS, MinRating, Price, PriceRange, ShopAction,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::load_cart;
use crate::filters;
use crate::routes::views::{ProductView, star_classes};
use crate::state::AppState;

/// Categories offered in the sidebar: query value and display name.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("all", "All Products"),
    ("electronics", "Electronics"),
    ("clothing", "Clothing"),
    ("accessories", "Accessories"),
    ("home", "Home & Kitchen"),
];

/// Price slider domain and step, in dollars.
pub const SLIDER_MAX_DOLLARS: u32 = 200;
pub const SLIDER_STEP_DOLLARS: u32 = 10;

/// How the product list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Grid, Self::List, Self::Compact];

    /// Parse a query value; anything unknown falls back to the grid.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("list") => Self::List,
            Some("compact") => Self::Compact,
            _ => Self::Grid,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
            Self::Compact => "compact",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Grid => "Grid",
            Self::List => "List",
            Self::Compact => "Compact",
        }
    }
}

/// Catalog query parameters.
///
/// Everything is read as text so that a bad value drops that one filter
/// instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub rating: Option<String>,
    pub view: Option<String>,
}

impl CatalogQuery {
    /// The filter actions this query asks for, in application order.
    #[must_use]
    pub fn actions(&self) -> Vec<ShopAction> {
        let mut actions = Vec::new();

        if let Some(category) = present(self.category.as_deref()) {
            actions.push(ShopAction::SetCategory(CategoryFilter::parse(category)));
        }

        let min = present(self.min_price.as_deref()).and_then(|v| parse_price("min_price", v));
        let max = present(self.max_price.as_deref()).and_then(|v| parse_price("max_price", v));
        if min.is_some() || max.is_some() {
            let defaults = PriceRange::default();
            actions.push(ShopAction::SetPriceRange(PriceRange::new(
                min.unwrap_or_else(|| defaults.min()),
                max.unwrap_or_else(|| defaults.max()),
            )));
        }

        if let Some(rating) = present(self.rating.as_deref()) {
            match rating.parse::<i64>() {
                Ok(stars) => actions.push(ShopAction::SetRating(clamp_stars(stars))),
                Err(e) => tracing::debug!(value = rating, error = %e, "Ignoring rating filter"),
            }
        }

        actions
    }
}

/// Out-of-range thresholds are clamped to `0..=5`.
fn clamp_stars(stars: i64) -> MinRating {
    let clamped = stars.clamp(0, i64::from(MAX_STARS));
    MinRating::new(u8::try_from(clamped).unwrap_or(MAX_STARS))
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_price(param: &str, value: &str) -> Option<Price> {
    let parsed = value
        .parse::<Decimal>()
        .map_err(|e| e.to_string())
        .and_then(|amount| Price::new(amount).map_err(|e| e.to_string()));
    match parsed {
        Ok(price) => Some(price),
        Err(error) => {
            tracing::debug!(param, value, error = %error, "Ignoring price filter");
            None
        }
    }
}

/// Link back to the catalog showing `filters` in `view`, omitting defaults.
#[must_use]
pub fn catalog_href(filters: &Filters, view: ViewMode) -> String {
    let defaults = Filters::default();
    let mut params: Vec<(&str, String)> = Vec::new();

    if filters.category != defaults.category {
        params.push(("category", filters.category.to_string()));
    }
    if filters.price_range != defaults.price_range {
        params.push(("min_price", filters.price_range.min().amount().normalize().to_string()));
        params.push(("max_price", filters.price_range.max().amount().normalize().to_string()));
    }
    if filters.min_rating.is_active() {
        params.push(("rating", filters.min_rating.stars().to_string()));
    }
    if view != ViewMode::default() {
        params.push(("view", view.as_str().to_string()));
    }

    if params.is_empty() {
        return "/".to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/?{query}")
}

/// A sidebar or toolbar choice.
#[derive(Clone, Debug)]
pub struct FilterOption {
    pub name: &'static str,
    pub href: String,
    pub selected: bool,
}

/// A "N stars & up" choice.
#[derive(Clone, Debug)]
pub struct RatingOption {
    pub stars: Vec<&'static str>,
    pub href: String,
    pub selected: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<FilterOption>,
    pub ratings: Vec<RatingOption>,
    pub view_modes: Vec<FilterOption>,
    pub view: &'static str,
    pub category: String,
    pub min_rating: u8,
    pub price_min: String,
    pub price_max: String,
    pub slider_min: u32,
    pub slider_max: u32,
    pub slider_domain_max: u32,
    pub slider_step: u32,
    pub filters_active: bool,
    pub return_to: String,
    pub cart_count: u32,
}

/// Clamp a price to the slider domain, in whole dollars.
fn slider_position(price: Price) -> u32 {
    price
        .amount()
        .trunc()
        .min(Decimal::from(SLIDER_MAX_DOLLARS))
        .to_u32()
        .unwrap_or(SLIDER_MAX_DOLLARS)
}

/// Display the catalog.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> CatalogTemplate {
    let mut shop = state.shop(load_cart(&session, state.catalog()).await);
    for action in query.actions() {
        shop.dispatch(action);
    }
    let view = ViewMode::parse(query.view.as_deref());
    let filters = &shop.filters;

    let products = shop
        .visible_products()
        .into_iter()
        .map(|product| ProductView::new(product, &shop.cart))
        .collect::<Vec<_>>();
    tracing::debug!(visible = products.len(), "Catalog filtered");

    let categories = CATEGORIES
        .iter()
        .map(|(value, name)| {
            let choice = CategoryFilter::parse(value);
            let selected = filters.category.as_str() == *value;
            FilterOption {
                name: *name,
                href: catalog_href(
                    &Filters {
                        category: choice,
                        ..filters.clone()
                    },
                    view,
                ),
                selected,
            }
        })
        .collect();

    let ratings = (1..=MAX_STARS)
        .map(|stars| RatingOption {
            stars: star_classes(stars),
            href: catalog_href(
                &Filters {
                    min_rating: MinRating::new(stars),
                    ..filters.clone()
                },
                view,
            ),
            selected: filters.min_rating.stars() == stars,
        })
        .collect();

    let view_modes = ViewMode::ALL
        .iter()
        .map(|mode| FilterOption {
            name: mode.label(),
            href: catalog_href(filters, *mode),
            selected: *mode == view,
        })
        .collect();

    CatalogTemplate {
        products,
        categories,
        ratings,
        view_modes,
        view: view.as_str(),
        category: filters.category.to_string(),
        min_rating: filters.min_rating.stars(),
        price_min: filters.price_range.min().display(),
        price_max: filters.price_range.max().display(),
        slider_min: slider_position(filters.price_range.min()),
        slider_max: slider_position(filters.price_range.max()),
        slider_domain_max: SLIDER_MAX_DOLLARS,
        slider_step: SLIDER_STEP_DOLLARS,
        filters_active: filters.is_active(),
        return_to: catalog_href(filters, view),
        cart_count: shop.cart_item_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> CatalogQuery {
        let mut q = CatalogQuery::default();
        for (key, value) in pairs {
            let value = Some((*value).to_string());
            match *key {
                "category" => q.category = value,
                "min_price" => q.min_price = value,
                "max_price" => q.max_price = value,
                "rating" => q.rating = value,
                "view" => q.view = value,
                _ => {}
            }
        }
        q
    }

    fn filters_for(q: &CatalogQuery) -> Filters {
        let mut shop = corner_shop_core::ShopState::default();
        for action in q.actions() {
            shop.dispatch(action);
        }
        shop.filters
    }

    #[test]
    fn test_empty_query_has_no_actions() {
        assert!(query(&[]).actions().is_empty());
        assert!(query(&[("category", ""), ("min_price", " ")]).actions().is_empty());
    }

    #[test]
    fn test_query_to_filters() {
        let filters = filters_for(&query(&[
            ("category", "electronics"),
            ("min_price", "20"),
            ("max_price", "150.5"),
            ("rating", "4"),
        ]));
        assert_eq!(filters.category, CategoryFilter::parse("electronics"));
        assert_eq!(filters.price_range.min(), Price::from_dollars(20));
        assert_eq!(filters.price_range.max(), Price::from_cents(15050));
        assert_eq!(filters.min_rating.stars(), 4);
    }

    #[test]
    fn test_single_price_bound_keeps_default_other() {
        let filters = filters_for(&query(&[("max_price", "50")]));
        assert_eq!(filters.price_range.min(), Price::ZERO);
        assert_eq!(filters.price_range.max(), Price::from_dollars(50));
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let filters = filters_for(&query(&[
            ("min_price", "-5"),
            ("max_price", "lots"),
            ("rating", "five"),
        ]));
        assert_eq!(filters, Filters::default());
    }

    #[test]
    fn test_out_of_range_rating_is_clamped() {
        assert_eq!(filters_for(&query(&[("rating", "300")])).min_rating.stars(), 5);
        assert_eq!(filters_for(&query(&[("rating", "9")])).min_rating.stars(), 5);
        assert_eq!(filters_for(&query(&[("rating", "-1")])).min_rating, MinRating::ANY);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!(ViewMode::parse(Some("list")), ViewMode::List);
        assert_eq!(ViewMode::parse(Some("compact")), ViewMode::Compact);
        assert_eq!(ViewMode::parse(Some("carousel")), ViewMode::Grid);
        assert_eq!(ViewMode::parse(None), ViewMode::Grid);
    }

    #[test]
    fn test_catalog_href_omits_defaults() {
        assert_eq!(catalog_href(&Filters::default(), ViewMode::Grid), "/");

        let filters = Filters {
            category: CategoryFilter::parse("home"),
            price_range: PriceRange::new(Price::from_dollars(10), Price::from_dollars(90)),
            min_rating: MinRating::new(3),
        };
        assert_eq!(
            catalog_href(&filters, ViewMode::List),
            "/?category=home&min_price=10&max_price=90&rating=3&view=list"
        );
    }

    #[test]
    fn test_catalog_href_round_trips() {
        let filters = Filters {
            category: CategoryFilter::parse("home & garden"),
            price_range: PriceRange::new(Price::from_cents(1050), Price::from_dollars(40)),
            min_rating: MinRating::ANY,
        };
        let href = catalog_href(&filters, ViewMode::Grid);
        assert_eq!(href, "/?category=home%20%26%20garden&min_price=10.5&max_price=40");
    }

    #[test]
    fn test_slider_position_clamps() {
        assert_eq!(slider_position(Price::from_dollars(1000)), 200);
        assert_eq!(slider_position(Price::from_cents(4599)), 45);
        assert_eq!(slider_position(Price::ZERO), 0);
    }
}
