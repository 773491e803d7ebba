//! Property tests for the shop reducer.
//!
//! Whatever sequence of cart actions is applied, the cart keeps one line per
//! product with a positive quantity, and persisting then restoring it is
//! lossless.

use corner_shop_core::{
    Cart, Catalog, Category, CategoryFilter, Filters, MinRating, Price, PriceRange, Product,
    ProductId, Rating, ShopAction, ShopState, apply,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::HashSet;

fn cart_action() -> impl Strategy<Value = ShopAction> {
    prop_oneof![
        (0i32..8).prop_map(|id| ShopAction::AddToCart {
            product_id: ProductId::new(id)
        }),
        (0i32..8).prop_map(|id| ShopAction::RemoveFromCart {
            product_id: ProductId::new(id)
        }),
        (0i32..8, -3i64..6).prop_map(|(id, quantity)| ShopAction::UpdateQuantity {
            product_id: ProductId::new(id),
            quantity
        }),
    ]
}

fn product_from(id: i32, cents: u32, tenths: u32, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Price::from_cents(cents),
        category: Category::new(category),
        description: String::new(),
        image: String::new(),
        rating: Rating::new(f64::from(tenths) / 10.0).expect("rating in range"),
    }
}

fn arb_product(id: i32) -> impl Strategy<Value = Product> {
    (
        0u32..30_000,
        0u32..=50,
        prop::sample::select(vec!["electronics", "clothing", "accessories", "home"]),
    )
        .prop_map(move |(cents, tenths, category)| product_from(id, cents, tenths, category))
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (0i32..8)
        .prop_flat_map(|n| (0..n).map(arb_product).collect::<Vec<_>>())
        .prop_map(|products| Catalog::new(products).expect("unique ids"))
}

proptest! {
    /// Every line has a distinct product id and a quantity of at least one.
    #[test]
    fn cart_lines_stay_unique_and_positive(actions in vec(cart_action(), 0..60)) {
        let state = actions.into_iter().fold(ShopState::default(), apply);

        let mut seen = HashSet::new();
        for item in state.cart.items() {
            prop_assert!(seen.insert(item.id));
            prop_assert!(item.quantity.get() >= 1);
        }
    }

    /// The item count equals the number of adds minus what removals took away,
    /// which in particular means adding once more always grows it by one.
    #[test]
    fn add_increments_item_count(actions in vec(cart_action(), 0..40), id in 0i32..8) {
        let state = actions.into_iter().fold(ShopState::default(), apply);
        let before = state.cart_item_count();
        let after = apply(state, ShopAction::AddToCart { product_id: ProductId::new(id) });
        prop_assert_eq!(after.cart_item_count(), before + 1);
    }

    /// Restoring a persisted cart yields the same cart.
    #[test]
    fn persisted_cart_restores_identically(actions in vec(cart_action(), 0..40)) {
        let state = actions.into_iter().fold(ShopState::default(), apply);
        let json = state.cart.to_json().expect("serialize");
        let restored = Cart::from_json(&json).expect("parse");
        prop_assert_eq!(restored, state.cart);
    }

    /// Visible products are exactly the catalog entries passing the category,
    /// inclusive price and minimum rating rules, in catalog order.
    #[test]
    fn visible_products_follow_filter_rules(
        specs in vec(
            (
                0u32..30_000,
                0u32..=50,
                prop::sample::select(vec!["electronics", "clothing", "accessories", "home"]),
            ),
            0..10,
        ),
        category in prop::sample::select(vec!["all", "electronics", "home", "garden"]),
        min in 0u32..200,
        max in 0u32..200,
        stars in 0u8..=5,
    ) {
        let products: Vec<Product> = specs
            .iter()
            .zip(0i32..)
            .map(|(&(cents, tenths, cat), id)| product_from(id, cents, tenths, cat))
            .collect();
        let catalog = Catalog::new(products).expect("unique ids");

        let mut state = ShopState::with_catalog(catalog);
        state.dispatch(ShopAction::SetCategory(CategoryFilter::parse(category)));
        state.dispatch(ShopAction::SetPriceRange(PriceRange::new(
            Price::from_dollars(min),
            Price::from_dollars(max),
        )));
        state.dispatch(ShopAction::SetRating(MinRating::new(stars)));

        // Rules restated over the raw generated values.
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let expected: Vec<i32> = specs
            .iter()
            .zip(0i32..)
            .filter(|(spec, _)| {
                let (cents, tenths, cat) = **spec;
                (category == "all" || cat == category)
                    && low * 100 <= cents
                    && cents <= high * 100
                    && (stars == 0 || tenths >= u32::from(stars) * 10)
            })
            .map(|(_, id)| id)
            .collect();

        let visible: Vec<i32> = state.visible_products().iter().map(|p| p.id.as_i32()).collect();
        prop_assert_eq!(&visible, &expected);

        // Visible ids form a subsequence of the catalog ids.
        let mut catalog_ids = state.catalog.iter().map(|p| p.id.as_i32());
        for id in &visible {
            prop_assert!(catalog_ids.any(|c| c == *id));
        }
    }

    /// Clearing filters always shows the whole catalog.
    #[test]
    fn clear_filters_shows_everything(catalog in arb_catalog(), stars in 0u8..=5) {
        let state = apply(ShopState::with_catalog(catalog), ShopAction::SetRating(MinRating::new(stars)));
        let state = apply(state, ShopAction::ClearFilters);
        prop_assert_eq!(&state.filters, &Filters::default());
        prop_assert!(state.visible_products().iter().all(|p| p.price <= Price::from_dollars(1000)));
        prop_assert_eq!(state.visible_products().len(), state.catalog.len());
    }
}
