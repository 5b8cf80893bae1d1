//! Property checks for the catalog filter and the cart over generated catalogs.

use proptest::prelude::*;
use tvbox_commerce::prelude::*;

const BRANDS: [&str; 5] = ["VONTAR W2", "ZTE B866", "Tanix W2", "Ugoos AM8", "X96 Max"];

const SPEC_LINES: [&str; 8] = [
    "Оперативная память: 2 ГБ",
    "Оперативная память: 4 ГБ",
    "Встроенная память: 16 ГБ",
    "Встроенная память: 32 ГБ",
    "RAM 2GB",
    "ROM 64GB",
    "Память 4/32",
    "Wi-Fi 5 ГГц",
];

const BRAND_QUERIES: [&str; 5] = ["vontar", "ZTE", "w2", "tanix", "x96"];
const MEMORY_QUERIES: [&str; 4] = ["2 ГБ", "4 ГБ", "2GB", "4"];
const STORAGE_QUERIES: [&str; 3] = ["16 ГБ", "32 ГБ", "64GB"];

fn arb_product_type() -> impl Strategy<Value = ProductType> {
    prop_oneof![
        Just(ProductType::Promotional),
        Just(ProductType::Hit),
        Just(ProductType::New),
        Just(ProductType::Regular),
    ]
}

fn arb_product() -> impl Strategy<Value = Product> {
    (
        prop::sample::select(BRANDS.to_vec()),
        "[A-Z0-9]{0,4}",
        0i64..30_000,
        arb_product_type(),
        prop::sample::subsequence(SPEC_LINES.to_vec(), 0..=3),
    )
        .prop_map(|(brand, model, price, product_type, specs)| {
            Product::new("", format!("{brand} {model}"), price)
                .with_type(product_type)
                .with_specs(specs)
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(arb_product(), 0..12).prop_map(|products| {
        products
            .into_iter()
            .enumerate()
            .map(|(i, mut product)| {
                product.id = ProductId::new(format!("p{i}"));
                product
            })
            .collect()
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::sample::subsequence(BRAND_QUERIES.to_vec(), 0..=2),
        prop::sample::subsequence(MEMORY_QUERIES.to_vec(), 0..=2),
        prop::sample::subsequence(STORAGE_QUERIES.to_vec(), 0..=1),
        prop::option::of((0i64..20_000, 0i64..35_000)),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(brand, memory, storage, range, special_offers, availability)| FilterCriteria {
                brand: brand.into_iter().map(str::to_string).collect(),
                memory: memory.into_iter().map(str::to_string).collect(),
                storage: storage.into_iter().map(str::to_string).collect(),
                price_range: range
                    .map(|(min, max)| PriceRange::new(min, max))
                    .unwrap_or_default(),
                special_offers,
                availability,
                features: Vec::new(),
            },
        )
}

proptest! {
    #[test]
    fn prop_filter_keeps_input_order(products in arb_catalog(), criteria in arb_criteria()) {
        let result = filter_products(&products, &criteria);
        let mut remaining = products.iter();
        for kept in &result {
            prop_assert!(remaining.any(|p| p == kept), "{:?} out of order", kept.id);
        }
    }

    #[test]
    fn prop_filter_is_idempotent(products in arb_catalog(), criteria in arb_criteria()) {
        let once = filter_products(&products, &criteria);
        prop_assert_eq!(filter_products(&once, &criteria), once);
    }

    #[test]
    fn prop_filter_agrees_with_predicate(products in arb_catalog(), criteria in arb_criteria()) {
        let expected: Vec<Product> = products
            .iter()
            .filter(|p| matches(p, &criteria))
            .cloned()
            .collect();
        prop_assert_eq!(filter_products(&products, &criteria), expected);
    }

    #[test]
    fn prop_kept_products_satisfy_price_and_offer(
        products in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        for product in filter_products(&products, &criteria) {
            prop_assert!(criteria.price_range.contains(product.price));
            prop_assert!(!criteria.special_offers || product.is_promotional());
        }
    }

    #[test]
    fn prop_empty_criteria_is_identity(products in arb_catalog()) {
        prop_assert_eq!(filter_products(&products, &FilterCriteria::default()), products);
    }

    #[test]
    fn prop_availability_does_not_narrow(products in arb_catalog(), criteria in arb_criteria()) {
        let mut toggled = criteria.clone();
        toggled.availability = !criteria.availability;
        prop_assert_eq!(
            filter_products(&products, &criteria),
            filter_products(&products, &toggled)
        );
    }

    #[test]
    fn prop_cart_total_is_sum_of_adds(
        prices in prop::collection::vec(0i64..30_000, 6),
        picks in prop::collection::vec(0usize..6, 0..20),
    ) {
        let products: Vec<Product> = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| Product::new(format!("p{i}"), format!("Box {i}"), price))
            .collect();

        let mut cart = Cart::new();
        for &i in &picks {
            cart.add_item(&products[i]).unwrap();
        }

        let expected: i64 = picks.iter().map(|&i| products[i].price).sum();
        prop_assert_eq!(cart.total_price(), Money::rub(expected));
        prop_assert_eq!(cart.total_units(), picks.len() as u64);
        prop_assert!(cart.item_count() <= products.len());
    }
}
