//! Built-in demo catalog used by the seed endpoint and the CLI.

use rust_decimal::Decimal;

use crate::store::NewProduct;

/// The default 21-product catalog.
#[must_use]
pub fn default_products() -> Vec<NewProduct> {
    const ENTRIES: &[(&str, &str, i64, &str)] = &[
        // Electronics
        ("iPhone 15 Pro", "Electronics", 999, "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=400"),
        ("Samsung Galaxy S24", "Electronics", 899, "https://images.unsplash.com/photo-1511707171634-5f897ff02aa9?w=400"),
        ("MacBook Air M3", "Electronics", 1299, "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=400"),
        ("iPad Pro", "Electronics", 799, "https://images.unsplash.com/photo-1544244015-0df4b3ffc6b0?w=400"),
        ("AirPods Pro", "Electronics", 249, "https://images.unsplash.com/photo-1606220945770-b5b6c2c55bf1?w=400"),
        // Fashion
        ("Nike Air Max", "Fashion", 120, "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400"),
        ("Levi's 501 Jeans", "Fashion", 60, "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400"),
        ("Adidas Hoodie", "Fashion", 80, "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=400"),
        ("Ray-Ban Sunglasses", "Fashion", 150, "https://images.unsplash.com/photo-1572635196237-14b3f281503f?w=400"),
        ("Leather Jacket", "Fashion", 200, "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=400"),
        // Home
        ("Coffee Maker", "Home", 89, "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=400"),
        ("Plant Pot Set", "Home", 35, "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?w=400"),
        ("Table Lamp", "Home", 45, "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400"),
        ("Throw Pillow", "Home", 25, "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=400"),
        // Sports
        ("Yoga Mat", "Sports", 30, "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=400"),
        ("Dumbbells Set", "Sports", 75, "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400"),
        ("Basketball", "Sports", 25, "https://images.unsplash.com/photo-1546519638-68e109498ffc?w=400"),
        ("Running Shoes", "Sports", 110, "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400"),
        // Books
        ("Programming Book", "Books", 40, "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=400"),
        ("Novel Collection", "Books", 25, "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=400"),
        ("Cookbook", "Books", 30, "https://images.unsplash.com/photo-1544947950-fa07a98d237f?w=400"),
    ];

    ENTRIES
        .iter()
        .map(|&(name, category, price, image)| NewProduct {
            name: name.to_owned(),
            price: Decimal::from(price),
            category: category.to_owned(),
            image: image.to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let products = default_products();
        assert_eq!(products.len(), 21);
        assert!(products.iter().all(|p| p.price > Decimal::ZERO));
        assert!(products.iter().all(|p| p.image.starts_with("https://")));

        let categories: std::collections::HashSet<&str> =
            products.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(categories.len(), 5);
    }
}
