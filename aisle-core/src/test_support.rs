//! Shared fixtures for unit tests.

use aisle_types::{Product, ProductId};

use crate::catalog::Catalog;

#[allow(clippy::too_many_arguments)]
fn product(
    id: ProductId,
    name: &str,
    category: &str,
    price: f64,
    discount: Option<f64>,
    rating: f64,
    reviews: u32,
    in_stock: bool,
) -> Product {
    Product {
        discount,
        rating,
        reviews,
        in_stock,
        ..Product::new(id, name, category, price)
    }
}

fn describe(mut product: Product, description: &str, tags: &[&str]) -> Product {
    product.description = description.to_owned();
    product.tags = tags.iter().map(|t| (*t).to_owned()).collect();
    product
}

/// Two decor vases: one without a discount, one at 10% off.
pub(crate) fn spec_catalog() -> Catalog {
    Catalog::new(vec![
        product(1, "Teal Vase", "Decor", 50.0, Some(0.0), 4.5, 120, true),
        product(2, "Teak Vase", "Decor", 60.0, Some(10.0), 4.0, 50, true),
    ])
    .expect("fixture catalog is valid")
}

/// Seven products over three categories, with descriptions and tags.
///
/// | id | name                | category | eff. price | rating | reviews | stock |
/// |----|---------------------|----------|------------|--------|---------|-------|
/// | 1  | Teal Vase           | Decor    | 50         | 4.5    | 120     | yes   |
/// | 2  | Teak Vase           | Decor    | 54         | 4.0    | 50      | yes   |
/// | 3  | Copper Kettle       | Kitchen  | 28         | 4.7    | 310     | no    |
/// | 4  | Linen Throw Pillow  | Decor    | 25         | 3.9    | 12      | yes   |
/// | 5  | Ceramic Mug Set     | kitchen  | 20.9       | 4.5    | 120     | yes   |
/// | 6  | Brass Table Lamp    | Lighting | 80         | 4.8    | 45      | yes   |
/// | 7  | Teal Velvet Cushion | Decor    | 25.5       | 4.2    | 80      | no    |
pub(crate) fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        describe(
            product(1, "Teal Vase", "Decor", 50.0, Some(0.0), 4.5, 120, true),
            "Hand-glazed ceramic vase",
            &["ceramic", "blue"],
        ),
        describe(
            product(2, "Teak Vase", "Decor", 60.0, Some(10.0), 4.0, 50, true),
            "Solid teak wood vase",
            &["wood"],
        ),
        describe(
            product(3, "Copper Kettle", "Kitchen", 35.0, Some(20.0), 4.7, 310, false),
            "Stovetop kettle with copper finish",
            &["copper", "tea"],
        ),
        describe(
            product(4, "Linen Throw Pillow", "Decor", 25.0, None, 3.9, 12, true),
            "Soft linen pillow cover",
            &["linen", "textile"],
        ),
        describe(
            product(5, "Ceramic Mug Set", "kitchen", 22.0, Some(5.0), 4.5, 120, true),
            "Set of four glazed mugs",
            &["ceramic", "mug"],
        ),
        describe(
            product(6, "Brass Table Lamp", "Lighting", 80.0, None, 4.8, 45, true),
            "Adjustable desk lamp in brushed brass",
            &["brass", "desk"],
        ),
        describe(
            product(7, "Teal Velvet Cushion", "Decor", 30.0, Some(15.0), 4.2, 80, false),
            "Plush velvet cushion",
            &["velvet", "teal"],
        ),
    ])
    .expect("fixture catalog is valid")
}

pub(crate) fn ids(products: &[&Product]) -> Vec<ProductId> {
    products.iter().map(|p| p.id).collect()
}
