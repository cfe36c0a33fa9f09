mod common;

use common::{ADMIN, BUYER, OTHER_SELLER, SELLER, TestApp};
use marketplace::domain::{
    actor::Actor,
    enums::{FishType, SortDirection},
    requests::{
        category::CreateCategoryRequest,
        product::{CreateProductRequest, FindAllProducts, ProductSort, UpdateProductRequest},
    },
    response::product::ProductResponse,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::errors::ServiceError;

fn listing(name: &str, category_id: i64, price: Decimal) -> CreateProductRequest {
    CreateProductRequest {
        name: name.into(),
        description: None,
        price,
        stock: 10,
        category_id,
        images: vec![],
        weight_grams: None,
        fish_type: FishType::Fresh,
        species: None,
        active: true,
        featured: false,
    }
}

async fn create(app: &TestApp, seller_id: i64, req: CreateProductRequest) -> ProductResponse {
    app.services
        .product_service
        .create_product(&Actor::seller(seller_id), &req)
        .await
        .expect("create product")
        .data
}

async fn category(app: &TestApp, name: &str, parent_id: Option<i64>) -> i64 {
    app.services
        .category_service
        .create_category(
            &Actor::admin(ADMIN),
            &CreateCategoryRequest {
                name: name.into(),
                description: None,
                parent_id,
            },
        )
        .await
        .expect("create category")
        .data
        .id
}

async fn names(app: &TestApp, req: &FindAllProducts) -> Vec<String> {
    app.services
        .product_service
        .list_products(req)
        .await
        .expect("list products")
        .data
        .into_iter()
        .map(|p| p.name)
        .collect()
}

#[tokio::test]
async fn category_filter_includes_child_categories() {
    let app = TestApp::new().await;
    let tuna_family = category(&app, "Tuna", Some(app.category_id)).await;
    let freshwater = category(&app, "Ikan Tawar", None).await;

    create(&app, SELLER, listing("Kakap Merah", app.category_id, dec!(85000))).await;
    create(&app, SELLER, listing("Tuna Sirip Biru", tuna_family, dec!(300000))).await;
    create(&app, SELLER, listing("Lele Dumbo", freshwater, dec!(25000))).await;

    let mut sea = names(
        &app,
        &FindAllProducts {
            category_id: Some(app.category_id),
            ..Default::default()
        },
    )
    .await;
    sea.sort();
    assert_eq!(sea, vec!["Kakap Merah", "Tuna Sirip Biru"]);

    let tuna_only = names(
        &app,
        &FindAllProducts {
            category_id: Some(tuna_family),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(tuna_only, vec!["Tuna Sirip Biru"]);
}

#[tokio::test]
async fn price_range_and_sort_apply_together() {
    let app = TestApp::new().await;
    for (name, price) in [
        ("Teri Medan", dec!(15000)),
        ("Bawal Putih", dec!(95000)),
        ("Tenggiri", dec!(70000)),
        ("Lobster Mutiara", dec!(900000)),
    ] {
        create(&app, SELLER, listing(name, app.category_id, price)).await;
    }

    let mid_range = names(
        &app,
        &FindAllProducts {
            min_price: Some(dec!(50000)),
            max_price: Some(dec!(100000)),
            sort_by: ProductSort::Price,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        },
    )
    .await;
    assert_eq!(mid_range, vec!["Tenggiri", "Bawal Putih"]);

    let by_name_desc = names(
        &app,
        &FindAllProducts {
            sort_by: ProductSort::Name,
            sort_direction: SortDirection::Desc,
            ..Default::default()
        },
    )
    .await;
    assert_eq!(
        by_name_desc,
        vec!["Teri Medan", "Tenggiri", "Lobster Mutiara", "Bawal Putih"]
    );

    let inverted = app
        .services
        .product_service
        .list_products(&FindAllProducts {
            min_price: Some(dec!(100000)),
            max_price: Some(dec!(50000)),
            ..Default::default()
        })
        .await;
    assert!(matches!(inverted, Err(ServiceError::Validation(_))));
}

#[tokio::test]
async fn search_matches_species_and_description_case_insensitively() {
    let app = TestApp::new().await;

    create(
        &app,
        SELLER,
        CreateProductRequest {
            species: Some("Thunnus albacares".into()),
            ..listing("Tuna Sirip Kuning", app.category_id, dec!(120000))
        },
    )
    .await;
    create(
        &app,
        SELLER,
        CreateProductRequest {
            description: Some("Ditangkap pagi hari di PERAIRAN Selayar".into()),
            ..listing("Cakalang", app.category_id, dec!(45000))
        },
    )
    .await;
    create(&app, SELLER, listing("Bandeng", app.category_id, dec!(30000))).await;

    let by_species = names(
        &app,
        &FindAllProducts {
            search: "THUNNUS".into(),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(by_species, vec!["Tuna Sirip Kuning"]);

    let by_description = names(
        &app,
        &FindAllProducts {
            search: "  perairan selayar ".into(),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(by_description, vec!["Cakalang"]);
}

#[tokio::test]
async fn public_lists_hide_sold_out_and_featured_is_capped() {
    let app = TestApp::new().await;

    for i in 0..12 {
        create(
            &app,
            SELLER,
            CreateProductRequest {
                featured: true,
                ..listing(&format!("Ikan Pilihan {i}"), app.category_id, dec!(50000))
            },
        )
        .await;
    }
    let sold_out = create(
        &app,
        SELLER,
        CreateProductRequest {
            featured: true,
            stock: 0,
            ..listing("Kerapu Habis", app.category_id, dec!(250000))
        },
    )
    .await;

    let featured = app
        .services
        .product_service
        .featured_products()
        .await
        .expect("featured")
        .data;
    assert_eq!(featured.len(), 10);
    assert!(featured.iter().all(|p| p.id != sold_out.id && p.stock > 0));

    let listed = app
        .services
        .product_service
        .list_products(&FindAllProducts {
            page_size: 100,
            ..Default::default()
        })
        .await
        .expect("list");
    assert_eq!(listed.pagination.total_items, 12);
    assert!(listed.data.iter().all(|p| p.id != sold_out.id));

    let own = app
        .services
        .product_service
        .seller_products(
            &Actor::seller(SELLER),
            &FindAllProducts {
                page_size: 100,
                ..Default::default()
            },
        )
        .await
        .expect("seller list");
    assert_eq!(own.pagination.total_items, 13);
}

#[tokio::test]
async fn deleted_product_disappears_but_order_lines_keep_its_snapshot() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Ikan Kerapu", dec!(180000), 4).await;

    app.add_to_cart(BUYER, product.id, 1).await;
    let order = app.checkout(BUYER).await.expect("checkout");

    app.services
        .product_service
        .delete_product(&Actor::seller(SELLER), product.id)
        .await
        .expect("delete");

    for key in [product.id.to_string(), product.slug.clone()] {
        let hidden = app.services.product_service.find_product(&key).await;
        assert!(matches!(hidden, Err(ServiceError::NotFound(_))));
    }

    let again = app
        .services
        .product_service
        .delete_product(&Actor::seller(SELLER), product.id)
        .await;
    assert!(matches!(again, Err(ServiceError::NotFound(_))));

    let kept = app
        .services
        .order_service
        .find_order(&Actor::buyer(BUYER), order.order.id)
        .await
        .expect("order")
        .data;
    assert_eq!(kept.items.len(), 1);
    assert_eq!(kept.items[0].product_id, product.id);
    assert_eq!(kept.items[0].product_name, "Ikan Kerapu");
    assert_eq!(kept.items[0].price, dec!(180000));
}

#[tokio::test]
async fn only_the_owner_manages_a_product() {
    let app = TestApp::new().await;
    let product = app.product(SELLER, "Baronang", dec!(55000), 6).await;
    let products = &app.services.product_service;
    let rival = Actor::seller(OTHER_SELLER);

    let edit = products
        .update_product(
            &rival,
            product.id,
            &UpdateProductRequest {
                price: Some(dec!(1000)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(edit, Err(ServiceError::Forbidden(_))));

    let delete = products.delete_product(&rival, product.id).await;
    assert!(matches!(delete, Err(ServiceError::Forbidden(_))));

    let by_buyer = products
        .create_product(&Actor::buyer(BUYER), &listing("Palsu", app.category_id, dec!(1000)))
        .await;
    assert!(matches!(by_buyer, Err(ServiceError::Forbidden(_))));

    let untouched = products
        .find_product(&product.id.to_string())
        .await
        .expect("still listed")
        .data
        .product;
    assert_eq!(untouched.price, dec!(55000));
}

#[tokio::test]
async fn only_admins_create_categories() {
    let app = TestApp::new().await;
    let categories = &app.services.category_service;
    let request = CreateCategoryRequest {
        name: "Kerang".into(),
        description: None,
        parent_id: None,
    };

    for actor in [Actor::seller(SELLER), Actor::buyer(BUYER)] {
        let denied = categories.create_category(&actor, &request).await;
        assert!(matches!(denied, Err(ServiceError::Forbidden(_))));
    }

    let orphan = categories
        .create_category(
            &Actor::admin(ADMIN),
            &CreateCategoryRequest {
                parent_id: Some(9_999),
                ..request.clone()
            },
        )
        .await;
    assert!(matches!(orphan, Err(ServiceError::NotFound(_))));

    let created = categories
        .create_category(&Actor::admin(ADMIN), &request)
        .await
        .expect("admin creates")
        .data;
    assert_eq!(created.slug, "kerang");
}
