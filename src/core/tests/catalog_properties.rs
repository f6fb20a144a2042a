//! Property tests for the in-memory catalog

use catalog_core::{
    InMemoryCatalog, Organization, OrganizationId, ProductDraft, ProductQuery,
    ProductRepository, SortDirection, SortField,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn draft(name: &str, stock: i64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: "Generated".to_string(),
        image: "products/generated.png".to_string(),
        price: 1_000.0,
        available_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        stock,
    }
}

fn rows() -> impl Strategy<Value = Vec<(i64, String, i64)>> {
    prop::collection::vec((1i64..=3, "(kopi|teh|gula|beras)[a-z]{0,3}", 0i64..50), 0..20)
}

async fn seeded(rows: &[(i64, String, i64)]) -> InMemoryCatalog {
    let catalog = InMemoryCatalog::new();
    for id in 1..=3 {
        catalog
            .add_organization(Organization::new(id, format!("Org {}", id)))
            .await;
    }
    for (organization, name, stock) in rows {
        catalog
            .insert(OrganizationId(*organization), draft(name, *stock))
            .await
            .unwrap();
    }
    catalog
}

proptest! {
    #[test]
    fn test_organization_filter_is_exact(rows in rows(), organization in 1i64..=3) {
        tokio_test::block_on(async {
            let catalog = seeded(&rows).await;
            let query = ProductQuery::new().where_organization(OrganizationId(organization));
            let found = catalog.find(&query).await.unwrap();

            let expected = rows.iter().filter(|(org, _, _)| *org == organization).count();
            assert_eq!(found.len(), expected);
            assert!(found.iter().all(|p| p.organization_id == OrganizationId(organization)));
        });
    }

    #[test]
    fn test_search_and_filter_compose(
        rows in rows(),
        organization in 1i64..=3,
        term in "(KOPI|teh|Gula)",
    ) {
        tokio_test::block_on(async {
            let catalog = seeded(&rows).await;
            let query = ProductQuery::new()
                .search(term.clone())
                .where_organization(OrganizationId(organization));
            let found = catalog.find(&query).await.unwrap();

            let needle = term.to_lowercase();
            let expected = rows
                .iter()
                .filter(|(org, name, _)| *org == organization && name.contains(&needle))
                .count();
            assert_eq!(found.len(), expected);
        });
    }

    #[test]
    fn test_pages_cover_sorted_listing(rows in rows(), limit in 1usize..6) {
        tokio_test::block_on(async {
            let catalog = seeded(&rows).await;
            let sorted = ProductQuery::new().sort_by(SortField::Stock, SortDirection::Desc);
            let all = catalog.find(&sorted).await.unwrap();

            let mut paged = Vec::new();
            let mut offset = 0;
            loop {
                let page = catalog
                    .find(&sorted.clone().paginate(Some(limit), offset))
                    .await
                    .unwrap();
                if page.is_empty() {
                    break;
                }
                assert!(page.len() <= limit);
                offset += page.len();
                paged.extend(page);
            }

            assert_eq!(paged, all);
            assert!(all.windows(2).all(|w| w[0].stock >= w[1].stock));
        });
    }
}
