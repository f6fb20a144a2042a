/// Benchmarks for the access scope
///
/// Measures performance of:
/// - Record-level predicates per role
/// - List scoping
/// - Form and table construction
use catalog_authz::{build_column_list, build_field_list, row_actions, AccessScope};
use catalog_core::{Principal, Product, ProductDraft, ProductId, ProductQuery, Role};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn product(organization: i64) -> Product {
    Product::from_draft(
        ProductId(1),
        organization.into(),
        ProductDraft {
            name: "Anvil".to_string(),
            description: "Heavy".to_string(),
            image: "products/anvil.png".to_string(),
            price: 120_000.0,
            available_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap_or_default(),
            stock: 3,
        },
    )
}

fn principals() -> Vec<(&'static str, Principal)> {
    vec![
        ("super_admin", Principal::new("user:root", 1).with_role(Role::SuperAdmin)),
        (
            "organization_admin",
            Principal::new("user:wile", 1).with_role(Role::OrganizationAdmin),
        ),
        ("role_less", Principal::new("user:guest", 2).with_role("editor")),
    ]
}

fn bench_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicates");
    let scope = AccessScope::new();
    let own = product(1);
    let foreign = product(2);

    for (name, principal) in principals() {
        group.bench_with_input(BenchmarkId::new("can_edit_own", name), &principal, |b, p| {
            b.iter(|| scope.can_edit(black_box(p), black_box(&own)))
        });
        group.bench_with_input(
            BenchmarkId::new("can_delete_foreign", name),
            &principal,
            |b, p| b.iter(|| scope.can_delete(black_box(p), black_box(&foreign))),
        );
        group.bench_with_input(BenchmarkId::new("row_actions", name), &principal, |b, p| {
            b.iter(|| row_actions(&scope, black_box(p), black_box(&own)))
        });
    }

    group.finish();
}

fn bench_scope_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope_list");
    let scope = AccessScope::new();

    for (name, principal) in principals() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &principal, |b, p| {
            b.iter(|| scope.scope_list(black_box(p), ProductQuery::new().search("anvil")))
        });
    }

    group.finish();
}

fn bench_schemas(c: &mut Criterion) {
    let mut group = c.benchmark_group("schemas");

    for (name, principal) in principals() {
        group.bench_with_input(BenchmarkId::new("field_list", name), &principal, |b, p| {
            b.iter(|| build_field_list(black_box(p)))
        });
        group.bench_with_input(BenchmarkId::new("column_list", name), &principal, |b, p| {
            b.iter(|| build_column_list(black_box(p)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_predicates, bench_scope_list, bench_schemas);
criterion_main!(benches);
