use melody_core::config::SchemaLayout;
use melody_core::types::Category;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub fn distinct_services_query(
    layout: &SchemaLayout,
    category: Category,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT DISTINCT service FROM ");
    match layout {
        SchemaLayout::Shared { table } => {
            qb.push(table)
                .push(" WHERE category::text = ")
                .push_bind(category.as_str());
        }
        SchemaLayout::Partitioned => {
            qb.push(category.as_str());
        }
    }
    qb
}

/// Distinct service names stored under `category`.
pub async fn distinct_for_category(
    pool: &PgPool,
    layout: &SchemaLayout,
    category: Category,
) -> Result<Vec<String>, sqlx::Error> {
    let mut qb = distinct_services_query(layout, category);
    qb.build_query_scalar::<String>().fetch_all(pool).await
}
