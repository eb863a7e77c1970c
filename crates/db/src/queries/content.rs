//! Randomized content sampling.
//!
//! Every filter combination is served by one `SELECT ... ORDER BY RANDOM() LIMIT n` query. The
//! only thing that varies is which table the rows come from and which predicates apply, and
//! that depends on the configured [`SchemaLayout`].

use melody_core::config::SchemaLayout;
use melody_core::types::{Category, ContentFilter, ContentItem, SampleSize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::ContentRow;

/// Build the sample query for `filter`.
///
/// Values are always bound. Identifiers come from the closed [`Category`] set or from a table
/// name that was validated when the settings were loaded.
pub fn sample_query<'a>(
    layout: &SchemaLayout,
    filter: &'a ContentFilter,
    size: SampleSize,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    let mut has_where = false;

    match (layout, filter.category) {
        (SchemaLayout::Shared { table }, category) => {
            qb.push("user_id::bigint AS user_id, url, service, category::text AS category FROM ");
            qb.push(table);
            if let Some(category) = category {
                qb.push(" WHERE category::text = ").push_bind(category.as_str());
                has_where = true;
            }
        }
        (SchemaLayout::Partitioned, Some(category)) => {
            push_partition(&mut qb, category);
        }
        (SchemaLayout::Partitioned, None) => {
            qb.push("user_id, url, service, category FROM (");
            for (i, category) in Category::ALL.into_iter().enumerate() {
                if i > 0 {
                    qb.push(" UNION ALL ");
                }
                qb.push("SELECT ");
                push_partition(&mut qb, category);
            }
            qb.push(") AS content");
        }
    }

    if let Some(service) = filter.service.as_deref() {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("service = ").push_bind(service);
    }

    qb.push(" ORDER BY RANDOM() LIMIT ").push_bind(size.get());
    qb
}

fn push_partition(qb: &mut QueryBuilder<'_, Postgres>, category: Category) {
    qb.push("user_id::bigint AS user_id, url, service, '")
        .push(category.as_str())
        .push("'::text AS category FROM ")
        .push(category.as_str());
}

/// Draw up to `size` random rows matching `filter`.
pub async fn sample(
    pool: &PgPool,
    layout: &SchemaLayout,
    filter: &ContentFilter,
    size: SampleSize,
) -> Result<Vec<ContentItem>, sqlx::Error> {
    let mut qb = sample_query(layout, filter, size);
    let rows = qb.build_query_as::<ContentRow>().fetch_all(pool).await?;

    rows.into_iter()
        .map(|row| ContentItem::try_from(row).map_err(|err| sqlx::Error::Decode(Box::new(err))))
        .collect()
}
