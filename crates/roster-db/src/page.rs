//! Single-page listing with an independent total count

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, Select};
use serde::Serialize;

/// Fixed page size for list queries.
pub const PAGE_SIZE: u64 = 20;

/// One page of records plus the number of records matching the filter.
///
/// `total_count` ignores the page window and may exceed `items.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }

    /// Whether more records exist than were returned.
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.items.len() as u64
    }
}

/// Count every match, then fetch page 0.
// TODO: accept a page number once list endpoints take a cursor.
pub(crate) async fn first_page<E, M>(
    select: Select<E>,
    db: &DatabaseConnection,
) -> Result<Page<M>, DbErr>
where
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'static,
{
    let paginator = select.paginate(db, PAGE_SIZE);
    let total_count = paginator.num_items().await?;
    let items = paginator.fetch_page(0).await?;

    Ok(Page { items, total_count })
}
