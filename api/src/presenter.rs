// ./api/src/presenter.rs
use application::PaginationOutput;
use serde::Serialize;

/// Single-resource envelope: `{ "data": ... }`.
#[derive(Serialize, Debug)]
pub struct DataPresenter<T> {
    pub data: T,
}

impl<T> DataPresenter<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaginationMeta {
    pub total: usize,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
}

/// List envelope: `{ "data": [...], "meta": {...} }`.
#[derive(Serialize, Debug)]
pub struct CollectionPresenter<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> From<PaginationOutput<T>> for CollectionPresenter<T> {
    fn from(output: PaginationOutput<T>) -> Self {
        Self {
            data: output.items,
            meta: PaginationMeta {
                total: output.total,
                current_page: output.current_page,
                last_page: output.last_page,
                per_page: output.per_page,
            },
        }
    }
}
