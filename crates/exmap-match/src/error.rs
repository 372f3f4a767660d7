#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Store(#[from] exmap_store::StoreError),

    #[error("cannot map an empty exercise name")]
    EmptyName,
}

pub type Result<T> = std::result::Result<T, MatchError>;
