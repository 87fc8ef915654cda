#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeskError {
    #[error("quantity must be a positive amount, got {0}")]
    InvalidQuantity(f64),

    #[error("price must be a positive amount, got {0}")]
    InvalidPrice(f64),

    #[error("projection horizon must be positive, got {0} years")]
    InvalidHorizon(f64),

    #[error("no lot with id {0}")]
    LotNotFound(u64),

    #[error("no alert with id {0}")]
    AlertNotFound(u64),
}

pub type Result<T> = std::result::Result<T, DeskError>;

pub(crate) fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
