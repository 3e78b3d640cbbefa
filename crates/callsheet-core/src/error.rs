use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("hotel name is required")]
    EmptyName,
    #[error("phone number is required")]
    EmptyPhoneNumber,
    #[error("address is required")]
    EmptyAddress,
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
    #[error("invalid response status: {0} (expected no-answer|answered|call-back|switched-off)")]
    InvalidResponseStatus(String),
    #[error("invalid hotel id: {0}")]
    InvalidHotelId(String),
}
