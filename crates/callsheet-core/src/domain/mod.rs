pub mod hotel;
pub mod ids;
pub mod phone;
pub mod status;

pub use hotel::{HotelContact, HotelContactUpdate, NewHotelContact};
pub use ids::HotelId;
pub use phone::{
    cycle_country_code, normalize_country_code, normalize_phone_for_dial,
    region_for_country_code, COUNTRY_CODES, DEFAULT_COUNTRY_CODE,
};
pub use status::ResponseStatus;
