use anyhow::Result;
use callsheet_core::domain::{HotelId, ResponseStatus};
use callsheet_core::dto::HotelRowDto;
use std::str::FromStr;

use crate::error::invalid_input;

pub fn parse_hotel_id(raw: &str) -> Result<HotelId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("hotel id cannot be empty"));
    }
    Ok(HotelId::from_str(trimmed)?)
}

pub fn parse_status(raw: &str) -> Result<ResponseStatus> {
    Ok(ResponseStatus::from_str(raw)?)
}

pub fn format_phone(row: &HotelRowDto) -> String {
    if row.phone_number.is_empty() {
        "-".to_string()
    } else {
        format!("{} {}", row.country_code, row.phone_number)
    }
}

pub fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{or_dash, parse_hotel_id, parse_status};
    use callsheet_core::domain::{HotelId, ResponseStatus};

    #[test]
    fn parse_hotel_id_accepts_digits() {
        assert_eq!(parse_hotel_id(" 12 ").unwrap(), HotelId(12));
        assert!(parse_hotel_id("").is_err());
        assert!(parse_hotel_id("twelve").is_err());
    }

    #[test]
    fn parse_status_accepts_wire_names() {
        assert_eq!(parse_status("answered").unwrap(), ResponseStatus::Answered);
        assert!(parse_status("busy").is_err());
    }

    #[test]
    fn or_dash_hides_blank_values() {
        assert_eq!(or_dash("  "), "-");
        assert_eq!(or_dash("Ikeja"), "Ikeja");
    }
}
