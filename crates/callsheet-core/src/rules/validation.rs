use crate::domain::{normalize_country_code, HotelContactUpdate, NewHotelContact};
use crate::error::CoreError;

/// Checks the add form before it reaches the store. The store itself
/// accepts anything.
pub fn validate_new_contact(fields: &NewHotelContact) -> Result<(), CoreError> {
    require(&fields.name, CoreError::EmptyName)?;
    require(&fields.phone_number, CoreError::EmptyPhoneNumber)?;
    require(&fields.address, CoreError::EmptyAddress)?;
    if let Some(code) = &fields.country_code {
        if !code.trim().is_empty() {
            normalize_country_code(code)?;
        }
    }
    Ok(())
}

/// Same checks as [`validate_new_contact`] for the fields an edit touches.
pub fn validate_update(update: &HotelContactUpdate) -> Result<(), CoreError> {
    if let Some(name) = &update.name {
        require(name, CoreError::EmptyName)?;
    }
    if let Some(phone) = &update.phone_number {
        require(phone, CoreError::EmptyPhoneNumber)?;
    }
    if let Some(address) = &update.address {
        require(address, CoreError::EmptyAddress)?;
    }
    if let Some(code) = &update.country_code {
        normalize_country_code(code)?;
    }
    Ok(())
}

fn require(value: &str, err: CoreError) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(())
    }
}
