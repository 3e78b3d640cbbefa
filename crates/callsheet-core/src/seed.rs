use crate::domain::{NewHotelContact, ResponseStatus};

/// Roster the dashboard opens with when no seed file is configured.
pub fn sample_roster() -> Vec<NewHotelContact> {
    vec![NewHotelContact {
        name: "Fine".to_string(),
        country_code: Some("+234".to_string()),
        phone_number: "703040040".to_string(),
        address: "Ikeja".to_string(),
        response_status: ResponseStatus::CallBack,
        conversation: "kdkdkd".to_string(),
    }]
}
