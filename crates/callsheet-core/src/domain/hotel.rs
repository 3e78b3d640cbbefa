use crate::domain::ids::HotelId;
use crate::domain::status::ResponseStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelContact {
    pub id: HotelId,
    pub name: String,
    pub country_code: String,
    pub phone_number: String,
    pub address: String,
    pub response_status: ResponseStatus,
    pub conversation: String,
}

impl HotelContact {
    pub fn is_callable(&self) -> bool {
        !self.phone_number.is_empty()
    }
}

/// Fields for a record that does not exist yet; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewHotelContact {
    pub name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub response_status: ResponseStatus,
    #[serde(default)]
    pub conversation: String,
}

/// Partial update. `None` leaves the field untouched; there is no way to
/// address `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotelContactUpdate {
    pub name: Option<String>,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub response_status: Option<ResponseStatus>,
    pub conversation: Option<String>,
}

impl HotelContactUpdate {
    pub fn status(status: ResponseStatus) -> Self {
        Self {
            response_status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.country_code.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.response_status.is_none()
            && self.conversation.is_none()
    }

    pub(crate) fn apply_to(self, contact: &mut HotelContact) {
        if let Some(name) = self.name {
            contact.name = name;
        }
        if let Some(country_code) = self.country_code {
            contact.country_code = country_code;
        }
        if let Some(phone_number) = self.phone_number {
            contact.phone_number = phone_number;
        }
        if let Some(address) = self.address {
            contact.address = address;
        }
        if let Some(status) = self.response_status {
            contact.response_status = status;
        }
        if let Some(conversation) = self.conversation {
            contact.conversation = conversation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HotelContact, HotelContactUpdate, NewHotelContact};
    use crate::domain::{HotelId, ResponseStatus};

    fn contact() -> HotelContact {
        HotelContact {
            id: HotelId(1),
            name: "Fine".to_string(),
            country_code: "+234".to_string(),
            phone_number: "703040040".to_string(),
            address: "Ikeja".to_string(),
            response_status: ResponseStatus::CallBack,
            conversation: "kdkdkd".to_string(),
        }
    }

    #[test]
    fn empty_update_is_noop() {
        let mut target = contact();
        let update = HotelContactUpdate::default();
        assert!(update.is_empty());
        update.apply_to(&mut target);
        assert_eq!(target, contact());
    }

    #[test]
    fn update_touches_only_present_fields() {
        let mut target = contact();
        HotelContactUpdate {
            conversation: Some("spoke to manager".to_string()),
            ..Default::default()
        }
        .apply_to(&mut target);
        assert_eq!(target.conversation, "spoke to manager");
        assert_eq!(target.name, "Fine");
        assert_eq!(target.response_status, ResponseStatus::CallBack);
    }

    #[test]
    fn new_contact_defaults_status_to_no_answer() {
        assert_eq!(
            NewHotelContact::default().response_status,
            ResponseStatus::NoAnswer
        );
    }

    #[test]
    fn callable_requires_phone_number() {
        let mut target = contact();
        assert!(target.is_callable());
        target.phone_number.clear();
        assert!(!target.is_callable());
    }
}
