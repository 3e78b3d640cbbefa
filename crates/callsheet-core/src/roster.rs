use crate::dial::DialError;
use crate::domain::{
    HotelContact, HotelContactUpdate, HotelId, NewHotelContact, ResponseStatus,
    DEFAULT_COUNTRY_CODE,
};
use crate::dto::{HotelRowDto, RosterSummary, StatusCount};
use crate::selection::Selection;
use tracing::debug;

/// Authoritative, ordered, in-memory collection of hotel contacts.
///
/// Insertion order is display order. Mutations addressed at an unknown id
/// are silent no-ops: the caller gets `None`/`false` back and nothing
/// changes.
#[derive(Debug, Clone)]
pub struct RosterStore {
    hotels: Vec<HotelContact>,
    high_water: u32,
    default_country_code: String,
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterStore {
    pub fn new() -> Self {
        Self::with_default_country_code(DEFAULT_COUNTRY_CODE)
    }

    pub fn with_default_country_code(code: impl Into<String>) -> Self {
        Self {
            hotels: Vec::new(),
            high_water: 0,
            default_country_code: code.into(),
        }
    }

    pub fn from_seed<I>(default_country_code: impl Into<String>, seed: I) -> Self
    where
        I: IntoIterator<Item = NewHotelContact>,
    {
        let mut store = Self::with_default_country_code(default_country_code);
        for fields in seed {
            store.add(fields);
        }
        store
    }

    pub fn default_country_code(&self) -> &str {
        &self.default_country_code
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HotelContact> {
        self.hotels.iter()
    }

    pub fn as_slice(&self) -> &[HotelContact] {
        &self.hotels
    }

    pub fn get(&self, id: HotelId) -> Option<&HotelContact> {
        self.hotels.iter().find(|hotel| hotel.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&HotelContact> {
        self.hotels.get(index)
    }

    pub fn index_of(&self, id: HotelId) -> Option<usize> {
        self.hotels.iter().position(|hotel| hotel.id == id)
    }

    pub fn ids(&self) -> Vec<HotelId> {
        self.hotels.iter().map(|hotel| hotel.id).collect()
    }

    /// Appends a record and returns it with its assigned id.
    ///
    /// Fields are stored as given; empty strings are kept and only make the
    /// record uncallable. A missing or blank country code takes the store
    /// default.
    pub fn add(&mut self, fields: NewHotelContact) -> &HotelContact {
        let id = self.assign_id();
        let country_code = fields
            .country_code
            .filter(|code| !code.trim().is_empty())
            .unwrap_or_else(|| self.default_country_code.clone());
        self.hotels.push(HotelContact {
            id,
            name: fields.name,
            country_code,
            phone_number: fields.phone_number,
            address: fields.address,
            response_status: fields.response_status,
            conversation: fields.conversation,
        });
        debug!(id = %id, "hotel added");
        &self.hotels[self.hotels.len() - 1]
    }

    pub fn update(&mut self, id: HotelId, update: HotelContactUpdate) -> Option<&HotelContact> {
        let Some(hotel) = self.hotels.iter_mut().find(|hotel| hotel.id == id) else {
            debug!(id = %id, "update ignored, hotel not found");
            return None;
        };
        update.apply_to(hotel);
        debug!(id = %id, "hotel updated");
        Some(&*hotel)
    }

    pub fn delete(&mut self, id: HotelId) -> Option<HotelContact> {
        let index = self.index_of(id)?;
        let removed = self.hotels.remove(index);
        debug!(id = %id, "hotel deleted");
        Some(removed)
    }

    /// Deletes `id` and drops it from `selection`, which must never refer to
    /// a record that is gone.
    pub fn delete_and_prune(
        &mut self,
        id: HotelId,
        selection: &mut Selection,
    ) -> Option<HotelContact> {
        selection.remove(id);
        self.delete(id)
    }

    pub fn set_response_status(&mut self, id: HotelId, status: ResponseStatus) -> bool {
        self.update(id, HotelContactUpdate::status(status)).is_some()
    }

    /// First index strictly after `after` (or from the start) whose record
    /// has a phone number.
    pub fn next_callable(&self, after: Option<usize>) -> Option<usize> {
        let start = match after {
            Some(index) => index.checked_add(1)?,
            None => 0,
        };
        self.hotels
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, hotel)| hotel.is_callable())
            .map(|(index, _)| index)
    }

    /// Dial strings for the selected, callable records in roster order.
    pub fn call_targets(&self, selection: &Selection) -> Vec<String> {
        self.hotels
            .iter()
            .filter(|hotel| selection.contains(hotel.id))
            .filter_map(|hotel| self.dial_target(hotel).ok())
            .collect()
    }

    /// Same records as [`RosterStore::call_targets`], by id.
    pub fn call_target_ids(&self, selection: &Selection) -> Vec<HotelId> {
        self.hotels
            .iter()
            .filter(|hotel| selection.contains(hotel.id) && self.dial_target(hotel).is_ok())
            .map(|hotel| hotel.id)
            .collect()
    }

    /// Dial string for a record that can actually be dialed. A phone number
    /// of only whitespace would leave nothing but the country code.
    pub fn dial_target(&self, hotel: &HotelContact) -> Result<String, DialError> {
        if hotel.phone_number.trim().is_empty() {
            return Err(DialError::NotCallable(hotel.name.clone()));
        }
        Ok(self.dial_string(hotel))
    }

    pub fn dial_string(&self, hotel: &HotelContact) -> String {
        let code = if hotel.country_code.trim().is_empty() {
            self.default_country_code.as_str()
        } else {
            hotel.country_code.trim()
        };
        format!("{}{}", code, hotel.phone_number.trim())
    }

    pub fn rows(&self) -> Vec<HotelRowDto> {
        self.hotels
            .iter()
            .enumerate()
            .map(|(position, hotel)| HotelRowDto {
                position,
                id: hotel.id,
                name: hotel.name.clone(),
                country_code: hotel.country_code.clone(),
                phone_number: hotel.phone_number.clone(),
                address: hotel.address.clone(),
                response_status: hotel.response_status,
                status_label: hotel.response_status.label().to_string(),
                conversation: hotel.conversation.clone(),
                callable: hotel.is_callable(),
                dial_string: hotel.is_callable().then(|| self.dial_string(hotel)),
            })
            .collect()
    }

    pub fn summary(&self) -> RosterSummary {
        let by_status = ResponseStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                label: status.label().to_string(),
                count: self
                    .hotels
                    .iter()
                    .filter(|hotel| hotel.response_status == *status)
                    .count(),
            })
            .collect();
        RosterSummary {
            total: self.hotels.len(),
            callable: self.hotels.iter().filter(|hotel| hotel.is_callable()).count(),
            by_status,
        }
    }

    fn assign_id(&mut self) -> HotelId {
        let max_existing = self.hotels.iter().map(|hotel| hotel.id.0).max().unwrap_or(0);
        let next = max_existing.max(self.high_water).saturating_add(1);
        self.high_water = next;
        HotelId(next)
    }
}

impl<'a> IntoIterator for &'a RosterStore {
    type Item = &'a HotelContact;
    type IntoIter = std::slice::Iter<'a, HotelContact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
