use crate::domain::{HotelId, ResponseStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRowDto {
    pub position: usize,
    pub id: HotelId,
    pub name: String,
    pub country_code: String,
    pub phone_number: String,
    pub address: String,
    pub response_status: ResponseStatus,
    pub status_label: String,
    pub conversation: String,
    pub callable: bool,
    pub dial_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ResponseStatus,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    pub total: usize,
    pub callable: usize,
    pub by_status: Vec<StatusCount>,
}

impl RosterSummary {
    pub fn count(&self, status: ResponseStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusViewDto {
    pub hotels: Vec<HotelRowDto>,
    pub summary: RosterSummary,
}
