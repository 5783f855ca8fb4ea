use crate::domain::model::{FormFields, StationUpdate, UpdateOutcome, UpdateResponse};
use crate::utils::error::{Result, SiteError};

impl StationUpdate {
    /// Collect the edit form. Every input must exist; empty values are sent as-is.
    pub fn from_form(fields: &FormFields) -> Result<Self> {
        let take = |id: &str| {
            fields
                .get(id)
                .cloned()
                .ok_or_else(|| SiteError::MissingField {
                    field: id.to_string(),
                })
        };

        Ok(Self {
            station_name: take("stationName")?,
            operator_name: take("operatorName")?,
            charging_type: take("chargingType")?,
            location: take("location")?,
            total_slots: take("totalSlots")?,
            available_slots: take("availableSlots")?,
            charging_rate: take("chargingRate")?,
        })
    }
}

impl UpdateResponse {
    /// A non-empty `message` wins when a reply carries both fields. An empty
    /// `message` counts as absent.
    pub fn into_outcome(self, endpoint: &str) -> Result<UpdateOutcome> {
        let message = self.message.filter(|m| !m.is_empty());
        match (message, self.error) {
            (Some(message), _) => Ok(UpdateOutcome::Saved(message)),
            (None, Some(error)) => Ok(UpdateOutcome::Rejected(error)),
            (None, None) => Err(SiteError::MalformedResponse {
                endpoint: endpoint.to_string(),
                message: "reply has neither 'message' nor 'error'".to_string(),
            }),
        }
    }
}
