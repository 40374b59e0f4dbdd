use serde::Deserialize;

use crate::api::models::{Report, ReportUpdate};

/// Fields of the edit-report modal, as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EditReportForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: String,
    pub longitude: String,
    /// Checkbox: present only when ticked.
    pub is_public: Option<String>,
}

fn coordinate(raw: &str, name: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("{} must be a number", name))
}

impl EditReportForm {
    /// Pre-fill from the report being edited.
    pub fn from_report(report: &Report) -> Self {
        Self {
            title: report.title.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            latitude: report.latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude: report.longitude.map(|v| v.to_string()).unwrap_or_default(),
            is_public: report.is_public.then(|| "on".to_string()),
        }
    }

    pub fn public_checked(&self) -> bool {
        self.is_public.is_some()
    }

    pub fn to_update(&self) -> Result<ReportUpdate, String> {
        let title = self.title.trim();
        let description = self.description.trim();
        let location = self.location.trim();
        if title.is_empty() || description.is_empty() || location.is_empty() {
            return Err("Title, description and location are required.".to_string());
        }

        Ok(ReportUpdate {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            location: Some(location.to_string()),
            latitude: coordinate(&self.latitude, "Latitude")?,
            longitude: coordinate(&self.longitude, "Longitude")?,
            is_public: Some(self.public_checked()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::sample_reports;

    #[test]
    fn prefill_round_trips_into_an_update() {
        let mut report = sample_reports().remove(2);
        report.latitude = Some(-4.05);
        let form = EditReportForm::from_report(&report);
        assert_eq!(form.latitude, "-4.05");
        assert!(form.public_checked());

        let update = form.to_update().unwrap();
        assert_eq!(update.title.as_deref(), Some("Flooding in Residential Area"));
        assert_eq!(update.latitude, Some(-4.05));
        assert_eq!(update.longitude, None);
        assert_eq!(update.is_public, Some(true));
    }

    #[test]
    fn unticked_checkbox_makes_report_private() {
        let form = EditReportForm {
            title: "t".into(),
            description: "d".into(),
            location: "l".into(),
            ..Default::default()
        };
        assert_eq!(form.to_update().unwrap().is_public, Some(false));
    }

    #[test]
    fn required_fields_are_enforced() {
        let form = EditReportForm {
            title: "t".into(),
            description: "   ".into(),
            location: "l".into(),
            ..Default::default()
        };
        assert!(form.to_update().is_err());
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        let form = EditReportForm {
            title: "t".into(),
            description: "d".into(),
            location: "l".into(),
            longitude: "east".into(),
            ..Default::default()
        };
        assert_eq!(form.to_update().unwrap_err(), "Longitude must be a number");
    }
}
