use crate::api::models::{Author, Report};

#[allow(clippy::too_many_arguments)]
fn report(
    id: i64,
    title: &str,
    description: &str,
    location: &str,
    category: &str,
    created_at: &str,
    image: &str,
    reporter: &str,
) -> Report {
    Report {
        id,
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        latitude: None,
        longitude: None,
        image_url: Some(image.to_string()),
        ai_category: Some(category.to_string()),
        ai_advice: None,
        user: Some(Author {
            username: reporter.to_string(),
        }),
        user_id: None,
        created_at: created_at.to_string(),
        is_public: true,
    }
}

/// The fixed demo data set used when the dashboard runs without a backend
/// report listing.
pub fn sample_reports() -> Vec<Report> {
    vec![
        report(
            1,
            "Illegal Dumping Near River",
            "Large amounts of plastic waste dumped near the riverbank affecting water quality and wildlife.",
            "Nairobi, Kenya",
            "Waste Management",
            "2025-10-10T00:00:00Z",
            "/assets/river.png",
            "Sarah Mwangi",
        ),
        report(
            2,
            "Air Pollution from Factory",
            "Visible smoke emissions from nearby factory affecting air quality in residential area.",
            "Kisumu, Kenya",
            "Air Pollution",
            "2025-10-14T00:00:00Z",
            "/assets/air.png",
            "John Ouma",
        ),
        report(
            3,
            "Flooding in Residential Area",
            "Poor drainage causing severe flooding during rainy season affecting multiple homes.",
            "Mombasa, Kenya",
            "Flooding",
            "2025-10-13T00:00:00Z",
            "/assets/flooding.png",
            "Grace Kimani",
        ),
        report(
            4,
            "Illegal Poaching of Animals",
            "Poaching harms wildlife, disrupts ecosystems, and endangers species survival.",
            "Nairobi, Kenya",
            "Poaching",
            "2025-10-10T00:00:00Z",
            "/assets/animal.png",
            "Mary Akinyi",
        ),
    ]
}
