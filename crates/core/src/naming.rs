//! Download filename convention for generated promos.

use crate::choices::{Choice, TestType};

/// Filename offered when downloading a promo video.
///
/// Convention: `city_path_promo_{test type label, lowercased}.mp4`. The label
/// is lowercased as-is, so spaces and dashes are kept.
///
/// # Examples
///
/// ```
/// use promo_core::choices::TestType;
/// use promo_core::naming::promo_filename;
///
/// assert_eq!(promo_filename(TestType::Thyroid), "city_path_promo_thyroid.mp4");
/// assert_eq!(promo_filename(TestType::Covid19), "city_path_promo_covid-19.mp4");
/// ```
pub fn promo_filename(test_type: TestType) -> String {
    format!("city_path_promo_{}.mp4", test_type.label().to_lowercase())
}
