//! `OpenAPI` tags and shared literals.

pub const SYSTEM_TAG: &str = "System";
pub const WARDS_TAG: &str = "Wards";
pub const ASSESSMENT_TAG: &str = "Assessment";
pub const HISTORY_TAG: &str = "History";

pub const SUB_COUNTY: &str = "Gatundu North";
pub const COUNTY: &str = "Kiambu County";
pub const CROP: &str = "Sweet potato";
