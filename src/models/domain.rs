use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Highest age a program may declare
pub const MAX_PROGRAM_AGE: u8 = 25;

/// Program category tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramCategory {
    Sports,
    Arts,
    Education,
    Stem,
    Music,
    Dance,
    Theater,
    Volunteer,
    Leadership,
    Outdoor,
    Academic,
    Career,
    Health,
    Community,
}

/// Geographic coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    #[inline]
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

/// Where a program takes place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramLocation {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

/// Inclusive age range accepted by a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    #[inline]
    pub fn contains(&self, age: u8) -> bool {
        self.min <= age && age <= self.max
    }

    /// Width of the range in years
    #[inline]
    pub fn span(&self) -> u8 {
        self.max.saturating_sub(self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    OneTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub days: Vec<String>,
    /// Free-form time window, e.g. "4:00 PM - 6:00 PM"
    pub time: String,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cost {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub free: bool,
    #[serde(default)]
    pub scholarship: Option<bool>,
}

impl Cost {
    pub fn offers_scholarship(&self) -> bool {
        self.scholarship.unwrap_or(false)
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    pub current: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Contact {
    /// True when a phone number or email address is present and non-empty
    pub fn has_phone_or_email(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.phone) || present(&self.email)
    }
}

/// Where a program record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramSource {
    #[serde(rename = "seattle.gov")]
    SeattleGov,
    #[serde(rename = "partner")]
    Partner,
    #[serde(rename = "social")]
    Social,
    #[serde(rename = "manual")]
    Manual,
}

/// Youth activity program offered by an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub description: String,
    pub organization: String,
    pub location: ProgramLocation,
    pub age_range: AgeRange,
    pub categories: Vec<ProgramCategory>,
    pub schedule: Schedule,
    pub cost: Cost,
    pub capacity: Capacity,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub images: Vec<String>,
    /// 1-5 scale
    pub safety_rating: u8,
    pub verified: bool,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    pub source: ProgramSource,
}

impl Program {
    /// Return the first data-quality rule this record breaks, if any.
    ///
    /// Ranking and safety validation assume these hold; records are checked
    /// once at the ingestion boundary (catalog load, HTTP request).
    pub fn quality_issue(&self) -> Option<&'static str> {
        if self.id.trim().is_empty() {
            return Some("program id is empty");
        }
        if self.title.trim().is_empty() {
            return Some("title is empty");
        }
        if self.description.trim().is_empty() {
            return Some("description is empty");
        }
        if self.organization.trim().is_empty() {
            return Some("organization is empty");
        }
        if self.location.name.trim().is_empty() {
            return Some("location name is empty");
        }
        if self.categories.is_empty() {
            return Some("program has no categories");
        }
        if self.age_range.min > self.age_range.max {
            return Some("age range min exceeds max");
        }
        if self.age_range.max > MAX_PROGRAM_AGE {
            return Some("age range exceeds 25");
        }
        if self.capacity.current > self.capacity.max {
            return Some("capacity current exceeds max");
        }
        if !(1..=5).contains(&self.safety_rating) {
            return Some("safety rating outside 1-5");
        }
        if !self.cost.amount.is_finite() || self.cost.amount < 0.0 {
            return Some("cost amount is negative or not finite");
        }
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocation {
    pub neighborhood: String,
    pub zip_code: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Miles
    pub max_distance: f64,
    #[serde(default)]
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub days_available: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySettings {
    #[serde(default)]
    pub require_parent_approval: bool,
    #[serde(default)]
    pub allow_unsupervised: bool,
    /// Widest program age span the user accepts; 0 disables the check
    #[serde(default)]
    pub max_age_difference: u8,
}

/// The person programs are being recommended to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub interests: Vec<ProgramCategory>,
    pub location: UserLocation,
    /// Required for users under 18; enforced by profile intake
    #[serde(default)]
    pub parent_email: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    pub preferences: UserPreferences,
    #[serde(default)]
    pub safety_settings: SafetySettings,
}

impl UserProfile {
    pub fn is_minor(&self) -> bool {
        self.age < 18
    }
}
