pub mod category;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use category::{FieldRule, FieldRules, PropertyCategory};

pub type PropertyId = i64;
pub type UserId = i64;

/// Kind of property as the backend classifies it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Apartment,
    Villa,
    House,
    Chalet,
    Studio,
    Shop,
    Office,
    Warehouse,
    Farm,
    Land,
}

impl PropertyType {
    pub const ALL: [PropertyType; 10] = [
        PropertyType::Apartment,
        PropertyType::Villa,
        PropertyType::House,
        PropertyType::Chalet,
        PropertyType::Studio,
        PropertyType::Shop,
        PropertyType::Office,
        PropertyType::Warehouse,
        PropertyType::Farm,
        PropertyType::Land,
    ];

    /// Wire name, e.g. `APARTMENT`
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "APARTMENT",
            PropertyType::Villa => "VILLA",
            PropertyType::House => "HOUSE",
            PropertyType::Chalet => "CHALET",
            PropertyType::Studio => "STUDIO",
            PropertyType::Shop => "SHOP",
            PropertyType::Office => "OFFICE",
            PropertyType::Warehouse => "WAREHOUSE",
            PropertyType::Farm => "FARM",
            PropertyType::Land => "LAND",
        }
    }

    pub fn category(&self) -> PropertyCategory {
        PropertyCategory::of(*self)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown property type: {}", s))
    }
}

/// Whether a listing is for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Purpose {
    Rent,
    Buy,
}

impl Purpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Rent => "RENT",
            Purpose::Buy => "BUY",
        }
    }
}

impl std::str::FromStr for Purpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RENT" => Ok(Purpose::Rent),
            "BUY" => Ok(Purpose::Buy),
            other => Err(format!("unknown purpose: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    None,
}

impl RentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentFrequency::Daily => "DAILY",
            RentFrequency::Weekly => "WEEKLY",
            RentFrequency::Monthly => "MONTHLY",
            RentFrequency::Yearly => "YEARLY",
            RentFrequency::None => "NONE",
        }
    }
}

impl std::str::FromStr for RentFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DAILY" => Ok(RentFrequency::Daily),
            "WEEKLY" => Ok(RentFrequency::Weekly),
            "MONTHLY" => Ok(RentFrequency::Monthly),
            "YEARLY" => Ok(RentFrequency::Yearly),
            "NONE" => Ok(RentFrequency::None),
            other => Err(format!("unknown rent frequency: {}", other)),
        }
    }
}

/// Listing snapshot as returned by the backend.
///
/// The client never mutates a snapshot except for `is_favorite`, which it
/// keeps in sync after a favorite toggle. The backend may send `null` for
/// any field; text and numbers fall back to empty/zero, while a listing
/// without a type or purpose cannot be shown and is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub property_id: PropertyId,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub owner_profile_picture_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub area: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub room_count: Option<u32>,
    #[serde(default)]
    pub bath_count: Option<u32>,
    /// Missing or null on the wire means "not favorited"
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub purpose: Purpose,
    #[serde(default)]
    pub rent_frequency: Option<RentFrequency>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub date_posted: Option<NaiveDateTime>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Property {
    /// Decode a listing array row by row. Rows that cannot be decoded are
    /// logged and dropped so the rest of the list still shows.
    pub fn from_rows(rows: Vec<serde_json::Value>) -> Vec<Property> {
        rows.into_iter()
            .filter_map(|row| match serde_json::from_value::<Property>(row) {
                Ok(property) => Some(property),
                Err(e) => {
                    warn!("Skipping unreadable listing: {}", e);
                    None
                }
            })
            .collect()
    }
}

/// User profile as exposed by `/users/me` and `/users/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

/// Body of `PUT /users/me`. Password fields are write-only on the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(user: &UserProfile) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            bio: user.bio.clone(),
            old_password: None,
            new_password: None,
        }
    }
}
