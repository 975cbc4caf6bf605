//! Draft of a new listing and the rules that shape it before publishing.

use crate::api::{ListingApi, NewListing};
use crate::error::{ClientError, Result};
use crate::models::{FieldRule, PropertyType, Purpose, RentFrequency};
use crate::session::SessionContext;
use std::path::PathBuf;
use tracing::info;

pub const MAX_PHOTOS: usize = 10;

#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub area: Option<f64>,
    pub location: String,
    pub room_count: Option<u32>,
    pub bath_count: Option<u32>,
    property_type: PropertyType,
    purpose: Purpose,
    rent_frequency: RentFrequency,
    images: Vec<PathBuf>,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: None,
            area: None,
            location: String::new(),
            room_count: None,
            bath_count: None,
            property_type: PropertyType::Apartment,
            purpose: Purpose::Rent,
            rent_frequency: RentFrequency::Monthly,
            images: Vec::new(),
        }
    }
}

/// Parse an amount typed with thousands separators, e.g. `1,250,000`
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").trim().parse().ok()
}

impl ListingDraft {
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn rent_frequency(&self) -> RentFrequency {
        self.rent_frequency
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    /// A studio always has one room and one bath
    pub fn set_type(&mut self, property_type: PropertyType) {
        self.property_type = property_type;
        if property_type == PropertyType::Studio {
            self.room_count = Some(1);
            self.bath_count = Some(1);
        }
    }

    /// Sales have no rent frequency; going back to rent restores monthly
    pub fn set_purpose(&mut self, purpose: Purpose) {
        self.purpose = purpose;
        match purpose {
            Purpose::Buy => self.rent_frequency = RentFrequency::None,
            Purpose::Rent if self.rent_frequency == RentFrequency::None => {
                self.rent_frequency = RentFrequency::Monthly
            }
            Purpose::Rent => {}
        }
    }

    /// Ignored for sales
    pub fn set_rent_frequency(&mut self, frequency: RentFrequency) {
        if self.purpose == Purpose::Rent {
            self.rent_frequency = frequency;
        }
    }

    /// Add photos. Adding past the limit is rejected as a whole.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = PathBuf>) -> Result<()> {
        let images: Vec<PathBuf> = images.into_iter().collect();
        if self.images.len() + images.len() > MAX_PHOTOS {
            return Err(ClientError::Validation(format!(
                "You can only upload a maximum of {} photos.",
                MAX_PHOTOS
            )));
        }
        self.images.extend(images);
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Check the draft and produce what gets sent
    pub fn finalize(&self) -> Result<NewListing> {
        if self.images.is_empty() {
            return Err(ClientError::Validation(
                "Please upload at least one photo of the property.".to_string(),
            ));
        }
        for (name, value) in [
            ("Title", &self.title),
            ("Location", &self.location),
            ("Description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::Validation(format!("{} is required", name)));
            }
        }
        let price = self
            .price
            .ok_or_else(|| ClientError::Validation("Price is required".to_string()))?;
        let area = self
            .area
            .ok_or_else(|| ClientError::Validation("Area is required".to_string()))?;

        let rules = self.property_type.category().fields();
        let room_count = count_for(rules.rooms, self.room_count, rules.rooms_label)?;
        let bath_count = count_for(rules.baths, self.bath_count, "Bathrooms")?;

        Ok(NewListing {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            area,
            location: self.location.trim().to_string(),
            property_type: self.property_type,
            purpose: self.purpose,
            room_count,
            bath_count,
            rent_frequency: (self.purpose == Purpose::Rent).then_some(self.rent_frequency),
            images: self.images.clone(),
        })
    }

    /// Validate and publish. Photos are checked before the session.
    pub async fn publish(&self, api: &dyn ListingApi, session: &SessionContext) -> Result<String> {
        let listing = self.finalize()?;
        let token = session.token().ok_or(ClientError::LoginRequired)?;

        let confirmation = api.create_property(token, &listing).await?;
        info!(
            "Published \"{}\" with {} photos",
            listing.title,
            listing.images.len()
        );
        Ok(confirmation)
    }
}

fn count_for(rule: FieldRule, value: Option<u32>, label: &str) -> Result<u32> {
    match rule {
        FieldRule::Hidden => Ok(0),
        FieldRule::Optional => Ok(value.unwrap_or(0)),
        FieldRule::Required => {
            value.ok_or_else(|| ClientError::Validation(format!("{} is required", label)))
        }
    }
}
