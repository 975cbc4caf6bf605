use crate::models::{PropertyType, Purpose, RentFrequency};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search filters for `/properties/search`. Unset filters are not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchParams {
    /// City or area to search in
    pub location: Option<String>,
    pub purpose: Option<Purpose>,
    pub property_type: Option<PropertyType>,
    pub rent_frequency: Option<RentFrequency>,
    /// Minimum price (JOD)
    pub min_price: Option<f64>,
    /// Maximum price (JOD)
    pub max_price: Option<f64>,
    /// Minimum size in square meters
    pub min_area: Option<u32>,
    /// Maximum size in square meters
    pub max_area: Option<u32>,
    /// Minimum number of bedrooms
    pub beds: Option<u32>,
    pub baths: Option<u32>,
}

impl SearchParams {
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            query.push(("location", location.to_string()));
        }
        if let Some(purpose) = self.purpose {
            query.push(("purpose", purpose.as_str().to_string()));
        }
        if let Some(property_type) = self.property_type {
            query.push(("type", property_type.as_str().to_string()));
        }
        if let Some(frequency) = self.rent_frequency {
            query.push(("rentFrequency", frequency.as_str().to_string()));
        }
        if let Some(min) = self.min_price {
            query.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("maxPrice", max.to_string()));
        }
        if let Some(min) = self.min_area {
            query.push(("minArea", min.to_string()));
        }
        if let Some(max) = self.max_area {
            query.push(("maxArea", max.to_string()));
        }
        if let Some(beds) = self.beds {
            query.push(("beds", beds.to_string()));
        }
        if let Some(baths) = self.baths {
            query.push(("baths", baths.to_string()));
        }
        query
    }
}

/// A validated listing ready to be sent as multipart form data
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub area: f64,
    pub location: String,
    pub property_type: PropertyType,
    pub purpose: Purpose,
    pub room_count: u32,
    pub bath_count: u32,
    /// Only sent for rentals
    pub rent_frequency: Option<RentFrequency>,
    pub images: Vec<PathBuf>,
}

impl NewListing {
    /// Text fields of the multipart body, in the order the backend expects
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("price", self.price.to_string()),
            ("area", self.area.to_string()),
            ("location", self.location.clone()),
            ("type", self.property_type.as_str().to_string()),
            ("purpose", self.purpose.as_str().to_string()),
            ("roomCount", self.room_count.to_string()),
            ("bathCount", self.bath_count.to_string()),
        ];
        if let Some(frequency) = self.rent_frequency {
            fields.push(("rentFrequency", frequency.as_str().to_string()));
        }
        fields
    }
}
