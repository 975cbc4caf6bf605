use super::PropertyType;

/// Broad category of a property, deciding which fields apply to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyCategory {
    Residential,
    Commercial,
    Land,
}

/// How a field participates in a listing of a given category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    Optional,
    /// Not shown; always sent as zero
    Hidden,
}

impl FieldRule {
    pub fn is_visible(&self) -> bool {
        !matches!(self, FieldRule::Hidden)
    }
}

/// Field-applicability row for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub rooms: FieldRule,
    pub baths: FieldRule,
    pub rooms_label: &'static str,
}

impl PropertyCategory {
    pub fn of(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Office | PropertyType::Shop | PropertyType::Warehouse => {
                PropertyCategory::Commercial
            }
            PropertyType::Land => PropertyCategory::Land,
            PropertyType::Apartment
            | PropertyType::Villa
            | PropertyType::House
            | PropertyType::Chalet
            | PropertyType::Studio
            | PropertyType::Farm => PropertyCategory::Residential,
        }
    }

    pub fn fields(&self) -> FieldRules {
        match self {
            PropertyCategory::Residential => FieldRules {
                rooms: FieldRule::Required,
                baths: FieldRule::Required,
                rooms_label: "Bedrooms",
            },
            PropertyCategory::Commercial => FieldRules {
                rooms: FieldRule::Optional,
                baths: FieldRule::Optional,
                rooms_label: "No. of Offices",
            },
            PropertyCategory::Land => FieldRules {
                rooms: FieldRule::Hidden,
                baths: FieldRule::Hidden,
                rooms_label: "",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_maps_to_its_category() {
        let commercial: Vec<_> = PropertyType::ALL
            .into_iter()
            .filter(|t| t.category() == PropertyCategory::Commercial)
            .collect();
        assert_eq!(
            commercial,
            vec![PropertyType::Shop, PropertyType::Office, PropertyType::Warehouse]
        );
        assert_eq!(PropertyType::Land.category(), PropertyCategory::Land);
        assert_eq!(PropertyType::Farm.category(), PropertyCategory::Residential);
    }

    #[test]
    fn land_hides_room_and_bath_counts() {
        let rules = PropertyCategory::Land.fields();
        assert!(!rules.rooms.is_visible());
        assert!(!rules.baths.is_visible());
    }

    #[test]
    fn commercial_counts_are_optional() {
        let rules = PropertyCategory::Commercial.fields();
        assert_eq!(rules.rooms, FieldRule::Optional);
        assert_eq!(rules.rooms_label, "No. of Offices");
    }
}
