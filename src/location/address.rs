use super::geocoder::{AddressComponent, GeocodeCandidate};

fn component<'a>(components: &'a [AddressComponent], kind: &str) -> Option<&'a AddressComponent> {
    components
        .iter()
        .find(|c| c.types.iter().any(|t| t == kind))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Display text for a candidate: `street, city, ST zip` when the components
/// carry a locality, otherwise the provider's formatted address. Whitespace
/// is collapsed either way.
pub fn normalize_address(candidate: &GeocodeCandidate) -> String {
    let components = &candidate.address_components;
    let Some(city) = component(components, "locality") else {
        return collapse_whitespace(&candidate.formatted_address);
    };

    let street = [
        component(components, "street_number"),
        component(components, "route"),
    ]
    .into_iter()
    .flatten()
    .map(|c| c.long_name.as_str())
    .collect::<Vec<_>>()
    .join(" ");

    let region = [
        component(components, "administrative_area_level_1").map(|c| c.short_name.as_str()),
        component(components, "postal_code").map(|c| c.long_name.as_str()),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    let parts: Vec<&str> = [street.as_str(), city.long_name.as_str(), region.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    collapse_whitespace(&parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::geocoder::Geometry;
    use crate::model::Coordinate;

    fn comp(long: &str, short: &str, kind: &str) -> AddressComponent {
        AddressComponent {
            long_name: long.to_string(),
            short_name: short.to_string(),
            types: vec![kind.to_string()],
        }
    }

    fn candidate(components: Vec<AddressComponent>, formatted: &str) -> GeocodeCandidate {
        GeocodeCandidate {
            address_components: components,
            formatted_address: formatted.to_string(),
            geometry: Geometry {
                location: Coordinate::new(41.88, -87.63),
            },
            place_id: "p1".to_string(),
        }
    }

    #[test]
    fn test_components_formatting() {
        let c = candidate(
            vec![
                comp("233", "233", "street_number"),
                comp("South Wacker Drive", "S Wacker Dr", "route"),
                comp("Chicago", "Chicago", "locality"),
                comp("Illinois", "IL", "administrative_area_level_1"),
                comp("60606", "60606", "postal_code"),
                comp("United States", "US", "country"),
            ],
            "233 S Wacker Dr, Chicago, IL 60606, USA",
        );
        assert_eq!(normalize_address(&c), "233 South Wacker Drive, Chicago, IL 60606");
    }

    #[test]
    fn test_city_only() {
        let c = candidate(
            vec![
                comp("Denver", "Denver", "locality"),
                comp("Colorado", "CO", "administrative_area_level_1"),
            ],
            "Denver, CO, USA",
        );
        assert_eq!(normalize_address(&c), "Denver, CO");
    }

    #[test]
    fn test_falls_back_to_formatted_address() {
        let c = candidate(vec![], "  Interstate 80,   Nebraska ");
        assert_eq!(normalize_address(&c), "Interstate 80, Nebraska");
    }
}
