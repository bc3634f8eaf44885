use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// ISO 3166 alpha-3 code to the demonym shown in the onboarding form.
    static ref NATIONALITIES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("IDN", "Indonesian");
        m.insert("MYS", "Malaysian");
        m.insert("SGP", "Singaporean");
        m.insert("PHL", "Filipino");
        m.insert("GBR", "British");
        m.insert("IND", "Indian");
        m.insert("USA", "American");
        m.insert("AUS", "Australian");
        m.insert("CHN", "Chinese");
        m.insert("JPN", "Japanese");
        m.insert("KOR", "South Korean");
        m.insert("THA", "Thai");
        m.insert("VNM", "Vietnamese");
        m.insert("BGD", "Bangladeshi");
        m.insert("NPL", "Nepali");
        m.insert("PAK", "Pakistani");
        m.insert("LKA", "Sri Lankan");
        m.insert("MMR", "Myanmar");
        m.insert("KHM", "Cambodian");
        m.insert("TWN", "Taiwanese");
        m.insert("HKG", "Hong Konger");
        m
    };
}

/// Map a country code to a nationality. Unknown codes come back verbatim.
pub fn country_code_to_nationality(code: &str) -> String {
    NATIONALITIES
        .get(code)
        .map(|name| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(country_code_to_nationality("MYS"), "Malaysian");
        assert_eq!(country_code_to_nationality("GBR"), "British");
        assert_eq!(country_code_to_nationality("USA"), "American");
    }

    #[test]
    fn test_unknown_code_passes_through() {
        assert_eq!(country_code_to_nationality("XYZ"), "XYZ");
        assert_eq!(country_code_to_nationality(""), "");
    }
}
