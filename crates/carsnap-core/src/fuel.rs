//! Fuel-type display names.

/// Translate a Korean fuel-type label into its Russian display name.
///
/// Unknown labels are returned unchanged, so the function is total and
/// idempotent on its own output.
pub fn translate_fuel(label: &str) -> &str {
    match label {
        "가솔린" | "휘발유" => "Бензин",
        "전기" => "Электрический",
        "가솔린+전기" | "휘발유+전기" => "Гибрид",
        "디젤" => "Дизель",
        "LPG" => "Газ",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels() {
        assert_eq!(translate_fuel("가솔린"), "Бензин");
        assert_eq!(translate_fuel("휘발유"), "Бензин");
        assert_eq!(translate_fuel("전기"), "Электрический");
        assert_eq!(translate_fuel("가솔린+전기"), "Гибрид");
        assert_eq!(translate_fuel("휘발유+전기"), "Гибрид");
        assert_eq!(translate_fuel("디젤"), "Дизель");
        assert_eq!(translate_fuel("LPG"), "Газ");
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(translate_fuel("수소"), "수소");
        assert_eq!(translate_fuel(""), "");
        assert_eq!(translate_fuel("lpg"), "lpg");
    }

    #[test]
    fn idempotent() {
        for label in ["가솔린", "전기", "디젤+전기", "LPG", "Бензин"] {
            let once = translate_fuel(label);
            assert_eq!(translate_fuel(once), once);
        }
    }
}
