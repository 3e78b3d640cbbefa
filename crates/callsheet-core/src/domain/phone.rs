use crate::error::CoreError;

pub const DEFAULT_COUNTRY_CODE: &str = "+234";

/// Dialing prefixes offered by the add/edit form, with their region codes.
pub const COUNTRY_CODES: [(&str, &str); 16] = [
    ("+234", "NG"),
    ("+1", "US"),
    ("+44", "GB"),
    ("+33", "FR"),
    ("+49", "DE"),
    ("+81", "JP"),
    ("+86", "CN"),
    ("+91", "IN"),
    ("+7", "RU"),
    ("+55", "BR"),
    ("+61", "AU"),
    ("+27", "ZA"),
    ("+20", "EG"),
    ("+254", "KE"),
    ("+256", "UG"),
    ("+233", "GH"),
];

pub fn normalize_country_code(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::InvalidCountryCode(trimmed.to_string()));
    }
    Ok(format!("+{}", digits))
}

pub fn region_for_country_code(code: &str) -> Option<&'static str> {
    COUNTRY_CODES
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, region)| *region)
}

/// Steps through [`COUNTRY_CODES`]. Codes outside the catalogue restart from
/// the first entry.
pub fn cycle_country_code(current: &str, forward: bool) -> &'static str {
    let len = COUNTRY_CODES.len();
    match COUNTRY_CODES.iter().position(|(code, _)| *code == current) {
        Some(pos) if forward => COUNTRY_CODES[(pos + 1) % len].0,
        Some(pos) => COUNTRY_CODES[(pos + len - 1) % len].0,
        None => COUNTRY_CODES[0].0,
    }
}

/// Strips formatting from a dial string, keeping a leading `+` and digits.
/// Anything after an extension marker is dropped.
pub fn normalize_phone_for_dial(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut saw_digit = false;

    if trimmed.starts_with('+') {
        out.push('+');
    }

    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
            saw_digit = true;
            continue;
        }

        if matches!(ch, 'x' | 'X' | '#' | ';' | ',') {
            if !saw_digit {
                return None;
            }
            break;
        }
    }

    if !saw_digit {
        return None;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::{
        cycle_country_code, normalize_country_code, normalize_phone_for_dial,
        region_for_country_code, COUNTRY_CODES,
    };

    #[test]
    fn normalize_country_code_adds_plus() {
        assert_eq!(normalize_country_code(" 44 ").unwrap(), "+44");
        assert_eq!(normalize_country_code("+234").unwrap(), "+234");
    }

    #[test]
    fn normalize_country_code_rejects_garbage() {
        assert!(normalize_country_code("").is_err());
        assert!(normalize_country_code("+").is_err());
        assert!(normalize_country_code("+12345").is_err());
        assert!(normalize_country_code("+4a").is_err());
    }

    #[test]
    fn cycle_country_code_wraps() {
        let last = COUNTRY_CODES[COUNTRY_CODES.len() - 1].0;
        assert_eq!(cycle_country_code(last, true), "+234");
        assert_eq!(cycle_country_code("+234", false), last);
        assert_eq!(cycle_country_code("+234", true), "+1");
        assert_eq!(cycle_country_code("+999", true), "+234");
    }

    #[test]
    fn region_lookup() {
        assert_eq!(region_for_country_code("+233"), Some("GH"));
        assert_eq!(region_for_country_code("+999"), None);
    }

    #[test]
    fn normalize_phone_for_dial_strips_formatting() {
        let value = normalize_phone_for_dial("+234 (0803) 123-4567").unwrap();
        assert_eq!(value, "+23408031234567");
    }

    #[test]
    fn normalize_phone_for_dial_ignores_extensions() {
        let value = normalize_phone_for_dial("+234703040040 x89").unwrap();
        assert_eq!(value, "+234703040040");
        assert!(normalize_phone_for_dial("ext 123").is_none());
        assert!(normalize_phone_for_dial("   ").is_none());
    }
}
