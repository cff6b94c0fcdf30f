use crate::types::Timestamp;

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a snake_case identifier to camelCase (`date_of_joining` -> `dateOfJoining`)
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("first_name"), "firstName");
        assert_eq!(to_camel_case("date_of_joining"), "dateOfJoining");
        assert_eq!(to_camel_case("email"), "email");
        assert_eq!(to_camel_case("_private"), "private");
    }

    #[test]
    fn test_now_millis_is_positive() {
        assert!(now_millis() > 1_700_000_000_000);
    }
}
