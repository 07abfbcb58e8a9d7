mod domain;
mod types;

pub use types::{EmailError, EmailParts};

use domain::normalize_domain;

/// Splits `email` on its single `@` and normalises the domain part.
///
/// Only the separator count and a non-empty domain are checked. The local
/// part is passed through untouched, whitespace included; the mail server is
/// the authority on it. Only the domain is trimmed.
pub fn extract_address(email: &str) -> Result<EmailParts, EmailError> {
    let parts: Vec<&str> = email.split('@').collect();
    let (local, domain) = match parts.as_slice() {
        [local, domain] => (*local, *domain),
        [_] => return Err(EmailError::MissingSeparator),
        _ => return Err(EmailError::MultipleSeparators),
    };

    let (domain, ascii_domain) = normalize_domain(domain);
    if domain.is_empty() {
        return Err(EmailError::EmptyDomain);
    }

    Ok(EmailParts {
        local: local.to_string(),
        domain,
        ascii_domain,
    })
}

/// Domain of `email`, lower-cased and trimmed.
pub fn extract_domain(email: &str) -> Result<String, EmailError> {
    extract_address(email).map(|parts| parts.domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_basic() {
        let parts = extract_address("alice@example.com").unwrap();
        assert_eq!(parts.local, "alice");
        assert_eq!(parts.domain, "example.com");
        assert_eq!(parts.recipient(), "alice@example.com");
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            extract_address("not-an-email"),
            Err(EmailError::MissingSeparator)
        );
    }

    #[test]
    fn rejects_two_separators() {
        assert_eq!(
            extract_address("a@b@example.com"),
            Err(EmailError::MultipleSeparators)
        );
    }

    #[test]
    fn rejects_blank_domain() {
        assert_eq!(extract_address("user@"), Err(EmailError::EmptyDomain));
        assert_eq!(extract_address("user@   "), Err(EmailError::EmptyDomain));
    }

    #[test]
    fn local_part_is_not_validated() {
        let parts = extract_address("@example.com").unwrap();
        assert_eq!(parts.local, "");
        assert_eq!(parts.domain, "example.com");
    }

    #[test]
    fn only_the_domain_is_trimmed() {
        let parts = extract_address(" alice @ Example.com \n").unwrap();
        assert_eq!(parts.local, " alice ");
        assert_eq!(parts.domain, "example.com");
        assert_eq!(parts.recipient(), " alice @example.com");
    }

    #[test]
    fn domain_case_is_folded() {
        let upper = extract_address("a@EXAMPLE.com").unwrap();
        let mixed = extract_address("a@example.COM").unwrap();
        assert_eq!(upper, mixed);
        assert_eq!(extract_domain("a@ExAmPlE.Org ").unwrap(), "example.org");
    }

    proptest! {
        #[test]
        fn inputs_without_separator_are_rejected(s in "[^@]*") {
            prop_assert_eq!(extract_address(&s), Err(EmailError::MissingSeparator));
        }

        #[test]
        fn inputs_with_extra_separators_are_rejected(
            a in "[a-z]{0,8}",
            b in "[a-z]{0,8}",
            c in "[a-z.]{0,8}",
        ) {
            let input = format!("{a}@{b}@{c}");
            prop_assert_eq!(extract_address(&input), Err(EmailError::MultipleSeparators));
        }

        #[test]
        fn extracted_domain_ignores_case(local in "[a-z0-9.]{1,12}", domain in "[a-zA-Z]{1,12}\\.[a-zA-Z]{2,4}") {
            let parts = extract_address(&format!("{local}@{domain}")).unwrap();
            prop_assert_eq!(parts.domain, domain.to_lowercase());
        }
    }
}
