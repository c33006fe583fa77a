use std::fmt;

use super::upload::UploadError;

/// A Matrix user id, `@localpart:domain`.
///
/// Only the overall shape is checked: a leading `@` and a `:` splitting the
/// rest into two non-empty parts. The domain is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId {
    full: String,
    colon: usize,
}

impl UserId {
    pub const SIGIL: char = '@';

    pub fn parse(value: &str) -> Result<Self, UploadError> {
        let rest = value
            .strip_prefix(Self::SIGIL)
            .ok_or(UploadError::UserIdMissingSigil)?;
        match rest.split_once(':') {
            Some((localpart, domain)) if !localpart.is_empty() && !domain.is_empty() => {
                Ok(UserId {
                    full: value.to_string(),
                    colon: Self::SIGIL.len_utf8() + localpart.len(),
                })
            }
            _ => Err(UploadError::UserIdMalformed),
        }
    }

    pub fn localpart(&self) -> &str {
        &self.full[Self::SIGIL.len_utf8()..self.colon]
    }

    pub fn domain(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_colon() {
        let user = UserId::parse("@bob:example.com:8448").unwrap();
        assert_eq!(user.localpart(), "bob");
        assert_eq!(user.domain(), "example.com:8448");
        assert_eq!(user.to_string(), "@bob:example.com:8448");
    }

    #[test]
    fn domain_shape_is_not_checked() {
        let user = UserId::parse("@bob:not a domain!").unwrap();
        assert_eq!(user.domain(), "not a domain!");
    }

    #[test]
    fn rejects_missing_sigil() {
        assert_eq!(UserId::parse("bob:example.com"), Err(UploadError::UserIdMissingSigil));
        assert_eq!(UserId::parse(""), Err(UploadError::UserIdMissingSigil));
    }

    #[test]
    fn rejects_empty_parts() {
        for value in ["@bob", "@", "@:example.com", "@bob:"] {
            assert_eq!(UserId::parse(value), Err(UploadError::UserIdMalformed), "{value}");
        }
    }
}
