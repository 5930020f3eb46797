//! Read-only card projection of one contact.
//!
//! # Responsibility
//! - Derive everything a contact card displays from a stored record.
//! - Supply fallback avatar and initials when the record has none.
//!
//! # Invariants
//! - Projection never mutates the contact.
//! - Social links appear only for present URLs, in LinkedIn/Twitter/GitHub order.

use crate::form::avatar::is_embedded_image;
use crate::model::contact::{Contact, ContactId};

const AVATAR_FALLBACK_BASE: &str = "https://avatar.vercel.sh";
const SHORT_ID_LEN: usize = 8;

/// Social network shown as a card link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialKind {
    Linkedin,
    Twitter,
    Github,
}

impl SocialKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Linkedin => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Github => "GitHub",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: String,
}

/// Everything a contact card needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCardView {
    pub id: ContactId,
    pub short_id: String,
    pub name: String,
    pub job_title: String,
    pub department: String,
    pub email: String,
    pub office_phone: Option<String>,
    pub mobile: Option<String>,
    pub initials: String,
    /// Stored avatar, or a placeholder keyed by email.
    pub avatar_src: String,
    pub avatar_is_embedded: bool,
    pub social_links: Vec<SocialLink>,
}

impl ContactCardView {
    pub fn from_contact(contact: &Contact) -> Self {
        let avatar_src = contact
            .avatar_url
            .clone()
            .unwrap_or_else(|| fallback_avatar_url(&contact.email));
        let social_links = [
            (SocialKind::Linkedin, &contact.linkedin),
            (SocialKind::Twitter, &contact.twitter),
            (SocialKind::Github, &contact.github),
        ]
        .into_iter()
        .filter_map(|(kind, url)| {
            url.as_ref().map(|url| SocialLink {
                kind,
                url: url.clone(),
            })
        })
        .collect();

        Self {
            id: contact.id,
            short_id: contact.id.to_string().chars().take(SHORT_ID_LEN).collect(),
            name: contact.name.clone(),
            job_title: contact.job_title.clone(),
            department: contact.department.clone(),
            email: contact.email.clone(),
            office_phone: contact.office_phone.clone(),
            mobile: contact.mobile.clone(),
            initials: initials(&contact.name),
            avatar_is_embedded: is_embedded_image(&avatar_src),
            avatar_src,
            social_links,
        }
    }
}

/// Placeholder avatar URL generated from `email`.
pub fn fallback_avatar_url(email: &str) -> String {
    format!("{AVATAR_FALLBACK_BASE}/{}.png", email.trim())
}

/// Uppercase first letters of the first and last name words.
pub fn initials(name: &str) -> String {
    let words = name.split_whitespace().collect::<Vec<_>>();
    let first_letter = |word: &str| word.chars().next().into_iter().flat_map(char::to_uppercase);

    match words.as_slice() {
        [] => String::new(),
        [only] => first_letter(*only).collect(),
        [first, .., last] => first_letter(*first).chain(first_letter(*last)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{fallback_avatar_url, initials};

    #[test]
    fn initials_use_first_and_last_words() {
        assert_eq!(initials("Jane Doe"), "JD");
        assert_eq!(initials("mary ann van dyke"), "MD");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn fallback_avatar_is_keyed_by_email() {
        assert_eq!(
            fallback_avatar_url("jane.doe@example.com"),
            "https://avatar.vercel.sh/jane.doe@example.com.png"
        );
    }
}
