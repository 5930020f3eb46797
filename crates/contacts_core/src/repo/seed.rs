//! Fixed records used to populate a fresh directory.
//!
//! # Responsibility
//! - Provide the sample contacts delivered by the initial load.
//!
//! # Invariants
//! - Seed ids are fixed, distinct, and differ within the short-id prefix.
//! - Every seed record passes `Contact::validate`.

use crate::model::contact::Contact;
use uuid::Uuid;

const JANE_DOE_ID: Uuid = Uuid::from_u128(0x3c1e_9a72_4f0b_4d2a_8b61_2f7e_5d0c_9a11);
const JOHN_SMITH_ID: Uuid = Uuid::from_u128(0x8d4b_2e19_6c3a_4f5e_9a07_1b8c_4e2d_7f22);

/// Returns the two sample contacts shown on first load.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: JANE_DOE_ID,
            name: "Jane Doe".to_string(),
            job_title: "Software Engineer".to_string(),
            department: "Engineering".to_string(),
            email: "jane.doe@example.com".to_string(),
            office_phone: None,
            mobile: Some("+1234567890".to_string()),
            avatar_url: Some("https://i.pravatar.cc/150?u=jane.doe@example.com".to_string()),
            linkedin: Some("https://linkedin.com/in/janedoe".to_string()),
            twitter: Some("https://twitter.com/janedoe".to_string()),
            github: None,
        },
        Contact {
            id: JOHN_SMITH_ID,
            name: "John Smith".to_string(),
            job_title: "Graphic Designer".to_string(),
            department: "Design".to_string(),
            email: "john.smith@example.com".to_string(),
            office_phone: Some("+0987654321".to_string()),
            mobile: None,
            avatar_url: Some("https://i.pravatar.cc/150?u=john.smith@example.com".to_string()),
            linkedin: None,
            twitter: None,
            github: Some("https://github.com/johnsmith".to_string()),
        },
    ]
}
