use contacts_core::{
    seed_contacts, ContactDraft, ContactField, ContactPatch, ContactRepository,
    InMemoryContactRepository, RepoError, SearchPolicy,
};
use std::collections::HashSet;
use uuid::Uuid;

fn draft(name: &str, email: &str) -> ContactDraft {
    ContactDraft {
        name: name.to_string(),
        job_title: "T".to_string(),
        department: "D".to_string(),
        email: email.to_string(),
        ..ContactDraft::default()
    }
}

#[test]
fn add_then_remove_roundtrip_from_empty() {
    let mut repo = InMemoryContactRepository::new();
    assert!(repo.list().is_empty());

    let created = repo.add(&draft("A", "a@x.com")).unwrap();
    let listed = repo.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert!(!created.id.is_nil());

    repo.remove(created.id).unwrap();
    assert!(repo.list().is_empty());
    assert!(repo.is_empty());
}

#[test]
fn add_prepends_and_ids_are_unique() {
    let mut repo = InMemoryContactRepository::new();
    let mut ids = HashSet::new();
    for index in 0..50 {
        let contact = repo
            .add(&draft(&format!("Person {index}"), &format!("p{index}@x.com")))
            .unwrap();
        assert!(ids.insert(contact.id), "duplicate id generated");
        assert_eq!(repo.list()[0].id, contact.id);
    }
    assert_eq!(repo.len(), 50);
}

#[test]
fn add_rejects_invalid_draft_without_mutation() {
    let mut repo = InMemoryContactRepository::new();
    let err = repo.add(&draft("", "a@x.com")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref e) if e.has_issue(ContactField::Name)));
    assert!(repo.is_empty());
}

#[test]
fn update_preserves_position_and_untouched_fields() {
    let mut repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    let before = repo.list();
    let target = before[1].clone();

    let patch = ContactPatch::default().with(ContactField::JobTitle, "Art Director");
    let updated = repo.update(target.id, &patch).unwrap();

    let after = repo.list();
    assert_eq!(after[1].id, target.id);
    assert_eq!(after[1].job_title, "Art Director");
    assert_eq!(after[1].email, target.email);
    assert_eq!(after[1].github, target.github);
    assert_eq!(after[0], before[0]);
    assert_eq!(updated, after[1]);
}

#[test]
fn update_unknown_id_returns_not_found() {
    let mut repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    let before = repo.list();
    let missing = Uuid::new_v4();

    let err = repo
        .update(missing, &ContactPatch::default().with(ContactField::Name, "X"))
        .unwrap_err();
    assert_eq!(err, RepoError::NotFound(missing));
    assert_eq!(repo.list(), before);
}

#[test]
fn update_that_blanks_required_field_is_rejected() {
    let mut repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    let target = repo.list()[0].clone();

    let err = repo
        .update(target.id, &ContactPatch::default().with(ContactField::Email, " "))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.get(target.id).unwrap(), target);
}

#[test]
fn remove_unknown_id_returns_not_found() {
    let mut repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    let missing = Uuid::new_v4();
    assert_eq!(repo.remove(missing).unwrap_err(), RepoError::NotFound(missing));
    assert_eq!(repo.len(), 2);
}

#[test]
fn removed_contact_never_appears_in_search() {
    let mut repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    let target = repo.list()[0].id;
    repo.remove(target).unwrap();

    let all = repo.search("", &SearchPolicy::default());
    assert!(all.iter().all(|contact| contact.id != target));
    assert_eq!(all.len(), 1);
}

#[test]
fn with_contacts_rejects_duplicate_ids() {
    let mut seed = seed_contacts();
    let dup_id = seed[0].id;
    seed[1].id = dup_id;

    let err = InMemoryContactRepository::with_contacts(seed).unwrap_err();
    assert_eq!(err, RepoError::DuplicateId(dup_id));
}
