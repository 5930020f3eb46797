use contacts_core::{search_contacts, seed_contacts, Contact, ContactDraft, SearchPolicy};

fn contact(name: &str, job_title: &str, department: &str, email: &str) -> Contact {
    Contact::from_draft(&ContactDraft {
        name: name.to_string(),
        job_title: job_title.to_string(),
        department: department.to_string(),
        email: email.to_string(),
        ..ContactDraft::default()
    })
    .unwrap()
}

fn names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn blank_term_returns_everything_in_order() {
    let seed = seed_contacts();
    let policy = SearchPolicy::default();
    assert_eq!(search_contacts(&seed, "", &policy), seed);
    assert_eq!(search_contacts(&seed, "   ", &policy), seed);
}

#[test]
fn term_matches_job_title_substring() {
    let jane = contact(
        "Jane Doe",
        "Software Engineer",
        "Engineering",
        "jane.doe@example.com",
    );
    let hits = search_contacts(&[jane.clone()], "eng", &SearchPolicy::default());
    assert_eq!(hits, vec![jane]);
}

#[test]
fn match_is_case_insensitive_across_name_and_email() {
    let seed = seed_contacts();
    let policy = SearchPolicy::default();
    assert_eq!(names(&search_contacts(&seed, "JOHN", &policy)), ["John Smith"]);
    assert_eq!(
        names(&search_contacts(&seed, "Jane.Doe@Example", &policy)),
        ["Jane Doe"]
    );
    assert!(search_contacts(&seed, "zzz", &policy).is_empty());
}

#[test]
fn department_is_searched_only_when_enabled() {
    let people = vec![
        contact("Ana Lima", "Illustrator", "Design", "ana@example.com"),
        contact("Bo Chen", "Accountant", "Finance", "bo@example.com"),
    ];

    assert!(search_contacts(&people, "design", &SearchPolicy::default()).is_empty());

    let with_department = SearchPolicy {
        include_department: true,
    };
    assert_eq!(
        names(&search_contacts(&people, "design", &with_department)),
        ["Ana Lima"]
    );
}

#[test]
fn optional_fields_are_not_searched() {
    let seed = seed_contacts();
    assert!(search_contacts(&seed, "github.com", &SearchPolicy::default()).is_empty());
    assert!(search_contacts(&seed, "+1234", &SearchPolicy::default()).is_empty());
}

#[test]
fn search_does_not_mutate_input() {
    let seed = seed_contacts();
    let snapshot = seed.clone();
    let _ = search_contacts(&seed, "smith", &SearchPolicy::default());
    assert_eq!(seed, snapshot);
}

#[test]
fn surrounding_whitespace_in_term_is_ignored() {
    let seed = seed_contacts();
    let policy = SearchPolicy::default();
    assert_eq!(names(&search_contacts(&seed, "doe ", &policy)), ["Jane Doe"]);
    assert!(search_contacts(&seed, "jane  doe", &policy).is_empty());
}
