use contacts_core::presentation::board::{EMPTY_DIRECTORY_MESSAGE, EMPTY_SEARCH_MESSAGE};
use contacts_core::{
    seed_contacts, BoardError, BoardView, ContactBoard, ContactField, ContactService,
    CoreConfig, FormError, InMemoryContactRepository, Intent, IntentOutcome, LoadState,
    RepoError,
};
use uuid::Uuid;

fn seeded_board() -> ContactBoard<InMemoryContactRepository> {
    let repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    ContactBoard::ready(ContactService::new(repo))
}

fn empty_board() -> ContactBoard<InMemoryContactRepository> {
    ContactBoard::ready(ContactService::new(InMemoryContactRepository::new()))
}

fn card_names(view: &BoardView) -> Vec<String> {
    match view {
        BoardView::Ready { cards, .. } => cards.iter().map(|card| card.name.clone()).collect(),
        BoardView::Loading => panic!("board should be ready"),
    }
}

#[test]
fn loading_board_rejects_intents_until_finished() {
    let repo = InMemoryContactRepository::new();
    let mut board = ContactBoard::loading(ContactService::new(repo));

    assert_eq!(board.render(), BoardView::Loading);
    assert!(board.service().list().is_empty());
    assert!(matches!(
        board.dispatch(Intent::OpenCreate),
        Err(BoardError::NotReady)
    ));

    board.finish_loading(seed_contacts()).unwrap();
    assert_eq!(board.load_state(), LoadState::Ready);
    assert_eq!(board.service().list().len(), 2);
    assert_eq!(card_names(&board.render()), ["Jane Doe", "John Smith"]);
}

#[test]
fn rejected_seed_keeps_board_loading() {
    let mut seed = seed_contacts();
    seed.push(seed[0].clone());
    let mut board = ContactBoard::loading(ContactService::new(InMemoryContactRepository::new()));

    let err = board.finish_loading(seed).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(_)));
    assert_eq!(board.load_state(), LoadState::Loading);
    assert!(board.service().list().is_empty());
}

#[test]
fn repeated_finish_loading_keeps_current_contacts() {
    let mut board = ContactBoard::loading(ContactService::new(InMemoryContactRepository::new()));
    board.finish_loading(seed_contacts()).unwrap();

    board.finish_loading(Vec::new()).unwrap();
    assert_eq!(board.service().list().len(), 2);
}

#[test]
fn empty_directory_offers_first_contact() {
    let board = empty_board();
    let BoardView::Ready {
        cards,
        empty_message,
        offer_first_contact,
        ..
    } = board.render()
    else {
        panic!("board should be ready");
    };
    assert!(cards.is_empty());
    assert_eq!(empty_message, Some(EMPTY_DIRECTORY_MESSAGE));
    assert!(offer_first_contact);
}

#[test]
fn search_without_hits_shows_search_message() {
    let mut board = seeded_board();
    board.dispatch(Intent::Search("nobody".to_string())).unwrap();

    let BoardView::Ready {
        empty_message,
        offer_first_contact,
        ..
    } = board.render()
    else {
        panic!("board should be ready");
    };
    assert_eq!(empty_message, Some(EMPTY_SEARCH_MESSAGE));
    assert!(!offer_first_contact);
}

#[test]
fn department_search_follows_config() {
    let repo = InMemoryContactRepository::with_contacts(seed_contacts()).unwrap();
    let mut config = CoreConfig::default();
    config.search.include_department = true;
    let mut board = ContactBoard::ready(ContactService::with_config(repo, config));

    board.dispatch(Intent::Search("engineering".to_string())).unwrap();
    assert_eq!(card_names(&board.render()), ["Jane Doe"]);

    let mut default_board = seeded_board();
    default_board
        .dispatch(Intent::Search("engineering".to_string()))
        .unwrap();
    assert!(card_names(&default_board.render()).is_empty());
}

#[test]
fn add_contact_through_intents_prepends_card() {
    let mut board = seeded_board();
    board.dispatch(Intent::OpenCreate).unwrap();
    for (field, value) in [
        (ContactField::Name, "Grace Hopper"),
        (ContactField::Email, "grace@example.com"),
        (ContactField::JobTitle, "Rear Admiral"),
        (ContactField::Department, "Navy"),
    ] {
        board
            .dispatch(Intent::SetField(field, value.to_string()))
            .unwrap();
    }

    let outcome = board.dispatch(Intent::Submit).unwrap();
    assert!(matches!(outcome, IntentOutcome::Saved(ref c) if c.name == "Grace Hopper"));

    let view = board.render();
    assert_eq!(card_names(&view)[0], "Grace Hopper");
    let BoardView::Ready { cards, form, .. } = view else {
        panic!("board should be ready");
    };
    assert!(form.is_none());
    assert_eq!(cards[0].initials, "GH");
    assert_eq!(
        cards[0].avatar_src,
        "https://avatar.vercel.sh/grace@example.com.png"
    );
}

#[test]
fn rejected_submit_renders_field_issues() {
    let mut board = empty_board();
    board.dispatch(Intent::OpenCreate).unwrap();

    let err = board.dispatch(Intent::Submit).unwrap_err();
    assert!(matches!(err, BoardError::Form(FormError::Validation(_))));

    let BoardView::Ready {
        form: Some(form), ..
    } = board.render()
    else {
        panic!("form should stay open");
    };
    let name = form
        .fields
        .iter()
        .find(|field| field.field == ContactField::Name)
        .unwrap();
    assert!(name.required);
    assert_eq!(name.issue.as_deref(), Some("Full Name is required"));
    let mobile = form
        .fields
        .iter()
        .find(|field| field.field == ContactField::Mobile)
        .unwrap();
    assert!(mobile.issue.is_none());
}

#[test]
fn edit_updates_card_in_place() {
    let mut board = seeded_board();
    let john = board.service().list()[1].clone();

    board.dispatch(Intent::OpenEdit(john.id)).unwrap();
    board
        .dispatch(Intent::SetField(
            ContactField::JobTitle,
            "Art Director".to_string(),
        ))
        .unwrap();
    board.dispatch(Intent::Submit).unwrap();

    let contacts = board.service().list();
    assert_eq!(contacts[1].id, john.id);
    assert_eq!(contacts[1].job_title, "Art Director");
}

#[test]
fn delete_requires_confirmation() {
    let mut board = seeded_board();
    let jane = board.service().list()[0].clone();

    board.dispatch(Intent::RequestDelete(jane.id)).unwrap();
    let BoardView::Ready { pending_delete, .. } = board.render() else {
        panic!("board should be ready");
    };
    assert_eq!(pending_delete.unwrap().name, "Jane Doe");
    assert_eq!(board.service().list().len(), 2);

    board.dispatch(Intent::CancelDelete).unwrap();
    assert_eq!(board.service().list().len(), 2);
    assert!(matches!(
        board.dispatch(Intent::ConfirmDelete),
        Err(BoardError::NoPendingDelete)
    ));

    board.dispatch(Intent::RequestDelete(jane.id)).unwrap();
    let outcome = board.dispatch(Intent::ConfirmDelete).unwrap();
    assert_eq!(outcome, IntentOutcome::Deleted(jane.clone()));
    assert_eq!(card_names(&board.render()), ["John Smith"]);
}

#[test]
fn unknown_ids_are_reported() {
    let mut board = seeded_board();
    let missing = Uuid::new_v4();

    assert!(matches!(
        board.dispatch(Intent::RequestDelete(missing)),
        Err(BoardError::Repo(RepoError::NotFound(id))) if id == missing
    ));
    assert!(matches!(
        board.dispatch(Intent::OpenEdit(missing)),
        Err(BoardError::Form(FormError::Repo(RepoError::NotFound(_))))
    ));
}

#[test]
fn resolve_id_accepts_unique_prefix() {
    let board = seeded_board();
    let jane = board.service().list()[0].clone();
    let prefix = &jane.id.to_string()[..8];

    assert_eq!(board.service().resolve_id(prefix), Some(jane.id));
    assert_eq!(board.service().resolve_id(&prefix.to_uppercase()), Some(jane.id));
    assert_eq!(
        board.service().resolve_id(&jane.id.to_string()),
        Some(jane.id)
    );
    assert_eq!(board.service().resolve_id(""), None);
}
