//! Terminal front end for the contact directory.
//!
//! # Responsibility
//! - Parse startup flags and an optional JSON file into `CoreConfig` and
//!   logging settings.
//! - Read line commands, forward them as board intents, print the board.

use clap::Parser;
use contacts_core::form::avatar::is_embedded_image;
use contacts_core::{
    init_logging, seed_contacts, BoardView, ContactBoard, ContactField, ContactService,
    CoreConfig, InMemoryContactRepository, Intent, IntentOutcome,
};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
commands:
  list                      show contacts (respects current search)
  search [term]             filter by name, email, job title (empty clears)
  add                       open the form for a new contact
  edit <id>                 open the form for a contact (id prefix allowed)
  set <field> <value>       set a form field (name, email, jobTitle, ...)
  avatar <path>             embed an image file as the avatar
  clear-avatar              revert the avatar to its value when opened
  save | cancel             submit or discard the form
  delete <id>               ask to delete a contact
  confirm | keep            confirm or abort the pending delete
  help | quit";

#[derive(Debug, Parser)]
#[command(name = "contacts", version, about = "In-memory contact directory")]
struct Args {
    /// Log level (trace|debug|info|warn|error).
    #[arg(long, default_value_t = contacts_core::default_log_level().to_string())]
    log_level: String,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// JSON file with search and avatar settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with an empty directory instead of the sample contacts.
    #[arg(long)]
    no_seed: bool,
    /// Also match the department field when searching.
    #[arg(long)]
    search_department: bool,
    /// Largest accepted avatar image, in KiB.
    #[arg(long)]
    max_avatar_kb: Option<usize>,
}

fn main() {
    let args = Args::parse();

    if let Some(dir) = &args.log_dir {
        if let Err(err) = init_logging(&args.log_level, &dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut config = match &args.config {
        Some(path) => match CoreConfig::load_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => CoreConfig::default(),
    };
    if args.search_department {
        config.search.include_department = true;
    }
    if let Some(kb) = args.max_avatar_kb {
        config.avatar.max_bytes = kb.saturating_mul(1024);
    }

    let service = ContactService::with_config(InMemoryContactRepository::new(), config);
    let mut board = ContactBoard::loading(service);
    print_board(&board.render());

    let seed = if args.no_seed { Vec::new() } else { seed_contacts() };
    if let Err(err) = board.finish_loading(seed) {
        eprintln!("failed to load contacts: {err}");
        std::process::exit(1);
    }
    print_board(&board.render());

    if let Err(err) = run(&mut board) {
        eprintln!("input error: {err}");
        std::process::exit(1);
    }
}

fn run(board: &mut ContactBoard<InMemoryContactRepository>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let (command, rest) = split_command(&line);
        let intent = match command {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "help" => {
                println!("{HELP}");
                continue;
            }
            "list" => {
                print_board(&board.render());
                continue;
            }
            _ => match parse_intent(board, command, rest) {
                Ok(intent) => intent,
                Err(message) => {
                    println!("{message}");
                    continue;
                }
            },
        };

        match board.dispatch(intent) {
            Ok(IntentOutcome::Saved(contact)) => println!("saved {}", contact.name),
            Ok(IntentOutcome::Deleted(contact)) => println!("deleted {}", contact.name),
            Ok(IntentOutcome::AvatarApplied) => println!("avatar attached"),
            Ok(IntentOutcome::AvatarSuperseded) => println!("avatar read superseded"),
            Ok(IntentOutcome::Updated) => {}
            Err(err) => {
                warn!("event=intent module=cli status=error command={command}");
                println!("error: {err}");
            }
        }
        print_board(&board.render());
    }
}

fn split_command(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    }
}

fn parse_intent(
    board: &ContactBoard<InMemoryContactRepository>,
    command: &str,
    rest: &str,
) -> Result<Intent, String> {
    let resolve = |input: &str| {
        board
            .service()
            .resolve_id(input)
            .ok_or_else(|| format!("no unique contact matches `{input}`"))
    };

    match command {
        "search" => Ok(Intent::Search(rest.to_string())),
        "add" => Ok(Intent::OpenCreate),
        "edit" => Ok(Intent::OpenEdit(resolve(rest)?)),
        "set" => {
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field =
                ContactField::parse(name).ok_or_else(|| format!("unknown field `{name}`"))?;
            Ok(Intent::SetField(field, value.trim().to_string()))
        }
        "avatar" if !rest.is_empty() => Ok(Intent::AttachAvatar(PathBuf::from(rest))),
        "clear-avatar" => Ok(Intent::ClearAvatar),
        "save" => Ok(Intent::Submit),
        "cancel" => Ok(Intent::CancelForm),
        "delete" => Ok(Intent::RequestDelete(resolve(rest)?)),
        "confirm" => Ok(Intent::ConfirmDelete),
        "keep" => Ok(Intent::CancelDelete),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn print_board(view: &BoardView) {
    let BoardView::Ready {
        search_term,
        cards,
        empty_message,
        offer_first_contact,
        form,
        pending_delete,
    } = view
    else {
        println!("Loading contacts...");
        return;
    };

    println!();
    if !search_term.is_empty() {
        println!("search: {search_term}");
    }
    for card in cards {
        println!(
            "[{}] {} ({}) {} / {}",
            card.short_id, card.name, card.initials, card.job_title, card.department
        );
        println!("    email: {}", card.email);
        if let Some(phone) = &card.office_phone {
            println!("    office: {phone}");
        }
        if let Some(mobile) = &card.mobile {
            println!("    mobile: {mobile}");
        }
        for link in &card.social_links {
            println!("    {}: {}", link.kind.label(), link.url);
        }
        if card.avatar_is_embedded {
            println!("    avatar: embedded image");
        } else {
            println!("    avatar: {}", card.avatar_src);
        }
    }
    if let Some(message) = empty_message {
        println!("{message}");
    }
    if *offer_first_contact {
        println!("type `add` to create your first contact");
    }

    if let Some(form) = form {
        println!("--- {} ---", form.title);
        for field in &form.fields {
            let marker = if field.required { "*" } else { " " };
            let value = if is_embedded_image(&field.value) {
                "<embedded image>"
            } else {
                field.value.as_str()
            };
            println!("{marker} {:<14} {value}", field.label);
            if let Some(issue) = &field.issue {
                println!("    ! {issue}");
            }
        }
        println!(
            "(`save` to {}, `cancel` to discard)",
            form.submit_label.to_lowercase()
        );
    }

    if let Some(pending) = pending_delete {
        println!("Delete {}? type `confirm` or `keep`", pending.name);
    }
}
