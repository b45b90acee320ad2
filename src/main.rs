use note_record::authority::InMemoryAuthority;
use note_record::error::Error;
use note_record::format::FormatContext;
use note_record::model::Snapshot;
use note_record::panel::Panel;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

/// Line-oriented driver for the panel core, backed by an in-memory
/// authority. Commands arrive on stdin; notifications and derived views go
/// to stdout.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let authority = match env::var("NOTE_PANEL_SEED") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)?;
            let data: Snapshot = serde_json::from_str(&raw)?;
            InMemoryAuthority::with_data(data)
        }
        Err(_) => InMemoryAuthority::new(),
    };

    let lang = env::var("NOTE_PANEL_LANG").unwrap_or_else(|_| "en".to_string());
    let translations = env::var("NOTE_PANEL_TRANSLATIONS")
        .ok()
        .and_then(|path| fs::read_to_string(path).ok());

    let mut panel = Panel::new(authority);
    // Localization resolves before the first load so nothing prints
    // untranslated.
    if let Err(err) = panel.init(&lang, translations.as_deref()) {
        notify(&err);
    }

    let ctx = FormatContext::from_env();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    print_prompt();
    while let Some(line) = lines.next() {
        let line = line?;
        let mut parts = line.trim().splitn(2, ' ');
        let cmd = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("").trim();

        match cmd {
            "" => {}
            "load" => {
                if let Err(err) = panel.reload() {
                    notify(&err);
                }
            }
            "categories" => print_categories(&panel, &ctx),
            "select" => select_category(&mut panel, rest),
            "search" => panel.set_search_query(rest),
            "list" => print_list(&panel, &ctx),
            "view" => view_note(&panel, &ctx, rest),
            "add-category" => add_category(&mut panel, rest),
            "delete-category" => {
                delete_category(&mut panel, rest, &mut lines)?
            }
            "add-note" => add_note(&mut panel, rest),
            "edit-note" => edit_note(&mut panel, rest),
            "delete-note" => delete_note(&mut panel, rest, &mut lines)?,
            "help" => print_help(),
            "quit" | "exit" => break,
            other => {
                println!("Unknown command: {other}");
                print_help();
            }
        }
        print_prompt();
    }

    Ok(())
}

fn print_prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn print_help() {
    println!(
        "\
note-panel commands:
  load                              Reload the snapshot from the authority
  categories                        List categories (* marks the active tab)
  select <id-or-name>               Switch the active category
  search [text]                     Set the search query (empty to clear)
  list                              Show visible notes of the active category
  view <note-id>                    Show a note rendered as safe HTML
  add-category <name>               Create a category and activate it
  delete-category <id-or-name>      Guarded deletion; type the name to confirm
  add-note <title> | <content> [| pinned]
  edit-note <id> | <title> | <content> [| pinned]
  delete-note <note-id>             Asks y/n before deleting
  help                              Show this message
  quit                              Exit

Environment:
  NOTE_PANEL_SEED                   JSON snapshot to preload the authority
  NOTE_PANEL_LANG                   Language tag (default: en)
  NOTE_PANEL_TRANSLATIONS           Path to a translations JSON file
"
    );
}

/// Every failure is a notification; nothing is fatal to the session.
fn notify(err: &Error) {
    println!("Error: {err}");
}

fn print_categories(panel: &Panel<InMemoryAuthority>, ctx: &FormatContext) {
    let store = panel.store();
    if store.categories().is_empty() {
        println!("{}", panel.localize("no_categories"));
        return;
    }
    for category in store.categories() {
        let marker =
            if store.active_category() == Some(category.id.as_str()) { "*" } else { " " };
        println!(
            "{marker} {} {} ({})",
            ctx.format_id(&category.id),
            ctx.format_header(&category.name),
            store.note_count_in(&category.id)
        );
    }
}

fn resolve_category_id(
    panel: &Panel<InMemoryAuthority>,
    id_or_name: &str,
) -> Option<String> {
    panel
        .store()
        .categories()
        .iter()
        .find(|c| c.id == id_or_name || c.name == id_or_name)
        .map(|c| c.id.clone())
}

fn select_category(panel: &mut Panel<InMemoryAuthority>, id_or_name: &str) {
    match resolve_category_id(panel, id_or_name) {
        Some(id) => panel.select_category(&id),
        None => println!("Category {id_or_name} not found"),
    }
}

fn print_list(panel: &Panel<InMemoryAuthority>, ctx: &FormatContext) {
    let visible = panel.visible();
    if visible.is_empty() {
        println!("{}", panel.localize("no_notes"));
        return;
    }
    let query = panel.search_query();
    let query = (!query.trim().is_empty()).then_some(query);
    for note in visible {
        let pin = if note.pinned { " [pinned]" } else { "" };
        println!(
            "{} {} {}{}",
            ctx.format_id(&note.id),
            ctx.format_timestamp(&note.updated_at),
            ctx.highlight_match(&note.title, query),
            pin
        );
    }
}

fn view_note(
    panel: &Panel<InMemoryAuthority>,
    ctx: &FormatContext,
    note_id: &str,
) {
    match panel.store().note(note_id) {
        Some(note) => {
            println!(
                "{} ({})",
                ctx.format_header(&note.title),
                ctx.format_id(&note.id)
            );
            println!(
                "{}: {}",
                panel.localize("updated"),
                ctx.format_timestamp(&note.updated_at)
            );
            println!("{}", panel.content_html(note));
        }
        None => println!("Note {note_id} not found"),
    }
}

fn add_category(panel: &mut Panel<InMemoryAuthority>, name: &str) {
    panel.open_category_creator();
    panel.set_category_name(name);
    match panel.save_category() {
        Ok(()) => {
            let active = panel.store().active_category().unwrap_or("?");
            println!("Created category {active}");
        }
        Err(err) => {
            notify(&err);
            panel.cancel_dialog();
        }
    }
}

fn delete_category(
    panel: &mut Panel<InMemoryAuthority>,
    id_or_name: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
    let Some(id) = resolve_category_id(panel, id_or_name) else {
        println!("Category {id_or_name} not found");
        return Ok(());
    };
    panel.open_category_delete(&id);
    let Some(target) = panel.dialog().delete_target().cloned() else {
        return Ok(());
    };

    let warning_key = if target.note_count > 0 {
        "delete_category_warning"
    } else {
        "delete_category_empty_warning"
    };
    if let Some(localizer) = panel.localizer() {
        println!(
            "{}",
            localizer.localize_with(warning_key, &target.name, target.note_count)
        );
        println!(
            "{}",
            localizer.localize_with(
                "delete_category_confirm_label",
                &target.name,
                target.note_count
            )
        );
    }

    let typed = lines.next().transpose()?.unwrap_or_default();
    panel.set_typed_name(&typed);
    match panel.confirm_delete_category() {
        Ok(()) => println!("Deleted category {}", target.name),
        Err(err) => {
            notify(&err);
            panel.cancel_dialog();
        }
    }
    Ok(())
}

/// Split `title | content [| pinned]` fields.
fn split_fields(input: &str) -> (String, String, bool) {
    let mut parts = input.split('|').map(str::trim);
    let first = parts.next().unwrap_or("").to_string();
    let second = parts.next().unwrap_or("").to_string();
    let pinned = parts.next().is_some_and(|p| p.eq_ignore_ascii_case("pinned"));
    (first, second, pinned)
}

fn add_note(panel: &mut Panel<InMemoryAuthority>, rest: &str) {
    let (title, content, pinned) = split_fields(rest);
    panel.open_note_creator();
    if panel.dialog().is_closed() {
        println!("{}", panel.localize("no_categories"));
        return;
    }
    panel.edit_draft(|d| {
        d.with_title(&title).with_content(&content).with_pinned(pinned)
    });
    match panel.save_note() {
        Ok(()) => {
            let id = panel
                .store()
                .notes()
                .last()
                .map(|n| n.id.clone())
                .unwrap_or_default();
            println!("Created note {id} ({title})");
        }
        Err(err) => {
            notify(&err);
            panel.cancel_dialog();
        }
    }
}

fn edit_note(panel: &mut Panel<InMemoryAuthority>, rest: &str) {
    let (id_and_title, content, pinned) = split_fields(rest);
    let mut head = id_and_title.splitn(2, ' ');
    let note_id = head.next().unwrap_or("").to_string();
    let title = head.next().unwrap_or("").trim().to_string();

    panel.open_note_editor(&note_id);
    if panel.dialog().is_closed() {
        println!("Note {note_id} not found");
        return;
    }
    panel.edit_draft(|d| {
        d.with_title(&title).with_content(&content).with_pinned(pinned)
    });
    match panel.save_note() {
        Ok(()) => println!("Updated {note_id}"),
        Err(err) => {
            notify(&err);
            panel.cancel_dialog();
        }
    }
}

fn delete_note(
    panel: &mut Panel<InMemoryAuthority>,
    note_id: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> io::Result<()> {
    panel.open_note_editor(note_id);
    let Some(title) =
        panel.dialog().draft().map(|d| d.title.clone())
    else {
        println!("Note {note_id} not found");
        return Ok(());
    };

    println!("Delete note \"{title}\"? (y/n)");
    let answer = lines.next().transpose()?.unwrap_or_default();
    let confirmed = matches!(answer.trim(), "y" | "Y" | "yes");
    match panel.delete_edited_note(confirmed) {
        Ok(()) if confirmed => println!("Deleted {note_id}"),
        Ok(()) => {
            println!("Cancelled.");
            panel.cancel_dialog();
        }
        Err(err) => {
            notify(&err);
            panel.cancel_dialog();
        }
    }
    Ok(())
}
