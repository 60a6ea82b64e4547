use saver_domain::{ItemKind, LineItem, LineItemDraft};

use crate::cli::core::{parse_interval, parse_kind, CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output::{self, Align, Table};
use crate::cli::registry::CommandEntry;
use saver_core::SavingsService;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Add a recurring income or expense item",
            "add <income|expense> <name> <amount> [daily|weekly|monthly|yearly|custom:<months>]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Replace the name, amount and interval of an item",
            "edit <income|expense> <id> <name> <amount> [interval]",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Remove an item",
            "delete <income|expense> <id>",
            cmd_delete,
        ),
        CommandEntry::new(
            "list",
            "List items, largest amount first",
            "list [income|expense]",
            cmd_list,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, name, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <name> <amount> [interval]".into(),
        ));
    };
    let kind = parse_kind(kind)?;
    let interval = parse_interval(rest)?.unwrap_or_default();
    let draft = LineItemDraft::new(*name, *amount).with_interval(interval);

    let id = context.store.add_item(kind, draft)?;
    if let Some(item) = context.store.snapshot().item(kind, id) {
        cli_io::print_success(format!(
            "Added {kind} `{}` ({} {}) [{}].",
            item.item_name,
            context.format_amount(item.amount),
            item.interval,
            id.short()
        ));
    }
    print_savings_line(context);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, id, name, amount, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <income|expense> <id> <name> <amount> [interval]".into(),
        ));
    };
    let kind = parse_kind(kind)?;
    let id = context.resolve_item(kind, id)?;
    let interval = match parse_interval(rest)? {
        Some(interval) => interval,
        None => context
            .store
            .snapshot()
            .item(kind, id)
            .map(|item| item.interval)
            .unwrap_or_default(),
    };

    context
        .store
        .update_item(kind, id, LineItemDraft::new(*name, *amount).with_interval(interval))?;
    cli_io::print_success(format!("Updated {kind} item [{}].", id.short()));
    print_savings_line(context);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <income|expense> <id>".into(),
        ));
    };
    let kind = parse_kind(kind)?;
    let id = context.resolve_item(kind, id)?;

    let label = context
        .store
        .snapshot()
        .item(kind, id)
        .map(|item| item.item_name.clone());
    if let Some(name) = &label {
        if !context.confirm(&format!("Delete {kind} `{name}`?"))? {
            cli_io::print_info("Deletion cancelled.");
            return Ok(());
        }
    }

    if context.store.delete_item(kind, id)? {
        cli_io::print_success(format!(
            "Deleted {kind} `{}`.",
            label.unwrap_or_default()
        ));
        print_savings_line(context);
    } else {
        cli_io::print_info(format!("No {kind} item [{}]; nothing deleted.", id.short()));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds = match args.first() {
        Some(raw) => vec![parse_kind(raw)?],
        None => ItemKind::ALL.to_vec(),
    };
    for kind in kinds {
        print_collection(context, kind);
    }
    Ok(())
}

fn print_collection(context: &ShellContext, kind: ItemKind) {
    let ledger = context.store.snapshot();
    let items = ledger.items_by_amount_desc(kind);
    output::section(format!("{} ({})", heading(kind), items.len()));
    if items.is_empty() {
        cli_io::print_info(format!("No {kind} items yet. Use `add {kind} <name> <amount>`."));
        return;
    }

    let mut table = Table::new(&[
        ("Id", Align::Left),
        ("Name", Align::Left),
        ("Amount", Align::Right),
        ("Interval", Align::Left),
        ("Monthly", Align::Right),
    ]);
    for item in &items {
        table.add_row(item_row(context, item));
    }
    output::render_table(&table);

    let total = context.store.savings().total_for(kind);
    cli_io::print_info(format!("Monthly {kind} total: {}", context.format_amount(total)));
}

fn item_row(context: &ShellContext, item: &LineItem) -> Vec<String> {
    vec![
        item.id.short(),
        item.item_name.clone(),
        context.format_amount(item.amount),
        item.interval.to_string(),
        context.format_amount(SavingsService::normalize(item)),
    ]
}

fn heading(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Income => "Income",
        ItemKind::Expense => "Expenses",
    }
}

pub(crate) fn print_savings_line(context: &ShellContext) {
    let savings = context.store.savings();
    cli_io::print_info(format!(
        "Potential monthly savings: {}",
        context.format_amount(savings.monthly_savings)
    ));
}
