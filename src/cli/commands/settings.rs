use chrono::Local;

use crate::cli::core::{parse_percent, CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output::{self, Align, Table};
use crate::cli::registry::CommandEntry;
use crate::currency::symbol_for;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "currency",
            "Show or change the display currency",
            "currency [code]",
            cmd_currency,
        ),
        CommandEntry::new(
            "tax",
            "Show or change the tax rate applied to income",
            "tax [percent]",
            cmd_tax,
        ),
        CommandEntry::new(
            "summary",
            "Show monthly income, expenses, tax and potential savings",
            "summary",
            cmd_summary,
        ),
    ]
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        let current = &context.store.snapshot().currency_label;
        cli_io::print_info(format!("Currency: {} ({})", current, symbol_for(current)));
        cli_io::print_hint(format!(
            "Options: {}",
            context.config.currency_options.join(", ")
        ));
        return Ok(());
    };

    let label = match context.config.currency_option(raw) {
        Some(option) => option.to_string(),
        None => {
            cli_io::print_warning(format!(
                "`{raw}` is not one of the configured currencies; using it as a label."
            ));
            raw.to_string()
        }
    };
    context.store.set_currency(label)?;
    let current = &context.store.snapshot().currency_label;
    cli_io::print_success(format!("Currency set to {} ({}).", current, symbol_for(current)));
    Ok(())
}

fn cmd_tax(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            cli_io::print_info(format!(
                "Tax rate: {}%",
                context.store.snapshot().tax_rate_percent
            ));
            Ok(())
        }
        [raw] => {
            let percent = parse_percent(raw)?;
            context.store.set_tax_rate(percent)?;
            cli_io::print_success(format!("Tax rate set to {percent}%."));
            super::items::print_savings_line(context);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments("usage: tax [percent]".into())),
    }
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let savings = context.store.savings();
    let ledger = context.store.snapshot();

    output::section("Summary");
    let mut table = Table::new(&[("", Align::Left), ("", Align::Right)]);
    table.add_row(vec![
        "Monthly Income".to_string(),
        context.format_amount(savings.income_total),
    ]);
    table.add_row(vec![
        format!("Tax ({}%)", ledger.tax_rate_percent),
        context.format_amount(savings.tax_amount),
    ]);
    table.add_row(vec![
        "Monthly Expenses".to_string(),
        context.format_amount(savings.expense_total),
    ]);
    table.add_row(vec![
        "Potential Monthly Savings".to_string(),
        context.format_amount(savings.monthly_savings),
    ]);
    for line in table.lines().into_iter().skip(2) {
        cli_io::print_info(line);
    }

    if let Some(saved) = context.store.last_saved() {
        cli_io::print_hint(format!(
            "{} change(s) saved this session, last at {}.",
            context.store.revision(),
            saved.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }
    Ok(())
}
