//! Interactive operations menu (`-i`).
//!
//! Blocks on console input between operations; a failed operation is
//! reported and the menu comes back.

use crate::commands::{domains, records, Ctx};
use crate::error::{Error, Result};
use crate::godaddy::{Record, DEFAULT_TTL};

pub async fn run(ctx: &Ctx<'_>) -> Result<()> {
    ctx.console
        .info("Interactive mode. Blank input skips optional fields; 'q' quits.");

    loop {
        println!();
        println!("  1) list domains");
        println!("  2) list records");
        println!("  3) add record");
        println!("  4) update record");
        println!("  5) delete records");
        println!("  q) quit");

        let choice = ctx.prompter.line("gddy> ")?;
        let result = match choice.trim() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "1" => domains::list(ctx).await,
            "2" => list_records(ctx).await,
            "3" => add_record(ctx).await,
            "4" => update_record(ctx).await,
            "5" => delete_records(ctx).await,
            other => {
                ctx.console.warn(&format!("Unknown choice: {other}"));
                continue;
            }
        };

        match result {
            Ok(()) => {}
            Err(Error::Cancelled) => ctx.console.warn("Cancelled."),
            Err(e) => ctx.console.error(&e.to_string()),
        }
    }

    Ok(())
}

async fn list_records(ctx: &Ctx<'_>) -> Result<()> {
    let domain = required(ctx, "Domain", "domain")?;
    let record_type = optional(ctx, "Type (blank for all)")?;
    let name = optional(ctx, "Name (blank for all)")?;
    records::list(ctx, &domain, record_type.as_deref(), name.as_deref()).await
}

async fn add_record(ctx: &Ctx<'_>) -> Result<()> {
    let domain = required(ctx, "Domain", "domain")?;
    let name = required(ctx, "Name", "name")?;
    let record_type = required(ctx, "Type", "type")?;
    let data = required(ctx, "Data", "data")?;
    let ttl = ttl_or_default(ctx)?;

    let record = Record {
        name,
        record_type,
        data,
        ttl,
    };
    records::add(ctx, &domain, record, false).await
}

async fn update_record(ctx: &Ctx<'_>) -> Result<()> {
    let domain = required(ctx, "Domain", "domain")?;
    let name = required(ctx, "Name", "name")?;
    let record_type = required(ctx, "Type", "type")?;
    let data = required(ctx, "New data", "data")?;
    records::update(ctx, &domain, &name, &record_type, &data, false).await
}

async fn delete_records(ctx: &Ctx<'_>) -> Result<()> {
    let domain = required(ctx, "Domain", "domain")?;
    let record_type = optional(ctx, "Type (blank for all)")?;
    let name = optional(ctx, "Name (blank for all)")?;
    records::delete(ctx, &domain, name.as_deref(), record_type.as_deref(), false).await
}

fn required(ctx: &Ctx<'_>, label: &str, field: &'static str) -> Result<String> {
    let value = ctx.prompter.line(&format!("{label}: "))?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(value)
}

fn optional(ctx: &Ctx<'_>, label: &str) -> Result<Option<String>> {
    let value = ctx.prompter.line(&format!("{label}: "))?;
    let value = value.trim().to_string();
    Ok(if value.is_empty() { None } else { Some(value) })
}

fn ttl_or_default(ctx: &Ctx<'_>) -> Result<u32> {
    let value = ctx.prompter.line(&format!("TTL [{DEFAULT_TTL}]: "))?;
    let value = value.trim();
    if value.is_empty() {
        return Ok(DEFAULT_TTL);
    }
    match value.parse() {
        Ok(ttl) => Ok(ttl),
        Err(_) => {
            ctx.console
                .warn(&format!("Not a number; using {DEFAULT_TTL}."));
            Ok(DEFAULT_TTL)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::ScriptedPrompter;
    use crate::console::{Console, OutputMode};
    use crate::godaddy::testing::MockApi;

    #[tokio::test]
    async fn menu_runs_an_operation_then_quits() {
        let api = MockApi::with_domains(&["a.com"]);
        let console = Console::new(OutputMode::Plain);
        let prompter = ScriptedPrompter::with_lines(&["1", "q"]);
        let ctx = Ctx {
            api: &api,
            console: &console,
            prompter: &prompter,
        };

        run(&ctx).await.unwrap();
        assert_eq!(api.calls(), ["list_domains"]);
    }

    #[tokio::test]
    async fn menu_survives_a_failing_operation() {
        let api = MockApi::failing("boom");
        let console = Console::new(OutputMode::Plain);
        let prompter = ScriptedPrompter::with_lines(&["1", "q"]);
        let ctx = Ctx {
            api: &api,
            console: &console,
            prompter: &prompter,
        };

        // The error is reported inside the loop, not returned.
        run(&ctx).await.unwrap();
        assert_eq!(api.calls(), ["list_domains"]);
    }

    #[tokio::test]
    async fn blank_required_field_aborts_the_operation() {
        let api = MockApi::new();
        let console = Console::new(OutputMode::Plain);
        // Choice 2, then a blank domain, then quit.
        let prompter = ScriptedPrompter::with_lines(&["2", "", "q"]);
        let ctx = Ctx {
            api: &api,
            console: &console,
            prompter: &prompter,
        };

        run(&ctx).await.unwrap();
        assert!(api.calls().is_empty());
    }

    #[test]
    fn ttl_falls_back_on_garbage() {
        let api = MockApi::new();
        let console = Console::new(OutputMode::Plain);
        let prompter = ScriptedPrompter::with_lines(&["not-a-number"]);
        let ctx = Ctx {
            api: &api,
            console: &console,
            prompter: &prompter,
        };
        assert_eq!(ttl_or_default(&ctx).unwrap(), DEFAULT_TTL);
    }

    #[test]
    fn optional_blank_becomes_none() {
        let api = MockApi::new();
        let console = Console::new(OutputMode::Plain);
        let prompter = ScriptedPrompter::with_lines(&["   "]);
        let ctx = Ctx {
            api: &api,
            console: &console,
            prompter: &prompter,
        };
        assert_eq!(optional(&ctx, "Type").unwrap(), None);
    }
}
