//! Record operations

use super::{require, Ctx};
use crate::console::confirm_or_skip;
use crate::error::Result;
use crate::godaddy::Record;

pub async fn list(
    ctx: &Ctx<'_>,
    domain: &str,
    record_type: Option<&str>,
    name: Option<&str>,
) -> Result<()> {
    require("domain", domain)?;

    let records = ctx.api.list_records(domain, record_type, name).await?;
    ctx.console.records(&records);
    Ok(())
}

pub async fn add(ctx: &Ctx<'_>, domain: &str, record: Record, force: bool) -> Result<()> {
    require("domain", domain)?;
    require("name", &record.name)?;
    require("type", &record.record_type)?;
    require("data", &record.data)?;

    confirm_or_skip(
        ctx.prompter,
        &format!(
            "Add {} record '{}' -> '{}' (ttl {}) on {}?",
            record.record_type, record.name, record.data, record.ttl, domain
        ),
        force,
    )?;

    ctx.api.create_record(domain, &record).await?;
    ctx.console.success(&format!(
        "Added {} record '{}' to {domain}",
        record.record_type, record.name
    ));
    Ok(())
}

pub async fn update(
    ctx: &Ctx<'_>,
    domain: &str,
    name: &str,
    record_type: &str,
    data: &str,
    force: bool,
) -> Result<()> {
    require("domain", domain)?;
    require("name", name)?;
    require("type", record_type)?;
    require("data", data)?;

    confirm_or_skip(
        ctx.prompter,
        &format!("Set {record_type} record '{name}' on {domain} to '{data}'?"),
        force,
    )?;

    ctx.api
        .upsert_record_value(data, domain, name, record_type)
        .await?;
    ctx.console
        .success(&format!("Updated {record_type} record '{name}' on {domain}"));
    Ok(())
}

pub async fn delete(
    ctx: &Ctx<'_>,
    domain: &str,
    name: Option<&str>,
    record_type: Option<&str>,
    force: bool,
) -> Result<()> {
    require("domain", domain)?;

    confirm_or_skip(
        ctx.prompter,
        &format!(
            "Delete {} on {domain}?",
            filter_phrase(record_type, name)
        ),
        force,
    )?;

    let deleted = ctx.api.delete_records(domain, name, record_type).await?;
    if deleted == 0 {
        ctx.console
            .warn(&format!("No records matched on {domain}; nothing deleted."));
    } else {
        ctx.console
            .success(&format!("Deleted {deleted} record(s) from {domain}"));
    }
    Ok(())
}

fn filter_phrase(record_type: Option<&str>, name: Option<&str>) -> String {
    match (record_type, name) {
        (Some(t), Some(n)) => format!("{t} records named '{n}'"),
        (Some(t), None) => format!("all {t} records"),
        (None, Some(n)) => format!("all records named '{n}'"),
        (None, None) => "ALL records".to_string(),
    }
}
