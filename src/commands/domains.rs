//! Domain listing

use super::Ctx;
use crate::error::Result;

pub async fn list(ctx: &Ctx<'_>) -> Result<()> {
    let domains = ctx.api.list_domains().await?;
    ctx.console.domains(&domains);
    Ok(())
}
