use crate::catalog::CardCatalog;
use crate::commands::CmdResult;
use crate::error::Result;

pub fn run<C: CardCatalog>(catalog: &C) -> Result<CmdResult> {
    Ok(CmdResult::default().with_stats(catalog.fetch_stats()?))
}
