use crate::commands::{plural, CmdMessage, CmdResult};
use crate::config::SetsConfig;
use crate::error::Result;
use crate::store::VaultDb;
use std::collections::BTreeSet;

/// Distinct values of the type attribute across the vault, sorted.
///
/// List-valued type attributes contribute each element. Empty values are
/// skipped.
pub fn run<S: VaultDb>(store: &S, config: &SetsConfig) -> Result<CmdResult> {
    let names: BTreeSet<String> = store
        .documents()
        .iter()
        .filter_map(|doc| doc.get(&config.type_attribute).cloned())
        .flat_map(|value| value.into_list())
        .filter_map(|value| value.stringify())
        .filter(|name| !name.trim().is_empty())
        .collect();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(plural(names.len(), "type")));
    Ok(result.with_values(names.into_iter().collect()))
}
