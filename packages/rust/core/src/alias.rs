//! Bot alias expansion.

use owners_shared::{AliasConfig, OwnersRecord};
use tracing::debug;

/// Expand the bot handle into its people, once per list.
///
/// If `alias.bot` appears anywhere in a list, each handle of
/// `alias.expands_to` not already in that list is appended. The bot itself is
/// kept. Applying this twice yields the same record.
pub fn expand_aliases(owners: &mut OwnersRecord, alias: &AliasConfig) {
    expand_list(&mut owners.approvers, alias);
    expand_list(&mut owners.reviewers, alias);
}

fn expand_list(list: &mut Vec<String>, alias: &AliasConfig) {
    if !list.iter().any(|h| *h == alias.bot) {
        return;
    }
    for handle in &alias.expands_to {
        if !list.contains(handle) {
            list.push(handle.clone());
        }
    }
    debug!(bot = %alias.bot, len = list.len(), "expanded bot alias");
}
