//! Prompt mutation actions

use tracing::info;

use super::data::{insert_record, NewPrompt};
use super::models::TrendingPrompt;
use crate::common::{AdminCapability, AdminGrant, DirectoryError, DirectoryResult, PromptId};
use crate::kernel::ServerDeps;
use crate::store::{commit_create, commit_delete, EntityStore};

/// Add a trending prompt
pub async fn create_prompt(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    input: NewPrompt,
) -> DirectoryResult<TrendingPrompt> {
    grant.ensure(AdminCapability::ManagePrompts)?;

    if input.title.trim().is_empty() || input.prompt.trim().is_empty() {
        return Err(DirectoryError::Validation(
            "prompt title and text are required".to_string(),
        ));
    }

    let prompt = input.into_prompt();
    let record = insert_record(&prompt);
    let created = commit_create(&store.prompts, deps, prompt, record).await?;

    info!(prompt_id = %created.id, kind = %created.kind, "Prompt created");
    Ok(created)
}

/// Remove a trending prompt permanently
pub async fn delete_prompt(
    store: &EntityStore,
    deps: &ServerDeps,
    grant: &AdminGrant,
    id: &PromptId,
) -> DirectoryResult<TrendingPrompt> {
    grant.ensure(AdminCapability::ManagePrompts)?;

    let removed = commit_delete(&store.prompts, deps, id, |_| Ok(())).await?;

    info!(prompt_id = %id, "Prompt deleted");
    Ok(removed)
}
