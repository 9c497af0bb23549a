use crate::commands::{CmdMessage, CmdResult, DisplayDoc};
use crate::config::SetsConfig;
use crate::error::{Result, SetsError};
use crate::model::{path_for_name, Document, Frontmatter};
use crate::query::{Clause, Clauses, Query};
use crate::store::VaultDb;
use tracing::info;

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SetsError::InvalidName("name cannot be empty".to_string()));
    }
    if name.contains(['/', '\\']) {
        return Err(SetsError::InvalidName(format!(
            "'{}' cannot contain path separators",
            name
        )));
    }
    Ok(name)
}

/// Create `<name>.md` with frontmatter that satisfies `clauses`.
///
/// `context_path` binds the context document for dynamic values, so
/// `collection hasthis` with a collection as context creates a member of it.
/// Fails with `NotCreatable` if any clause can't be enforced.
pub fn new_document<S: VaultDb>(
    store: &mut S,
    config: &SetsConfig,
    clauses: impl Into<Clauses>,
    context_path: Option<&str>,
    name: &str,
) -> Result<CmdResult> {
    let name = validate_name(name)?;
    let path = path_for_name(name);
    if store.document(&path).is_ok() {
        return Err(SetsError::AlreadyExists(path));
    }
    let context = context_path.map(|p| store.document(p)).transpose()?;

    let frontmatter = {
        let query = Query::compile(&*store, clauses, &[], context, config)?;
        let mut frontmatter = Frontmatter::new();
        query.enforce(&mut frontmatter)?;
        frontmatter
    };

    let doc = Document::new(path).with_frontmatter(frontmatter);
    store.insert(doc.clone())?;
    info!(path = %doc.path, "created document");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Created {}", doc.name())));
    Ok(result.with_affected_docs(vec![DisplayDoc::new(&*store, doc)]))
}

/// Create a new document of type `type_name`.
pub fn new_instance<S: VaultDb>(
    store: &mut S,
    config: &SetsConfig,
    type_name: &str,
    name: &str,
) -> Result<CmdResult> {
    let type_name = type_name.trim();
    if type_name.is_empty() {
        return Err(SetsError::InvalidName("type cannot be empty".to_string()));
    }
    new_document(
        store,
        config,
        Clause::eq(config.type_attribute.as_str(), type_name),
        None,
        name,
    )
}
