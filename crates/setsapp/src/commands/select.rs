use crate::commands::{plural, CmdMessage, CmdResult, DisplayDoc};
use crate::error::Result;
use crate::model::Document;
use crate::query::Query;
use crate::store::VaultDb;

/// Documents in `store` matching `query`, in the query's sort order.
pub fn matching<S: VaultDb>(store: &S, query: &Query<'_>) -> Result<Vec<Document>> {
    let mut docs = Vec::new();
    for doc in store.documents() {
        if query.matches(Some(&doc))? {
            docs.push(doc);
        }
    }
    query.sort(&mut docs);
    Ok(docs)
}

pub fn run<S: VaultDb>(store: &S, query: &Query<'_>) -> Result<CmdResult> {
    let docs = matching(store, query)?;
    let mut result = CmdResult::default();

    match query.infer_set_type() {
        Some(set_type) => result.add_message(CmdMessage::info(format!(
            "{} of type '{}'",
            plural(docs.len(), "document"),
            set_type
        ))),
        None => result.add_message(CmdMessage::info(plural(docs.len(), "document"))),
    }

    let listed = docs
        .into_iter()
        .map(|doc| DisplayDoc::new(store, doc))
        .collect();
    Ok(result.with_listed_docs(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SetsConfig;
    use crate::error::SetsError;
    use crate::query::{Clause, SortField};
    use crate::store::memory::fixtures::VaultFixture;

    #[test]
    fn lists_matches_in_sort_order() {
        let vault = VaultFixture::library().vault;
        let query = Query::compile(
            &vault,
            Clause::eq("type", "book"),
            &[SortField::desc("priority")],
            None,
            &SetsConfig::default(),
        )
        .unwrap();

        let result = run(&vault, &query).unwrap();
        assert_eq!(result.listed_names(), vec!["Neuromancer", "Dune", "Emma"]);
        assert_eq!(result.listed_docs[1].link, "[[Dune]]");
        assert_eq!(result.messages[0].content, "3 documents of type 'book'");
    }

    #[test]
    fn empty_result() {
        let vault = VaultFixture::library().vault;
        let query = Query::compile(
            &vault,
            Clause::eq("status", "abandoned"),
            &[],
            None,
            &SetsConfig::default(),
        )
        .unwrap();

        let result = run(&vault, &query).unwrap();
        assert!(result.listed_docs.is_empty());
        assert_eq!(result.messages[0].content, "0 documents");
    }

    #[test]
    fn missing_context_propagates() {
        let vault = VaultFixture::library().vault;
        let query = Query::compile(
            &vault,
            "collection:hasall:@link-to-this".parse::<Clause>().unwrap(),
            &[],
            None,
            &SetsConfig::default(),
        )
        .unwrap();

        assert!(matches!(
            run(&vault, &query),
            Err(SetsError::MissingContext(_))
        ));
    }
}
