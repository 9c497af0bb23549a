use super::VaultDb;
use crate::attributes::{
    AttributeDef, AttributeKey, AttributeKind, FrontmatterAttribute, IntrinsicAttribute,
};
use crate::error::{Result, SetsError};
use crate::model::{Document, Frontmatter};
use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Map-backed vault. Documents are keyed by path; extrinsic attributes take
/// their kind from the declared properties and default to `any`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVault {
    docs: BTreeMap<String, Document>,
    properties: BTreeMap<String, AttributeKind>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(docs: impl IntoIterator<Item = Document>) -> Self {
        Self {
            docs: docs.into_iter().map(|d| (d.path.clone(), d)).collect(),
            properties: BTreeMap::new(),
        }
    }

    /// Parse a JSON snapshot: an array of documents.
    pub fn from_json(json: &str) -> Result<Self> {
        let docs: Vec<Document> = serde_json::from_str(json)?;
        Ok(Self::from_documents(docs))
    }

    pub fn load_snapshot(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let vault = Self::from_json(&json)?;
        debug!(path = %path.display(), documents = vault.len(), "loaded vault snapshot");
        Ok(vault)
    }

    pub fn to_json(&self) -> Result<String> {
        let docs: Vec<&Document> = self.docs.values().collect();
        Ok(serde_json::to_string_pretty(&docs)?)
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), documents = self.len(), "saved vault snapshot");
        Ok(())
    }

    pub fn with_property(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.declare_property(name, kind);
        self
    }

    pub fn with_properties(mut self, properties: BTreeMap<String, AttributeKind>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn declare_property(&mut self, name: impl Into<String>, kind: AttributeKind) {
        self.properties.insert(name.into(), kind);
    }

    pub fn property_kind(&self, name: &str) -> AttributeKind {
        self.properties.get(name).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn basename_is_unique(&self, doc: &Document) -> bool {
        self.docs
            .values()
            .filter(|other| other.path != doc.path && other.name() == doc.name())
            .count()
            == 0
    }
}

impl VaultDb for InMemoryVault {
    fn attribute_definition(&self, key: &AttributeKey) -> Result<AttributeDef> {
        match key {
            AttributeKey::Intrinsic(intrinsic) => Ok(Arc::new(IntrinsicAttribute::new(*intrinsic))),
            // `__` is reserved for intrinsics; an unknown one is a typo, not a field.
            AttributeKey::Extrinsic(name) if name.is_empty() || name.starts_with("__") => {
                Err(SetsError::UnresolvedAttribute(name.clone()))
            }
            AttributeKey::Extrinsic(name) => Ok(Arc::new(FrontmatterAttribute::new(
                name.clone(),
                self.property_kind(name),
            ))),
        }
    }

    fn generate_link(&self, doc: &Document) -> String {
        if self.basename_is_unique(doc) {
            format!("[[{}]]", doc.name())
        } else {
            format!("[[{}]]", doc.path_stem())
        }
    }

    fn documents(&self) -> Vec<Document> {
        self.docs.values().cloned().collect()
    }

    fn document(&self, path: &str) -> Result<Document> {
        self.docs
            .get(path)
            .cloned()
            .ok_or_else(|| SetsError::DocumentNotFound(path.to_string()))
    }

    fn insert(&mut self, doc: Document) -> Result<()> {
        if self.docs.contains_key(&doc.path) {
            return Err(SetsError::AlreadyExists(doc.path));
        }
        self.docs.insert(doc.path.clone(), doc);
        Ok(())
    }

    fn set_frontmatter(&mut self, path: &str, frontmatter: Frontmatter) -> Result<Document> {
        let doc = self
            .docs
            .get_mut(path)
            .ok_or_else(|| SetsError::DocumentNotFound(path.to_string()))?;
        doc.frontmatter = Some(frontmatter);
        doc.mtime = Utc::now();
        Ok(doc.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::attributes::AttrValue;
    use chrono::{DateTime, TimeZone};

    pub struct VaultFixture {
        pub vault: InMemoryVault,
    }

    impl Default for VaultFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Fixed timestamp `day` days into 2024, so fixtures sort deterministically.
    pub fn day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    impl VaultFixture {
        pub fn new() -> Self {
            Self {
                vault: InMemoryVault::new()
                    .with_property("priority", AttributeKind::Number)
                    .with_property("tags", AttributeKind::List)
                    .with_property("collection", AttributeKind::List)
                    .with_property("due", AttributeKind::Date),
            }
        }

        pub fn with_doc(mut self, doc: Document) -> Self {
            self.vault.insert(doc).unwrap();
            self
        }

        pub fn with_book(
            self,
            name: &str,
            status: &str,
            priority: i64,
            tags: &[&str],
            created: u32,
        ) -> Self {
            let mut doc = Document::new(format!("books/{}.md", name))
                .with_attr("type", "book")
                .with_attr("status", status)
                .with_attr("priority", priority)
                .with_attr("tags", tags.to_vec())
                .with_attr("collection", AttrValue::List(vec![]));
            doc.ctime = day(created);
            doc.mtime = day(created);
            self.with_doc(doc)
        }

        pub fn with_collection(self, name: &str) -> Self {
            self.with_doc(Document::new(format!("{}.md", name)).with_attr("type", "collection"))
        }

        pub fn with_bare_doc(self, path: &str) -> Self {
            self.with_doc(Document::new(path))
        }

        /// Append `link` to a document's collection list.
        pub fn in_collection(mut self, path: &str, link: &str) -> Self {
            let doc = self.vault.document(path).unwrap();
            let mut fm = doc.frontmatter.unwrap_or_default();
            let mut members = fm.remove("collection").unwrap_or_default().into_list();
            members.push(AttrValue::from(link));
            fm.insert("collection".to_string(), AttrValue::List(members));
            self.vault.set_frontmatter(path, fm).unwrap();
            self
        }

        /// Three books, two collections and a note without frontmatter.
        ///
        /// | doc | status | priority | tags | collection |
        /// |-----|--------|----------|------|------------|
        /// | Dune | done | 3 | scifi, classic | Reading List |
        /// | Neuromancer | todo | 5 | scifi, cyberpunk | |
        /// | Emma | todo | 1 | classic | Reading List, Favorites |
        pub fn library() -> Self {
            Self::new()
                .with_book("Dune", "done", 3, &["scifi", "classic"], 3)
                .with_book("Neuromancer", "todo", 5, &["scifi", "cyberpunk"], 1)
                .with_book("Emma", "todo", 1, &["classic"], 2)
                .with_collection("Reading List")
                .with_collection("Favorites")
                .with_bare_doc("notes/Scratch.md")
                .in_collection("books/Dune.md", "[[Reading List]]")
                .in_collection("books/Emma.md", "[[Reading List]]")
                .in_collection("books/Emma.md", "[[Favorites]]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::VaultFixture;
    use super::*;
    use crate::attributes::{AttrValue, IntrinsicAttributeKey};

    #[test]
    fn resolves_intrinsic_and_declared_keys() {
        let vault = VaultFixture::new().vault;

        let name = vault
            .attribute_definition(&AttributeKey::Intrinsic(IntrinsicAttributeKey::FileName))
            .unwrap();
        assert_eq!(name.kind(), AttributeKind::Text);

        let priority = vault.attribute_definition(&"priority".into()).unwrap();
        assert_eq!(priority.kind(), AttributeKind::Number);

        let undeclared = vault.attribute_definition(&"status".into()).unwrap();
        assert_eq!(undeclared.kind(), AttributeKind::Any);
    }

    #[test]
    fn rejects_unresolvable_keys() {
        let vault = InMemoryVault::new();
        for key in ["", "__bogus"] {
            let err = vault.attribute_definition(&AttributeKey::new(key)).unwrap_err();
            assert!(matches!(err, SetsError::UnresolvedAttribute(k) if k == key));
        }
    }

    #[test]
    fn links_use_basename_when_unique() {
        let vault = VaultFixture::library().vault;
        let dune = vault.document("books/Dune.md").unwrap();
        assert_eq!(vault.generate_link(&dune), "[[Dune]]");
    }

    #[test]
    fn links_use_path_when_basename_is_shared() {
        let vault = VaultFixture::new()
            .with_bare_doc("books/Dune.md")
            .with_bare_doc("films/Dune.md")
            .vault;
        let book = vault.document("books/Dune.md").unwrap();
        assert_eq!(vault.generate_link(&book), "[[books/Dune]]");
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut vault = InMemoryVault::new();
        vault.insert(Document::new("a.md")).unwrap();
        let err = vault.insert(Document::new("a.md")).unwrap_err();
        assert!(matches!(err, SetsError::AlreadyExists(p) if p == "a.md"));
    }

    #[test]
    fn set_frontmatter_replaces_block() {
        let mut vault = VaultFixture::library().vault;
        let mut fm = Frontmatter::new();
        fm.insert("status".to_string(), "done".into());

        let updated = vault.set_frontmatter("notes/Scratch.md", fm).unwrap();
        assert_eq!(updated.get("status"), Some(&AttrValue::from("done")));
        assert!(vault.document("notes/Scratch.md").unwrap().has_frontmatter());

        let err = vault
            .set_frontmatter("missing.md", Frontmatter::new())
            .unwrap_err();
        assert!(matches!(err, SetsError::DocumentNotFound(_)));
    }

    #[test]
    fn documents_are_in_path_order() {
        let vault = VaultFixture::library().vault;
        let paths: Vec<_> = vault.documents().into_iter().map(|d| d.path).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
        assert_eq!(paths.len(), 6);
    }

    #[test]
    fn snapshot_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vault.json");
        let vault = VaultFixture::library().vault;
        vault.save_snapshot(&path).unwrap();

        let loaded = InMemoryVault::load_snapshot(&path).unwrap();
        assert_eq!(loaded.documents(), vault.documents());
    }

    #[test]
    fn snapshot_parse_error() {
        assert!(matches!(
            InMemoryVault::from_json("{not json"),
            Err(SetsError::Serialization(_))
        ));
    }
}
