//! End-to-end resolution pipeline tests
//!
//! Exercises the engine over the in-memory catalog fixture with scripted
//! extraction collaborators, covering the degraded paths as well as the
//! happy path.

use async_trait::async_trait;
use lexigraph::{
    error::Result, InMemoryCatalog, LexigraphError, LinkType, ResolutionEngine, Term,
    TermExtractor, TermId,
};
use std::sync::Arc;

/// Extractor that always answers with the same blob
struct ScriptedExtractor(String);

#[async_trait]
impl TermExtractor for ScriptedExtractor {
    async fn extract_terms(&self, _sentence: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Extractor that simulates a collaborator outage
struct UnreachableExtractor;

#[async_trait]
impl TermExtractor for UnreachableExtractor {
    async fn extract_terms(&self, _sentence: &str) -> Result<String> {
        Err(LexigraphError::Extraction(
            "connection refused".to_string(),
        ))
    }
}

fn programming_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    let algo = catalog.add_term("Алгоритм", "Конечный набор инструкций");
    let cycle = catalog.add_term("Цикл", "Конструкция для многократного выполнения");
    let cond = catalog.add_term("Условие", "Выражение, управляющее ветвлением");
    catalog.add_term("Функция", "Именованный переиспользуемый блок кода");
    catalog.link(algo, cycle, LinkType::Uses);
    catalog.link(algo, cond, LinkType::Uses);
    catalog
}

fn engine(catalog: InMemoryCatalog, extractor: impl TermExtractor + 'static) -> ResolutionEngine {
    ResolutionEngine::new(Arc::new(catalog), Arc::new(extractor))
}

#[tokio::test]
async fn truncated_sentence_resolves_anchor_and_neighbors() {
    let engine = engine(
        programming_catalog(),
        ScriptedExtractor("Алгоритм".to_string()),
    );

    let resolution = engine.resolve_and_expand("алгорит").await.unwrap();

    assert_eq!(resolution.anchor.unwrap().name, "Алгоритм");

    let related: Vec<_> = resolution.related.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(related.len(), 2);
    assert!(related.contains(&"Цикл"));
    assert!(related.contains(&"Условие"));
}

#[tokio::test]
async fn json_array_response_is_accepted() {
    let engine = engine(
        programming_catalog(),
        ScriptedExtractor(r#"["Цикл", "Функция"]"#.to_string()),
    );

    let terms = engine.resolve_terms_in_text("циклы и функции").await.unwrap();
    let names: Vec<_> = terms.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Цикл", "Функция"]);
}

#[tokio::test]
async fn malformed_blob_yields_empty_result_without_error() {
    let engine = engine(
        programming_catalog(),
        ScriptedExtractor(" ,,\n, ".to_string()),
    );

    // no candidates, and the sentence itself matches nothing
    let terms = engine
        .resolve_terms_in_text("о чем-то постороннем")
        .await
        .unwrap();
    assert!(terms.is_empty());
}

#[tokio::test]
async fn collaborator_outage_degrades_but_does_not_fail() {
    let engine = engine(programming_catalog(), UnreachableExtractor);

    let resolution = engine.resolve_and_expand("Цикл").await.unwrap();
    assert_eq!(resolution.anchor.unwrap().name, "Цикл");
}

#[tokio::test]
async fn anchor_prefers_normalized_exact_name_over_discovery_order() {
    // Collaborator names Алгоритм first; the sentence itself is "цикл"
    let engine = engine(
        programming_catalog(),
        ScriptedExtractor("Алгоритм, Цикл".to_string()),
    );

    let resolution = engine.resolve_and_expand("цикл").await.unwrap();
    assert_eq!(resolution.anchor.unwrap().name, "Цикл");
}

#[tokio::test]
async fn suffix_alternation_recovers_grammatical_variants() {
    let engine = engine(
        programming_catalog(),
        ScriptedExtractor("Условия".to_string()),
    );

    let terms = engine.resolve_terms_in_text("условия в коде").await.unwrap();
    assert_eq!(terms.len(), 1);
    assert_eq!(terms[0].name, "Условие");
}

#[tokio::test]
async fn repeated_resolution_is_stable() {
    let engine = engine(
        programming_catalog(),
        ScriptedExtractor("Цикл, Условие".to_string()),
    );

    let first = engine.resolve_terms_in_text("про циклы").await.unwrap();
    let second = engine.resolve_terms_in_text("про циклы").await.unwrap();

    let names: Vec<_> = first.iter().map(|t| t.name.as_str()).collect();
    let names2: Vec<_> = second.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, names2);
}

#[tokio::test]
async fn duplicate_catalog_names_are_all_resolved() {
    let mut catalog = programming_catalog();
    catalog.add(Term::new("Цикл", "второе определение из другого курса"));

    let engine = engine(catalog, ScriptedExtractor("Цикл".to_string()));

    let terms = engine.resolve_terms_in_text("про цикл").await.unwrap();
    let cycles = terms.iter().filter(|t| t.name == "Цикл").count();
    assert_eq!(cycles, 2);
}

#[tokio::test]
async fn connections_requires_known_identity() {
    let engine = engine(programming_catalog(), UnreachableExtractor);

    let missing = engine.connections(TermId::new()).await;
    assert!(matches!(missing, Err(LexigraphError::TermNotFound(_))));
}

#[tokio::test]
async fn isolated_term_has_empty_neighborhood() {
    let mut catalog = InMemoryCatalog::new();
    let lonely = catalog.add_term("Рекурсия", "..");

    let engine = engine(catalog, UnreachableExtractor);
    assert!(engine.connections(lonely).await.unwrap().is_empty());
}
