//! End-to-end scenarios for the normalization pipeline and frequency tables.

use std::sync::Arc;

use palabras::error::Result;
use palabras::prelude::*;

fn records(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn identity_pipeline(stopwords: &[&str]) -> Result<Pipeline> {
    Pipeline::builder()
        .stopwords(Arc::new(StopwordSet::from_words(stopwords)))
        .lemmatizer(Arc::new(IdentityLemmatizer::new()))
        .build()
}

#[test]
fn test_worked_example_stage_by_stage() -> Result<()> {
    let input = records(&["Árbol, el PERRO corre."]);
    let stopwords = Arc::new(StopwordSet::from_words(["el"]));

    let normalized = Normalizer::new().apply(&input);
    assert_eq!(normalized, vec!["ARBOL, EL PERRO CORRE."]);

    let cleaned = Cleaner::new()?.apply(&normalized);
    assert_eq!(cleaned, vec!["ARBOL EL PERRO CORRE"]);

    let filtered = StopwordFilter::new(stopwords).apply(&cleaned);
    assert_eq!(filtered, vec!["ARBOL PERRO CORRE"]);

    let lemmatized = LemmaFilter::new(Arc::new(IdentityLemmatizer::new())).apply(&filtered);
    assert_eq!(lemmatized, vec!["ARBOL PERRO CORRE"]);

    let table = FrequencyTable::from_records(&lemmatized);
    assert_eq!(
        table.entries(),
        &[
            FrequencyEntry::new("ARBOL", 1),
            FrequencyEntry::new("CORRE", 1),
            FrequencyEntry::new("PERRO", 1),
        ]
    );
    Ok(())
}

#[test]
fn test_worked_example_through_pipeline() -> Result<()> {
    let pipeline = identity_pipeline(&["el"])?;
    let table = pipeline.dictionary(&records(&["Árbol, el PERRO corre."]));

    let pairs: Vec<(&str, u64)> = table
        .iter()
        .map(|entry| (entry.word.as_str(), entry.frequency))
        .collect();
    assert_eq!(pairs, vec![("ARBOL", 1), ("CORRE", 1), ("PERRO", 1)]);
    Ok(())
}

#[test]
fn test_empty_string_at_every_stage() -> Result<()> {
    let pipeline = identity_pipeline(&["el"])?;
    let input = records(&[""]);

    for stage in StageKind::ALL {
        assert_eq!(pipeline.run_through(&input, stage), vec![""], "stage {stage}");
    }
    assert!(FrequencyTable::from_records(&records(&["", "", ""])).is_empty());
    Ok(())
}

#[test]
fn test_only_stopwords() -> Result<()> {
    let pipeline = identity_pipeline(&["el", "la", "de"])?;
    let input = records(&["EL LA DE", "de la casa"]);

    assert_eq!(
        pipeline.run_through(&input, StageKind::RemoveStopwords),
        vec!["", "CASA"]
    );
    assert_eq!(pipeline.run(&input), vec!["", "CASA"]);
    Ok(())
}

#[test]
fn test_positions_are_preserved() -> Result<()> {
    let pipeline = Pipeline::builder()
        .stopwords(Arc::new(StopwordSet::spanish()))
        .lemmatizer(Arc::new(SuffixLemmatizer::new()))
        .build()?;
    let column = TextColumn::new(vec![
        Some("Reclamo por facturación".to_string()),
        None,
        Some("123 - ¿?".to_string()),
        Some("Solicitudes de reconexión".to_string()),
    ]);
    let input = column.resolve(MissingPolicy::Empty)?;

    let output = pipeline.run(&input);
    assert_eq!(
        output,
        vec!["RECLAMO FACTURACION", "", "", "SOLICITUD RECONEXION"]
    );
    Ok(())
}

#[test]
fn test_suffix_lemmatizer_reduces_plurals() -> Result<()> {
    let pipeline = Pipeline::builder()
        .stopwords(Arc::new(StopwordSet::spanish()))
        .lemmatizer(Arc::new(SuffixLemmatizer::new()))
        .build()?;
    let input = records(&["Árboles caídos y acciones pendientes", "Papeles, flores y luces"]);

    let table = pipeline.dictionary(&input);
    let words: Vec<&str> = table.iter().map(|entry| entry.word.as_str()).collect();
    assert_eq!(
        words,
        vec!["ACCION", "ARBOL", "CAIDO", "FLOR", "LUZ", "PAPEL", "PENDIENTE"]
    );
    Ok(())
}

#[test]
fn test_kept_symbols_count_as_one_token() -> Result<()> {
    let pipeline = identity_pipeline(&["el"])?;
    let output = pipeline.run(&records(&["«Hola» el perro…"]));
    assert_eq!(output, vec!["«HOLA» PERRO…"]);

    let table = FrequencyTable::from_records(&output);
    assert_eq!(table.len(), 2);
    assert_eq!(table.frequency("«HOLA»"), Some(1));
    assert_eq!(table.total(), 2);
    Ok(())
}

#[test]
fn test_spanish_defaults_end_to_end() -> Result<()> {
    let pipeline = Pipeline::builder()
        .stopwords(Arc::new(StopwordSet::spanish()))
        .lemmatizer(Arc::new(DictionaryLemmatizer::from_pairs([
            ("cortes", "corte"),
            ("postes", "poste"),
        ])))
        .parallel(true)
        .build()?;
    let input = records(&[
        "Cortes de luz en el sector N° 4",
        "CORTE de luz!!",
        "Postes caídos; cortes",
    ]);

    let table = pipeline.dictionary(&input);
    assert_eq!(table.frequency("CORTE"), Some(3));
    assert_eq!(table.frequency("LUZ"), Some(2));
    assert_eq!(table.frequency("POSTE"), Some(1));
    assert_eq!(table.frequency("N"), Some(1));
    assert_eq!(table.frequency("DE"), None);
    assert_eq!(table.total(), 9);
    Ok(())
}

#[test]
fn test_missing_collaborator_is_fatal() {
    let error = Pipeline::builder().build().unwrap_err();

    assert!(matches!(error, PalabrasError::Configuration(_)));
    assert!(error.to_string().contains("stopword set"));
}

#[test]
fn test_pipeline_is_shareable_across_threads() -> Result<()> {
    let pipeline = Arc::new(identity_pipeline(&["el"])?);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.run(&[format!("el hilo {i}")]))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), vec!["HILO"]);
    }
    Ok(())
}
