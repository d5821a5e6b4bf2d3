use std::path::Path;

use pahlavi_conllu::convert::{Boundary, Converter, Schema};
use pahlavi_conllu::pipeline::{ParseCorpus, Pipeline};
use pahlavi_conllu::{parse_corpus, Corpus, Error};

const HEADER: &str = "sent_id\tid\ttranscription\tlemma\tpostag\tpostfeatures\thead\tdeprel\tdeps\tmeaning";

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn two_row_sentence() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "text.tsv",
        &format!(
            "{}\nS1\t1\tabar\tabar\tADP\t_\t2\tcase\t_\tupon\nS1\t2\tōy\tōy\tPRON\tPerson=3\t0\troot\t_\thim\n",
            HEADER
        ),
    );

    let corpus = parse_corpus(src.path(), dst.path()).unwrap();

    let conllu = std::fs::read_to_string(dst.path().join("text.conllu")).unwrap();
    assert_eq!(
        conllu,
        "# sent_id = S1\n\
         # text = abar ōy\n\
         1\tabar\tabar\tADP\t_\t_\t2\tcase\t_\tupon\n\
         2\tōy\tōy\tPRON\t_\tPerson=3\t0\troot\t_\thim\n\
         \n"
    );

    assert_eq!(corpus.len(), 1);
    let sentence = &corpus.sentences()[0];
    assert_eq!(sentence.sentence_id(), "S1");
    assert_eq!(sentence.file_name(), Some("text.conllu"));
    let forms: Vec<&str> = sentence.tokens().iter().map(|t| t.form.as_str()).collect();
    assert_eq!(forms, vec!["abar", "ōy"]);
    assert_eq!(sentence.tokens()[1].feats.as_deref(), Some("Person=3"));
    assert_eq!(sentence.tokens()[0].head_number(), Some(2));
    assert_eq!(sentence.tokens()[0].xpos, None);
}

#[test]
fn every_token_line_has_ten_fields() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "a.csv",
        "id,transcription,lemma,meaning,extra\n1,\"a\tb\",x,\"multi\nline\",\n2,c,y,,z\n,,,,\n1,d,z,,\n",
    );

    Converter::default()
        .convert_dir(src.path(), dst.path())
        .unwrap();

    let conllu = std::fs::read_to_string(dst.path().join("a.conllu")).unwrap();
    let token_lines: Vec<&str> = conllu
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    assert_eq!(token_lines.len(), 3);
    for line in token_lines {
        assert_eq!(line.split('\t').count(), 10, "{:?}", line);
    }
}

#[test]
fn sentence_count_and_token_order() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    // three sentences: separator row, blank line, end of file
    write(
        src.path(),
        "a.csv",
        "id,transcription,lemma\n1,w1,l1\n2,w2,l2\n3,w3,l3\n,,\n1,w4,l4\n\n1,w5,l5\n2,w6,l6\n",
    );

    let reports = Converter::default()
        .convert_dir(src.path(), dst.path())
        .unwrap();
    assert_eq!(reports[0].sentences, 3);
    assert_eq!(reports[0].tokens, 6);

    let corpus = Corpus::from_dir(dst.path()).unwrap();
    assert_eq!(corpus.len(), 3);
    let forms: Vec<Vec<&str>> = corpus
        .iter()
        .map(|s| s.tokens().iter().map(|t| t.form.as_str()).collect())
        .collect();
    assert_eq!(
        forms,
        vec![vec!["w1", "w2", "w3"], vec!["w4"], vec!["w5", "w6"]]
    );
}

#[test]
fn short_rows_are_not_fatal() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "a.tsv",
        "id\ttranscription\tlemma\n1\tw1\tl1\n2\tw2\n3\tw3\tl3\n",
    );

    let reports = Converter::default()
        .convert_dir(src.path(), dst.path())
        .unwrap();
    assert_eq!(reports[0].skipped_rows, 1);

    let corpus = Corpus::from_dir(dst.path()).unwrap();
    let forms: Vec<&str> = corpus.sentences()[0]
        .tokens()
        .iter()
        .map(|t| t.form.as_str())
        .collect();
    assert_eq!(forms, vec!["w1", "w3"]);
}

#[test]
fn conversion_is_idempotent() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "a.csv",
        "sent_id,id,transcription,lemma\nS1,1,a,a\nS1,2,b,b\nS2,1,c,c\n",
    );
    write(src.path(), "b.tsv", "id\ttranscription\tlemma\n1\td\td\n");

    let converter = Converter::default();
    converter.convert_dir(src.path(), dst.path()).unwrap();
    let first_a = std::fs::read(dst.path().join("a.conllu")).unwrap();
    let first_b = std::fs::read(dst.path().join("b.conllu")).unwrap();

    converter.convert_dir(src.path(), dst.path()).unwrap();
    assert_eq!(first_a, std::fs::read(dst.path().join("a.conllu")).unwrap());
    assert_eq!(first_b, std::fs::read(dst.path().join("b.conllu")).unwrap());
}

#[test]
fn ids_are_unique_across_files() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(src.path(), "a.csv", "sent_id,id,transcription,lemma\nS1,1,a,a\n");
    write(src.path(), "b.csv", "sent_id,id,transcription,lemma\nS1,1,b,b\n");
    write(src.path(), "c.csv", "id,transcription,lemma\n1,c,c\n,,\n1,d,d\n");

    let corpus = parse_corpus(src.path(), dst.path()).unwrap();
    let ids: Vec<&str> = corpus.iter().map(|s| s.sentence_id()).collect();
    assert_eq!(ids, vec!["S1", "S1-2", "c-1", "c-2"]);
}

#[test]
fn sources_sharing_a_stem() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(src.path(), "a.csv", "sent_id,id,transcription,lemma\nS1,1,a,a\n");
    write(src.path(), "a.tsv", "sent_id\tid\ttranscription\tlemma\nS2\t1\tb\tb\n");

    let corpus = parse_corpus(src.path(), dst.path()).unwrap();
    let ids: Vec<&str> = corpus.iter().map(|s| s.sentence_id()).collect();
    assert_eq!(ids, vec!["S1", "S2"]);
    assert!(dst.path().join("a.conllu").exists());
    assert!(dst.path().join("a.tsv.conllu").exists());
    assert_eq!(corpus.sentences()[1].file_name(), Some("a.tsv.conllu"));
}

#[test]
fn custom_schema() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "a.txt.csv",
        "n;word;base\n1;a;a\n2;b;b\n1;c;c\n",
    );
    let schema: Schema = serde_json::from_str(
        r#"{
            "columns": {"id": "n", "form": "word", "lemma": "base"},
            "delimiter": ";",
            "boundaries": ["token_id_reset"]
        }"#,
    )
    .unwrap();
    assert_eq!(schema.boundaries, vec![Boundary::TokenIdReset]);

    let corpus = ParseCorpus::new(src.path().to_path_buf(), dst.path().to_path_buf(), schema)
        .run()
        .unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.sentences()[1].tokens()[0].lemma.as_deref(), Some("c"));
    assert!(dst.path().join("a.txt.conllu").exists());
}

#[test]
fn missing_source_directory() {
    let dst = tempfile::tempdir().unwrap();
    let missing = dst.path().join("missing");
    assert!(matches!(
        parse_corpus(&missing, dst.path()),
        Err(Error::DirectoryNotFound(_))
    ));
}

#[test]
fn json_export() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    write(src.path(), "a.csv", "id,transcription,lemma\n1,a,a\n");

    let corpus = parse_corpus(src.path(), dst.path()).unwrap();
    let json = serde_json::to_string(&corpus).unwrap();
    let back: Corpus = serde_json::from_str(&json).unwrap();
    assert_eq!(back, corpus);
}
